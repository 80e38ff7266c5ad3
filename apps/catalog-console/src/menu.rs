//! # Console Menu
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  === Phone Catalog ===                                                  │
//! │  1. List products      ──► find_all                                     │
//! │  2. Find product by ID ──► find_by_id                                   │
//! │  3. Create product     ──► insert                                       │
//! │  4. Update product     ──► find_by_id, then update                      │
//! │  5. Delete product     ──► delete (after Y/N confirmation)              │
//! │  0. Exit                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every prompt reads one line. End of input at any prompt ends the
//! session the same way `0` does.

use std::io::{self, BufRead, Write};

use catalog_core::{validation, Money, Product, ValidationError, INSERT_FAILED};
use catalog_db::ProductRepository;
use tracing::debug;

const MENU: &str = "\n=== Phone Catalog ===
1. List products
2. Find product by ID
3. Create product
4. Update product
5. Delete product
0. Exit";

/// Whether the session keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Closed,
}

/// Interactive menu bound to a reader and a writer.
pub struct Menu<R, W> {
    products: ProductRepository,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(products: ProductRepository, input: R, output: W) -> Self {
        Menu {
            products,
            input,
            output,
        }
    }

    /// Hands back the writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `0` is chosen or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Option: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.list().await?,
                "2" => self.find().await?,
                "3" => self.create().await?,
                "4" => self.update().await?,
                "5" => self.delete().await?,
                "0" => break,
                _ => {
                    writeln!(self.output, "Invalid option")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Closed {
                break;
            }
        }

        writeln!(self.output, "Goodbye")?;
        self.output.flush()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    async fn list(&mut self) -> io::Result<Flow> {
        let products = self.products.find_all().await;

        if products.is_empty() {
            writeln!(self.output, "No products")?;
        }
        for product in &products {
            writeln!(self.output, "{}", format_row(product))?;
        }

        Ok(Flow::Continue)
    }

    async fn find(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Closed);
        };

        match self.products.find_by_id(id).await {
            Some(p) => writeln!(self.output, "Found: {} - {}", p.model, price_label(p.price))?,
            None => writeln!(self.output, "Not found")?,
        }

        Ok(Flow::Continue)
    }

    async fn create(&mut self) -> io::Result<Flow> {
        let Some(model) = self.prompt_with("Model: ", validation::validate_model)? else {
            return Ok(Flow::Closed);
        };
        let Some(price) = self.prompt_with("Price (blank for none): ", validation::parse_price)?
        else {
            return Ok(Flow::Closed);
        };
        let Some(storage) = self.prompt("Storage: ")? else {
            return Ok(Flow::Closed);
        };
        let Some(color) = self.prompt("Color: ")? else {
            return Ok(Flow::Closed);
        };
        let Some(stock) =
            self.prompt_with("Stock: ", |t| validation::parse_integer::<i32>("stock", t))?
        else {
            return Ok(Flow::Closed);
        };

        let mut product = Product::new(
            model,
            price,
            validation::optional_text(&storage),
            validation::optional_text(&color),
            stock,
        );

        match self.products.insert(&mut product).await {
            INSERT_FAILED => writeln!(self.output, "Failed to create product")?,
            id => writeln!(self.output, "Product created with ID: {id}")?,
        }

        Ok(Flow::Continue)
    }

    async fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Closed);
        };
        let Some(current) = self.products.find_by_id(id).await else {
            writeln!(self.output, "Product not found")?;
            return Ok(Flow::Continue);
        };

        // Blank input keeps the bracketed value
        let label = format!("Model [{}]: ", current.model);
        let Some(model) = self.prompt_with(&label, |t| {
            if t.is_empty() {
                Ok(current.model.clone())
            } else {
                validation::validate_model(t)
            }
        })?
        else {
            return Ok(Flow::Closed);
        };

        let shown = current.price.map(|p| p.to_decimal_string());
        let label = format!("Price [{}]: ", shown.as_deref().unwrap_or("-"));
        let Some(price) = self.prompt_with(&label, |t| {
            if t.is_empty() {
                Ok(current.price)
            } else {
                validation::parse_price(t)
            }
        })?
        else {
            return Ok(Flow::Closed);
        };

        let label = format!("Storage [{}]: ", text_label(&current.storage));
        let Some(storage) = self.prompt(&label)? else {
            return Ok(Flow::Closed);
        };

        let label = format!("Color [{}]: ", text_label(&current.color));
        let Some(color) = self.prompt(&label)? else {
            return Ok(Flow::Closed);
        };

        let label = format!("Stock [{}]: ", current.stock);
        let Some(stock) = self.prompt_with(&label, |t| {
            if t.is_empty() {
                Ok(current.stock)
            } else {
                validation::parse_integer::<i32>("stock", t)
            }
        })?
        else {
            return Ok(Flow::Closed);
        };

        let edited = Product {
            id: current.id,
            model,
            price,
            storage: validation::optional_text(&storage).or(current.storage),
            color: validation::optional_text(&color).or(current.color),
            stock,
        };

        if self.products.update(&edited).await {
            writeln!(self.output, "Updated")?;
        } else {
            writeln!(self.output, "Failed to update")?;
        }

        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Closed);
        };
        let Some(answer) = self.prompt("Confirm (Y/N): ")? else {
            return Ok(Flow::Closed);
        };

        if !answer.eq_ignore_ascii_case("y") {
            writeln!(self.output, "Cancelled")?;
            return Ok(Flow::Continue);
        }

        if self.products.delete(id).await {
            writeln!(self.output, "Deleted")?;
        } else {
            writeln!(self.output, "Failed to delete")?;
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Prompt helpers
    // =========================================================================

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so such a line is rejected
    /// like any other unparseable answer instead of ending the session.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Re-prompts until `parse` accepts the line.
    fn prompt_with<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(text) = self.prompt(label)? else {
                return Ok(None);
            };

            match parse(&text) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!(error = %e, "Rejected input");
                    writeln!(self.output, "{}", complaint(&e))?;
                }
            }
        }
    }

    fn prompt_id(&mut self) -> io::Result<Option<i64>> {
        self.prompt_with("ID: ", |t| validation::parse_integer::<i64>("id", t))
    }
}

/// One list line, e.g. `ID: 1 | X1 | $599.99 | 128GB | black | Stock: 10`.
pub fn format_row(product: &Product) -> String {
    format!(
        "ID: {} | {} | {} | {} | {} | Stock: {}",
        product.id,
        product.model,
        price_label(product.price),
        text_label(&product.storage),
        text_label(&product.color),
        product.stock
    )
}

fn price_label(price: Option<Money>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}

fn text_label(text: &Option<String>) -> &str {
    text.as_deref().unwrap_or("-")
}

fn complaint(error: &ValidationError) -> String {
    match error {
        ValidationError::InvalidNumber { .. } | ValidationError::InvalidPrice { .. } => {
            "Invalid number".to_string()
        }
        ValidationError::Required { field } => format!("The {field} is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_db::{ConnectionFactory, Database, DbConfig};
    use std::io::Cursor;
    use tempfile::TempDir;

    async fn test_repo() -> (TempDir, ProductRepository) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::sqlite(dir.path().join("console.db")))
            .await
            .unwrap();
        (dir, db.products())
    }

    async fn run_script(repo: &ProductRepository, script: &str) -> String {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut menu = Menu::new(repo.clone(), input, Vec::new());
        menu.run().await.unwrap();
        String::from_utf8(menu.into_output()).unwrap()
    }

    async fn insert_x1(repo: &ProductRepository) -> i64 {
        let mut phone = Product::new(
            "X1",
            Some("599.99".parse().unwrap()),
            Some("128GB"),
            Some("black"),
            10,
        );
        repo.insert(&mut phone).await
    }

    #[test]
    fn test_format_row_uses_dash_for_absent_values() {
        let full = Product::new("X1", Some(Money::from_cents(59999)), Some("128GB"), Some("black"), 10)
            .with_id(1);
        assert_eq!(format_row(&full), "ID: 1 | X1 | $599.99 | 128GB | black | Stock: 10");

        let bare = Product::new("X1 Mini", None, None::<String>, None::<String>, 0).with_id(2);
        assert_eq!(format_row(&bare), "ID: 2 | X1 Mini | - | - | - | Stock: 0");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "3\nX1\n599.99\n128GB\nblack\n10\n1\n0\n").await;

        assert!(out.contains("Product created with ID: 1"));
        assert!(out.contains("ID: 1 | X1 | $599.99 | 128GB | black | Stock: 10"));
        assert!(out.ends_with("Goodbye\n"));
    }

    #[tokio::test]
    async fn test_create_without_price_and_bad_stock() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "3\nNo Price\n\n\n\nten\n3\n2\n1\n").await;

        assert!(out.contains("Invalid number"));
        assert!(out.contains("Product created with ID: 1"));
        assert!(out.contains("Found: No Price - -"));

        let stored = repo.find_by_id(1).await.unwrap();
        assert_eq!(stored.price, None);
        assert_eq!(stored.storage, None);
        assert_eq!(stored.stock, 3);
    }

    #[tokio::test]
    async fn test_find_reports_missing_row() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "2\nabc\n7\n0\n").await;

        assert!(out.contains("Invalid number"));
        assert!(out.contains("Not found"));
    }

    #[tokio::test]
    async fn test_update_keeps_blank_fields() {
        let (_dir, repo) = test_repo().await;
        let id = insert_x1(&repo).await;

        let out = run_script(&repo, &format!("4\n{id}\n\n499.99\n\n\n8\n0\n")).await;

        assert!(out.contains("Model [X1]: "));
        assert!(out.contains("Price [599.99]: "));
        assert!(out.contains("Updated"));

        let stored = repo.find_by_id(id).await.unwrap();
        assert_eq!(stored.model, "X1");
        assert_eq!(stored.price, Some(Money::from_cents(49999)));
        assert_eq!(stored.storage.as_deref(), Some("128GB"));
        assert_eq!(stored.color.as_deref(), Some("black"));
        assert_eq!(stored.stock, 8);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "4\n99\n0\n").await;

        assert!(out.contains("Product not found"));
        assert!(!out.contains("Model ["));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (_dir, repo) = test_repo().await;
        let id = insert_x1(&repo).await;

        let out = run_script(&repo, &format!("5\n{id}\nn\n5\n{id}\nY\n2\n{id}\n5\n{id}\ny\n")).await;

        assert!(out.contains("Cancelled"));
        assert!(out.contains("Deleted"));
        assert!(out.contains("Not found"));
        assert!(out.contains("Failed to delete"));
        assert_eq!(repo.find_all().await, Vec::new());
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_rejected_not_fatal() {
        let (_dir, repo) = test_repo().await;

        let mut script = b"\xff\xfe\n2\n\xc3\n".to_vec();
        script.extend_from_slice(b"1\n0\n");
        let mut menu = Menu::new(repo.clone(), Cursor::new(script), Vec::new());
        menu.run().await.unwrap();
        let out = String::from_utf8(menu.into_output()).unwrap();

        assert!(out.contains("Invalid option"));
        assert!(out.contains("Invalid number"));
        assert!(out.contains("Not found"));
        assert!(out.ends_with("Goodbye\n"));
    }

    #[tokio::test]
    async fn test_price_beyond_column_is_reprompted() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "3\nX1\n1234567890123456.78\n599.99\n\n\n1\n1\n").await;

        assert!(out.contains("Invalid number"));
        assert!(out.contains("ID: 1 | X1 | $599.99 | - | - | Stock: 1"));
    }

    #[tokio::test]
    async fn test_invalid_option_and_exit() {
        let (_dir, repo) = test_repo().await;

        let out = run_script(&repo, "9\n0\n1\n").await;

        assert!(out.contains("Invalid option"));
        assert!(!out.contains("No products"));
    }

    #[tokio::test]
    async fn test_unreachable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("console.db");
        let repo = ProductRepository::new(ConnectionFactory::new(DbConfig::sqlite(missing)));

        let out = run_script(&repo, "3\nX1\n\n\n\n1\n1\n4\n1\n").await;

        assert!(out.contains("Failed to create product"));
        assert!(out.contains("No products"));
        assert!(out.contains("Product not found"));
    }
}
