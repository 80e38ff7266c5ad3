//! # Catalog Console
//!
//! Line-oriented menu over the phone catalog.
//!
//! ## Module Organization
//! ```text
//! catalog_console/
//! ├── lib.rs     ◄─── You are here (logging setup & exports)
//! └── menu.rs    ◄─── Menu loop and the five catalog actions
//! ```
//!
//! The binary wires [`Menu`] to stdin/stdout; tests drive it with an
//! in-memory reader and writer.

pub mod menu;

use tracing_subscriber::EnvFilter;

pub use menu::{format_row, Menu};

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so the menu on stdout stays readable.
/// Default filter: `info,catalog=debug,sqlx=warn`, overridable with `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
