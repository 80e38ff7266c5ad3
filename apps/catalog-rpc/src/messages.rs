//! Wire messages for `catalog.v1.ProductCatalog`.
//!
//! Equivalent proto definition:
//!
//! ```proto
//! message Product {
//!   int64 id = 1;
//!   string model = 2;
//!   optional string price = 3;     // decimal text, e.g. "599.99"
//!   optional string storage = 4;
//!   optional string color = 5;
//!   int32 stock = 6;
//! }
//! ```
//!
//! Prices travel as decimal strings so no precision is lost between the
//! `DECIMAL(10,2)` column and the client.

use catalog_core::{validation, Product, ValidationError};

/// One catalog row on the wire.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ProductMessage {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub model: String,
    #[prost(string, optional, tag = "3")]
    pub price: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub storage: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub color: Option<String>,
    #[prost(int32, tag = "6")]
    pub stock: i32,
}

impl From<Product> for ProductMessage {
    fn from(p: Product) -> Self {
        ProductMessage {
            id: p.id,
            model: p.model,
            price: p.price.map(|price| price.to_decimal_string()),
            storage: p.storage,
            color: p.color,
            stock: p.stock,
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListProductsRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListProductsResponse {
    #[prost(message, repeated, tag = "1")]
    pub products: Vec<ProductMessage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetProductRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

/// `product` is unset when the id is unknown or the lookup failed.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GetProductResponse {
    #[prost(message, optional, tag = "1")]
    pub product: Option<ProductMessage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddProductRequest {
    #[prost(string, tag = "1")]
    pub model: String,
    #[prost(string, optional, tag = "2")]
    pub price: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub storage: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub color: Option<String>,
    #[prost(int32, tag = "5")]
    pub stock: i32,
}

impl TryFrom<AddProductRequest> for Product {
    type Error = ValidationError;

    fn try_from(req: AddProductRequest) -> Result<Self, Self::Error> {
        to_product(req.model, req.price.as_deref(), req.storage, req.color, req.stock)
    }
}

/// `id` is the generated identifier, or -1 if the insert failed.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AddProductResponse {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EditProductRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub model: String,
    #[prost(string, optional, tag = "3")]
    pub price: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub storage: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub color: Option<String>,
    #[prost(int32, tag = "6")]
    pub stock: i32,
}

impl TryFrom<EditProductRequest> for Product {
    type Error = ValidationError;

    fn try_from(req: EditProductRequest) -> Result<Self, Self::Error> {
        let id = req.id;
        to_product(req.model, req.price.as_deref(), req.storage, req.color, req.stock)
            .map(|p| p.with_id(id))
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct EditProductResponse {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteProductRequest {
    #[prost(int64, tag = "1")]
    pub id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteProductResponse {
    #[prost(bool, tag = "1")]
    pub ok: bool,
}

fn to_product(
    model: String,
    price: Option<&str>,
    storage: Option<String>,
    color: Option<String>,
    stock: i32,
) -> Result<Product, ValidationError> {
    let model = validation::validate_model(&model)?;
    let price = match price {
        Some(text) => validation::parse_price(text)?,
        None => None,
    };

    Ok(Product::new(model, price, storage, color, stock))
}
