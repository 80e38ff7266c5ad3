//! Build script for catalog-rpc.
//!
//! Generates the `catalog.v1.ProductCatalog` server and client stubs with
//! tonic-build's manual builder. The message types are hand-written prost
//! structs in `src/messages.rs`, so no `.proto` file or `protoc` binary is
//! involved.
//!
//! ## Generated Code
//! - `product_catalog_server::{ProductCatalog, ProductCatalogServer}`
//! - `product_catalog_client::ProductCatalogClient`

use tonic_build::manual::{Builder, Method, Service};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let service = Service::builder()
        .name("ProductCatalog")
        .package("catalog.v1")
        .method(unary("list_products", "ListProducts", "ListProductsRequest", "ListProductsResponse"))
        .method(unary("get_product", "GetProduct", "GetProductRequest", "GetProductResponse"))
        .method(unary("add_product", "AddProduct", "AddProductRequest", "AddProductResponse"))
        .method(unary("edit_product", "EditProduct", "EditProductRequest", "EditProductResponse"))
        .method(unary("delete_product", "DeleteProduct", "DeleteProductRequest", "DeleteProductResponse"))
        .build();

    Builder::new().compile(&[service]);
}

/// A unary RPC whose messages live in `crate::messages`.
fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::messages::{input}"))
        .output_type(format!("crate::messages::{output}"))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}
