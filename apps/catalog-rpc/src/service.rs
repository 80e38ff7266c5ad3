//! ProductCatalog gRPC service implementation.
//!
//! Each RPC maps onto exactly one sentinel repository call, so remote
//! callers see the same outcomes a local caller would: an unset product,
//! an id of `-1`, or `ok = false`. Only request validation fails with a
//! gRPC status.

use catalog_core::Product;
use catalog_db::ProductRepository;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

use crate::error::RpcError;
use crate::messages::{
    AddProductRequest, AddProductResponse, DeleteProductRequest, DeleteProductResponse,
    EditProductRequest, EditProductResponse, GetProductRequest, GetProductResponse,
    ListProductsRequest, ListProductsResponse, ProductMessage,
};
use crate::proto::product_catalog_server::ProductCatalog;

/// ProductCatalog service implementation.
#[derive(Debug, Clone)]
pub struct ProductCatalogService {
    products: ProductRepository,
}

impl ProductCatalogService {
    /// Create a new catalog service.
    pub fn new(products: ProductRepository) -> Self {
        ProductCatalogService { products }
    }
}

#[tonic::async_trait]
impl ProductCatalog for ProductCatalogService {
    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let products: Vec<ProductMessage> = self
            .products
            .find_all()
            .await
            .into_iter()
            .map(ProductMessage::from)
            .collect();

        debug!(count = products.len(), "ListProducts");

        Ok(Response::new(ListProductsResponse { products }))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        let id = request.into_inner().id;
        let product = self.products.find_by_id(id).await.map(ProductMessage::from);

        debug!(id, found = product.is_some(), "GetProduct");

        Ok(Response::new(GetProductResponse { product }))
    }

    async fn add_product(
        &self,
        request: Request<AddProductRequest>,
    ) -> Result<Response<AddProductResponse>, Status> {
        let mut product = Product::try_from(request.into_inner()).map_err(RpcError::from)?;
        let id = self.products.insert(&mut product).await;

        info!(id, model = %product.model, "AddProduct");

        Ok(Response::new(AddProductResponse { id }))
    }

    async fn edit_product(
        &self,
        request: Request<EditProductRequest>,
    ) -> Result<Response<EditProductResponse>, Status> {
        let product = Product::try_from(request.into_inner()).map_err(RpcError::from)?;
        let ok = self.products.update(&product).await;

        info!(id = product.id, ok, "EditProduct");

        Ok(Response::new(EditProductResponse { ok }))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<DeleteProductResponse>, Status> {
        let id = request.into_inner().id;
        let ok = self.products.delete(id).await;

        info!(id, ok, "DeleteProduct");

        Ok(Response::new(DeleteProductResponse { ok }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_db::{Database, DbConfig};
    use tempfile::TempDir;
    use tonic::Code;

    async fn test_service() -> (TempDir, ProductCatalogService) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::sqlite(dir.path().join("rpc.db")))
            .await
            .unwrap();
        (dir, ProductCatalogService::new(db.products()))
    }

    fn add_x1() -> AddProductRequest {
        AddProductRequest {
            model: "X1".to_string(),
            price: Some("599.99".to_string()),
            storage: Some("128GB".to_string()),
            color: Some("black".to_string()),
            stock: 10,
        }
    }

    #[tokio::test]
    async fn test_add_get_edit_delete() {
        let (_dir, service) = test_service().await;

        let id = service
            .add_product(Request::new(add_x1()))
            .await
            .unwrap()
            .into_inner()
            .id;
        assert_eq!(id, 1);

        let found = service
            .get_product(Request::new(GetProductRequest { id }))
            .await
            .unwrap()
            .into_inner()
            .product
            .unwrap();
        assert_eq!(found.model, "X1");
        assert_eq!(found.price.as_deref(), Some("599.99"));

        let edit = EditProductRequest {
            id,
            model: "X1".to_string(),
            price: Some("499.99".to_string()),
            storage: Some("128GB".to_string()),
            color: Some("black".to_string()),
            stock: 8,
        };
        assert!(service.edit_product(Request::new(edit)).await.unwrap().into_inner().ok);

        let listed = service
            .list_products(Request::new(ListProductsRequest {}))
            .await
            .unwrap()
            .into_inner()
            .products;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].price.as_deref(), Some("499.99"));
        assert_eq!(listed[0].stock, 8);

        let deleted = service
            .delete_product(Request::new(DeleteProductRequest { id }))
            .await
            .unwrap()
            .into_inner()
            .ok;
        assert!(deleted);

        let gone = service
            .get_product(Request::new(GetProductRequest { id }))
            .await
            .unwrap()
            .into_inner()
            .product;
        assert_eq!(gone, None);
    }

    #[tokio::test]
    async fn test_missing_rows_use_sentinels() {
        let (_dir, service) = test_service().await;

        let edit = EditProductRequest {
            id: 42,
            model: "Ghost".to_string(),
            ..Default::default()
        };
        assert!(!service.edit_product(Request::new(edit)).await.unwrap().into_inner().ok);

        let deleted = service
            .delete_product(Request::new(DeleteProductRequest { id: 42 }))
            .await
            .unwrap()
            .into_inner()
            .ok;
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_malformed_price_is_invalid_argument() {
        let (_dir, service) = test_service().await;

        for bad in ["12.345", "1234567890123456.78"] {
            let mut req = add_x1();
            req.price = Some(bad.to_string());

            let status = service.add_product(Request::new(req)).await.unwrap_err();
            assert_eq!(status.code(), Code::InvalidArgument);
        }

        let listed = service
            .list_products(Request::new(ListProductsRequest {}))
            .await
            .unwrap()
            .into_inner()
            .products;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_storage_reports_failure_id() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("rpc.db");
        let repo = ProductRepository::new(catalog_db::ConnectionFactory::new(DbConfig::sqlite(
            missing,
        )));
        let service = ProductCatalogService::new(repo);

        let id = service
            .add_product(Request::new(add_x1()))
            .await
            .unwrap()
            .into_inner()
            .id;
        assert_eq!(id, -1);
    }

    #[tokio::test]
    async fn test_over_the_wire() {
        use crate::proto::product_catalog_client::ProductCatalogClient;
        use crate::proto::product_catalog_server::ProductCatalogServer;
        use tokio::net::TcpListener;
        use tokio_stream::wrappers::TcpListenerStream;
        use tonic::transport::Server;

        let (_dir, service) = test_service().await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(
            Server::builder()
                .add_service(ProductCatalogServer::new(service))
                .serve_with_incoming(TcpListenerStream::new(listener)),
        );

        let mut client = ProductCatalogClient::connect(format!("http://{addr}"))
            .await
            .unwrap();

        let id = client.add_product(add_x1()).await.unwrap().into_inner().id;
        assert_eq!(id, 1);

        let product = client
            .get_product(GetProductRequest { id })
            .await
            .unwrap()
            .into_inner()
            .product
            .unwrap();
        assert_eq!(product.color.as_deref(), Some("black"));

        let mut bad = add_x1();
        bad.price = Some("cheap".to_string());
        let status = client.add_product(bad).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
