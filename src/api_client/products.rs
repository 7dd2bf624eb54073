use super::{ApiError, AuthenticatedClient, Operation, expect_status, read_json, send};
use crate::domain::{NewProduct, PageRequest, Product, ProductId, ProductPage, ProductUpdate};
use reqwest::{Method, StatusCode};

const PRODUCTS: &str = "products";

impl AuthenticatedClient {
    #[tracing::instrument(name = "Creating product", skip(self))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.create(Operation::CreateProduct, PRODUCTS, product)
            .await
    }

    /// `page` of `None` lets the service apply its own defaults.
    #[tracing::instrument(name = "Listing products", skip(self))]
    pub async fn list_products(&self, page: Option<PageRequest>) -> Result<ProductPage, ApiError> {
        let operation = Operation::ListProducts;
        let mut request = self.request(Method::GET, &[PRODUCTS]);
        if let Some(page) = page {
            request = request.query(&page);
        }
        let response = send(operation, request).await?;
        let response = expect_status(operation, response, &[StatusCode::OK]).await?;
        read_json(operation, response).await
    }

    #[tracing::instrument(name = "Fetching product", skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.fetch(Operation::GetProduct, PRODUCTS, id).await
    }

    #[tracing::instrument(name = "Updating product", skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.update(Operation::UpdateProduct, PRODUCTS, id, update)
            .await
    }

    #[tracing::instrument(name = "Deleting product", skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete(Operation::DeleteProduct, PRODUCTS, id).await
    }
}
