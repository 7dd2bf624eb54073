use super::{ApiClient, ApiError, Operation, expect_status, read_json, send};
use crate::domain::{BearerToken, Envelope, ResourceId};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client holding a bearer token: the only way to reach `/products`,
/// `/orders` and `/order_lines`.
#[derive(Clone, Debug)]
pub struct AuthenticatedClient {
    client: ApiClient,
    token: BearerToken,
}

impl AuthenticatedClient {
    pub(super) fn new(client: ApiClient, token: BearerToken) -> Self {
        Self { client, token }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// `POST /{collection}`: 201 with the created payload in the envelope.
    pub(super) async fn create<B, T>(
        &self,
        operation: Operation,
        collection: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, &[collection]).json(body);
        let response = send(operation, request).await?;
        let response = expect_status(operation, response, &[StatusCode::CREATED]).await?;
        let envelope: Envelope<T> = read_json(operation, response).await?;
        Ok(envelope.into_inner())
    }

    pub(super) async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        collection: &str,
        id: &ResourceId,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, &[collection, &id.to_string()]);
        let response = send(operation, request).await?;
        let response = expect_status(operation, response, &[StatusCode::OK]).await?;
        let envelope: Envelope<T> = read_json(operation, response).await?;
        Ok(envelope.into_inner())
    }

    /// `PUT /{collection}/{id}`: 200 with the updated payload in the envelope.
    pub(super) async fn update<B, T>(
        &self,
        operation: Operation,
        collection: &str,
        id: &ResourceId,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::PUT, &[collection, &id.to_string()])
            .json(body);
        let response = send(operation, request).await?;
        let response = expect_status(operation, response, &[StatusCode::OK]).await?;
        let envelope: Envelope<T> = read_json(operation, response).await?;
        Ok(envelope.into_inner())
    }

    /// `DELETE /{collection}/{id}`: anything but 204 is a failure.
    pub(super) async fn delete(
        &self,
        operation: Operation,
        collection: &str,
        id: &ResourceId,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &[collection, &id.to_string()]);
        let response = send(operation, request).await?;
        expect_status(operation, response, &[StatusCode::NO_CONTENT]).await?;
        Ok(())
    }

    pub(super) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client
            .request(method, segments)
            .header(AUTHORIZATION, self.token.header_value())
    }
}
