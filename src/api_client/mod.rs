mod authenticated;
mod error;
mod orders;
mod products;

pub use authenticated::AuthenticatedClient;
pub use error::{ApiError, Operation};

use crate::domain::{BearerToken, Credentials};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

/// Client for the product service before a session has been established.
///
/// Only registration, login and the health check are available here;
/// product and order operations require an [`AuthenticatedClient`].
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: credentials.username.as_ref(),
            password: credentials.password.expose_secret(),
        }
    }
}

#[derive(serde::Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

impl ApiClient {
    /// `timeout` of `None` keeps reqwest's default (no overall request timeout).
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(ApiError::ClientBuild)?;
        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(ApiError::InvalidBaseUrl(base_url))?;
        Ok(Self {
            base_url,
            http_client,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Attach a token obtained earlier, skipping register and login.
    pub fn with_token(self, token: BearerToken) -> AuthenticatedClient {
        AuthenticatedClient::new(self, token)
    }

    #[tracing::instrument(name = "Checking API health", skip(self), fields(base_url = %self.base_url))]
    pub async fn health_check(&self) -> Result<(), ApiError> {
        let operation = Operation::HealthCheck;
        let response = send(operation, self.request(Method::GET, &[""])).await?;
        expect_status(operation, response, &[StatusCode::OK]).await?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Registering user",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let operation = Operation::Register;
        let request = self
            .request(Method::POST, &["register"])
            .json(&CredentialsBody::from(credentials));
        let response = send(operation, request).await?;
        expect_status(operation, response, &[StatusCode::OK, StatusCode::CREATED]).await?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Logging in",
        skip(self, credentials),
        fields(username = %credentials.username)
    )]
    pub async fn login(&self, credentials: &Credentials) -> Result<BearerToken, ApiError> {
        let operation = Operation::Login;
        let request = self
            .request(Method::POST, &["login"])
            .json(&CredentialsBody::from(credentials));
        let response = send(operation, request).await?;
        let response = expect_status(operation, response, &[StatusCode::OK]).await?;
        let LoginResponse { token } = read_json(operation, response).await?;
        token
            .and_then(|token| BearerToken::parse(token).ok())
            .ok_or(ApiError::MissingToken)
    }

    /// Register the user, log in and move to the authenticated state.
    pub async fn authenticate(
        self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedClient, ApiError> {
        self.register(credentials).await?;
        let token = self.login(credentials).await?;
        Ok(self.with_token(token))
    }

    /// Appends `segments` to the base path, percent-encoding each one, so
    /// that an id containing `/`, `?` or `#` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: `new` rejects URLs that cannot be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http_client
            .request(method, self.endpoint(segments))
            .header("X-API-Key", self.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
    }
}

async fn send(operation: Operation, request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|source| {
        tracing::error!("Failed to execute {} request: {:?}", operation, source);
        ApiError::Transport { operation, source }
    })
}

async fn expect_status(
    operation: Operation,
    response: Response,
    expected: &[StatusCode],
) -> Result<Response, ApiError> {
    let status = response.status();
    if expected.contains(&status) {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(%status, %body, "{} failed", operation);
    Err(ApiError::UnexpectedStatus {
        operation,
        status,
        body,
    })
}

async fn read_json<T: DeserializeOwned>(
    operation: Operation,
    response: Response,
) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ApiError::Transport { operation, source })?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::MalformedBody { operation, source })
}
