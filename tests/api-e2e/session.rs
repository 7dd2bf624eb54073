use crate::common::TRACING;
use product_api_e2e::api_client::{ApiClient, AuthenticatedClient};
use product_api_e2e::configuration::{Settings, get_configuration};
use product_api_e2e::domain::{BearerToken, Credentials};
use product_api_e2e::scenarios::acquire_session;
use std::sync::LazyLock;
use tokio::sync::OnceCell;

// Register + login happen once per test binary. Every test gets its own
// client (each `#[tokio::test]` owns a runtime) with the token injected.
static SESSION_TOKEN: OnceCell<BearerToken> = OnceCell::const_new();

pub fn live_settings() -> Settings {
    LazyLock::force(&TRACING);
    get_configuration().expect("Failed to read configuration.")
}

pub fn live_client() -> ApiClient {
    live_settings()
        .api
        .client()
        .expect("Failed to build the API client.")
}

pub fn live_credentials() -> Credentials {
    live_settings()
        .credentials
        .credentials()
        .expect("Invalid fixture credentials.")
}

pub async fn authenticated_client() -> AuthenticatedClient {
    let token = SESSION_TOKEN
        .get_or_init(|| async {
            acquire_session(live_client(), &live_credentials())
                .await
                .expect("Failed to acquire a session against the live API.")
                .token()
                .clone()
        })
        .await;
    live_client().with_token(token.clone())
}
