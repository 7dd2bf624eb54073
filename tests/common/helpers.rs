use crate::common::fake_product_service::FakeProductService;
use crate::common::test_data::{API_PREFIX, TEST_API_KEY, TEST_PASSWORD, TEST_USERNAME};
use product_api_e2e::api_client::{ApiClient, AuthenticatedClient};
use product_api_e2e::domain::Credentials;
use product_api_e2e::telemetry::{get_subscriber, init_subscriber};
use secrecy::Secret;
use std::sync::LazyLock;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
pub static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    let loglevel = std::env::var("LOGLEVEL").unwrap_or(default_filter_level);
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value of `TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, loglevel, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApi {
    pub server: MockServer,
    pub service: FakeProductService,
    pub api_client: ApiClient,
    pub credentials: Credentials,
}

impl TestApi {
    pub async fn authenticated_client(&self) -> AuthenticatedClient {
        self.api_client
            .clone()
            .authenticate(&self.credentials)
            .await
            .expect("Failed to authenticate against the stand-in service.")
    }

    /// A client for the same server that sends `api_key` instead of the expected one.
    pub fn client_with_api_key(&self, api_key: &str) -> ApiClient {
        build_api_client(&self.server, api_key)
    }
}

pub fn fixture_credentials() -> Credentials {
    Credentials::parse(TEST_USERNAME.into(), Secret::new(TEST_PASSWORD.into()))
        .expect("Invalid fixture credentials.")
}

fn build_api_client(server: &MockServer, api_key: &str) -> ApiClient {
    ApiClient::new(
        format!("{}{}", server.uri(), API_PREFIX),
        Secret::new(api_key.into()),
        Some(std::time::Duration::from_secs(5)),
    )
    .expect("Failed to build the API client.")
}

pub async fn spawn_api_with(service: FakeProductService) -> TestApi {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;
    service.mount(&server, TEST_API_KEY).await;
    let api_client = build_api_client(&server, TEST_API_KEY);

    TestApi {
        server,
        service,
        api_client,
        credentials: fixture_credentials(),
    }
}

pub async fn spawn_api() -> TestApi {
    spawn_api_with(FakeProductService::default()).await
}
