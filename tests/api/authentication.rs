use crate::common::{FORGED_TOKEN, TEST_USERNAME, spawn_api};
use claims::{assert_err, assert_ok};
use product_api_e2e::api_client::{ApiError, Operation};
use product_api_e2e::domain::{BearerToken, Credentials};
use product_api_e2e::scenarios::{
    acquire_session, new_product, repeated_registration_allows_login,
};
use secrecy::Secret;

#[tokio::test]
async fn login_after_registration_returns_a_token() {
    // Arrange
    let app = spawn_api().await;

    // Act
    assert_ok!(app.api_client.register(&app.credentials).await);
    let token = app.api_client.login(&app.credentials).await;

    // Assert
    let token = assert_ok!(token);
    assert!(token.header_value().starts_with("Bearer token-user1-"));
}

#[tokio::test]
async fn registering_the_same_user_twice_does_not_block_login() {
    // Arrange
    let app = spawn_api().await;

    // Act
    let outcome = repeated_registration_allows_login(&app.api_client, &app.credentials).await;

    // Assert
    assert_ok!(outcome);
    assert_eq!(app.service.registered_users(), 1);
}

#[tokio::test]
async fn login_with_a_wrong_password_fails_with_401() {
    // Arrange
    let app = spawn_api().await;
    app.api_client.register(&app.credentials).await.unwrap();
    let wrong_password =
        Credentials::parse(TEST_USERNAME.into(), Secret::new("wrong-password".into())).unwrap();

    // Act
    let outcome = app.api_client.login(&wrong_password).await;

    // Assert
    let error = assert_err!(outcome);
    assert_eq!(error.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(error.operation(), Some(Operation::Login));
}

#[tokio::test]
async fn login_for_an_unknown_user_fails() {
    let app = spawn_api().await;

    let outcome = app.api_client.login(&app.credentials).await;

    assert_err!(outcome);
}

#[tokio::test]
async fn acquiring_a_session_yields_a_client_that_can_create_products() {
    // Arrange
    let app = spawn_api().await;

    // Act
    let session = assert_ok!(acquire_session(app.api_client.clone(), &app.credentials).await);

    // Assert
    assert_ok!(session.create_product(&new_product().unwrap()).await);
}

#[tokio::test]
async fn product_requests_with_a_forged_token_are_rejected_with_401() {
    // Arrange
    let app = spawn_api().await;
    let client = app
        .api_client
        .clone()
        .with_token(BearerToken::parse(FORGED_TOKEN.into()).unwrap());

    // Act
    let outcome = client.list_products(None).await;

    // Assert
    let error = assert_err!(outcome);
    assert_eq!(error.status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn requests_without_the_expected_api_key_are_not_served() {
    // Arrange
    let app = spawn_api().await;
    let client = app.client_with_api_key("not-the-key");

    // Act
    let outcome = client.register(&app.credentials).await;

    // Assert
    let error = assert_err!(outcome);
    assert!(matches!(error, ApiError::UnexpectedStatus { .. }));
    assert_eq!(app.service.registered_users(), 0);
}

#[tokio::test]
async fn health_check_succeeds_against_the_service_root() {
    let app = spawn_api().await;

    assert_ok!(app.api_client.health_check().await);
}
