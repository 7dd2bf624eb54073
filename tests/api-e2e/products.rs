use crate::session::{authenticated_client, live_client, live_credentials};
use claims::assert_ok;
use product_api_e2e::scenarios::{
    NEW_PRODUCT_AUTHOR, NEW_PRODUCT_TITLE, UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE,
    create_product_returns_submitted_fields, deleted_product_is_no_longer_found,
    get_product_returns_requested_id, list_products_returns_data_envelope,
    repeated_registration_allows_login, update_product_applies_changes,
};

#[tokio::test]
async fn registering_twice_still_allows_login() {
    let outcome = repeated_registration_allows_login(&live_client(), &live_credentials()).await;

    assert_ok!(outcome);
}

#[tokio::test]
async fn create_product() {
    let client = authenticated_client().await;

    let product = assert_ok!(create_product_returns_submitted_fields(&client).await);

    assert_eq!(product.author, NEW_PRODUCT_AUTHOR);
    assert_eq!(product.title, NEW_PRODUCT_TITLE);
}

#[tokio::test]
async fn get_products() {
    let client = authenticated_client().await;

    assert_ok!(list_products_returns_data_envelope(&client).await);
}

#[tokio::test]
async fn get_product() {
    let client = authenticated_client().await;

    assert_ok!(get_product_returns_requested_id(&client).await);
}

#[tokio::test]
async fn update_product() {
    let client = authenticated_client().await;

    let product = assert_ok!(update_product_applies_changes(&client).await);

    assert_eq!(product.author, UPDATED_PRODUCT_AUTHOR);
    assert_eq!(product.title, UPDATED_PRODUCT_TITLE);
}

#[tokio::test]
async fn delete_product() {
    let client = authenticated_client().await;

    let status = assert_ok!(deleted_product_is_no_longer_found(&client).await);

    assert_ne!(status.as_u16(), 200);
}
