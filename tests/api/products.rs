use crate::common::spawn_api;
use claims::{assert_err, assert_ok};
use product_api_e2e::domain::{PageRequest, ProductField, ProductId, ProductUpdate};
use product_api_e2e::scenarios::{
    NEW_PRODUCT_AUTHOR, NEW_PRODUCT_TITLE, UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE,
    create_product_returns_submitted_fields, deleted_product_is_no_longer_found,
    get_product_returns_requested_id, list_products_returns_data_envelope, new_product,
    update_product_applies_changes,
};

// ==================== Create ====================

#[tokio::test]
async fn create_product_returns_201_and_the_submitted_fields() {
    // Arrange
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    // Act
    let product = create_product_returns_submitted_fields(&client).await;

    // Assert
    let product = assert_ok!(product);
    assert_eq!(product.author, NEW_PRODUCT_AUTHOR);
    assert_eq!(product.title, NEW_PRODUCT_TITLE);
    assert_eq!(app.service.product_count(), 1);
}

#[tokio::test]
async fn each_created_product_gets_its_own_id() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    let first = client.create_product(&new_product().unwrap()).await.unwrap();
    let second = client.create_product(&new_product().unwrap()).await.unwrap();

    assert_ne!(first.id, second.id);
}

// ==================== List ====================

#[tokio::test]
async fn list_products_returns_a_data_envelope_even_when_empty() {
    // Arrange
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    // Act
    let page = list_products_returns_data_envelope(&client).await;

    // Assert
    let page = assert_ok!(page);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn list_products_honours_the_requested_page() {
    // Arrange
    let app = spawn_api().await;
    let client = app.authenticated_client().await;
    for _ in 0..3 {
        client.create_product(&new_product().unwrap()).await.unwrap();
    }

    // Act
    let page = client
        .list_products(Some(PageRequest {
            offset: 1,
            limit: 10,
        }))
        .await;

    // Assert
    let page = assert_ok!(page);
    assert_eq!(page.data.len(), 2);
    let pagination = page.pagination.expect("pagination block missing");
    assert_eq!(pagination.total_items, 3);
    assert_eq!(pagination.page, 1);
}

// ==================== Get ====================

#[tokio::test]
async fn get_product_returns_the_requested_id() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    let fetched = assert_ok!(get_product_returns_requested_id(&client).await);

    assert_eq!(fetched.id, ProductId::Number(1));
}

#[tokio::test]
async fn get_unknown_product_returns_404() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    let error = assert_err!(client.get_product(&ProductId::Number(9999)).await);

    assert_eq!(error.status().map(|s| s.as_u16()), Some(404));
}

// ==================== Update ====================

#[tokio::test]
async fn update_product_is_reflected_by_a_subsequent_get() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    let fetched = assert_ok!(update_product_applies_changes(&client).await);

    assert_eq!(fetched.author, UPDATED_PRODUCT_AUTHOR);
    assert_eq!(fetched.title, UPDATED_PRODUCT_TITLE);
}

#[tokio::test]
async fn a_partial_update_leaves_other_fields_untouched() {
    // Arrange
    let app = spawn_api().await;
    let client = app.authenticated_client().await;
    let created = client.create_product(&new_product().unwrap()).await.unwrap();
    let update = ProductUpdate {
        title: Some(ProductField::parse(UPDATED_PRODUCT_TITLE).unwrap()),
        ..Default::default()
    };

    // Act
    let updated = assert_ok!(client.update_product(&created.id, &update).await);

    // Assert
    assert_eq!(updated.author, NEW_PRODUCT_AUTHOR);
    assert_eq!(updated.title, UPDATED_PRODUCT_TITLE);
}

#[tokio::test]
async fn updating_a_missing_product_returns_404() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;
    let update = ProductUpdate::parse(UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE).unwrap();

    let error = assert_err!(client.update_product(&ProductId::Number(77), &update).await);

    assert_eq!(error.status().map(|s| s.as_u16()), Some(404));
}

// ==================== Delete ====================

#[tokio::test]
async fn a_deleted_product_is_reported_as_not_found() {
    // Arrange
    let app = spawn_api().await;
    let client = app.authenticated_client().await;

    // Act
    let status = deleted_product_is_no_longer_found(&client).await;

    // Assert
    let status = assert_ok!(status);
    assert_eq!(status.as_u16(), 404);
    assert_eq!(app.service.product_count(), 0);
}

#[tokio::test]
async fn deleting_a_product_twice_fails_the_second_time() {
    let app = spawn_api().await;
    let client = app.authenticated_client().await;
    let created = client.create_product(&new_product().unwrap()).await.unwrap();

    assert_ok!(client.delete_product(&created.id).await);
    let error = assert_err!(client.delete_product(&created.id).await);

    assert_eq!(error.status().map(|s| s.as_u16()), Some(404));
}
