//! End-to-end scenarios against the product service.
//!
//! Every scenario receives the client it talks through as an argument.
//! The authenticated client is built once by [`acquire_session`] and then
//! handed to each scenario, so no scenario depends on hidden shared state.
use crate::api_client::{ApiClient, ApiError, AuthenticatedClient};
use crate::domain::{
    Credentials, NewOrder, NewOrderLine, NewProduct, Order, OrderLine, OrderLineUpdate,
    OrderUpdate, Product, ProductField, ProductPage, ProductUpdate, Quantity, ResourceId,
};
use reqwest::StatusCode;

pub const NEW_PRODUCT_AUTHOR: &str = "Jane Doe";
pub const NEW_PRODUCT_TITLE: &str = "New Product Title";
pub const UPDATED_PRODUCT_AUTHOR: &str = "John Smith";
pub const UPDATED_PRODUCT_TITLE: &str = "Updated Product Title";

pub const NEW_ORDER_CUSTOMER: &str = "Jane Doe";
pub const NEW_ORDER_TOTAL: u64 = 2420;
pub const NEW_ORDER_LINES: [i64; 2] = [1, 2];
pub const NEW_ORDER_CASHOUT_NUMBER: u64 = 1;
pub const UPDATED_ORDER_CUSTOMER: &str = "John Smith";
pub const UPDATED_ORDER_TOTAL: u64 = 3630;

// 2.5 x 12.10 with 21% VAT, in cents
pub const NEW_ORDER_LINE_QUANTITY: &str = "2.5";
pub const NEW_ORDER_LINE_PRICE: u64 = 1210;
pub const NEW_ORDER_LINE_VAT: u64 = 2100;
pub const NEW_ORDER_LINE_TOTAL: u64 = 3025;
pub const UPDATED_ORDER_LINE_QUANTITY: &str = "3.5";
pub const UPDATED_ORDER_LINE_TOTAL: u64 = 4235;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{resource} {field} mismatch: expected {expected:?}, got {actual:?}")]
    FieldMismatch {
        resource: &'static str,
        field: &'static str,
        expected: String,
        actual: String,
    },
    #[error("{resource} {id} was still served with 200 after being deleted")]
    StillPresent {
        resource: &'static str,
        id: ResourceId,
    },
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),
}

pub fn new_product() -> Result<NewProduct, ScenarioError> {
    NewProduct::parse(NEW_PRODUCT_AUTHOR, NEW_PRODUCT_TITLE).map_err(ScenarioError::InvalidFixture)
}

pub fn product_update() -> Result<ProductUpdate, ScenarioError> {
    ProductUpdate::parse(UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE)
        .map_err(ScenarioError::InvalidFixture)
}

pub fn new_order() -> Result<NewOrder, ScenarioError> {
    NewOrder::parse(
        NEW_ORDER_CUSTOMER,
        NEW_ORDER_TOTAL,
        NEW_ORDER_LINES.to_vec(),
        NEW_ORDER_CASHOUT_NUMBER,
    )
    .map_err(ScenarioError::InvalidFixture)
}

pub fn order_update() -> Result<OrderUpdate, ScenarioError> {
    Ok(OrderUpdate {
        customer: Some(
            ProductField::parse(UPDATED_ORDER_CUSTOMER).map_err(ScenarioError::InvalidFixture)?,
        ),
        total: Some(UPDATED_ORDER_TOTAL),
        lines_id: NEW_ORDER_LINES.to_vec(),
        cashout_number: None,
    })
}

pub fn new_order_line(product_id: u64) -> Result<NewOrderLine, ScenarioError> {
    NewOrderLine::parse(
        product_id,
        NEW_ORDER_LINE_QUANTITY,
        NEW_ORDER_LINE_PRICE,
        NEW_ORDER_LINE_VAT,
        NEW_ORDER_LINE_TOTAL,
    )
    .map_err(ScenarioError::InvalidFixture)
}

pub fn order_line_update() -> Result<OrderLineUpdate, ScenarioError> {
    Ok(OrderLineUpdate {
        quantity: Some(
            Quantity::parse(UPDATED_ORDER_LINE_QUANTITY).map_err(ScenarioError::InvalidFixture)?,
        ),
        total: Some(UPDATED_ORDER_LINE_TOTAL),
        ..Default::default()
    })
}

fn ensure_field(
    resource: &'static str,
    field: &'static str,
    expected: &str,
    actual: &str,
) -> Result<(), ScenarioError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ScenarioError::FieldMismatch {
            resource,
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn ensure_fields(product: &Product, author: &str, title: &str) -> Result<(), ScenarioError> {
    ensure_field("Product", "author", author, &product.author)?;
    ensure_field("Product", "title", title, &product.title)
}

fn ensure_order(order: &Order, customer: &str, total: u64) -> Result<(), ScenarioError> {
    ensure_field("Order", "customer", customer, &order.customer)?;
    ensure_field("Order", "total", &total.to_string(), &order.total.to_string())?;
    ensure_field(
        "Order",
        "lines_id",
        &format!("{:?}", NEW_ORDER_LINES),
        &format!("{:?}", order.lines_id),
    )?;
    ensure_field(
        "Order",
        "cashout_number",
        &NEW_ORDER_CASHOUT_NUMBER.to_string(),
        &order.cashout_number.to_string(),
    )
}

fn ensure_order_line(
    line: &OrderLine,
    product_id: u64,
    quantity: &str,
    total: u64,
) -> Result<(), ScenarioError> {
    let resource = "Order line";
    ensure_field(resource, "product_id", &product_id.to_string(), &line.product_id.to_string())?;
    let expected = Quantity::parse(quantity).map_err(ScenarioError::InvalidFixture)?;
    if !line.has_quantity(&expected) {
        return Err(ScenarioError::FieldMismatch {
            resource,
            field: "quantity",
            expected: quantity.to_string(),
            actual: line.quantity.clone(),
        });
    }
    ensure_field(resource, "price", &NEW_ORDER_LINE_PRICE.to_string(), &line.price.to_string())?;
    ensure_field(resource, "vat", &NEW_ORDER_LINE_VAT.to_string(), &line.vat.to_string())?;
    ensure_field(resource, "total", &total.to_string(), &line.total.to_string())
}

/// Maps the outcome of fetching a deleted resource to the status the
/// service answered with.
fn status_after_deletion<T>(
    resource: &'static str,
    id: ResourceId,
    fetched: Result<T, ApiError>,
) -> Result<StatusCode, ScenarioError> {
    match fetched {
        Ok(_) => Err(ScenarioError::StillPresent { resource, id }),
        Err(e) => match e.status() {
            Some(status) => Ok(status),
            // The request never completed: that says nothing about the resource.
            None => Err(e.into()),
        },
    }
}

/// unauthenticated -> authenticated
#[tracing::instrument(name = "Acquiring session", skip_all, fields(username = %credentials.username))]
pub async fn acquire_session(
    client: ApiClient,
    credentials: &Credentials,
) -> Result<AuthenticatedClient, ScenarioError> {
    Ok(client.authenticate(credentials).await?)
}

pub async fn repeated_registration_allows_login(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<(), ScenarioError> {
    client.register(credentials).await?;
    client.register(credentials).await?;
    client.login(credentials).await?;
    Ok(())
}

pub async fn create_product_returns_submitted_fields(
    client: &AuthenticatedClient,
) -> Result<Product, ScenarioError> {
    let product = client.create_product(&new_product()?).await?;
    ensure_fields(&product, NEW_PRODUCT_AUTHOR, NEW_PRODUCT_TITLE)?;
    Ok(product)
}

pub async fn list_products_returns_data_envelope(
    client: &AuthenticatedClient,
) -> Result<ProductPage, ScenarioError> {
    Ok(client.list_products(None).await?)
}

pub async fn get_product_returns_requested_id(
    client: &AuthenticatedClient,
) -> Result<Product, ScenarioError> {
    let created = client.create_product(&new_product()?).await?;
    let fetched = client.get_product(&created.id).await?;
    ensure_field("Product", "id", &created.id.to_string(), &fetched.id.to_string())?;
    Ok(fetched)
}

/// Checks both the `PUT` response and a subsequent `GET`.
pub async fn update_product_applies_changes(
    client: &AuthenticatedClient,
) -> Result<Product, ScenarioError> {
    let created = client.create_product(&new_product()?).await?;
    let updated = client
        .update_product(&created.id, &product_update()?)
        .await?;
    ensure_fields(&updated, UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE)?;

    let fetched = client.get_product(&created.id).await?;
    ensure_fields(&fetched, UPDATED_PRODUCT_AUTHOR, UPDATED_PRODUCT_TITLE)?;
    Ok(fetched)
}

/// Returns the status the service answered with when asked for the deleted product.
pub async fn deleted_product_is_no_longer_found(
    client: &AuthenticatedClient,
) -> Result<StatusCode, ScenarioError> {
    let created = client.create_product(&new_product()?).await?;
    client.delete_product(&created.id).await?;

    let fetched = client.get_product(&created.id).await;
    status_after_deletion("Product", created.id, fetched)
}

pub async fn create_order_returns_submitted_fields(
    client: &AuthenticatedClient,
) -> Result<Order, ScenarioError> {
    let order = client.create_order(&new_order()?).await?;
    ensure_order(&order, NEW_ORDER_CUSTOMER, NEW_ORDER_TOTAL)?;
    Ok(order)
}

pub async fn get_order_returns_requested_id(
    client: &AuthenticatedClient,
) -> Result<Order, ScenarioError> {
    let created = client.create_order(&new_order()?).await?;
    let fetched = client.get_order(&created.id).await?;
    ensure_field("Order", "id", &created.id.to_string(), &fetched.id.to_string())?;
    Ok(fetched)
}

/// Checks both the `PUT` response and a subsequent `GET`.
pub async fn update_order_applies_changes(
    client: &AuthenticatedClient,
) -> Result<Order, ScenarioError> {
    let created = client.create_order(&new_order()?).await?;
    let updated = client.update_order(&created.id, &order_update()?).await?;
    ensure_order(&updated, UPDATED_ORDER_CUSTOMER, UPDATED_ORDER_TOTAL)?;

    let fetched = client.get_order(&created.id).await?;
    ensure_order(&fetched, UPDATED_ORDER_CUSTOMER, UPDATED_ORDER_TOTAL)?;
    Ok(fetched)
}

pub async fn deleted_order_is_no_longer_found(
    client: &AuthenticatedClient,
) -> Result<StatusCode, ScenarioError> {
    let created = client.create_order(&new_order()?).await?;
    client.delete_order(&created.id).await?;

    let fetched = client.get_order(&created.id).await;
    status_after_deletion("Order", created.id, fetched)
}

/// Order lines refer to a product by its numeric id, so one is created first.
async fn line_product_id(client: &AuthenticatedClient) -> Result<u64, ScenarioError> {
    match client.create_product(&new_product()?).await?.id {
        ResourceId::Number(id) => Ok(id),
        ResourceId::Text(id) => Err(ScenarioError::InvalidFixture(format!(
            "Order lines need a numeric product id, got {:?}",
            id
        ))),
    }
}

async fn create_order_line(
    client: &AuthenticatedClient,
) -> Result<(u64, OrderLine), ScenarioError> {
    let product_id = line_product_id(client).await?;
    let created = client
        .create_order_lines(&[new_order_line(product_id)?])
        .await?;
    match <[OrderLine; 1]>::try_from(created) {
        Ok([line]) => Ok((product_id, line)),
        Err(created) => Err(ScenarioError::FieldMismatch {
            resource: "Order line",
            field: "count",
            expected: "1".into(),
            actual: created.len().to_string(),
        }),
    }
}

/// Posts two lines in one request and expects both back, in order.
pub async fn create_order_lines_returns_submitted_fields(
    client: &AuthenticatedClient,
) -> Result<Vec<OrderLine>, ScenarioError> {
    let product_id = line_product_id(client).await?;
    let line = new_order_line(product_id)?;
    let created = client
        .create_order_lines(&[line.clone(), line])
        .await?;
    ensure_field("Order line", "count", "2", &created.len().to_string())?;
    for line in &created {
        ensure_order_line(line, product_id, NEW_ORDER_LINE_QUANTITY, NEW_ORDER_LINE_TOTAL)?;
    }
    Ok(created)
}

pub async fn get_order_line_returns_requested_id(
    client: &AuthenticatedClient,
) -> Result<OrderLine, ScenarioError> {
    let (_, created) = create_order_line(client).await?;
    let fetched = client.get_order_line(&created.id).await?;
    ensure_field("Order line", "id", &created.id.to_string(), &fetched.id.to_string())?;
    Ok(fetched)
}

/// Checks both the `PUT` response and a subsequent `GET`.
pub async fn update_order_line_applies_changes(
    client: &AuthenticatedClient,
) -> Result<OrderLine, ScenarioError> {
    let (product_id, created) = create_order_line(client).await?;
    let updated = client
        .update_order_line(&created.id, &order_line_update()?)
        .await?;
    ensure_order_line(&updated, product_id, UPDATED_ORDER_LINE_QUANTITY, UPDATED_ORDER_LINE_TOTAL)?;

    let fetched = client.get_order_line(&created.id).await?;
    ensure_order_line(&fetched, product_id, UPDATED_ORDER_LINE_QUANTITY, UPDATED_ORDER_LINE_TOTAL)?;
    Ok(fetched)
}

pub async fn deleted_order_line_is_no_longer_found(
    client: &AuthenticatedClient,
) -> Result<StatusCode, ScenarioError> {
    let (_, created) = create_order_line(client).await?;
    client.delete_order_line(&created.id).await?;

    let fetched = client.get_order_line(&created.id).await;
    status_after_deletion("Order line", created.id, fetched)
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub result: Result<(), ScenarioError>,
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    fn record<T>(&mut self, name: &'static str, result: Result<T, ScenarioError>) {
        let result = result.map(|_| ());
        match &result {
            Ok(()) => tracing::info!(scenario = name, "Scenario passed"),
            Err(e) => tracing::error!(scenario = name, error = %e, "Scenario failed"),
        }
        self.outcomes.push(ScenarioOutcome { name, result });
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }
}

/// Run every scenario in order, one request in flight at a time.
///
/// The health check only logs a warning, since a service may not expose a
/// root route at all. Fails fast only when the session setup fails, since
/// no scenario can run without it.
#[tracing::instrument(
    name = "Running product API suite",
    skip_all,
    fields(base_url = %client.base_url())
)]
pub async fn run_suite(
    client: ApiClient,
    credentials: &Credentials,
) -> Result<SuiteReport, ScenarioError> {
    if let Err(e) = client.health_check().await {
        tracing::warn!(error = %e, "Health check failed, continuing with the session setup");
    }
    let session = acquire_session(client.clone(), credentials).await?;

    let mut report = SuiteReport::default();
    report.record(
        "repeated_registration_allows_login",
        repeated_registration_allows_login(&client, credentials).await,
    );
    report.record(
        "create_product_returns_submitted_fields",
        create_product_returns_submitted_fields(&session).await,
    );
    report.record(
        "list_products_returns_data_envelope",
        list_products_returns_data_envelope(&session).await,
    );
    report.record(
        "get_product_returns_requested_id",
        get_product_returns_requested_id(&session).await,
    );
    report.record(
        "update_product_applies_changes",
        update_product_applies_changes(&session).await,
    );
    report.record(
        "deleted_product_is_no_longer_found",
        deleted_product_is_no_longer_found(&session).await,
    );
    report.record(
        "create_order_returns_submitted_fields",
        create_order_returns_submitted_fields(&session).await,
    );
    report.record(
        "get_order_returns_requested_id",
        get_order_returns_requested_id(&session).await,
    );
    report.record(
        "update_order_applies_changes",
        update_order_applies_changes(&session).await,
    );
    report.record(
        "deleted_order_is_no_longer_found",
        deleted_order_is_no_longer_found(&session).await,
    );
    report.record(
        "create_order_lines_returns_submitted_fields",
        create_order_lines_returns_submitted_fields(&session).await,
    );
    report.record(
        "get_order_line_returns_requested_id",
        get_order_line_returns_requested_id(&session).await,
    );
    report.record(
        "update_order_line_applies_changes",
        update_order_line_applies_changes(&session).await,
    );
    report.record(
        "deleted_order_line_is_no_longer_found",
        deleted_order_line_is_no_longer_found(&session).await,
    );
    Ok(report)
}
