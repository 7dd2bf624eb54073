use crate::domain::envelope::null_as_default;
use crate::domain::product_field::ProductField;
use crate::domain::resource_id::ResourceId;
use serde::{Deserialize, Serialize};

pub type OrderId = ResourceId;

/// An order as served by `/orders`. Amounts are in cents, VAT included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines_id: Vec<i64>,
    #[serde(default)]
    pub cashout_number: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /orders`.
///
/// Every field is mandatory for the service, and a zero amount counts as
/// missing.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub customer: ProductField,
    pub total: u64,
    pub lines_id: Vec<i64>,
    pub cashout_number: u64,
}

impl NewOrder {
    pub fn parse(
        customer: impl Into<String>,
        total: u64,
        lines_id: Vec<i64>,
        cashout_number: u64,
    ) -> Result<Self, String> {
        if total == 0 {
            return Err("An order total of zero is treated as missing.".into());
        }
        if cashout_number == 0 {
            return Err("A cashout number of zero is treated as missing.".into());
        }
        Ok(Self {
            customer: ProductField::parse(customer)?,
            total,
            lines_id,
            cashout_number,
        })
    }
}

/// Body of `PUT /orders/{id}`.
///
/// `lines_id` is always sent: the service requires it even on a partial
/// update. The other absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<ProductField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub lines_id: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashout_number: Option<u64>,
}

impl From<NewOrder> for OrderUpdate {
    fn from(order: NewOrder) -> Self {
        Self {
            customer: Some(order.customer),
            total: Some(order.total),
            lines_id: order.lines_id,
            cashout_number: Some(order.cashout_number),
        }
    }
}
