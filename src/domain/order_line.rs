use crate::domain::resource_id::ResourceId;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

pub type OrderLineId = ResourceId;

/// A line of an order. `price` and `total` are in cents with VAT, `vat` is
/// in hundredths of a percent (2100 is 21.00%).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    #[serde(default)]
    pub product_id: u64,
    /// Decimal quantity. The service encodes it as a JSON string ("2.5"),
    /// but a plain number is accepted too.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub quantity: String,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub vat: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OrderLine {
    /// Decimal strings are compared by value: "2.50" and "2.5" are the same quantity.
    pub fn has_quantity(&self, quantity: &Quantity) -> bool {
        self.quantity
            .parse::<f64>()
            .is_ok_and(|value| value == quantity.value())
    }
}

/// A strictly positive decimal quantity, sent as a string to keep its precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity(String);

impl Quantity {
    pub fn parse(s: impl Into<String>) -> Result<Quantity, String> {
        let s = s.into();
        match s.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(Self(s.trim().to_string())),
            _ => Err(format!("{} is not a positive decimal quantity.", s)),
        }
    }

    fn value(&self) -> f64 {
        // Validated in `parse`.
        self.0.parse().unwrap_or_default()
    }
}

impl AsRef<str> for Quantity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One element of the array `POST /order_lines` expects.
///
/// Every field is mandatory for the service, and zero counts as missing.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderLine {
    pub product_id: u64,
    pub quantity: Quantity,
    pub price: u64,
    pub vat: u64,
    pub total: u64,
}

impl NewOrderLine {
    pub fn parse(
        product_id: u64,
        quantity: impl Into<String>,
        price: u64,
        vat: u64,
        total: u64,
    ) -> Result<Self, String> {
        for (name, value) in [
            ("product_id", product_id),
            ("price", price),
            ("vat", vat),
            ("total", total),
        ] {
            if value == 0 {
                return Err(format!("An order line {} of zero is treated as missing.", name));
            }
        }
        Ok(Self {
            product_id,
            quantity: Quantity::parse(quantity)?,
            price,
            vat,
            total,
        })
    }
}

/// Body of `PUT /order_lines/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderLineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl OrderLineUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.vat.is_none()
            && self.total.is_none()
    }
}
