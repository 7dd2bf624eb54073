use crate::domain::Product;
use serde::{Deserialize, Deserializer, Serialize};

/// The `{"data": ...}` wrapper the service puts around every payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Response of `GET /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    // Must be present, but an empty collection may be encoded as `null`.
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Query parameters accepted by `GET /products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

/// `null` where a collection is expected decodes as the empty collection.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
