use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a product, order or order line.
///
/// The service decides the representation; numeric and string ids are
/// both carried through unchanged so that `GET /products/{id}` can be
/// compared against what `POST /products` returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Number(id) => write!(f, "{}", id),
            ResourceId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}
