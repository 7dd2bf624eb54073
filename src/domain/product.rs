use crate::domain::product_field::ProductField;
use crate::domain::resource_id::ResourceId;
use serde::{Deserialize, Serialize};

pub type ProductId = ResourceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    /// Fields the suite does not interpret (timestamps, stock, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub author: ProductField,
    pub title: ProductField,
}

impl NewProduct {
    pub fn parse(author: impl Into<String>, title: impl Into<String>) -> Result<Self, String> {
        Ok(Self {
            author: ProductField::parse(author)?,
            title: ProductField::parse(title)?,
        })
    }
}

/// Body of `PUT /products/{id}`. Absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ProductField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ProductField>,
}

impl ProductUpdate {
    pub fn parse(author: impl Into<String>, title: impl Into<String>) -> Result<Self, String> {
        Ok(NewProduct::parse(author, title)?.into())
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none()
    }
}

impl From<NewProduct> for ProductUpdate {
    fn from(product: NewProduct) -> Self {
        Self {
            author: Some(product.author),
            title: Some(product.title),
        }
    }
}
