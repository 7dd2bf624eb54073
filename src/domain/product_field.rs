use unicode_segmentation::UnicodeSegmentation;

/// A non-blank text attribute: a product `author` or `title`, an order `customer`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProductField(String);

impl ProductField {
    pub fn parse(s: impl Into<String>) -> Result<ProductField, String> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err("Text fields must not be blank.".into());
        }
        if s.graphemes(true).count() > 256 {
            return Err(format!("{} is longer than 256 characters.", s));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for ProductField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
