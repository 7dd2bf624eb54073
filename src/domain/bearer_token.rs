use secrecy::{ExposeSecret, Secret};

/// Opaque session credential issued by `POST /login`.
#[derive(Debug, Clone)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn parse(s: String) -> Result<BearerToken, String> {
        if s.trim().is_empty() {
            return Err("The bearer token must not be empty.".into());
        }
        Ok(Self(Secret::new(s)))
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}
