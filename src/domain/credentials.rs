use crate::domain::username::Username;
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Secret<String>,
}

impl Credentials {
    pub fn parse(username: String, password: Secret<String>) -> Result<Self, String> {
        let username = Username::parse(username)?;
        if password.expose_secret().is_empty() {
            return Err(format!("The password for {} must not be empty.", username));
        }
        Ok(Self { username, password })
    }
}
