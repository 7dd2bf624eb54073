use crate::api_client::{ApiClient, ApiError};
use crate::domain::Credentials;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_option_number_from_string;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub credentials: CredentialSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    /// Pre-shared key sent as `X-API-Key` on every request.
    /// Usually provided through `APP_API__API_KEY`.
    pub api_key: Secret<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub timeout_milliseconds: Option<u64>,
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_milliseconds
            .map(std::time::Duration::from_millis)
    }

    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(self.base_url.clone(), self.api_key.clone(), self.timeout())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CredentialSettings {
    pub username: String,
    pub password: Secret<String>,
}

impl CredentialSettings {
    pub fn credentials(&self) -> Result<Credentials, String> {
        Credentials::parse(self.username.clone(), self.password.clone())
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment = detect_environment(std::env::var("APP_ENVIRONMENT").ok())?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_API__API_KEY=secret` would set `Settings.api.api_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// Default to `local` if unspecified.
fn detect_environment(value: Option<String>) -> Result<Environment, config::ConfigError> {
    value
        .unwrap_or_else(|| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)
}

/// The possible runtime environment for the suite.
#[derive(Debug, PartialEq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
