use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: i64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("fakeso/", env!("CARGO_PKG_VERSION"));

/// Where the forum server lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub server_url: Url,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut builder = Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?;
        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }
        builder
            .add_source(Environment::with_prefix("FAKESO"))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "server_url = \"https://forum.example.com\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.server_url.as_str(), "https://forum.example.com/");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.user_agent.starts_with("fakeso/"));
    }

    #[rstest]
    fn invalid_server_url_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "server_url = \"not a url\"").unwrap();

        assert!(ClientConfig::load(Some(file.path())).is_err());
    }
}
