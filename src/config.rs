use std::net::SocketAddr;
use std::path::PathBuf;

use crate::tts::google::GOOGLE_TTS_URL;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3010;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got '{0}'")]
    InvalidPort(String),

    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

/// Process settings read from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `GOOGLE_APPLICATION_CREDENTIALS`: service-account key file.
    pub credentials_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            credentials_path: var("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from),
            api_key: var("GOOGLE_API_KEY"),
            endpoint: var("GOOGLE_TTS_ENDPOINT").unwrap_or_else(|| GOOGLE_TTS_URL.to_string()),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
