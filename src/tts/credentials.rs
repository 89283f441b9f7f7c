//! Credential loading for the Google provider.
//!
//! Service-account keys go through `google-cloud-auth`, which mints,
//! caches and refreshes the cloud-platform access token. This module only
//! decides which kind of credential the process runs with.

use std::path::Path;

use google_cloud_auth::credentials::service_account::{AccessSpecifier, Builder};
use google_cloud_auth::credentials::{CacheableResource, Credentials as AuthCredentials};
use http::{Extensions, HeaderMap};
use serde::Deserialize;

use crate::tts::provider::ProviderFault;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("cannot read credentials file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported credentials type '{0}', expected 'service_account'")]
    UnsupportedType(String),

    #[error("cannot build service account credentials: {0}")]
    Build(String),
}

pub enum Credentials {
    ServiceAccount(ServiceAccount),
    ApiKey(String),
    None,
}

impl Credentials {
    /// Pick credentials by precedence: service-account file, API key, none.
    ///
    /// A key file that fails to load is logged and skipped so the process
    /// can still start and report itself degraded.
    pub fn resolve(key_file: Option<&Path>, api_key: Option<&str>) -> Self {
        if let Some(path) = key_file {
            match ServiceAccount::from_file(path) {
                Ok(account) => {
                    tracing::info!("Using service account {}", account.client_email);
                    return Credentials::ServiceAccount(account);
                }
                Err(e) => tracing::error!("Failed to load Google credentials: {}", e),
            }
        }

        match api_key {
            Some(key) if !key.is_empty() => {
                tracing::info!("Using Google API key");
                Credentials::ApiKey(key.to_string())
            }
            _ => {
                tracing::warn!(
                    "No Google credentials configured. Set GOOGLE_APPLICATION_CREDENTIALS \
                     to a service account key path or GOOGLE_API_KEY."
                );
                Credentials::None
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, Credentials::None)
    }
}

// Only the fields needed to reject the wrong key type early and to log
// which account is in use; the whole document goes to the auth builder.
#[derive(Deserialize)]
struct KeyFileHeader {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    client_email: String,
}

pub struct ServiceAccount {
    client_email: String,
    inner: AuthCredentials,
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CredentialsError> {
        let key: serde_json::Value = serde_json::from_str(raw)?;
        let header = KeyFileHeader::deserialize(&key)?;
        if header.kind != "service_account" {
            return Err(CredentialsError::UnsupportedType(header.kind));
        }

        let inner = Builder::new(key)
            .with_access_specifier(AccessSpecifier::from_scopes([CLOUD_PLATFORM_SCOPE]))
            .build()
            .map_err(|e| CredentialsError::Build(e.to_string()))?;

        Ok(Self {
            client_email: header.client_email,
            inner,
        })
    }

    /// Authorization headers for one outbound call. Token caching and
    /// refresh happen inside the auth client.
    pub async fn auth_headers(&self) -> Result<HeaderMap, ProviderFault> {
        match self.inner.headers(Extensions::new()).await {
            Ok(CacheableResource::New { data, .. }) => Ok(data),
            Ok(CacheableResource::NotModified) => Err(ProviderFault::Credentials(
                "auth client returned no headers".to_string(),
            )),
            Err(e) => Err(ProviderFault::Credentials(e.to_string())),
        }
    }
}
