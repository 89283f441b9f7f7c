use async_trait::async_trait;

use crate::error::AppError;
use crate::tts::request::SynthesisRequest;
use crate::tts::voice::ProviderVoice;

/// The remote speech service as seen by the gateway.
///
/// One handle is built at startup and shared by every request, so
/// implementations must not hold per-request state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Fetch the provider's full voice list, unfiltered.
    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderFault>;

    /// Synthesize MP3 audio for an already validated request.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderFault>;

    /// Whether credentials were loaded when the handle was built.
    fn has_credentials(&self) -> bool;
}

/// Structured failure reported by a provider call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProviderFault {
    /// The provider answered with an error payload.
    #[error("provider returned HTTP {http_status} ({}): {message}", .status.as_deref().unwrap_or("no status"))]
    Rpc {
        http_status: u16,
        /// RPC status name such as `INVALID_ARGUMENT`, when the body carried one.
        status: Option<String>,
        message: String,
    },

    #[error("could not connect to provider: {0}")]
    Unreachable(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no provider credentials configured")]
    MissingCredentials,

    /// Credentials are present but could not be exchanged for access.
    #[error("credential failure: {0}")]
    Credentials(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    InvalidInput,
    UpstreamUnavailable,
    Internal,
}

/// Map a provider fault onto the gateway's error taxonomy.
///
/// The RPC status name wins when present; the HTTP status is only consulted
/// for error bodies that carry no status.
pub fn classify(fault: &ProviderFault) -> FaultClass {
    match fault {
        ProviderFault::Rpc {
            status: Some(status),
            ..
        } => match status.as_str() {
            "UNAUTHENTICATED" | "PERMISSION_DENIED" | "RESOURCE_EXHAUSTED" | "UNAVAILABLE"
            | "DEADLINE_EXCEEDED" => FaultClass::UpstreamUnavailable,
            "INVALID_ARGUMENT" | "OUT_OF_RANGE" | "NOT_FOUND" | "FAILED_PRECONDITION" => {
                FaultClass::InvalidInput
            }
            _ => FaultClass::Internal,
        },
        ProviderFault::Rpc {
            http_status,
            status: None,
            ..
        } => match *http_status {
            401 | 403 | 429 | 503 | 504 => FaultClass::UpstreamUnavailable,
            400 | 404 | 422 => FaultClass::InvalidInput,
            _ => FaultClass::Internal,
        },
        ProviderFault::MissingCredentials
        | ProviderFault::Credentials(_)
        | ProviderFault::Unreachable(_) => FaultClass::UpstreamUnavailable,
        ProviderFault::Transport(_) | ProviderFault::Malformed(_) => FaultClass::Internal,
    }
}

impl From<ProviderFault> for AppError {
    fn from(fault: ProviderFault) -> Self {
        match classify(&fault) {
            // Provider text can carry project ids and trace data; it only
            // goes to the logs.
            FaultClass::InvalidInput => {
                tracing::warn!("Provider rejected parameters: {}", fault);
                AppError::InvalidInput("invalid voice or parameters".into())
            }
            FaultClass::UpstreamUnavailable => {
                tracing::warn!("Provider call not served: {}", fault);
                AppError::UpstreamUnavailable("text-to-speech provider unavailable".into())
            }
            FaultClass::Internal => AppError::Internal(fault.to_string()),
        }
    }
}
