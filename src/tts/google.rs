//! Google Cloud Text-to-Speech v1 REST client.
//!
//! - `GET  /v1/voices`
//! - `POST /v1/text:synthesize` (MP3 output, base64 in `audioContent`)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::tts::credentials::Credentials;
use crate::tts::provider::{ProviderFault, SpeechProvider};
use crate::tts::request::SynthesisRequest;
use crate::tts::voice::ProviderVoice;

pub const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com";
const FALLBACK_LANGUAGE_CODE: &str = "en-US";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<ProviderVoice>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: RpcError,
}

#[derive(Deserialize)]
struct RpcError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Derive the `languageCode` Google expects from a voice name,
/// e.g. `en-US-Wavenet-A` -> `en-US`.
pub fn language_code_for(voice: &str) -> String {
    let mut parts = voice.split('-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region)) if !lang.is_empty() && !region.is_empty() => {
            format!("{}-{}", lang, region)
        }
        _ => FALLBACK_LANGUAGE_CODE.to_string(),
    }
}

fn transport_fault(e: reqwest::Error) -> ProviderFault {
    if e.is_connect() || e.is_timeout() {
        ProviderFault::Unreachable(e.to_string())
    } else if e.is_decode() {
        ProviderFault::Malformed(e.to_string())
    } else {
        ProviderFault::Transport(e.to_string())
    }
}

async fn rpc_fault(response: reqwest::Response) -> ProviderFault {
    let http_status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => ProviderFault::Rpc {
            http_status,
            status: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => ProviderFault::Rpc {
            http_status,
            status: None,
            message: body,
        },
    }
}

pub struct GoogleTtsClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl GoogleTtsClient {
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    async fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ProviderFault> {
        match &self.credentials {
            Credentials::ServiceAccount(account) => {
                Ok(builder.headers(account.auth_headers().await?))
            }
            Credentials::ApiKey(key) => Ok(builder.query(&[("key", key)])),
            Credentials::None => Err(ProviderFault::MissingCredentials),
        }
    }

    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderFault> {
        let response = self
            .authorize(builder)
            .await?
            .send()
            .await
            .map_err(transport_fault)?;

        if !response.status().is_success() {
            return Err(rpc_fault(response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl SpeechProvider for GoogleTtsClient {
    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderFault> {
        let url = format!("{}/v1/voices", self.endpoint);
        let response = self.execute(self.http.get(url)).await?;
        let listing: VoicesResponse = response.json().await.map_err(transport_fault)?;
        Ok(listing.voices)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderFault> {
        let language_code = language_code_for(request.voice());
        let body = SynthesizeBody {
            input: SynthesisInput {
                text: request.text(),
            },
            voice: VoiceSelection {
                language_code: &language_code,
                name: request.voice(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: request.speed(),
                pitch: request.pitch(),
            },
        };

        let url = format!("{}/v1/text:synthesize", self.endpoint);
        let response = self.execute(self.http.post(url).json(&body)).await?;
        let payload: SynthesizeResponse = response.json().await.map_err(transport_fault)?;

        STANDARD
            .decode(payload.audio_content)
            .map_err(|e| ProviderFault::Malformed(format!("audioContent is not base64: {}", e)))
    }

    fn has_credentials(&self) -> bool {
        self.credentials.is_configured()
    }
}
