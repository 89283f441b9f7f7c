pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

/// Body of `POST /tts` and `POST /tts/base64`.
///
/// Missing `text` or `voice` deserialize as empty and are rejected by
/// validation with the usual messages.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Base64TtsResponse {
    pub audio_base64: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub tts_client: String,
    pub google_credentials: bool,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointsInfo,
}

#[derive(Debug, Serialize)]
pub struct EndpointsInfo {
    pub tts: String,
    pub tts_base64: String,
    pub voices: String,
    pub health: String,
}
