use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use super::{Base64TtsResponse, EndpointsInfo, HealthResponse, RootResponse, TtsRequest};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::tts::{SynthesisRequest, VoiceDescriptor};

const AUDIO_MPEG: &str = "audio/mpeg";

fn validate(payload: Result<Json<TtsRequest>, JsonRejection>) -> Result<SynthesisRequest, AppError> {
    let Json(body) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    SynthesisRequest::new(&body.text, &body.voice, body.speed, body.pitch)
}

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = validate(payload)?;
    let audio = state.tts.synthesize(&request).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, AUDIO_MPEG),
            (header::CONTENT_DISPOSITION, "attachment; filename=speech.mp3"),
        ],
        audio,
    )
        .into_response())
}

pub async fn synthesize_base64(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<Base64TtsResponse>, AppError> {
    let request = validate(payload)?;
    let audio = state.tts.synthesize(&request).await?;

    Ok(Json(Base64TtsResponse {
        audio_base64: STANDARD.encode(&audio),
        content_type: AUDIO_MPEG.to_string(),
        size: audio.len(),
    }))
}

pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VoiceDescriptor>>, AppError> {
    let voices = state.tts.list_voices().await?;
    if voices.is_empty() {
        tracing::warn!("Provider returned no voices");
    }
    Ok(Json(voices))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let credentials = state.tts.has_credentials();

    Json(HealthResponse {
        status: if credentials { "healthy" } else { "degraded" }.to_string(),
        tts_client: "connected".to_string(),
        google_credentials: credentials,
    })
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Google TTS Gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointsInfo {
            tts: "POST /tts - Text to speech synthesis".to_string(),
            tts_base64: "POST /tts/base64 - Synthesis returned as base64 JSON".to_string(),
            voices: "GET /voices - List available voices".to_string(),
            health: "GET /health - Health check".to_string(),
        },
    })
}
