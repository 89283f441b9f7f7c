use std::ops::RangeInclusive;

use crate::error::AppError;

pub const MAX_TEXT_CHARS: usize = 5000;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.25..=4.0;
pub const PITCH_RANGE: RangeInclusive<f64> = -20.0..=20.0;
pub const DEFAULT_SPEED: f64 = 1.0;
pub const DEFAULT_PITCH: f64 = 0.0;

/// A synthesis request that has passed validation.
///
/// Only [`SynthesisRequest::new`] can build one, so holding a value means
/// every field is in range. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    text: String,
    voice: String,
    speed: f64,
    pitch: f64,
}

impl SynthesisRequest {
    /// Validate raw caller input. Checks run in a fixed order and the first
    /// failure is returned.
    pub fn new(
        text: &str,
        voice: &str,
        speed: Option<f64>,
        pitch: Option<f64>,
    ) -> Result<Self, AppError> {
        // Bound applies to the text as received, emptiness after trimming.
        let trimmed = text.trim();
        if trimmed.is_empty() || text.chars().count() > MAX_TEXT_CHARS {
            return Err(AppError::InvalidInput("text length out of range".into()));
        }

        let voice = voice.trim();
        if voice.is_empty() {
            return Err(AppError::InvalidInput("voice required".into()));
        }

        let speed = speed.unwrap_or(DEFAULT_SPEED);
        if !SPEED_RANGE.contains(&speed) {
            return Err(AppError::InvalidInput("speed out of range".into()));
        }

        let pitch = pitch.unwrap_or(DEFAULT_PITCH);
        if !PITCH_RANGE.contains(&pitch) {
            return Err(AppError::InvalidInput("pitch out of range".into()));
        }

        Ok(Self {
            text: trimmed.to_string(),
            voice: voice.to_string(),
            speed,
            pitch,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}
