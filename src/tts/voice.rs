use serde::{Deserialize, Serialize};

/// Voice entry exactly as the provider's `voices` listing reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderVoice {
    pub name: String,
    #[serde(default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub ssml_gender: Option<String>,
    #[serde(default)]
    pub natural_sample_rate_hertz: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Neutral,
    Unspecified,
}

impl Gender {
    /// Parse the provider's SSML gender name. Anything unrecognised,
    /// including `SSML_VOICE_GENDER_UNSPECIFIED`, is `Unspecified`.
    pub fn from_ssml(value: Option<&str>) -> Self {
        match value {
            Some("MALE") => Gender::Male,
            Some("FEMALE") => Gender::Female,
            Some("NEUTRAL") => Gender::Neutral,
            _ => Gender::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceDescriptor {
    pub name: String,
    pub language_code: String,
    pub gender: Gender,
    #[serde(rename = "natural_sample_rate")]
    pub native_sample_rate_hz: u32,
}

impl From<ProviderVoice> for VoiceDescriptor {
    fn from(voice: ProviderVoice) -> Self {
        // Multi-language voices are listed under their first language.
        let language_code = voice.language_codes.into_iter().next().unwrap_or_default();

        Self {
            gender: Gender::from_ssml(voice.ssml_gender.as_deref()),
            name: voice.name,
            language_code,
            native_sample_rate_hz: voice.natural_sample_rate_hertz,
        }
    }
}
