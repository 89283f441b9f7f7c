pub mod credentials;
pub mod google;
pub mod provider;
pub mod request;
pub mod voice;

use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;

pub use credentials::Credentials;
pub use google::GoogleTtsClient;
pub use provider::SpeechProvider;
pub use request::SynthesisRequest;
pub use voice::VoiceDescriptor;

/// Voice catalog and synthesis on top of a shared provider handle.
///
/// Holds no per-request state; cloning shares the same provider.
#[derive(Clone)]
pub struct TtsService {
    provider: Arc<dyn SpeechProvider>,
}

impl TtsService {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the provider's voices, normalized. One outbound call per
    /// invocation, nothing cached.
    pub async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, AppError> {
        let voices = self.provider.list_voices().await.map_err(|fault| {
            match AppError::from(fault) {
                // The listing takes no caller input, so a rejection is ours.
                AppError::InvalidInput(msg) => {
                    AppError::Internal(format!("provider rejected voice listing: {}", msg))
                }
                other => other,
            }
        })?;

        tracing::debug!("Provider listed {} voices", voices.len());
        Ok(voices.into_iter().map(VoiceDescriptor::from).collect())
    }

    /// Run one synthesis call and return the provider's audio untouched.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, AppError> {
        tracing::info!(
            "Synthesizing {} chars with voice {} (speed {}, pitch {})",
            request.text().chars().count(),
            request.voice(),
            request.speed(),
            request.pitch()
        );

        let started = Instant::now();
        let audio = self.provider.synthesize(request).await?;
        tracing::debug!(
            "Synthesized {} bytes in {:?}",
            audio.len(),
            started.elapsed()
        );

        Ok(audio)
    }

    pub fn has_credentials(&self) -> bool {
        self.provider.has_credentials()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tts::provider::{MockSpeechProvider, ProviderFault};
    use crate::tts::voice::{Gender, ProviderVoice};
    use async_trait::async_trait;

    /// Deterministic provider that echoes the request back as "audio".
    pub(crate) struct EchoProvider;

    #[async_trait]
    impl SpeechProvider for EchoProvider {
        async fn list_voices(&self) -> Result<Vec<ProviderVoice>, ProviderFault> {
            Ok(Vec::new())
        }

        async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderFault> {
            // Yield so concurrent calls interleave.
            tokio::task::yield_now().await;
            Ok(format!("ID3|{}|{}|{}", request.voice(), request.speed(), request.text()).into_bytes())
        }

        fn has_credentials(&self) -> bool {
            true
        }
    }

    fn valid_request() -> SynthesisRequest {
        SynthesisRequest::new("Hello", "en-US-Wavenet-A", None, None).unwrap()
    }

    #[tokio::test]
    async fn test_audio_returned_unmodified() {
        let mut provider = MockSpeechProvider::new();
        provider
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"ID3...mp3data".to_vec()));

        let service = TtsService::new(Arc::new(provider));
        let audio = service.synthesize(&valid_request()).await.unwrap();
        assert_eq!(audio, b"ID3...mp3data".to_vec());
    }

    #[tokio::test]
    async fn test_provider_receives_defaults() {
        let mut provider = MockSpeechProvider::new();
        provider
            .expect_synthesize()
            .withf(|req| req.speed() == 1.0 && req.pitch() == 0.0 && req.text() == "Hello")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = TtsService::new(Arc::new(provider));
        service.synthesize(&valid_request()).await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_fault_maps_to_unavailable() {
        let mut provider = MockSpeechProvider::new();
        provider.expect_synthesize().times(1).returning(|_| {
            Err(ProviderFault::Rpc {
                http_status: 429,
                status: Some("RESOURCE_EXHAUSTED".into()),
                message: "Quota exceeded".into(),
            })
        });

        let service = TtsService::new(Arc::new(provider));
        let err = service.synthesize(&valid_request()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unexpected_fault_maps_to_internal() {
        let mut provider = MockSpeechProvider::new();
        provider
            .expect_synthesize()
            .times(1)
            .returning(|_| Err(ProviderFault::Transport("connection reset".into())));

        let service = TtsService::new(Arc::new(provider));
        let err = service.synthesize(&valid_request()).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_catalog_is_normalized_in_order() {
        let mut provider = MockSpeechProvider::new();
        provider.expect_list_voices().times(1).returning(|| {
            Ok(vec![
                ProviderVoice {
                    name: "ru-RU-Wavenet-B".into(),
                    language_codes: vec!["ru-RU".into()],
                    ssml_gender: Some("MALE".into()),
                    natural_sample_rate_hertz: 24000,
                },
                ProviderVoice {
                    name: "af-ZA-Standard-A".into(),
                    language_codes: vec!["af-ZA".into()],
                    ssml_gender: Some("FEMALE".into()),
                    natural_sample_rate_hertz: 22050,
                },
            ])
        });

        let service = TtsService::new(Arc::new(provider));
        let voices = service.list_voices().await.unwrap();
        let names: Vec<_> = voices.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["ru-RU-Wavenet-B", "af-ZA-Standard-A"]);
        assert_eq!(voices[1].gender, Gender::Female);
        assert_eq!(voices[1].native_sample_rate_hz, 22050);
    }

    #[tokio::test]
    async fn test_catalog_is_not_cached() {
        let mut provider = MockSpeechProvider::new();
        provider
            .expect_list_voices()
            .times(2)
            .returning(|| Ok(Vec::new()));

        let service = TtsService::new(Arc::new(provider));
        service.list_voices().await.unwrap();
        service.list_voices().await.unwrap();
    }

    #[tokio::test]
    async fn test_catalog_unavailable() {
        let mut provider = MockSpeechProvider::new();
        provider
            .expect_list_voices()
            .returning(|| Err(ProviderFault::Unreachable("connection refused".into())));

        let service = TtsService::new(Arc::new(provider));
        let err = service.list_voices().await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_catalog_rejection_is_internal() {
        let mut provider = MockSpeechProvider::new();
        provider.expect_list_voices().times(1).returning(|| {
            Err(ProviderFault::Rpc {
                http_status: 400,
                status: Some("INVALID_ARGUMENT".into()),
                message: "Invalid language code".into(),
            })
        });

        let service = TtsService::new(Arc::new(provider));
        let err = service.list_voices().await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_same_request_same_bytes() {
        let service = TtsService::new(Arc::new(EchoProvider));
        let request = valid_request();
        let first = service.synthesize(&request).await.unwrap();
        let second = service.synthesize(&request).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_do_not_mix() {
        let service = TtsService::new(Arc::new(EchoProvider));

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let text = format!("request {}", i);
                    let request =
                        SynthesisRequest::new(&text, "en-US-Wavenet-A", None, None).unwrap();
                    let audio = service.synthesize(&request).await.unwrap();
                    (text, audio)
                })
            })
            .collect();

        for handle in handles {
            let (text, audio) = handle.await.unwrap();
            assert_eq!(audio, format!("ID3|en-US-Wavenet-A|1|{}", text).into_bytes());
        }
    }
}
