use crate::domain::tts::VoiceSettings;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the external neural TTS provider behind a single call per utterance.
///
/// Implementations are responsible for:
/// - Encoding voice, rate and pitch the way the provider expects
/// - Reading the provider's audio stream to the end before returning
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one utterance
    ///
    /// Returns the complete audio bytes for `text`
    ///
    /// # Arguments
    /// * `text` - A single segment, pronunciation rules already applied
    /// * `voice` - Resolved voice identifier with rendered rate and pitch
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, String>;
}
