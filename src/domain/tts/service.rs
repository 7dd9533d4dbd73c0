use super::error::TtsServiceError;
use super::prosody::VoiceSettings;
use super::rules::apply_rules;
use super::segmenter::{normalize_newlines, split_by_punctuation};
use super::subtitles::{estimate_duration, max_line_chars, CaptionTrack};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Parsed synthesis request, numeric fields already resolved
#[derive(Debug, Clone, Default)]
pub struct SynthesisInput {
    pub text: Option<String>,
    pub rules: Option<String>,
    pub voice: Option<String>,
    pub speed: i32,
    pub pitch: i32,
    pub platform: Option<String>,
    pub generate_subtitles: bool,
}

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio_data: Vec<u8>,
    pub srt: Option<String>,
    pub segment_count: usize,
    pub voice_id: String,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    call_timeout: Duration,
    max_text_chars: usize,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, call_timeout: Duration, max_text_chars: usize) -> Self {
        Self {
            tts_repo,
            call_timeout,
            max_text_chars,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize a full text
    ///
    /// This operation:
    /// - Validates the text
    /// - Splits it into punctuation-delimited segments
    /// - Applies pronunciation rules and synthesizes each segment in order
    /// - Optionally builds an SRT caption track on an estimated timeline
    ///
    /// Returns the concatenated audio, the captions when requested, and metadata
    async fn synthesize(&self, input: SynthesisInput) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, input: SynthesisInput) -> Result<TtsSynthesisResult, TtsServiceError> {
        let start_time = Instant::now();

        // 1. Validate
        let text = self.validate_text(input.text.as_deref())?;

        // 2. Resolve voice, rate and pitch
        let voice = VoiceSettings::resolve(input.voice.as_deref(), input.speed, input.pitch);

        // 3. Segment
        let cleaned_text = normalize_newlines(text);
        let segments = split_by_punctuation(&cleaned_text);

        tracing::info!(
            voice_id = %voice.voice_id,
            rate = %voice.rate,
            pitch = %voice.pitch,
            text_length = text.chars().count(),
            segment_count = segments.len(),
            subtitles = input.generate_subtitles,
            "TTS synthesis request"
        );

        // 4. Synthesize segment by segment, strictly in order
        let max_chars = max_line_chars(input.platform.as_deref());
        let mut captions = input.generate_subtitles.then(CaptionTrack::new);
        let mut audio_buffers: Vec<Vec<u8>> = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            if segment.trim().is_empty() {
                continue;
            }

            let speakable_text = apply_rules(segment, input.rules.as_deref());
            let audio_data = self.synthesize_segment(index, &speakable_text, &voice).await?;

            tracing::debug!(
                segment_index = index,
                segment_size = audio_data.len(),
                "Segment synthesized"
            );
            audio_buffers.push(audio_data);

            if let Some(track) = captions.as_mut() {
                track.push_segment(segment, estimate_duration(&speakable_text), max_chars);
            }
        }

        // 5. Merge
        let audio_data = audio_buffers.concat();
        let srt = captions.map(|track| track.to_srt());

        let duration = start_time.elapsed();
        tracing::info!(
            latency_ms = duration.as_millis(),
            segment_count = audio_buffers.len(),
            audio_size_bytes = audio_data.len(),
            srt_size_bytes = srt.as_ref().map(|s| s.len()).unwrap_or(0),
            "TTS synthesis completed"
        );

        Ok(TtsSynthesisResult {
            audio_data,
            srt,
            segment_count: audio_buffers.len(),
            voice_id: voice.voice_id,
        })
    }
}

impl TtsService {
    fn validate_text<'a>(&self, text: Option<&'a str>) -> Result<&'a str, TtsServiceError> {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TtsServiceError::Invalid("Text cannot be empty".to_string()))?;

        let char_count = text.chars().count();
        if char_count > self.max_text_chars {
            return Err(TtsServiceError::TooLarge(format!(
                "Text must be {} characters or less, got {}",
                self.max_text_chars, char_count
            )));
        }

        Ok(text)
    }

    /// One provider call, bounded by the configured timeout
    async fn synthesize_segment(
        &self,
        index: usize,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<Vec<u8>, TtsServiceError> {
        match tokio::time::timeout(self.call_timeout, self.tts_repo.synthesize(text, voice)).await {
            Ok(Ok(audio_data)) => Ok(audio_data),
            Ok(Err(e)) => {
                tracing::error!(segment_index = index, error = %e, "Segment synthesis failed");
                Err(TtsServiceError::Dependency(e))
            }
            Err(_) => {
                tracing::error!(
                    segment_index = index,
                    timeout_secs = self.call_timeout.as_secs_f64(),
                    "Segment synthesis timed out"
                );
                Err(TtsServiceError::Timeout(self.call_timeout.as_secs()))
            }
        }
    }
}
