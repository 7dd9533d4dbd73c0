use super::tts_repository::TtsRepository;
use crate::domain::tts::{voice_mapping::locale_of, VoiceSettings};
use async_trait::async_trait;
use reqwest::{header, Client};

const USER_AGENT: &str = concat!("speech-gateway/", env!("CARGO_PKG_VERSION"));

/// Azure Speech REST implementation of TTS repository.
/// One SSML request per utterance; the response body is the encoded audio.
pub struct AzureTtsRepository {
    client: Client,
    endpoint: String,
    subscription_key: String,
    output_format: String,
    max_audio_bytes: usize,
}

impl AzureTtsRepository {
    pub fn new(
        client: Client,
        endpoint: String,
        subscription_key: String,
        output_format: String,
        max_audio_bytes: usize,
    ) -> Self {
        Self {
            client,
            endpoint,
            subscription_key,
            output_format,
            max_audio_bytes,
        }
    }

    /// Read the response body chunk by chunk, refusing to grow past the cap
    async fn collect_audio(&self, mut response: reqwest::Response) -> Result<Vec<u8>, String> {
        let mut audio = Vec::new();

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read audio stream from speech service");
            format!("Failed to read audio stream: {}", e)
        })? {
            if audio.len() + chunk.len() > self.max_audio_bytes {
                tracing::error!(
                    max_audio_bytes = self.max_audio_bytes,
                    "Speech service response exceeded size limit"
                );
                return Err(format!(
                    "Audio response exceeds {} bytes",
                    self.max_audio_bytes
                ));
            }
            audio.extend_from_slice(&chunk);
        }

        Ok(audio)
    }
}

/// Build the SSML document for one utterance
pub fn build_ssml(text: &str, voice: &VoiceSettings) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{lang}'>\
         <voice name='{voice}'><prosody rate='{rate}' pitch='{pitch}'>{text}</prosody></voice>\
         </speak>",
        lang = escape_xml(locale_of(&voice.voice_id)),
        voice = escape_xml(&voice.voice_id),
        rate = escape_xml(&voice.rate),
        pitch = escape_xml(&voice.pitch),
        text = escape_xml(text),
    )
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl TtsRepository for AzureTtsRepository {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let ssml = build_ssml(text, voice);

        tracing::info!(
            voice = %voice.voice_id,
            rate = %voice.rate,
            pitch = %voice.pitch,
            output_format = %self.output_format,
            text_length = text.chars().count(),
            "Calling speech service"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header(header::CONTENT_TYPE, "application/ssml+xml")
            .header(header::USER_AGENT, USER_AGENT)
            .body(ssml)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    voice = %voice.voice_id,
                    "Speech service request failed"
                );
                format!("Speech service error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                body = %body,
                voice = %voice.voice_id,
                "Speech service returned an error status"
            );
            return Err(format!("Speech service returned {}", status));
        }

        let audio = self.collect_audio(response).await?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "azure",
            latency_ms = duration.as_millis(),
            audio_size_bytes = audio.len(),
            "Speech service call completed"
        );

        Ok(audio)
    }
}
