use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Speech service
    pub speech_key: String,
    pub speech_region: String,
    pub speech_endpoint: Option<String>,
    pub speech_output_format: String,
    // Limits
    pub synthesis_timeout_secs: u64,
    pub max_text_chars: usize,
    pub max_audio_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            speech_key: env::var("SPEECH_KEY")?,
            speech_region: env::var("SPEECH_REGION").unwrap_or_else(|_| "southeastasia".to_string()),
            speech_endpoint: env::var("SPEECH_ENDPOINT").ok().filter(|s| !s.trim().is_empty()),
            speech_output_format: env::var("SPEECH_OUTPUT_FORMAT")
                .unwrap_or_else(|_| "audio-24khz-48kbitrate-mono-mp3".to_string()),
            synthesis_timeout_secs: env::var("SYNTHESIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            max_text_chars: env::var("MAX_TEXT_CHARS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()?,
            max_audio_bytes: env::var("MAX_AUDIO_BYTES")
                .unwrap_or_else(|_| (16 * 1024 * 1024).to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Explicit endpoint if configured, otherwise the regional REST endpoint
    pub fn synthesis_url(&self) -> String {
        match &self.speech_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.speech_region
            ),
        }
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs)
    }
}
