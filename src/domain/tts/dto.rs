use serde::{Deserialize, Serialize};

use super::prosody::NumberOrString;
use super::voice_mapping::VoiceOption;

/// Request for POST /api/tts/synthesize
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<NumberOrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<NumberOrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub subtitles: bool,
}

/// Response for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    /// Base64-encoded audio of all segments, in order
    pub audio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srt: Option<String>,
}

/// Response for GET /api/tts/voices
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceOption>,
    pub default_rules: &'static str,
    pub platforms: Vec<&'static str>,
}
