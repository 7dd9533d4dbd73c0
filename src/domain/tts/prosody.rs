use serde::{Deserialize, Serialize};

use super::voice_mapping::get_voice_id;

/// A numeric request field that clients send either as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    /// Integer value of the field. Strings are read up to the first non-digit
    /// after an optional sign (`"12px"` -> 12, `"10.5"` -> 10), numbers are
    /// truncated toward zero. `None` when no digits lead the string.
    pub fn as_offset(&self) -> Option<i32> {
        match self {
            NumberOrString::Number(value) if value.is_finite() => Some(value.trunc() as i32),
            NumberOrString::Number(_) => None,
            NumberOrString::Text(text) => parse_leading_int(text),
        }
    }
}

fn parse_leading_int(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Rate as a signed percentage, `+` for zero and above
pub fn format_rate(speed: i32) -> String {
    format!("{:+}%", speed)
}

/// Pitch offset in Hz. The input is negated before rendering: a positive
/// pitch value lowers the voice on the synthesis side.
pub fn format_pitch(pitch: i32) -> String {
    format!("{:+}Hz", -(pitch as i64))
}

/// Everything the synthesis provider needs besides the text itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    pub voice_id: String,
    pub rate: String,
    pub pitch: String,
}

impl VoiceSettings {
    pub fn resolve(voice: Option<&str>, speed: i32, pitch: i32) -> Self {
        Self {
            voice_id: get_voice_id(voice).to_string(),
            rate: format_rate(speed),
            pitch: format_pitch(pitch),
        }
    }
}
