use serde::Serialize;

pub const DEFAULT_VOICE_ID: &str = "my-MM-ThihaNeural";

/// Ordered selector table, first match wins
const VOICE_RULES: &[(&[&str], &str)] = &[
    (&["Female", "Nilar"], "my-MM-NilarNeural"),
    (&["Ryan"], "en-GB-RyanNeural"),
    (&["Sonia"], "en-GB-SoniaNeural"),
];

/// Resolve a user-facing voice selector into a concrete voice identifier.
/// An absent selector falls back to the default voice.
pub fn get_voice_id(selector: Option<&str>) -> &'static str {
    let Some(selector) = selector else {
        return DEFAULT_VOICE_ID;
    };

    VOICE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| selector.contains(needle)))
        .map(|(_, voice_id)| *voice_id)
        .unwrap_or(DEFAULT_VOICE_ID)
}

/// Locale prefix of a voice identifier (`my-MM-NilarNeural` -> `my-MM`)
pub fn locale_of(voice_id: &str) -> &str {
    match voice_id.match_indices('-').nth(1) {
        Some((index, _)) => &voice_id[..index],
        None => voice_id,
    }
}

/// A selectable voice as presented to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VoiceOption {
    pub label: &'static str,
    pub voice_id: &'static str,
}

pub fn voice_catalog() -> Vec<VoiceOption> {
    vec![
        VoiceOption {
            label: "အကိုလေး (Male)",
            voice_id: "my-MM-ThihaNeural",
        },
        VoiceOption {
            label: "မြမြ (Female)",
            voice_id: "my-MM-NilarNeural",
        },
        VoiceOption {
            label: "Sonia (English UK)",
            voice_id: "en-GB-SoniaNeural",
        },
        VoiceOption {
            label: "Ryan (English UK)",
            voice_id: "en-GB-RyanNeural",
        },
    ]
}

/// Respellings that make the Burmese voices pronounce common words correctly
pub const DEFAULT_RULES: &str = "မေတ္တာ = မြစ်တာ
သစ္စာ = သစ်စာ
ပြဿနာ = ပြတ်သနာ
ဥစ္စာ = အုတ်စာ
ဦးနှောက် = အုံးနှောက်";
