pub mod dto;
pub mod error;
pub mod prosody;
pub mod rules;
pub mod segmenter;
pub mod service;
pub mod subtitles;
pub mod voice_mapping;

pub use dto::{SynthesizeRequest, SynthesizeResponse, VoicesResponse};
pub use error::TtsServiceError;
pub use prosody::{NumberOrString, VoiceSettings};
pub use service::{SynthesisInput, TtsService, TtsServiceApi, TtsSynthesisResult};
