use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;

use crate::{
    domain::tts::{
        voice_mapping::{voice_catalog, DEFAULT_RULES},
        NumberOrString, SynthesisInput, SynthesizeRequest, SynthesizeResponse, TtsService,
        TtsServiceApi, VoicesResponse,
    },
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts/synthesize - Convert text to speech, optionally with SRT captions
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<SynthesizeRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Json<SynthesizeResponse>)> {
        let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

        let input = SynthesisInput {
            speed: parse_offset("speed", request.speed.as_ref())?,
            pitch: parse_offset("pitch", request.pitch.as_ref())?,
            text: request.text,
            rules: request.rules,
            voice: request.voice,
            platform: request.platform,
            generate_subtitles: request.subtitles,
        };

        let result = controller.tts_service.synthesize(input).await?;

        let mut headers = HeaderMap::new();
        headers.insert("X-Segment-Count", HeaderValue::from(result.segment_count));
        if let Ok(voice) = HeaderValue::from_str(&result.voice_id) {
            headers.insert("X-Voice-Used", voice);
        }
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        Ok((
            StatusCode::OK,
            headers,
            Json(SynthesizeResponse {
                audio: STANDARD.encode(&result.audio_data),
                srt: result.srt,
            }),
        ))
    }

    /// Any other verb on /api/tts/synthesize
    pub async fn method_not_allowed() -> AppError {
        AppError::MethodNotAllowed
    }

    /// GET /api/tts/voices - Selectable voices, default pronunciation rules and caption platforms
    pub async fn voices() -> Json<VoicesResponse> {
        Json(VoicesResponse {
            voices: voice_catalog(),
            default_rules: DEFAULT_RULES,
            platforms: vec!["TikTok (9:16)", "YouTube (16:9)"],
        })
    }
}

/// Absent fields count as zero; present ones must lead with an integer
fn parse_offset(field: &str, value: Option<&NumberOrString>) -> AppResult<i32> {
    match value {
        None => Ok(0),
        Some(value) => value
            .as_offset()
            .ok_or_else(|| AppError::BadRequest(format!("{} must be an integer", field))),
    }
}
