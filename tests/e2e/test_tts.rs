use crate::e2e::helpers;

use helpers::{decode_audio, speech_mock::MOCK_SPEECH_KEY, TestContext, MAX_TEXT_CHARS, OUTPUT_FORMAT};
use hyper::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use speech_gateway::domain::tts::SynthesizeResponse;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_each_segment_in_order(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Hello. How are you?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    assert_eq!(ctx.speech.texts(), vec!["Hello.", "How are you?"]);

    // The mock answers with the utterance itself, so the audio is the ordered concatenation
    let audio = decode_audio(response.body.as_ref().unwrap());
    assert_eq!(audio, b"Hello.How are you?".to_vec());
    assert_eq!(response.header("x-segment-count").map(String::as_str), Some("2"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_ssml_with_default_voice_settings(ctx: &TestContext) {
    ctx.client
        .post("/api/tts/synthesize", &json!({ "text": "Hello." }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.speech.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.subscription_key.as_deref(), Some(MOCK_SPEECH_KEY));
    assert_eq!(request.output_format.as_deref(), Some(OUTPUT_FORMAT));
    assert_eq!(request.content_type.as_deref(), Some("application/ssml+xml"));
    assert!(request.ssml.contains("<voice name='my-MM-ThihaNeural'>"));
    assert!(request.ssml.contains("rate='+0%'"));
    assert!(request.ssml.contains("pitch='+0Hz'"));
    assert!(request.ssml.contains("xml:lang='my-MM'"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_map_voice_speed_and_pitch(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({
                "text": "Good morning.",
                "voice": "English UK Ryan",
                "speed": 10,
                "pitch": "5"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("x-voice-used").map(String::as_str),
        Some("en-GB-RyanNeural")
    );

    let ssml = &ctx.speech.requests()[0].ssml;
    assert!(ssml.contains("<voice name='en-GB-RyanNeural'>"));
    assert!(ssml.contains("rate='+10%'"));
    assert!(ssml.contains("pitch='-5Hz'"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_pronunciation_rules_before_synthesis(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "AI is great.", "rules": "AI=Aiy\nbroken line" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.speech.texts(), vec!["Aiy is great."]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_srt_when_subtitles_requested(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello. Bye.", "subtitles": true }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: SynthesizeResponse = response.json().unwrap();
    assert_eq!(
        body.srt.as_deref(),
        Some(
            "1\n00:00:00,000 --> 00:00:00,899\nHello.\n\n\
             2\n00:00:00,999 --> 00:00:01,599\nBye.\n\n"
        )
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_omit_srt_by_default(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "Hello. Bye." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.body.as_ref().unwrap().get("srt").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_wide_captions_for_youtube(ctx: &TestContext) {
    let text = "a ".repeat(100);

    let youtube: SynthesizeResponse = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": text, "subtitles": true, "platform": "YouTube (16:9)" }),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    let tiktok: SynthesizeResponse = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": text, "subtitles": true, "platform": "TikTok (9:16)" }),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    let longest_line = |srt: &str| {
        srt.lines()
            .filter(|line| line.starts_with('a'))
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    };

    let youtube_srt = youtube.srt.unwrap();
    let tiktok_srt = tiktok.srt.unwrap();
    assert!(longest_line(&youtube_srt) < 150);
    assert!(longest_line(&youtube_srt) > 55);
    assert!(longest_line(&tiktok_srt) < 55);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_or_empty_text(ctx: &TestContext) {
    for body in [json!({}), json!({ "text": "" }), json!({ "text": "   " })] {
        let response = ctx.client.post("/api/tts/synthesize", &body).await.unwrap();
        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Text cannot be empty");
    }

    assert!(ctx.speech.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {
    let text = "a".repeat(MAX_TEXT_CHARS + 1);
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(ctx.speech.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unparseable_speed(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello.", "speed": "fast" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("speed must be an integer");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/tts/synthesize", "{\"text\": ")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body.as_ref().unwrap().get("error").is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fail_whole_request_when_a_segment_fails(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "One. FAIL here. Three." }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("503");

    // No partial audio, and the third segment is never requested
    assert!(response.body.as_ref().unwrap().get("audio").is_none());
    assert_eq!(ctx.speech.texts(), vec!["One.", "FAIL here."]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_405_for_other_methods(ctx: &TestContext) {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = ctx
            .client
            .send(method.clone(), "/api/tts/synthesize")
            .await
            .unwrap();

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.text(), "Method Not Allowed", "method {}", method);
    }
}
