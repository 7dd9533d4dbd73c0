use base64::{engine::general_purpose::STANDARD, Engine};
use speech_gateway::{
    controllers::tts::TtsController,
    domain::tts::TtsService,
    infrastructure::{http::create_router, repositories::AzureTtsRepository},
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;


use api_client::TestClient;
use speech_mock::{SpeechMock, MOCK_SPEECH_KEY};

pub const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";
pub const MAX_TEXT_CHARS: usize = 500;

pub struct TestContext {
    pub client: TestClient,
    pub speech: SpeechMock,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let speech = SpeechMock::start().await;

            // Wire the gateway against the mock, same as main does against the real service
            let tts_repo = Arc::new(AzureTtsRepository::new(
                reqwest::Client::new(),
                speech.url.clone(),
                MOCK_SPEECH_KEY.to_string(),
                OUTPUT_FORMAT.to_string(),
                1024 * 1024,
            ));
            let tts_service = Arc::new(TtsService::new(
                tts_repo,
                Duration::from_secs(5),
                MAX_TEXT_CHARS,
            ));
            let tts_controller = Arc::new(TtsController::new(tts_service));
            let app = create_router(tts_controller);

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                speech,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Servers stop when the runtime of the test shuts down
        }
    }
}

/// Decode the `audio` field of a synthesis response
pub fn decode_audio(body: &serde_json::Value) -> Vec<u8> {
    let audio = body
        .get("audio")
        .and_then(|a| a.as_str())
        .expect("Missing audio field");
    STANDARD.decode(audio).expect("audio is not valid base64")
}
