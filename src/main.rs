use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_gateway::controllers::tts::TtsController;
use speech_gateway::domain::tts::TtsService;
use speech_gateway::infrastructure::config::{Config, LogFormat};
use speech_gateway::infrastructure::http::start_http_server;
use speech_gateway::infrastructure::repositories::AzureTtsRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Speech Gateway on {}:{}",
        config.host,
        config.port
    );

    // Create the speech service client
    let synthesis_url = config.synthesis_url();
    tracing::info!(
        endpoint = %synthesis_url,
        output_format = %config.speech_output_format,
        timeout_secs = config.synthesis_timeout_secs,
        "Initializing speech service client"
    );

    let http_client = reqwest::Client::builder()
        .connect_timeout(config.synthesis_timeout())
        .build()?;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let tts_repo = Arc::new(AzureTtsRepository::new(
        http_client,
        synthesis_url,
        config.speech_key.clone(),
        config.speech_output_format.clone(),
        config.max_audio_bytes,
    ));

    // 2. Instantiate services
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        config.synthesis_timeout(),
        config.max_text_chars,
    ));

    // 3. Instantiate controllers
    let tts_controller = Arc::new(TtsController::new(tts_service));

    // Start HTTP server with all routes
    start_http_server(config, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "speech_gateway=debug,tower_http=debug"
    } else {
        "speech_gateway=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
