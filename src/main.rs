use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_gateway::app;
use video_gateway::config::settings::AppConfig;
use video_gateway::infrastructure::backend::proxy::BackendProxy;
use video_gateway::infrastructure::db::pool::connect_to_db;
use video_gateway::infrastructure::storage::s3::StorageService;
use video_gateway::modules::analysis::repository::PgAnalysisRepository;
use video_gateway::modules::auth::repository::PgUserRepository;
use video_gateway::modules::transcode::repository::PgTranscodeRepository;
use video_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("video_gateway=info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;

    let pool = connect_to_db(&config).await?;
    info!("Connected to database");

    let storage = StorageService::new(&config);
    let backends = BackendProxy::new(&config)?;
    info!(
        analysis = %config.analyze_video_url,
        transcode = %config.transcode_video_url,
        "Video services configured"
    );

    let state = AppState::new(
        config.clone(),
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgAnalysisRepository::new(pool.clone())),
        Arc::new(PgTranscodeRepository::new(pool)),
        Arc::new(storage),
        backends,
    );

    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
