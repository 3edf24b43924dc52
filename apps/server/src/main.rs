use tellerhome_server::{api::app_router, build_state, config::Config, init_tracing, scheduler};
use tower_http::services::{ServeDir, ServeFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // tracing first so config parsing can warn about bad values
    let _ = dotenvy::dotenv();
    init_tracing();
    let config = Config::from_env();
    let state = build_state(&config).await?;

    scheduler::start_sync_scheduler(state.clone(), config.sync_interval);

    let static_dir = std::path::PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");
    let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));
    let router = app_router(state, &config).fallback_service(static_service);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
