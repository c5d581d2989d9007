mod core;
mod features;
mod modules;
mod shared;

use crate::core::app::{build_router, AppContext};
use crate::core::config::Config;
use crate::core::database;
use crate::core::notice::NoticeSigner;
use crate::core::state::WebContext;
use crate::features::feedback::{FeedbackService, PgFeedbackRepository};
use crate::features::uploads::{PgUploadedFileRepository, UploadService};
use crate::features::weather::WeatherService;
use crate::modules::storage::LocalFileStore;
use crate::shared::templates::Templates;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    if config.session.using_default_key {
        tracing::warn!("SECRET_KEY not set, signing notices with the development key");
    }

    // Ensure the upload directory exists before anything can be written to it
    let file_store = Arc::new(LocalFileStore::new(config.storage.clone()));
    file_store
        .ensure_dir_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;

    // Create database connection pool
    let pool = database::create_pool(&config.database)
        .await
        .map_err(|e| {
            tracing::error!("Database connection failed: {}", e);
            anyhow::anyhow!("Database connection failed: {}", e)
        })?;
    tracing::info!("Database connection pool created");

    tracing::info!("Ensuring database schema...");
    database::ensure_schema(&pool).await.map_err(|e| {
        tracing::error!("Schema setup failed: {}", e);
        anyhow::anyhow!("Schema setup failed: {}", e)
    })?;
    tracing::info!("Database schema ready");

    let templates = Templates::new().map_err(|e| anyhow::anyhow!(e))?;
    let web = WebContext::new(templates, NoticeSigner::new(&config.session.secret_key));

    let feedback_service = Arc::new(FeedbackService::new(Arc::new(PgFeedbackRepository::new(
        pool.clone(),
    ))));
    tracing::info!("Feedback service initialized");

    let upload_service = Arc::new(UploadService::new(
        Arc::new(PgUploadedFileRepository::new(pool.clone())),
        Arc::clone(&file_store),
    ));
    tracing::info!(
        "Upload service initialized (dir: {})",
        file_store.root().display()
    );

    let app = build_router(AppContext {
        web,
        feedback_service,
        weather_service: Arc::new(WeatherService::new()),
        upload_service,
        max_request_body_size: config.app.max_request_body_size,
    });

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
