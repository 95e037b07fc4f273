mod config;
mod db;
mod errors;
mod extraction;
mod ingest;
mod matching;
mod models;
mod profile;
mod queue;
mod repository;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::S3TextExtractor;
use crate::ingest::{worker::run_worker, IngestContext};
use crate::matching::JaccardMatcher;
use crate::queue::{RedisQueue, ResumeQueue};
use crate::repository::{
    CandidateRepository, JobRepository, PgCandidateRepository, PgJobRepository,
};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talentscan API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let jobs: Arc<dyn JobRepository> = Arc::new(PgJobRepository::new(db.clone()));
    let candidates: Arc<dyn CandidateRepository> = Arc::new(PgCandidateRepository::new(db));

    // Initialize Redis queue
    let redis = redis::Client::open(config.redis_url.clone())?;
    let queue: Arc<dyn ResumeQueue> = Arc::new(RedisQueue::new(
        redis,
        &config.queue_name,
        Duration::from_secs(config.ingest_poll_secs),
    ));
    info!("Redis queue '{}' initialized", config.queue_name);

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    if config.ingest_worker_enabled {
        let ctx = IngestContext {
            extractor: Arc::new(S3TextExtractor::new(s3)),
            jobs: jobs.clone(),
            candidates: candidates.clone(),
            matcher: Arc::new(JaccardMatcher),
            default_bucket: config.resume_bucket.clone(),
        };
        tokio::spawn(run_worker(
            ctx,
            queue.clone(),
            config.ingest_batch_size,
            Duration::from_secs(config.ingest_poll_secs.max(1)),
        ));
    } else {
        info!("Ingest worker disabled (INGEST_WORKER_ENABLED)");
    }

    // Build app state
    let state = AppState {
        jobs,
        candidates,
        queue,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "talentscan-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path, not virtual host.
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
