mod config;
mod dashboards;
mod db;
mod errors;
mod extraction;
mod interview;
mod llm_client;
mod models;
mod opportunities;
mod quiz;
mod resume;
mod routes;
mod scoring;
mod search;
mod skillgap;
mod state;
mod storage;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::TextExtractor;
use crate::llm_client::{LlmClient, Provider};
use crate::routes::build_router;
use crate::search::SearchClient;
use crate::skillgap::gap_analysis::{GapAnalyzer, KeywordGapAnalyzer, LlmGapAnalyzer};
use crate::state::AppState;
use crate::storage::ResumeStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ascendra API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let gemini = LlmClient::new(Provider::Gemini, config.gemini_api_key.clone())?;
    let groq = LlmClient::new(Provider::Groq, config.groq_api_key.clone())?;
    let xai = LlmClient::new(Provider::Xai, config.xai_api_key.clone())?;
    for llm in [&gemini, &groq, &xai] {
        if llm.is_configured() {
            info!("{} client initialized (model: {})", llm.provider().label(), llm.model());
        } else {
            warn!("{} API key not set, features will use local fallbacks", llm.provider().label());
        }
    }

    let http = reqwest::Client::new();
    let search = SearchClient::new(http.clone(), config.tavily_api_key.clone());
    let extractor = TextExtractor::new(http, config.text_extractor_url.clone());

    let storage = ResumeStorage::from_config(&config).await;
    match &config.s3_bucket {
        Some(bucket) => info!("Resume uploads stored in bucket {bucket}"),
        None => info!("S3_BUCKET not set, resume files will not be stored"),
    }

    let gap_analyzer: Arc<dyn GapAnalyzer> = if groq.is_configured() {
        Arc::new(LlmGapAnalyzer::new(groq.clone()))
    } else {
        Arc::new(KeywordGapAnalyzer)
    };

    let state = AppState {
        db,
        gemini,
        groq,
        xai,
        search,
        extractor,
        storage,
        config: config.clone(),
        gap_analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
