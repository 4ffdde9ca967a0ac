use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use firecrawl_client::FirecrawlClient;
use llm_client::LlmClient;
use mentionwatch_common::{Config, Mention};
use mentionwatch_ingest::{IngestPipeline, MentionStore};
use mentionwatch_store::PgMentionStore;

mod templates;

// --- App State ---

struct AppState {
    search: FirecrawlClient,
    llm: LlmClient,
    store: PgMentionStore,
    keywords: Vec<String>,
    scrape_timeout: Duration,
}

// --- Response envelopes (camelCase to match the dashboard wire format) ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeResponse {
    success: bool,
    saved_count: usize,
    total_analyzed: usize,
    debug: Vec<String>,
}

#[derive(Serialize)]
struct MentionsResponse {
    success: bool,
    mentions: Vec<Mention>,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("mentionwatch=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let store = PgMentionStore::connect(&config.database_url).await?;

    let mut llm = LlmClient::new(&config.nvidia_api_key, &config.llm_model);
    if let Some(base_url) = &config.llm_base_url {
        llm = llm.with_base_url(base_url);
    }

    let state = Arc::new(AppState {
        search: FirecrawlClient::new(config.firecrawl_api_key.clone()),
        llm,
        store,
        keywords: config.keywords.clone(),
        scrape_timeout: Duration::from_secs(config.scrape_timeout_secs),
    });

    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/api/scrape", post(api_scrape))
        .route("/api/mentions", get(api_mentions))
        .with_state(state)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(keywords = ?config.keywords, "MentionWatch web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn dashboard_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_recent().await {
        Ok(mentions) => Html(templates::render_dashboard(&mentions)),
        Err(e) => {
            warn!(error = %e, "Failed to load mentions for dashboard");
            Html("<h1>Error loading mentions</h1>".to_string())
        }
    }
}

/// Trigger one ingestion run across all configured keywords. The whole run
/// is wrapped in a timeout so a stuck upstream can't hold the request open
/// forever; aborting between keywords leaves no partial keyword state.
async fn api_scrape(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let pipeline = IngestPipeline::new(
        state.search.clone(),
        state.llm.clone(),
        state.store.clone(),
        state.keywords.clone(),
    );

    let outcome = tokio::time::timeout(state.scrape_timeout, pipeline.run()).await;

    match outcome {
        Ok(Ok(report)) => Json(ScrapeResponse {
            success: true,
            saved_count: report.saved_count,
            total_analyzed: report.total_analyzed,
            debug: report.diagnostics,
        })
        .into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "Ingestion run failed");
            error_response(e.to_string()).into_response()
        }
        Err(_) => {
            error!(timeout_secs = state.scrape_timeout.as_secs(), "Ingestion run timed out");
            error_response("ingestion run timed out".to_string()).into_response()
        }
    }
}

async fn api_mentions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_recent().await {
        Ok(mentions) => Json(MentionsResponse {
            success: true,
            mentions,
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to list mentions");
            error_response(e.to_string()).into_response()
        }
    }
}
