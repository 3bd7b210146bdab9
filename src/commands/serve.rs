use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use wikirender::config::Config;
use wikirender::page::{CategoryLookup, InMemoryCategories, Page, PageResponse, enrich};
use wikirender::text::Pipeline;

use crate::ServeArgs;

/// Shared, read-only state for every request.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
    categories: Arc<dyn CategoryLookup>,
}

/// Render posted markdown to HTML.
async fn convert_markdown(State(state): State<AppState>, markdown: String) -> Html<String> {
    Html(state.pipeline.render(&markdown))
}

/// Enrich a posted page record with slug, tag list and category.
async fn enrich_page(State(state): State<AppState>, Json(page): Json<Page>) -> Json<PageResponse> {
    Json(enrich(&page, state.categories.as_ref()))
}

async fn health() -> &'static str {
    "ok"
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/markdown/convert", post(convert_markdown))
        .route("/api/pages/enrich", post(enrich_page))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let config = Config::load_from_arg(args.config_file.as_deref())?;

    // Built once; every request shares the same pipeline.
    let pipeline = Pipeline::from_config(&config.text, &config.markdown)?;
    let categories = match &config.server.categories_path {
        Some(path) => InMemoryCategories::load(path)?,
        None => InMemoryCategories::default(),
    };
    tracing::info!(
        stages = ?pipeline.stage_names(),
        categories = categories.len(),
        "rendering pipeline ready"
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        categories: Arc::new(categories),
    };

    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;

    tracing::info!("serving on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
