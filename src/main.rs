use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use article_search::api;
use article_search::config::Config;
use article_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Row store: {}", config.store_path().display());

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        // Serve frontend
        .route("/", get(serve_index))
        // API routes
        .route("/api/articles", get(api::articles::list_articles))
        .route("/api/articles/{id}", get(api::articles::get_article))
        .route("/api/scrape", post(api::articles::scrape))
        .route("/api/search", post(api::search::search))
        .with_state(state)
        .fallback(get(serve_index));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
