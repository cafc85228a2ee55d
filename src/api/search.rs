use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::models::{SearchRequest, SearchResponse};
use crate::search::query::search_articles;
use crate::state::AppState;
use crate::store::StoreError;

use super::store_failure;

/// POST /api/search - One full pass over the row store per request:
/// snapshot read → corpus build → TF-IDF fit → scoring → shaping. The whole
/// pass is blocking work, so it runs off the async executor.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = req.query.trim().to_string();
    let limit = req.limit;

    // Expected, frequent condition: answered, not failed
    if query.is_empty() {
        return Ok(Json(SearchResponse {
            query,
            message: "Please enter a search query".to_string(),
            results: Vec::new(),
        }));
    }

    let store = state.store.clone();
    let query_for_task = query.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let rows = store.snapshot()?;
        let results = search_articles(&rows, &query_for_task, limit);
        Ok::<_, StoreError>((rows.len(), results))
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("search task error: {e}"),
        )
    })?;

    let (row_count, results) = outcome.map_err(store_failure)?;

    let message = if row_count == 0 {
        "No articles found. Please scrape some articles first.".to_string()
    } else if results.is_empty() {
        "No similar articles found. Try different keywords.".to_string()
    } else {
        format!("Found {} similar article(s)", results.len())
    };

    tracing::debug!("Search '{query}' returned {} result(s)", results.len());

    Ok(Json(SearchResponse {
        query,
        message,
        results,
    }))
}
