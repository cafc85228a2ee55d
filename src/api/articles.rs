use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::models::{
    Article, ArticleDetail, ArticleSummary, ScrapeRequest, ScrapeResponse, ScrapedArticle,
};
use crate::state::AppState;
use crate::store::StoreError;

use super::store_failure;

/// Characters of full text echoed back after a scrape.
const PREVIEW_CHARS: usize = 300;

/// GET /api/articles - List all stored articles
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleSummary>>, (StatusCode, String)> {
    let store = state.store.clone();
    let rows = tokio::task::spawn_blocking(move || store.snapshot())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("store read task error: {e}"),
            )
        })?;

    // An absent store just means nothing has been scraped yet
    let rows = match rows {
        Ok(rows) => rows,
        Err(StoreError::Missing(_)) => Vec::new(),
        Err(e) => return Err(store_failure(e)),
    };

    let summaries = rows
        .iter()
        .enumerate()
        .map(|(id, row)| summary(id, row))
        .collect();
    Ok(Json(summaries))
}

/// GET /api/articles/{id} - Full detail for one article
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<Json<ArticleDetail>, (StatusCode, String)> {
    let store = state.store.clone();
    let rows = tokio::task::spawn_blocking(move || store.snapshot())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("store read task error: {e}"),
            )
        })?
        .map_err(store_failure)?;

    let row = rows
        .get(id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Article not found".to_string()))?;
    Ok(Json(ArticleDetail::from_row(id, row)))
}

/// POST /api/scrape - Scrape the given URLs in sequence and append the
/// successful records to the row store. Per-URL failures are collected, not
/// fatal; the response echoes the stored articles with their assigned ids.
pub async fn scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, (StatusCode, String)> {
    let urls: Vec<String> = req
        .urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();
    if urls.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please provide at least one URL".to_string(),
        ));
    }
    if urls.len() > state.config.max_urls_per_request {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "At most {} URLs per request",
                state.config.max_urls_per_request
            ),
        ));
    }

    let mut scraped = Vec::new();
    let mut errors = Vec::new();
    for url in &urls {
        match crate::scrape::scrape_article(&state.http_client, url).await {
            Ok(article) => scraped.push(article),
            Err(e) => {
                tracing::warn!("Failed to scrape {url}: {e:#}");
                errors.push(format!("Failed to scrape {url}: {e:#}"));
            }
        }
    }

    if scraped.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!(
                "No articles were successfully scraped: {}",
                errors.join("; ")
            ),
        ));
    }

    let store = state.store.clone();
    let to_append = scraped.clone();
    let first_id = tokio::task::spawn_blocking(move || store.append(&to_append))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("store write task error: {e}"),
            )
        })?
        .map_err(store_failure)?;

    tracing::info!("Stored {} scraped article(s)", scraped.len());

    let articles = scraped
        .iter()
        .enumerate()
        .map(|(i, article)| scraped_article(first_id + i, article))
        .collect();

    Ok(Json(ScrapeResponse {
        scraped: scraped.len(),
        errors,
        articles,
    }))
}

fn summary(id: usize, row: &Article) -> ArticleSummary {
    ArticleSummary {
        id,
        title: row.title.clone(),
        subtitle: row.subtitle.clone(),
        author: row.author_name.clone(),
        claps: row.claps,
        reading_time: row.reading_time.clone(),
        url: row.url.clone(),
    }
}

fn scraped_article(id: usize, row: &Article) -> ScrapedArticle {
    ScrapedArticle {
        id,
        title: row.title.clone(),
        subtitle: row.subtitle.clone(),
        preview: preview(&row.full_text),
        author: row.author_name.clone(),
        claps: row.claps,
        reading_time: row.reading_time.clone(),
        keywords: row.keyword_list(),
        url: row.url.clone(),
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}
