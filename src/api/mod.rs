//! Axum HTTP handlers.

pub mod articles;
pub mod search;

use axum::http::StatusCode;

use crate::store::StoreError;

/// Map store errors onto transport statuses: an absent store reads as "no
/// articles yet", anything else is an operational failure.
pub(crate) fn store_failure(err: StoreError) -> (StatusCode, String) {
    match err {
        StoreError::Missing(_) => (
            StatusCode::NOT_FOUND,
            "No articles found. Please scrape some articles first.".to_string(),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("row store failure: {other}"),
        ),
    }
}
