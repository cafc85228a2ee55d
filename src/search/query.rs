//! Query orchestration: normalize, rank, and fall back to substring matching
//! when vector ranking produces no usable signal.

use crate::models::{Article, SearchResult};
use crate::search::corpus::build_corpus;
use crate::search::normalize::normalize;
use crate::search::tfidf;

/// Fixed score assigned to substring-fallback matches.
const FALLBACK_SIMILARITY: f64 = 50.0;

/// Run a full search over a row-store snapshot and return up to `limit`
/// shaped result records.
///
/// An empty (or whitespace) raw query is a hard empty result; the fallback is
/// never consulted for it. Otherwise, when ranking comes back empty (no
/// eligible documents, or a query sharing no term with the corpus) and the
/// store has rows, a case-insensitive substring match over Title, Keywords,
/// and Full Text stands in, scored at a fixed 50.0 in original row order.
pub fn search_articles(rows: &[Article], raw_query: &str, limit: usize) -> Vec<SearchResult> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let corpus = build_corpus(rows);
    let ranked = tfidf::rank(&normalize(query), &corpus, limit);

    if ranked.is_empty() {
        if rows.is_empty() {
            return Vec::new();
        }
        return substring_fallback(rows, query, limit);
    }

    ranked
        .into_iter()
        .map(|r| result_from_row(r.id, &rows[r.id], to_percentage(r.score)))
        .collect()
}

/// Cosine score mapped to a percentage with two-decimal precision.
fn to_percentage(score: f32) -> f64 {
    (score as f64 * 100.0 * 100.0).round() / 100.0
}

fn substring_fallback(rows: &[Article], query: &str, limit: usize) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.title.to_lowercase().contains(&needle)
                || row.keywords.to_lowercase().contains(&needle)
                || row.full_text.to_lowercase().contains(&needle)
        })
        .take(limit)
        .map(|(id, row)| result_from_row(id, row, FALLBACK_SIMILARITY))
        .collect()
}

fn result_from_row(id: usize, row: &Article, similarity: f64) -> SearchResult {
    SearchResult {
        article_id: id,
        title: row.title.clone(),
        url: row.url.clone(),
        similarity,
        claps: row.claps,
        author: row.author_name.clone(),
        reading_time: row.reading_time.clone(),
    }
}
