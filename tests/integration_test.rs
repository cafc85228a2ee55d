//! Integration tests for the scrape-store-search pipeline.
//!
//! These tests exercise the full row-store and search flow without any
//! network access; the scraper's HTML extraction runs on a fixture page.

use article_search::models::Article;
use article_search::scrape::extract_article;
use article_search::search::query::search_articles;
use article_search::store::{ArticleStore, StoreError};

/// Helper: a fully-populated stored article.
fn article(title: &str, full_text: &str, keywords: &str, claps: u64) -> Article {
    Article {
        title: title.to_string(),
        subtitle: "a subtitle".to_string(),
        full_text: full_text.to_string(),
        num_images: 1,
        image_urls: "https://img.example.com/1.png".to_string(),
        num_external_links: 2,
        author_name: "Ada Lovelace".to_string(),
        author_profile_url: "https://medium.com/@ada".to_string(),
        claps,
        reading_time: "4 min read".to_string(),
        keywords: keywords.to_string(),
        url: "https://medium.com/p/x".to_string(),
    }
}

fn blank_row() -> Article {
    article("", "", "", 0)
}

#[test]
fn test_end_to_end_store_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path().join("articles.csv"));
    store.init().unwrap();

    store
        .append(&[
            article(
                "Rust Ownership",
                "Rust enforces ownership at compile time.",
                "rust,memory",
                10,
            ),
            article("Cooking Pasta", "Boil water and add pasta.", "food", 5),
        ])
        .unwrap();

    let rows = store.snapshot().unwrap();
    let results = search_articles(&rows, "rust ownership", 10);

    assert_eq!(results[0].article_id, 0);
    assert!(results[0].similarity > 0.0);
    assert_eq!(results.len(), 2);
    assert!(results[1].similarity <= results[0].similarity);
}

#[test]
fn test_scores_stay_within_percentage_bounds() {
    let rows = vec![
        article("Rust Ownership", "Rust enforces ownership.", "rust", 10),
        article("Cooking Pasta", "Boil water and add pasta.", "food", 5),
        article("Async Rust", "Futures and executors in rust.", "rust,async", 7),
    ];
    for query in ["rust", "pasta water", "ownership rust async"] {
        let results = search_articles(&rows, query, 10);
        assert!(!results.is_empty());
        for r in &results {
            assert!(r.similarity >= 0.0 && r.similarity <= 100.0, "{query}: {r:?}");
        }
    }
}

#[test]
fn test_result_length_respects_limit() {
    let rows: Vec<Article> = (0..6)
        .map(|i| article(&format!("Rust Notes {i}"), "notes about rust", "rust", i))
        .collect();
    assert!(search_articles(&rows, "rust", 3).len() <= 3);
    assert_eq!(search_articles(&rows, "rust", 10).len(), 6);
}

#[test]
fn test_identifiers_survive_filtering_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path().join("articles.csv"));

    // Seven rows with no searchable content, then one real article
    let mut rows: Vec<Article> = (0..7).map(|_| blank_row()).collect();
    rows.push(article(
        "Rust Ownership",
        "Rust enforces ownership at compile time.",
        "rust",
        3,
    ));
    store.append(&rows).unwrap();

    let snapshot = store.snapshot().unwrap();
    let results = search_articles(&snapshot, "ownership", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].article_id, 7);
}

#[test]
fn test_equal_similarity_orders_by_claps() {
    let rows = vec![
        article("Rust Ownership", "Rust enforces ownership.", "rust", 5),
        article("Rust Ownership", "Rust enforces ownership.", "rust", 50),
    ];
    let results = search_articles(&rows, "ownership", 10);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].article_id, 1);
    assert_eq!(results[0].claps, 50);
}

#[test]
fn test_empty_query_is_empty_and_skips_fallback() {
    let rows = vec![article("Anything", "any body at all", "", 0)];
    assert!(search_articles(&rows, "", 10).is_empty());
}

#[test]
fn test_unmatched_term_with_no_substring_hit_is_empty() {
    let rows = vec![article(
        "Rust Ownership",
        "Rust enforces ownership at compile time.",
        "rust",
        10,
    )];
    assert!(search_articles(&rows, "kubernetes", 10).is_empty());
}

#[test]
fn test_absent_store_is_a_failure_not_an_empty_success() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path().join("never-created.csv"));
    assert!(matches!(store.snapshot(), Err(StoreError::Missing(_))));
}

#[test]
fn test_extracted_page_flows_into_search() {
    let html = r#"<html><head>
        <meta name="keywords" content="rust, borrow checker">
      </head><body>
        <h1>Understanding the Borrow Checker</h1>
        <article>
          <p>The borrow checker enforces aliasing rules at compile time.</p>
        </article>
      </body></html>"#;

    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path().join("articles.csv"));
    store.init().unwrap();

    let scraped = extract_article(html, "https://medium.com/p/borrow");
    store.append(&[scraped]).unwrap();

    let rows = store.snapshot().unwrap();
    let results = search_articles(&rows, "borrow checker", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].article_id, 0);
    assert!(results[0].similarity > 0.0);
    assert_eq!(results[0].url, "https://medium.com/p/borrow");
}
