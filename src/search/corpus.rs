//! Corpus preparation: turn a row-store snapshot into the ordered set of
//! search-eligible documents.

use crate::models::Article;
use crate::search::normalize::normalize;

/// A search-eligible document derived from one store row. Recomputed on every
/// search; never cached.
#[derive(Debug, Clone)]
pub struct CorpusDoc {
    /// Ordinal position of the row in the full store, assigned before any
    /// filtering so ids stay stable when earlier rows are dropped.
    pub id: usize,
    /// Normalized composite text (title and keywords carry double weight)
    pub text: String,
    pub claps: u64,
}

/// Build the eligible corpus from a snapshot. A row survives when both Title
/// and Full Text are present (non-empty, not the sentinel) and its composite
/// text still holds tokens after normalization. Survivors keep original row
/// order. An empty snapshot, or one where nothing survives, yields an empty
/// corpus rather than an error.
pub fn build_corpus(rows: &[Article]) -> Vec<CorpusDoc> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            !Article::is_missing(&row.title) && !Article::is_missing(&row.full_text)
        })
        .filter_map(|(id, row)| {
            let composite = format!(
                "{} {} {} {} {} {}",
                row.title, row.title, row.keywords, row.keywords, row.subtitle, row.full_text
            );
            if composite.trim().is_empty() {
                return None;
            }
            let text = normalize(&composite);
            if text.is_empty() {
                return None;
            }
            Some(CorpusDoc {
                id,
                text,
                claps: row.claps,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NA;

    fn row(title: &str, full_text: &str) -> Article {
        Article {
            title: title.to_string(),
            subtitle: String::new(),
            full_text: full_text.to_string(),
            num_images: 0,
            image_urls: String::new(),
            num_external_links: 0,
            author_name: String::new(),
            author_profile_url: String::new(),
            claps: 0,
            reading_time: String::new(),
            keywords: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn test_empty_snapshot_yields_empty_corpus() {
        assert!(build_corpus(&[]).is_empty());
    }

    #[test]
    fn test_rows_missing_title_or_body_are_excluded() {
        let rows = vec![
            row("", "body text here"),
            row(NA, "body text here"),
            row("Title", ""),
            row("Title", NA),
            row("Rust Ownership", "Rust enforces ownership."),
        ];
        let corpus = build_corpus(&rows);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].id, 4);
    }

    #[test]
    fn test_ids_are_positions_in_the_full_store() {
        let mut rows = vec![row("", ""); 7];
        rows.push(row("Survivor", "meaningful body text"));
        let corpus = build_corpus(&rows);
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].id, 7);
    }

    #[test]
    fn test_title_and_keywords_carry_double_weight() {
        let mut r = row("Ownership", "borrowing explained");
        r.keywords = "lifetimes".to_string();
        let corpus = build_corpus(&[r]);
        let tokens: Vec<&str> = corpus[0].text.split(' ').collect();
        assert_eq!(tokens.iter().filter(|t| **t == "ownership").count(), 2);
        assert_eq!(tokens.iter().filter(|t| **t == "lifetimes").count(), 2);
        assert_eq!(tokens.iter().filter(|t| **t == "borrowing").count(), 1);
    }

    #[test]
    fn test_rows_that_normalize_to_nothing_are_excluded() {
        // Eligible on the raw fields, but nothing survives normalization.
        let rows = vec![row("!!!", "it is so")];
        assert!(build_corpus(&rows).is_empty());
    }

    #[test]
    fn test_survivors_keep_original_order() {
        let rows = vec![
            row("Zebra Stripes", "all about zebras"),
            row("", ""),
            row("Apple Pie", "all about baking apples"),
        ];
        let corpus = build_corpus(&rows);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].id, 0);
        assert_eq!(corpus[1].id, 2);
    }
}
