//! TF-IDF vector space over the normalized corpus, with cosine ranking.
//!
//! The space is refitted on every search. Vocabulary units are single tokens
//! plus adjacent token pairs, capped at the highest-frequency entries. The
//! idf is smoothed, and a term counts even when it appears in only one
//! document.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::search::corpus::CorpusDoc;

/// Vocabulary cap. When exceeded, the entries with the highest total corpus
/// frequency are kept, ties broken lexicographically.
const MAX_FEATURES: usize = 5000;

/// A ranked document: ordinal id plus cosine similarity in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDoc {
    pub id: usize,
    pub score: f32,
}

/// Term weighting fitted over one corpus snapshot.
struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// Unigrams plus adjacent bigrams of a normalized text.
fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

impl Vectorizer {
    /// Fit vocabulary and idf weights over the corpus texts. `None` when the
    /// vocabulary degenerates to nothing.
    fn fit(texts: &[&str]) -> Option<Self> {
        let n_docs = texts.len();
        let mut total_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u32> = HashMap::new();

        for text in texts {
            let mut local: HashMap<String, u64> = HashMap::new();
            for term in terms(text) {
                *local.entry(term).or_insert(0) += 1;
            }
            for (term, count) in local {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                *total_counts.entry(term).or_insert(0) += count;
            }
        }

        if total_counts.is_empty() {
            return None;
        }

        let mut entries: Vec<(String, u64)> = total_counts.into_iter().collect();
        if entries.len() > MAX_FEATURES {
            entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            entries.truncate(MAX_FEATURES);
        }
        // Deterministic index assignment
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let idf = entries
            .iter()
            .map(|(term, _)| {
                let df = doc_freq[term] as f32;
                ((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = entries
            .into_iter()
            .enumerate()
            .map(|(i, (term, _))| (term, i))
            .collect();

        Some(Self { vocabulary, idf })
    }

    /// Project a normalized text into the fitted space as a sparse,
    /// index-sorted, L2-normalized vector. Terms outside the vocabulary
    /// contribute nothing; a projection with zero magnitude comes back empty.
    fn transform(&self, text: &str) -> Vec<(usize, f32)> {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        vector.sort_by_key(|(idx, _)| *idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        } else {
            vector.clear();
        }
        vector
    }
}

/// Dot product of two index-sorted sparse vectors. Both sides are
/// L2-normalized, so this is their cosine.
fn sparse_dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// Score every corpus document against the normalized query and return the
/// top `limit`, ordered by (score descending, claps descending). Zero-scored
/// documents are kept; only the absence of any usable signal (an empty
/// corpus, an empty query, a degenerate vocabulary, or a query that shares no
/// term with the corpus) yields an empty result.
pub fn rank(query_text: &str, corpus: &[CorpusDoc], limit: usize) -> Vec<RankedDoc> {
    if query_text.trim().is_empty() || corpus.is_empty() {
        return Vec::new();
    }

    let texts: Vec<&str> = corpus.iter().map(|d| d.text.as_str()).collect();
    let Some(vectorizer) = Vectorizer::fit(&texts) else {
        return Vec::new();
    };

    let query = vectorizer.transform(query_text);
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(RankedDoc, u64)> = corpus
        .iter()
        .map(|doc| {
            let vector = vectorizer.transform(&doc.text);
            let score = sparse_dot(&query, &vector).clamp(0.0, 1.0);
            (RankedDoc { id: doc.id, score }, doc.claps)
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.score
            .partial_cmp(&a.0.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.1.cmp(&a.1))
    });
    scored.truncate(limit);
    scored.into_iter().map(|(doc, _)| doc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: usize, text: &str, claps: u64) -> CorpusDoc {
        CorpusDoc {
            id,
            text: text.to_string(),
            claps,
        }
    }

    #[test]
    fn test_identical_text_scores_one() {
        let corpus = vec![
            doc(0, "rust enforces ownership compile time", 0),
            doc(1, "boil water add pasta", 0),
        ];
        let ranked = rank("rust enforces ownership compile time", &corpus, 10);
        assert_eq!(ranked[0].id, 0);
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
        assert!(ranked[1].score < ranked[0].score);
    }

    #[test]
    fn test_zero_scored_documents_are_returned() {
        let corpus = vec![
            doc(0, "rust ownership borrowing", 0),
            doc(1, "pasta water salt", 0),
        ];
        let ranked = rank("ownership", &corpus, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, 0);
        assert!(ranked[0].score > 0.0);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_query_with_no_corpus_overlap_gives_no_signal() {
        let corpus = vec![doc(0, "rust ownership borrowing", 0)];
        assert!(rank("kubernetes", &corpus, 10).is_empty());
    }

    #[test]
    fn test_empty_query_or_corpus_is_empty() {
        let corpus = vec![doc(0, "rust ownership", 0)];
        assert!(rank("", &corpus, 10).is_empty());
        assert!(rank("rust", &[], 10).is_empty());
    }

    #[test]
    fn test_adjacent_pair_match_outranks_split_tokens() {
        let corpus = vec![
            doc(0, "rust compile time checks", 0),
            doc(1, "compile fast run time slow", 0),
        ];
        let ranked = rank("compile time", &corpus, 10);
        assert_eq!(ranked[0].id, 0);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_equal_scores_break_ties_by_claps() {
        let corpus = vec![
            doc(0, "rust ownership guide", 5),
            doc(1, "rust ownership guide", 50),
        ];
        let ranked = rank("ownership", &corpus, 10);
        assert_eq!(ranked[0].id, 1);
        assert_eq!(ranked[1].id, 0);
        assert!((ranked[0].score - ranked[1].score).abs() < 1e-6);
    }

    #[test]
    fn test_limit_truncates() {
        let corpus: Vec<CorpusDoc> = (0..8)
            .map(|i| doc(i, "rust ownership notes", 0))
            .collect();
        assert_eq!(rank("rust", &corpus, 3).len(), 3);
    }

    #[test]
    fn test_vocabulary_caps_at_highest_frequency_terms() {
        // One doc with ~6000 distinct terms (unigrams + bigrams) plus a
        // high-frequency anchor term that must survive the cap.
        let filler: Vec<String> = (0..3000).map(|i| format!("tok{i:04}")).collect();
        let filler_text = filler.join(" ");
        let anchor_text = "anchor anchor anchor".to_string();
        let texts = vec![filler_text.as_str(), anchor_text.as_str()];

        let vectorizer = Vectorizer::fit(&texts).unwrap();
        assert_eq!(vectorizer.vocabulary.len(), MAX_FEATURES);
        assert!(vectorizer.vocabulary.contains_key("anchor"));
    }

    #[test]
    fn test_shared_everywhere_term_still_has_weight() {
        // Smoothed idf keeps a term present in all documents above zero.
        let corpus = vec![
            doc(0, "rust guide", 0),
            doc(1, "rust recipes", 0),
        ];
        let ranked = rank("rust", &corpus, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score > 0.0);
        assert!(ranked[1].score > 0.0);
    }
}
