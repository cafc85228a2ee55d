//! Search subsystem: text normalization, corpus preparation, TF-IDF vector
//! ranking, and query orchestration with a substring fallback.

pub mod corpus;
pub mod normalize;
pub mod query;
pub mod tfidf;
