//! # article-search
//!
//! A Rust web application for scraping Medium-style article pages into a
//! flat CSV corpus and searching that corpus with TF-IDF cosine similarity.
//!
//! ## Architecture
//!
//! Every search is a fresh, stateless pass over the current row store:
//!
//! ```text
//!   ┌────────────┐     ┌────────────────┐     ┌────────────────┐
//!   │  CSV rows   │ ──▶ │  Corpus Loader  │ ──▶ │  TF-IDF ranker  │
//!   │  (store)    │     │ filter + merge  │     │ cosine + claps  │
//!   └────────────┘     └────────────────┘     └────────┬───────┘
//!                                                       │ no signal?
//!                                                       ▼
//!                                             ┌────────────────┐
//!                                             │   Substring     │
//!                                             │ fallback match  │
//!                                             └────────┬───────┘
//!                                                       │
//!                                                       ▼
//!                                             ┌────────────────┐
//!                                             │ Result records  │
//!                                             └────────────────┘
//! ```
//!
//! Rows flow one direction; no component mutates another's state. Documents
//! keep the ordinal id of their row in the full store even when earlier rows
//! are filtered out, so result ids are stable across queries.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server and data dir
//! - [`models`] - Shared data types: `Article` row record, request/response types
//! - [`store`] - Append-only CSV row store with a locked snapshot/append API
//! - [`scrape`] - Article page fetching and HTML field extraction
//! - [`search::normalize`] - Lowercasing, punctuation stripping, stopword removal
//! - [`search::corpus`] - Eligibility filtering and weighted composite documents
//! - [`search::tfidf`] - TF-IDF vector space (uni+bigrams) and cosine ranking
//! - [`search::query`] - Search orchestration and the substring fallback
//! - [`api`] - Axum HTTP handlers for scraping, listing, and search
//! - [`state`] - Shared application state holding the store and HTTP client

pub mod api;
pub mod config;
pub mod models;
pub mod scrape;
pub mod search;
pub mod state;
pub mod store;
