//! Global quick search over the in-memory collections.
//!
//! # Invariants
//! - Queries of two characters or fewer return no hits.
//! - Matching is case-insensitive substring over display text.

pub mod text;

pub use text::{search, search_all, SearchHit, SearchQuery, MIN_QUERY_CHARS};
