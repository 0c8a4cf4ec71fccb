//! # Product API
//!
//! `product-api` is a small REST service that manages a catalogue of products
//! (name, price, availability) stored in `PostgreSQL`.
//!
//! ## Request Pipeline
//!
//! Every request goes through the same chain:
//!
//! 1. **Origin guard:** requests carrying an `Origin` header other than the
//!    configured frontend origin are rejected before routing.
//! 2. **Body parsing:** JSON bodies are parsed up front; malformed JSON is rejected.
//! 3. **Validation:** each handler evaluates its declarative rule set with
//!    [`product::validation::validate`] and short-circuits with `400` on errors.
//! 4. **Persistence:** a single repository call per request, keyed by id.
//!
//! ## Response Envelope
//!
//! Success bodies are `{"data": ...}`, domain errors `{"error": "..."}` and
//! validation failures `{"errors": [...]}`.
//!
//! ## Storage
//!
//! The table layout lives in [`product::schema`] as an explicit definition that
//! is handed to the repository, so the record shape never depends on how it is
//! stored. Writes that target an id are single conditional statements; "not
//! found" is derived from the returned row instead of a prior lookup.

pub mod api;
pub mod cli;
pub mod database;
pub mod product;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
