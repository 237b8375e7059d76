//! GitHub-side data model.
//!
//! These types are constructed by the webhook ingestion layer; nothing
//! here talks to the GitHub API.

pub mod models;

pub use models::{Comment, Review, ReviewState, User};
