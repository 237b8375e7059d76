//! Mirrors GitHub pull request review activity into Asana task comments.
//!
//! The crate has two halves: [`github`] holds the wire-shaped review
//! model handed over by the webhook ingestion layer, and [`asana`]
//! turns a review into a single HTML comment body, resolving GitHub
//! logins to Asana domain users along the way.

pub mod asana;
pub mod github;
