//! Asana-side rendering: identity resolution and the review comment
//! formatter.

mod comment;
mod error;
mod identity;
mod text;

pub use comment::asana_comment_from_review;
pub use error::{Result, SyncError};
pub use identity::{AsanaUserRef, IdentityResolver, UserStore};
