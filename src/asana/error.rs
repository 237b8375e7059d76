use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("review has no author")]
    MissingAuthor,

    #[error("identity store lookup failed: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
