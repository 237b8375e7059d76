use serde::Deserialize;

/// A GitHub identity. `name` is the profile display name, which many
/// accounts leave unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: None,
        }
    }

    pub fn with_name(login: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::ChangesRequested => "changes_requested",
            Self::Commented => "commented",
            Self::Dismissed => "dismissed",
            Self::Pending => "pending",
        }
    }
}

/// An inline review comment. `body` and `url` are free text from the
/// webhook payload and must be treated as untrusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub body: String,
    pub url: Option<String>,
}

/// A pull request review as delivered by the ingestion layer.
///
/// `author` is `Option` because GitHub omits the author for deleted
/// accounts; downstream rendering treats that as invalid input rather
/// than guessing. `comments` keeps payload order, which is also the
/// display order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub author: Option<User>,
    pub state: ReviewState,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub url: Option<String>,
}
