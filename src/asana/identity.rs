//! Resolves GitHub logins to Asana domain users.

use super::error::Result;
use crate::github::User;
use tracing::debug;

/// Read-only lookup against the externally populated identity table
/// (GitHub login → Asana domain user id).
///
/// Absence is a normal result, not an error: `Ok(None)` means "no
/// mapping known" and callers fall back to plain-text rendering.
/// Implementations may be remote; the trait stays object-safe and
/// `Send + Sync` so lookups can run concurrently.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn asana_user_id_for_github_login(&self, login: &str) -> Result<Option<String>>;
}

/// A resolved Asana domain user, renderable as a native mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsanaUserRef {
    gid: String,
}

impl AsanaUserRef {
    pub fn new(gid: impl Into<String>) -> Self {
        Self { gid: gid.into() }
    }

    pub fn gid(&self) -> &str {
        &self.gid
    }

    /// Asana rich-text mention element for this user.
    pub fn to_mention_html(&self) -> String {
        format!("<a data-asana-gid=\"{}\"/>", self.gid)
    }
}

/// Thin wrapper over a [`UserStore`] that maps logins to
/// [`AsanaUserRef`]s.
pub struct IdentityResolver<'a, S: UserStore> {
    store: &'a S,
}

impl<'a, S: UserStore> IdentityResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Look up a GitHub login. `Ok(None)` means the login has no known
    /// Asana identity and should be rendered as plain text.
    pub async fn resolve(&self, login: &str) -> Result<Option<AsanaUserRef>> {
        let gid = self.store.asana_user_id_for_github_login(login).await?;
        match gid {
            Some(gid) => {
                debug!(login, gid = gid.as_str(), "resolved GitHub login to Asana user");
                Ok(Some(AsanaUserRef::new(gid)))
            }
            None => {
                debug!(login, "no Asana identity for GitHub login");
                Ok(None)
            }
        }
    }
}

/// Plain-text rendering for a user with no Asana identity:
/// `GitHub user 'login'`, plus ` (Display Name)` when set.
/// The caller is responsible for escaping the result.
pub(crate) fn display_fallback(user: &User) -> String {
    match &user.name {
        Some(name) => format!("GitHub user '{}' ({})", user.login, name),
        None => format!("GitHub user '{}'", user.login),
    }
}
