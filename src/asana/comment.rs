//! Builds one Asana HTML comment from a GitHub review.
//!
//! The output is a fragment (no `<html>`/`<body>` wrapper) that the
//! Asana API client posts verbatim as a comment body.

use super::error::{Result, SyncError};
use super::identity::{self, IdentityResolver, UserStore};
use super::text::{escape_html, link_html, render_markup};
use crate::github::{Review, ReviewState, User};
use lazy_regex::{Lazy, Regex, lazy_regex};
use std::collections::HashMap;

// An @mention token: `@` at start of text or right after whitespace,
// followed by GitHub login characters. The charset excludes `.`, so a
// mention never swallows a domain suffix, and the prefix requirement
// keeps email addresses from matching.
static MENTION_RE: Lazy<Regex> = lazy_regex!(r"(^|\s)@([A-Za-z0-9_\-]+)");

/// Render a review as a single Asana HTML comment.
///
/// The review author and every `@mention` in the review body and
/// inline comment bodies are resolved against `store`; unresolved
/// identities fall back to plain text. Fails only on a review with no
/// author, which is an upstream contract violation.
pub async fn asana_comment_from_review<S: UserStore>(
    store: &S,
    review: &Review,
) -> Result<String> {
    let author = review.author.as_ref().ok_or(SyncError::MissingAuthor)?;
    let resolver = IdentityResolver::new(store);

    let mut out = author_html(&resolver, author).await?;
    if let Some(clause) = state_clause(review.state) {
        out.push(' ');
        out.push_str(clause);
    }

    let body = render_text(&resolver, &review.body).await?;
    if !body.trim().is_empty() {
        out.push_str(":\n");
        out.push_str(&body);
    }

    if !review.comments.is_empty() {
        out.push_str("\nand left inline comments:\n<ul>");
        for comment in &review.comments {
            out.push_str("<li>");
            let text = render_text(&resolver, &comment.body).await?;
            out.push_str(&text);
            if let Some(url) = &comment.url {
                if !text.is_empty() {
                    out.push(' ');
                }
                out.push_str(&link_html(url));
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }

    if let Some(url) = &review.url {
        out.push('\n');
        out.push_str(&link_html(url));
    }

    Ok(out)
}

async fn author_html<S: UserStore>(
    resolver: &IdentityResolver<'_, S>,
    author: &User,
) -> Result<String> {
    match resolver.resolve(&author.login).await? {
        Some(user_ref) => Ok(user_ref.to_mention_html()),
        None => Ok(escape_html(&identity::display_fallback(author))),
    }
}

/// Human wording for the review state. `Commented`/`Pending` are the
/// neutral states and add no clause.
fn state_clause(state: ReviewState) -> Option<&'static str> {
    match state {
        ReviewState::Approved => Some("approved this pull request"),
        ReviewState::ChangesRequested => Some("requested changes on this pull request"),
        ReviewState::Dismissed => Some("had their review dismissed"),
        ReviewState::Commented | ReviewState::Pending => None,
    }
}

/// Markup pass plus mention rewriting for one blob of untrusted text.
async fn render_text<S: UserStore>(
    resolver: &IdentityResolver<'_, S>,
    raw: &str,
) -> Result<String> {
    let marked_up = render_markup(raw);
    rewrite_mentions(resolver, &marked_up).await
}

/// Replace resolvable `@login` tokens with Asana mentions, leaving
/// unresolved ones untouched. Each distinct login is looked up once;
/// results are merged back positionally, so lookups need no ordering
/// guarantee from the store.
async fn rewrite_mentions<S: UserStore>(
    resolver: &IdentityResolver<'_, S>,
    text: &str,
) -> Result<String> {
    let mut resolved: HashMap<String, Option<String>> = HashMap::new();
    for caps in MENTION_RE.captures_iter(text) {
        let login = &caps[2];
        if !resolved.contains_key(login) {
            let mention = resolver.resolve(login).await?.map(|r| r.to_mention_html());
            resolved.insert(login.to_string(), mention);
        }
    }
    if resolved.is_empty() {
        return Ok(text.to_string());
    }

    let out = MENTION_RE.replace_all(text, |caps: &regex::Captures| {
        match resolved.get(&caps[2]).and_then(|m| m.as_ref()) {
            Some(mention) => format!("{}{}", &caps[1], mention),
            None => caps[0].to_string(),
        }
    });
    Ok(out.into_owned())
}
