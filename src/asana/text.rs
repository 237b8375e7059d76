//! Plain-text transforms applied to GitHub-authored text before it is
//! embedded in an Asana comment.
//!
//! The pipeline is escape → markdown-lite → autolink, in that order:
//! escaping runs first so injected tags are never themselves escaped,
//! and autolink runs on already-marked-up text so it only sees bare
//! URL tokens.

use lazy_regex::{Lazy, Regex, lazy_regex};

static BOLD_STARS_RE: Lazy<Regex> = lazy_regex!(r"\*\*([^*]+)\*\*");
// Word boundaries keep underscores inside snake_case tokens (GitHub
// logins in particular) from opening emphasis.
static BOLD_UNDERSCORES_RE: Lazy<Regex> = lazy_regex!(r"\b__([^_]+)__\b");
static EM_STARS_RE: Lazy<Regex> = lazy_regex!(r"\*([^*]+)\*");
static EM_UNDERSCORES_RE: Lazy<Regex> = lazy_regex!(r"\b_([^_]+)_\b");
static CODE_RE: Lazy<Regex> = lazy_regex!(r"`([^`]+)`");
static STRIKE_RE: Lazy<Regex> = lazy_regex!(r"~([^~]+)~");

// A bare URL token: scheme through the next whitespace, anchored to
// start-of-text or a preceding whitespace character.
static URL_RE: Lazy<Regex> = lazy_regex!(r"(^|\s)(https?://\S+)");

/// Escape the three characters that can alter markup structure.
///
/// Quotes are deliberately left alone: Asana treats them as safe in
/// comment bodies, and the acceptance behavior requires them to pass
/// through byte-identical.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// GitHub markdown-lite to Asana HTML, simple regex-replace semantics
/// (not nesting-safe). Input must already be escaped.
fn markdown_to_html(text: &str) -> String {
    let text = BOLD_STARS_RE.replace_all(text, "<strong>$1</strong>");
    let text = BOLD_UNDERSCORES_RE.replace_all(&text, "<strong>$1</strong>");
    let text = EM_STARS_RE.replace_all(&text, "<em>$1</em>");
    let text = EM_UNDERSCORES_RE.replace_all(&text, "<em>$1</em>");
    let text = CODE_RE.replace_all(&text, "<code>$1</code>");
    STRIKE_RE.replace_all(&text, "<s>$1</s>").into_owned()
}

/// Wrap bare `http(s)://` tokens as anchors.
fn autolink(text: &str) -> String {
    URL_RE
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], anchor(&caps[2]))
        })
        .into_owned()
}

/// Anchor markup in the form Asana renders as a clickable link. `url`
/// must already be escaped.
fn anchor(url: &str) -> String {
    format!("<A href=\"{url}\">{url}</A>")
}

/// Anchor markup for a raw (unescaped) URL field.
pub(crate) fn link_html(url: &str) -> String {
    anchor(&escape_html(url))
}

/// Full markup pass for one blob of untrusted text: escape, then
/// markdown-lite, then autolink. Mention rewriting happens afterwards
/// in the comment assembler since it needs the identity store.
pub(crate) fn render_markup(raw: &str) -> String {
    autolink(&markdown_to_html(&escape_html(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ampersand("a & b", "a &amp; b")]
    #[case::angle_brackets("<script>", "&lt;script&gt;")]
    #[case::double_escape_safe("&lt;", "&amp;lt;")]
    #[case::quotes_untouched(r#"she said "hi" and 'bye'"#, r#"she said "hi" and 'bye'"#)]
    #[case::multibyte_untouched("💣 日本語", "💣 日本語")]
    fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[rstest]
    #[case::bold_stars("**bold**", "<strong>bold</strong>")]
    #[case::bold_underscores("__also bold__", "<strong>also bold</strong>")]
    #[case::italic_stars("*italics*", "<em>italics</em>")]
    #[case::italic_underscores("_also italics_", "<em>also italics</em>")]
    #[case::code("`some code block`", "<code>some code block</code>")]
    #[case::strikethrough("~stricken~", "<s>stricken</s>")]
    #[case::snake_case_untouched(
        "@github_test_user_login",
        "@github_test_user_login"
    )]
    #[case::mid_word_underscore_untouched("foo_bar_baz", "foo_bar_baz")]
    fn test_markdown_to_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(markdown_to_html(input), expected);
    }

    #[rstest]
    fn test_markdown_all_forms_in_one_body() {
        let input =
            "**bold** __also bold__ *italics* _also italics_ `some code block` and ~stricken~";
        let result = markdown_to_html(input);
        for expected in [
            "<strong>bold</strong>",
            "<strong>also bold</strong>",
            "<em>italics</em>",
            "<em>also italics</em>",
            "<code>some code block</code>",
            "<s>stricken</s>",
        ] {
            assert!(
                result.contains(expected),
                "expected to contain '{expected}', got: {result}"
            );
        }
    }

    #[rstest]
    #[case::at_start(
        "https://www.asana.com",
        "<A href=\"https://www.asana.com\">https://www.asana.com</A>"
    )]
    #[case::mid_sentence(
        "see http://www.foo.com please",
        "see <A href=\"http://www.foo.com\">http://www.foo.com</A> please"
    )]
    #[case::not_whitespace_delimited("x=https://embedded.example", "x=https://embedded.example")]
    #[case::no_scheme("www.asana.com", "www.asana.com")]
    fn test_autolink(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(autolink(input), expected);
    }

    #[rstest]
    fn test_autolink_two_urls() {
        let result = autolink("https://a.example https://b.example");
        assert_eq!(
            result,
            "<A href=\"https://a.example\">https://a.example</A> \
             <A href=\"https://b.example\">https://b.example</A>"
        );
    }

    #[rstest]
    fn test_render_markup_escapes_before_injecting_tags() {
        let result = render_markup("**<b>**");
        assert_eq!(result, "<strong>&lt;b&gt;</strong>");
    }

    #[rstest]
    fn test_link_html_escapes_url() {
        assert_eq!(
            link_html("https://example.com/?a=1&b=2"),
            "<A href=\"https://example.com/?a=1&amp;b=2\">https://example.com/?a=1&amp;b=2</A>"
        );
    }
}
