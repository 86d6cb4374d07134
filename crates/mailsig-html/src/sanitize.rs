//! Validation of outbound signature markup.

use crate::dom::Fragment;
use crate::error::{Error, Result};
use crate::lexer::is_whitespace;

/// Tags that are never allowed in a signature.
pub const FORBIDDEN_TAGS: &[&str] = &["script", "iframe"];

/// Checks that markup is safe to hand to a mail client.
///
/// The raw string is scanned for a forbidden tag opener first, so a
/// forbidden tag is reported even when the markup is also malformed. The
/// input is returned unchanged; nothing is rewritten.
///
/// # Errors
///
/// Returns [`Error::ForbiddenTag`] for a `<script` or `<iframe` opener in
/// any letter case, or [`Error::MalformedMarkup`] with the first parse error.
pub fn sanitize(html: &str) -> Result<&str> {
    if let Some(tag) = find_forbidden_tag(html) {
        return Err(Error::ForbiddenTag { tag });
    }

    let fragment = Fragment::parse(html);
    if let Some(error) = fragment.errors().first() {
        return Err(Error::MalformedMarkup(error.clone()));
    }

    Ok(html)
}

/// Finds the first forbidden tag opener in the raw string.
///
/// An opener is `<` plus the tag name, followed by whitespace, `>` or `/`.
#[must_use]
pub fn find_forbidden_tag(html: &str) -> Option<&'static str> {
    let bytes = html.as_bytes();
    html.match_indices('<').find_map(|(i, _)| {
        let rest = &bytes[i + 1..];
        FORBIDDEN_TAGS.iter().copied().find(|tag| {
            rest.get(..tag.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()))
                && rest
                    .get(tag.len())
                    .is_some_and(|&b| is_whitespace(b) || b == b'>' || b == b'/')
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup_returned_unchanged() {
        let html = r#"<p style="margin: 0;">Jane <b>Doe</b></p>"#;
        assert_eq!(sanitize(html).unwrap(), html);
    }

    #[test]
    fn test_script_rejected() {
        assert_eq!(
            sanitize("<p>ok</p><script>alert(1)</script>"),
            Err(Error::ForbiddenTag { tag: "script" })
        );
    }

    #[test]
    fn test_forbidden_tags_any_case_and_attributes() {
        for html in [
            "<SCRIPT>x</SCRIPT>",
            r#"<ScRiPt src="x.js"></script>"#,
            "<script\n>x</script>",
            r#"<iframe src="https://example.com"></iframe>"#,
            "<IFRAME>",
            "<p>a</p><iframe/>",
        ] {
            assert!(
                matches!(sanitize(html), Err(Error::ForbiddenTag { .. })),
                "not rejected: {html}"
            );
        }
    }

    #[test]
    fn test_similar_names_allowed() {
        assert!(find_forbidden_tag("<scripts>").is_none());
        assert!(find_forbidden_tag("<p>script</p>").is_none());
        assert!(find_forbidden_tag("&lt;script&gt;").is_none());
    }

    #[test]
    fn test_forbidden_reported_before_malformed() {
        assert_eq!(
            sanitize("<div><script>x</script>"),
            Err(Error::ForbiddenTag { tag: "script" })
        );
    }

    #[test]
    fn test_malformed_markup_rejected() {
        for html in ["<div><span>x</div>", "<p>a</p></b>", "<p>1 < 2</p>", "<!-- open"] {
            assert!(
                matches!(sanitize(html), Err(Error::MalformedMarkup(_))),
                "not rejected: {html}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::ForbiddenTag { tag: "iframe" }.to_string(),
            "<iframe> tags are not allowed"
        );
        let err = sanitize("<div>").unwrap_err();
        assert_eq!(err.to_string(), "Malformed HTML: Unclosed <div> element at byte 5");
    }
}
