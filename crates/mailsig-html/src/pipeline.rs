//! The signature pipeline: normalize, then sanitize.

use std::fmt;

use crate::error::Result;
use crate::normalize::normalize_styles;
use crate::sanitize::sanitize;

/// Signature markup that has been normalized and passed sanitization.
///
/// Only [`prepare_signature`] constructs this type, so anything holding one
/// is safe to hand to the mail client or store as the applied signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    /// Returns the markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the markup.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SanitizedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns raw editor markup into a deliverable signature.
///
/// Marker classes are converted first and the result is then validated.
/// Nothing is returned unless both stages succeed.
///
/// # Errors
///
/// Returns the sanitization error for forbidden tags or malformed markup.
pub fn prepare_signature(raw: &str) -> Result<SanitizedHtml> {
    let normalized = normalize_styles(raw);
    sanitize(&normalized)?;
    Ok(SanitizedHtml(normalized))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_editor_output_prepared() {
        let raw = r#"<p><strong class="ql-size-large">Jane Doe</strong></p><p><span class="ql-color-888888">Engineer</span></p>"#;
        let signature = prepare_signature(raw).unwrap();
        assert_eq!(
            signature.as_str(),
            r#"<p style="margin: 0; line-height: 1.2;"><strong style="font-size: 1.5em;">Jane Doe</strong></p><p style="margin: 0; line-height: 1.2;"><span style="color: #888888;">Engineer</span></p>"#
        );
    }

    #[test]
    fn test_script_aborts_pipeline() {
        assert_eq!(
            prepare_signature("<p>ok</p><script>alert(1)</script>"),
            Err(Error::ForbiddenTag { tag: "script" })
        );
    }

    #[test]
    fn test_stray_angle_bracket_survives_normalization() {
        assert!(matches!(
            prepare_signature("<p>1 < 2</p>"),
            Err(Error::MalformedMarkup(_))
        ));
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let html = format!("{}x{}", "<b>".repeat(20_000), "</b>".repeat(20_000));
        match prepare_signature(&html) {
            Err(Error::MalformedMarkup(error)) => {
                assert!(error.message.contains("nested deeper"));
            }
            other => panic!("expected malformed markup, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_font_family_survives() {
        let signature =
            prepare_signature(r#"<p style='font-family: "A;B", serif'>x</p>"#).unwrap();
        assert_eq!(
            signature.as_str(),
            r#"<p style="font-family: &quot;A;B&quot;, serif; margin: 0; line-height: 1.2;">x</p>"#
        );
    }

    #[test]
    fn test_structural_errors_repaired_by_normalization() {
        let signature = prepare_signature("<div><span>x</div>").unwrap();
        assert_eq!(signature.as_str(), "<div><span>x</span></div>");
    }

    #[test]
    fn test_empty_editor() {
        let signature = prepare_signature("<p><br></p>").unwrap();
        assert_eq!(
            signature.to_string(),
            r#"<p style="margin: 0; line-height: 1.2;"><br></p>"#
        );
    }
}
