//! `{version}` placeholder rendering and version validation.

use crate::error::CamError;

/// Placeholder substituted by [`render`].
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Replaces every `{version}` in `template` with `version`. Other braces are left untouched.
pub fn render(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Rejects versions that would not stay a single path component once rendered.
pub fn validate_version(version: &str) -> Result<(), CamError> {
    let reason = if version.is_empty() {
        Some("empty")
    } else if version.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if version.contains("..") {
        Some("contains \"..\"")
    } else if version.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("contains whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CamError::InvalidVersion {
            version: version.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_every_occurrence() {
        assert_eq!(
            render("x/{version}/x-{version}.jar", "4.9"),
            "x/4.9/x-4.9.jar"
        );
    }

    #[test]
    fn render_leaves_other_braces() {
        assert_eq!(render("{name}-{version}{}", "1.0"), "{name}-1.0{}");
        assert_eq!(render("{Version}-{ version }", "1.0"), "{Version}-{ version }");
    }

    #[test]
    fn render_without_placeholder_is_identity() {
        assert_eq!(render("static.zip", "4.9"), "static.zip");
    }

    #[test]
    fn render_does_not_recurse_into_version() {
        assert_eq!(render("a-{version}", "{version}"), "a-{version}");
    }

    #[test]
    fn valid_versions() {
        for v in ["4.9", "4.8.5", "1.2-RC03", "4.10-SNAPSHOT", "20240101.1"] {
            assert!(validate_version(v).is_ok(), "{v}");
        }
    }

    #[test]
    fn invalid_versions() {
        for v in ["", "../4.9", "4/9", "4\\9", "4.9 ", "a\0b", ".."] {
            match validate_version(v) {
                Err(CamError::InvalidVersion { version, .. }) => assert_eq!(version, v),
                other => panic!("expected InvalidVersion for {v:?}, got {other:?}"),
            }
        }
    }
}
