/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Escaping for `{{name}}` interpolation.

use std::sync::Arc;

/// Escape function applied to escaped variables.
pub type EscapeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// HTML-escape `& < > " ' /`, plus `` ` `` and `=`.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_safe(text)
        .replace('`', "&#x60;")
        .replace('=', "&#x3D;")
}

/// Pass text through untouched; for plain-text output.
pub fn escape_none(text: &str) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href&#x3D;&quot;x&quot;&gt;Tom &amp; Jerry&lt;&#x2F;a&gt;"
        );
        assert_eq!(escape_html("`cmd`"), "&#x60;cmd&#x60;");
        assert_eq!(escape_html("Rue de l’Église"), "Rue de l’Église");
    }

    #[test]
    fn apostrophe() {
        let escaped = escape_html("Jerry's");
        assert!(!escaped.contains('\''));
        assert!(escaped.starts_with("Jerry&#"));
    }
}
