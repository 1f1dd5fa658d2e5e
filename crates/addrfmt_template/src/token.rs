/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Compiled template tokens.

use crate::error::{Result, TemplateError};

/// A half-open byte range `[start, end)` into the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// The open/close tag pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Parse the body of a `{{=<% %>=}}` tag: exactly two whitespace
    /// separated, non-empty parts.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => Ok(Self::new(open, close)),
            _ => Err(TemplateError::InvalidDelimiters(spec.to_string())),
        }
    }
}

/// Placement of a partial tag on its source line, needed to re-indent the
/// partial's text at render time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialPlacement {
    /// Whitespace (and blanked-out text) preceding the tag on its line.
    pub indentation: String,
    /// Zero-based position of the tag among the tags on its line.
    pub tag_index: usize,
    /// Whether non-whitespace text preceded the tag on its line.
    pub line_has_content: bool,
}

/// A node of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text, copied to the output.
    Text { text: String, span: Span },
    /// `{{name}}` (escaped) or `{{{name}}}` / `{{&name}}` (raw).
    Variable {
        name: String,
        escaped: bool,
        span: Span,
    },
    /// `{{#name}}...{{/name}}` or, when `inverted`, `{{^name}}...{{/name}}`.
    Section {
        name: String,
        inverted: bool,
        /// The opening tag.
        span: Span,
        children: Vec<Token>,
        /// Byte offset where the closing tag starts. The unrendered body is
        /// `source[span.end..close_start]`.
        close_start: usize,
    },
    /// `{{> name}}`.
    Partial {
        name: String,
        span: Span,
        placement: PartialPlacement,
    },
    /// `{{=<% %>=}}`; only affects compilation.
    DelimiterChange { delimiters: Delimiters, span: Span },
    /// `{{! ... }}`.
    Comment { span: Span },
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Text { span, .. }
            | Token::Variable { span, .. }
            | Token::Section { span, .. }
            | Token::Partial { span, .. }
            | Token::DelimiterChange { span, .. }
            | Token::Comment { span } => *span,
        }
    }

    /// Child tokens of a section; empty for every other kind.
    pub fn children(&self) -> &[Token] {
        match self {
            Token::Section { children, .. } => children,
            _ => &[],
        }
    }
}

/// A compiled template together with the source it came from.
///
/// The source is kept because higher-order sections receive their raw,
/// unrendered body.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pub source: String,
    pub delimiters: Delimiters,
    pub tokens: Vec<Token>,
}

impl CompiledTemplate {
    /// The unrendered body of a section token, if `token` is a section.
    pub fn section_source(&self, token: &Token) -> Option<&str> {
        match token {
            Token::Section {
                span, close_start, ..
            } => self.source.get(span.end..*close_start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiters() {
        assert_eq!(
            Delimiters::parse("<% %>").unwrap(),
            Delimiters::new("<%", "%>")
        );
        assert_eq!(
            Delimiters::parse("  [[   ]] ").unwrap(),
            Delimiters::new("[[", "]]")
        );
    }

    #[test]
    fn parse_delimiters_requires_two_parts() {
        assert!(matches!(
            Delimiters::parse("<%"),
            Err(TemplateError::InvalidDelimiters(_))
        ));
        assert!(matches!(
            Delimiters::parse("a b c"),
            Err(TemplateError::InvalidDelimiters(_))
        ));
    }
}
