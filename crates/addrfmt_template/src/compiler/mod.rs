/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Template compilation.
//!
//! Compilation runs in three passes over the source:
//!
//! 1. **Tokenize**: literal text becomes one `Text` token per character and
//!    every tag becomes a flat token. Whitespace-only text on a line that
//!    holds nothing but section, partial, comment or delimiter tags is
//!    deleted, so structural tags can sit on their own lines without
//!    leaving blank lines behind.
//! 2. **Squash**: adjacent text tokens are merged.
//! 3. **Nest**: section contents move into their section's `children`, and
//!    each section records where its closing tag starts.


use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TemplateError};
use crate::scanner::Scanner;
use crate::token::{CompiledTemplate, Delimiters, PartialPlacement, Span, Token};

static TAG_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#^/>{&=!]").expect("tag type pattern"));
static WHITE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*").expect("whitespace pattern"));
static EQUALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*=").expect("equals pattern"));
static CURLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\}").expect("curly pattern"));

/// Compile `source` into a token tree.
pub fn compile(source: &str, delimiters: &Delimiters) -> Result<CompiledTemplate> {
    let tokens = parse(source, delimiters)?;
    Ok(CompiledTemplate {
        source: source.to_string(),
        delimiters: delimiters.clone(),
        tokens,
    })
}

/// Tokenize and nest `source` without keeping the source around.
pub fn parse(source: &str, delimiters: &Delimiters) -> Result<Vec<Token>> {
    if source.is_empty() {
        return Ok(Vec::new());
    }

    let mut tags = TagPatterns::new(delimiters)?;
    let mut scanner = Scanner::new(source);
    let mut tokens: Vec<Option<Flat>> = Vec::new();
    let mut sections: Vec<String> = Vec::new();
    let mut line = LineState::default();

    while !scanner.eos() {
        let mut start = scanner.pos();

        let text = scanner.scan_until(&tags.opening);
        for ch in text.chars() {
            let end = start + ch.len_utf8();
            if ch.is_whitespace() {
                line.spaces.push(tokens.len());
                line.indentation.push(ch);
            } else {
                line.non_space = true;
                line.line_has_non_space = true;
                line.indentation.push(' ');
            }
            tokens.push(Some(Flat::Text {
                text: ch.to_string(),
                span: Span::new(start, end),
            }));
            start = end;

            if ch == '\n' {
                line.strip_space(&mut tokens);
                line.indentation.clear();
                line.tag_index = 0;
                line.line_has_non_space = false;
            }
        }

        if scanner.scan(&tags.opening).is_empty() {
            break;
        }
        line.has_tag = true;

        let sigil = scanner.scan(&TAG_TYPE);
        scanner.scan(&WHITE);

        let (sigil, value) = match sigil {
            "=" => {
                let value = scanner.scan_until(&EQUALS);
                scanner.scan(&EQUALS);
                scanner.scan_until(&tags.closing);
                ("=", value)
            }
            "{" => {
                let value = scanner.scan_until(&tags.closing_curly);
                scanner.scan(&CURLY);
                scanner.scan_until(&tags.closing);
                ("&", value)
            }
            other => (other, scanner.scan_until(&tags.closing)),
        };

        if scanner.scan(&tags.closing).is_empty() {
            return Err(TemplateError::UnclosedTag { pos: scanner.pos() });
        }

        let span = Span::new(start, scanner.pos());
        let name = value.to_string();
        let token = match sigil {
            "#" | "^" => {
                sections.push(name.clone());
                Flat::Open {
                    name,
                    inverted: sigil == "^",
                    span,
                }
            }
            "/" => {
                match sections.pop() {
                    None => return Err(TemplateError::UnopenedSection { name, pos: start }),
                    Some(open) if open != name => {
                        return Err(TemplateError::UnclosedSection { name: open, pos: start });
                    }
                    Some(_) => {}
                }
                Flat::Close { name, span }
            }
            ">" => Flat::Partial {
                name,
                span,
                placement: PartialPlacement {
                    indentation: line.indentation.clone(),
                    tag_index: line.tag_index,
                    line_has_content: line.line_has_non_space,
                },
            },
            "=" => {
                let delimiters = Delimiters::parse(value)?;
                tags = TagPatterns::new(&delimiters)?;
                Flat::DelimiterChange { delimiters, span }
            }
            "!" => Flat::Comment { span },
            "&" => {
                line.non_space = true;
                Flat::Variable {
                    name,
                    escaped: false,
                    span,
                }
            }
            _ => {
                line.non_space = true;
                Flat::Variable {
                    name,
                    escaped: true,
                    span,
                }
            }
        };
        line.tag_index += 1;
        tokens.push(Some(token));
    }

    line.strip_space(&mut tokens);

    if let Some(open) = sections.pop() {
        return Err(TemplateError::UnclosedSection {
            name: open,
            pos: scanner.pos(),
        });
    }

    nest(squash(tokens))
}

/// Opening/closing tag patterns for the active delimiters.
struct TagPatterns {
    opening: Regex,
    closing: Regex,
    closing_curly: Regex,
}

impl TagPatterns {
    fn new(delimiters: &Delimiters) -> Result<Self> {
        if delimiters.open.is_empty() || delimiters.close.is_empty() {
            return Err(TemplateError::InvalidDelimiters(format!(
                "{} {}",
                delimiters.open, delimiters.close
            )));
        }
        let build = |pattern: String| {
            Regex::new(&pattern).map_err(|_| {
                TemplateError::InvalidDelimiters(format!(
                    "{} {}",
                    delimiters.open, delimiters.close
                ))
            })
        };
        Ok(Self {
            opening: build(format!(r"{}\s*", regex::escape(&delimiters.open)))?,
            closing: build(format!(r"\s*{}", regex::escape(&delimiters.close)))?,
            closing_curly: build(format!(
                r"\s*{}",
                regex::escape(&format!("}}{}", delimiters.close))
            ))?,
        })
    }
}

/// Per-line bookkeeping for standalone tag detection.
#[derive(Debug, Default)]
struct LineState {
    /// Indices of whitespace text tokens on the current line.
    spaces: Vec<usize>,
    /// A tag appeared on the current line.
    has_tag: bool,
    /// Output-producing content (text or a variable) appeared on the line.
    non_space: bool,
    /// Non-whitespace text appeared on the line so far.
    line_has_non_space: bool,
    indentation: String,
    tag_index: usize,
}

impl LineState {
    fn strip_space(&mut self, tokens: &mut [Option<Flat>]) {
        if self.has_tag && !self.non_space {
            for index in self.spaces.drain(..) {
                tokens[index] = None;
            }
        } else {
            self.spaces.clear();
        }
        self.has_tag = false;
        self.non_space = false;
    }
}

/// Tokens before nesting.
#[derive(Debug)]
enum Flat {
    Text {
        text: String,
        span: Span,
    },
    Variable {
        name: String,
        escaped: bool,
        span: Span,
    },
    Open {
        name: String,
        inverted: bool,
        span: Span,
    },
    Close {
        name: String,
        span: Span,
    },
    Partial {
        name: String,
        span: Span,
        placement: PartialPlacement,
    },
    DelimiterChange {
        delimiters: Delimiters,
        span: Span,
    },
    Comment {
        span: Span,
    },
}

fn squash(tokens: Vec<Option<Flat>>) -> Vec<Flat> {
    let mut squashed: Vec<Flat> = Vec::with_capacity(tokens.len());
    for token in tokens.into_iter().flatten() {
        if let Flat::Text { text, span } = &token {
            if let Some(Flat::Text {
                text: last,
                span: last_span,
            }) = squashed.last_mut()
            {
                last.push_str(text);
                last_span.end = span.end;
                continue;
            }
        }
        squashed.push(token);
    }
    squashed
}

struct OpenSection {
    name: String,
    inverted: bool,
    span: Span,
    children: Vec<Token>,
}

fn nest(tokens: Vec<Flat>) -> Result<Vec<Token>> {
    let mut root = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();

    for token in tokens {
        let token = match token {
            Flat::Open {
                name,
                inverted,
                span,
            } => {
                open.push(OpenSection {
                    name,
                    inverted,
                    span,
                    children: Vec::new(),
                });
                continue;
            }
            Flat::Close { name, span } => {
                let section = open
                    .pop()
                    .ok_or_else(|| TemplateError::UnopenedSection {
                        name,
                        pos: span.start,
                    })?;
                Token::Section {
                    name: section.name,
                    inverted: section.inverted,
                    span: section.span,
                    children: section.children,
                    close_start: span.start,
                }
            }
            Flat::Text { text, span } => Token::Text { text, span },
            Flat::Variable {
                name,
                escaped,
                span,
            } => Token::Variable {
                name,
                escaped,
                span,
            },
            Flat::Partial {
                name,
                span,
                placement,
            } => Token::Partial {
                name,
                span,
                placement,
            },
            Flat::DelimiterChange { delimiters, span } => {
                Token::DelimiterChange { delimiters, span }
            }
            Flat::Comment { span } => Token::Comment { span },
        };

        match open.last_mut() {
            Some(section) => section.children.push(token),
            None => root.push(token),
        }
    }

    Ok(root)
}
