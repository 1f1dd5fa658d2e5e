/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Token tree evaluation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::cache::{cache_key, MemoryCache, TemplateCache};
use crate::compiler;
use crate::context::Context;
use crate::error::{Result, TemplateError};
use crate::escape::{escape_html, EscapeFn};
use crate::token::{CompiledTemplate, Delimiters, PartialPlacement, Span, Token};
use crate::value::Value;

/// Source of `{{> name}}` partial templates.
pub trait PartialProvider {
    fn partial(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> PartialProvider for HashMap<String, String, S> {
    fn partial(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl PartialProvider for IndexMap<String, String> {
    fn partial(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }
}

/// Partials produced on demand by a closure.
pub struct PartialFn<F>(pub F);

impl<F: Fn(&str) -> Option<String>> PartialProvider for PartialFn<F> {
    fn partial(&self, name: &str) -> Option<Cow<'_, str>> {
        (self.0)(name).map(Cow::Owned)
    }
}

/// Compiles (through its cache) and renders templates.
#[derive(Clone)]
pub struct Renderer {
    delimiters: Delimiters,
    cache: Arc<dyn TemplateCache>,
    escape: EscapeFn,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            cache: Arc::new(MemoryCache::new()),
            escape: Arc::new(escape_html),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("delimiters", &self.delimiters)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the compiled template cache.
    pub fn with_cache(mut self, cache: Arc<dyn TemplateCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the escape function used for `{{name}}`.
    pub fn with_escape(mut self, escape: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.escape = Arc::new(escape);
        self
    }

    /// Delimiters used for top-level templates and partials.
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Compile `source` with the renderer's delimiters, or fetch it from the
    /// cache.
    pub fn compile(&self, source: &str) -> Result<Arc<CompiledTemplate>> {
        self.compile_with(source, &self.delimiters)
    }

    pub fn compile_with(
        &self,
        source: &str,
        delimiters: &Delimiters,
    ) -> Result<Arc<CompiledTemplate>> {
        let key = cache_key(source, delimiters);
        if let Some(compiled) = self.cache.get(&key) {
            trace!(len = source.len(), "template cache hit");
            return Ok(compiled);
        }
        let compiled = Arc::new(compiler::compile(source, delimiters)?);
        self.cache.set(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Render `source` against `view` without partials.
    pub fn render(&self, source: &str, view: impl Into<Value>) -> Result<String> {
        let context = Context::new(view);
        self.render_in(source, &context, None)
    }

    pub fn render_with_partials(
        &self,
        source: &str,
        view: impl Into<Value>,
        partials: &dyn PartialProvider,
    ) -> Result<String> {
        let context = Context::new(view);
        self.render_in(source, &context, Some(partials))
    }

    /// Render `source` against an existing context.
    pub fn render_in(
        &self,
        source: &str,
        context: &Context<'_>,
        partials: Option<&dyn PartialProvider>,
    ) -> Result<String> {
        let compiled = self.compile(source)?;
        self.render_tokens(&compiled.tokens, context, partials, Some(&compiled.source))
    }

    /// Render a token list.
    ///
    /// `source` must be the text the tokens were compiled from; it is needed
    /// only when a section resolves to a lambda.
    pub fn render_tokens(
        &self,
        tokens: &[Token],
        context: &Context<'_>,
        partials: Option<&dyn PartialProvider>,
        source: Option<&str>,
    ) -> Result<String> {
        let mut buffer = String::new();
        for token in tokens {
            match token {
                Token::Text { text, .. } => buffer.push_str(text),
                Token::Variable { name, escaped, .. } => {
                    self.render_variable(name, *escaped, context, &mut buffer);
                }
                Token::Section {
                    name,
                    inverted: false,
                    span,
                    children,
                    close_start,
                } => {
                    let section = Section {
                        name,
                        span: *span,
                        close_start: *close_start,
                        children,
                    };
                    buffer.push_str(&self.render_section(&section, context, partials, source)?);
                }
                Token::Section {
                    name,
                    inverted: true,
                    children,
                    ..
                } => {
                    let show = context.lookup(name).map_or(true, |value| !value.is_truthy());
                    if show {
                        buffer.push_str(&self.render_tokens(children, context, partials, source)?);
                    }
                }
                Token::Partial {
                    name, placement, ..
                } => {
                    buffer.push_str(&self.render_partial(name, placement, context, partials)?);
                }
                Token::DelimiterChange { .. } | Token::Comment { .. } => {}
            }
        }
        Ok(buffer)
    }

    fn render_variable(&self, name: &str, escaped: bool, context: &Context<'_>, buffer: &mut String) {
        match context.lookup(name) {
            None | Some(Value::Null) => {}
            Some(value @ Value::Number(_)) => buffer.push_str(&value.to_text()),
            Some(value) if escaped => buffer.push_str(&(self.escape)(&value.to_text())),
            Some(value) => buffer.push_str(&value.to_text()),
        }
    }

    fn render_section(
        &self,
        section: &Section<'_>,
        context: &Context<'_>,
        partials: Option<&dyn PartialProvider>,
        source: Option<&str>,
    ) -> Result<String> {
        let value = match context.lookup(section.name) {
            Some(value) if value.is_truthy() => value,
            _ => return Ok(String::new()),
        };

        match value {
            Value::List(items) => {
                let mut buffer = String::new();
                for item in items {
                    let layer = context.push(item);
                    buffer.push_str(&self.render_tokens(section.children, &layer, partials, source)?);
                }
                Ok(buffer)
            }
            value @ (Value::Map(_) | Value::String(_) | Value::Number(_)) => {
                let layer = context.push(value);
                self.render_tokens(section.children, &layer, partials, source)
            }
            Value::Lambda(lambda) => {
                let body = source
                    .and_then(|text| text.get(section.span.end..section.close_start))
                    .ok_or(TemplateError::MissingSource)?;
                let render = |text: &str| self.render_in(text, context, partials);
                lambda.call(body, &render)
            }
            Value::Bool(_) | Value::Null | Value::Computed(_) => {
                self.render_tokens(section.children, context, partials, source)
            }
        }
    }

    fn render_partial(
        &self,
        name: &str,
        placement: &PartialPlacement,
        context: &Context<'_>,
        partials: Option<&dyn PartialProvider>,
    ) -> Result<String> {
        let Some(text) = partials.and_then(|provider| provider.partial(name)) else {
            return Ok(String::new());
        };
        let text = if placement.tag_index == 0 && !placement.indentation.is_empty() {
            indent_partial(&text, &placement.indentation, placement.line_has_content)
        } else {
            text.into_owned()
        };
        let compiled = self.compile(&text)?;
        self.render_tokens(&compiled.tokens, context, partials, Some(&compiled.source))
    }
}

struct Section<'t> {
    name: &'t str,
    span: Span,
    close_start: usize,
    children: &'t [Token],
}

/// Prefix each non-empty line of `partial` with the spaces and tabs of
/// `indentation`. The first line is left alone when the host line already
/// had content before the tag.
pub fn indent_partial(partial: &str, indentation: &str, line_has_content: bool) -> String {
    let indent: String = indentation
        .chars()
        .filter(|c| matches!(c, ' ' | '\t'))
        .collect();
    partial
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if !line.is_empty() && (i > 0 || !line_has_content) {
                format!("{indent}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
