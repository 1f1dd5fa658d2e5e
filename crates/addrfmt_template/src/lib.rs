/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! addrfmt template engine
//!
//! A small logic-less template language in the Mustache family, used to
//! express per-country address layouts. Templates are compiled into a token
//! tree (cached per text and delimiter pair) and evaluated against a layered
//! context of [`Value`]s.
//!
//! Supported tags: `{{name}}`, `{{{name}}}` / `{{&name}}`, `{{#section}}`,
//! `{{^inverted}}`, `{{> partial}}`, `{{! comment}}` and `{{=<% %>=}}`.
//!
//! # Example
//!
//! ```rust
//! use addrfmt_template::{Renderer, Value};
//!
//! let view: Value = [("road", "Main St"), ("house_number", "10")]
//!     .into_iter()
//!     .collect();
//! let out = Renderer::new()
//!     .render("{{house_number}} {{road}}", view)
//!     .unwrap();
//! assert_eq!(out, "10 Main St");
//! ```

pub mod cache;
pub mod compiler;
pub mod context;
pub mod error;
pub mod escape;
pub mod renderer;
pub mod scanner;
pub mod token;
pub mod value;

pub use cache::{cache_key, MemoryCache, NoCache, TemplateCache};
pub use compiler::compile;
pub use context::Context;
pub use error::TemplateError;
pub use escape::{escape_html, escape_none, EscapeFn};
pub use renderer::{indent_partial, PartialFn, PartialProvider, Renderer};
pub use token::{CompiledTemplate, Delimiters, PartialPlacement, Span, Token};
pub use value::{Computed, Lambda, SubRender, Value};

/// Render `source` against `view` with a fresh default renderer.
pub fn render(source: &str, view: impl Into<Value>) -> Result<String, TemplateError> {
    Renderer::new().render(source, view)
}
