/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use thiserror::Error;

/// Errors raised while compiling or rendering a template.
///
/// Compile errors point at a defect in the template text itself; address
/// data never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("invalid delimiters: {0:?}")]
    InvalidDelimiters(String),

    #[error("unclosed tag at {pos}")]
    UnclosedTag { pos: usize },

    #[error("unopened section \"{name}\" at {pos}")]
    UnopenedSection { name: String, pos: usize },

    #[error("unclosed section \"{name}\" at {pos}")]
    UnclosedSection { name: String, pos: usize },

    #[error("cannot use higher-order sections without the original template")]
    MissingSource,
}

pub type Result<T> = std::result::Result<T, TemplateError>;
