/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use addrfmt_core::DataError;
use addrfmt_template::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("invalid pattern {pattern:?} in {table}: {message}")]
    Pattern {
        table: String,
        pattern: String,
        message: String,
    },

    #[error("failed to parse {0}: {1}")]
    ParseError(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
