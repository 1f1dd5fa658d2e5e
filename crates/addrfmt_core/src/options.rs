/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Options accepted by the formatter.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-call formatting options.
///
/// Loaded from YAML or JSON configuration files with kebab-case keys; every
/// key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case", default)]
pub struct FormatOptions {
    /// Apply the language-specific abbreviation rules of the country.
    pub abbreviate: bool,
    /// Fill `country` from the country-names table when it is missing.
    pub append_country: bool,
    /// Drop or shorten implausible postcodes.
    pub cleanup_postcode: bool,
    /// Overrides the country code found in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Used when neither the options nor the input yield a country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_country_code: Option<String>,
    pub output: OutputKind,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            abbreviate: false,
            append_country: false,
            cleanup_postcode: true,
            country_code: None,
            fallback_country_code: None,
            output: OutputKind::default(),
        }
    }
}

/// Shape of the formatted result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// Newline-separated lines with a trailing newline.
    #[default]
    String,
    /// One entry per non-empty line.
    Array,
}
