/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! addrfmt processor
//!
//! Formats postal addresses the way they are written in their country.
//! Address components are normalized (key spelling, aliases, country code
//! resolution and redirects, subdivision codes, postcode sanity checks,
//! optional abbreviations), rendered with the country's layout template,
//! and cleaned of the separators and blank lines left by missing fields.
//!
//! # Example
//!
//! ```rust
//! use addrfmt_processor::{address, FormatOptions, Formatter};
//!
//! let formatter = Formatter::embedded().unwrap();
//! let fields = address! {
//!     "road" => "Main St",
//!     "houseNumber" => "10",
//!     "city" => "Springfield",
//!     "postcode" => "12345",
//!     "countryCode" => "US",
//! };
//! let formatted = formatter.format(&fields, &FormatOptions::default()).unwrap();
//! assert_eq!(
//!     formatted.to_string(),
//!     "10 Main St\nSpringfield, 12345\nUnited States of America\n"
//! );
//! ```

use std::sync::OnceLock;

pub mod cleanup;
pub mod error;
pub mod fields;
pub mod first;
pub mod formatter;
pub mod io;
pub mod normalize;
pub mod select;
pub mod substitution;

pub use cleanup::cleanup;
pub use error::FormatError;
pub use fields::{fields_from_json, AddressFields};
pub use formatter::{Formatted, Formatter, Normalized, TemplateIssue};
pub use select::TemplateBody;
pub use substitution::SubstitutionTable;

// Re-export the data model for convenience
pub use addrfmt_core::{AddressData, FormatOptions, OutputKind};

static EMBEDDED: OnceLock<Formatter> = OnceLock::new();

/// Format `fields` with the bundled data.
///
/// The formatter is built on first use and shared afterwards.
pub fn format(fields: &AddressFields, options: &FormatOptions) -> Result<Formatted, FormatError> {
    let formatter = match EMBEDDED.get() {
        Some(formatter) => formatter,
        None => {
            let formatter = Formatter::embedded()?;
            EMBEDDED.get_or_init(|| formatter)
        }
    };
    formatter.format(fields, options)
}
