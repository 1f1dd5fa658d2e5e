/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Choosing the country entry and the layout body to render.

use addrfmt_core::{CountryTemplate, TemplateTable, DEFAULT_TEMPLATE_KEY};

use crate::normalize::present;
use crate::AddressFields;

/// Fields whose joint absence marks an address as sparse.
const REQUIRED: [&str; 2] = ["road", "postcode"];

/// Which of an entry's two layouts is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBody {
    Address,
    Fallback,
}

/// Key of the entry used for `code`: the code itself when the table has it,
/// the default entry otherwise.
pub fn entry_key<'a>(templates: &TemplateTable, code: Option<&'a str>) -> &'a str {
    match code {
        Some(code) if templates.contains(code) => code,
        _ => DEFAULT_TEMPLATE_KEY,
    }
}

/// Sparse addresses, with neither road nor postcode, use the fallback.
pub fn body_kind(fields: &AddressFields) -> TemplateBody {
    if REQUIRED.iter().all(|key| present(fields, key).is_none()) {
        TemplateBody::Fallback
    } else {
        TemplateBody::Address
    }
}

/// The layout text of `kind`, taken from `entry` or else from `default`.
pub fn body<'t>(
    entry: Option<&'t CountryTemplate>,
    default: Option<&'t CountryTemplate>,
    kind: TemplateBody,
) -> Option<&'t str> {
    let pick = |template: &'t CountryTemplate| match kind {
        TemplateBody::Address => template.address_template.as_deref(),
        TemplateBody::Fallback => template.fallback_template.as_deref(),
    };
    entry.and_then(pick).or_else(|| default.and_then(pick))
}
