/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! addrfmt core data model
//!
//! The formatting engine is driven entirely by data: per-country layout
//! templates, the table of address components and their aliases, country
//! names, subdivision code tables, country languages and abbreviation
//! rules. This crate defines those tables, the user-facing
//! [`FormatOptions`], and ships a bundled copy of the data (see
//! [`embedded`]).

pub mod abbreviation;
pub mod component;
pub mod data;
pub mod embedded;
pub mod options;
pub mod subdivision;
pub mod template;

pub use abbreviation::{AbbreviationRule, Replacement};
pub use component::{Component, ComponentTable};
pub use data::{AddressData, DataError};
pub use options::{FormatOptions, OutputKind};
pub use subdivision::{SubdivisionName, SubdivisionTable};
pub use template::{CountryTemplate, Substitution, TemplateTable, DEFAULT_TEMPLATE_KEY};
