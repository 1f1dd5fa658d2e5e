/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Bundled address-formatting data.
//!
//! The YAML files under `data/` are baked into the binary at compile time via
//! `include_bytes!`, so the formatter works without a data directory on disk.

pub const TEMPLATES: &[u8] = include_bytes!("../../../data/templates.yaml");
pub const COMPONENTS: &[u8] = include_bytes!("../../../data/components.yaml");
pub const COUNTRY_NAMES: &[u8] = include_bytes!("../../../data/country-names.yaml");
pub const STATE_CODES: &[u8] = include_bytes!("../../../data/state-codes.yaml");
pub const COUNTY_CODES: &[u8] = include_bytes!("../../../data/county-codes.yaml");
pub const COUNTRY_LANGUAGES: &[u8] = include_bytes!("../../../data/country-to-lang.yaml");

/// Raw YAML bytes of the abbreviation rules for a language.
///
/// Returns `None` for languages without bundled rules.
pub fn get_abbreviation_bytes(lang: &str) -> Option<&'static [u8]> {
    match lang {
        "ca" => Some(include_bytes!("../../../data/abbreviations/ca.yaml")),
        "de" => Some(include_bytes!("../../../data/abbreviations/de.yaml")),
        "en" => Some(include_bytes!("../../../data/abbreviations/en.yaml")),
        "es" => Some(include_bytes!("../../../data/abbreviations/es.yaml")),
        "fr" => Some(include_bytes!("../../../data/abbreviations/fr.yaml")),
        "it" => Some(include_bytes!("../../../data/abbreviations/it.yaml")),
        "nl" => Some(include_bytes!("../../../data/abbreviations/nl.yaml")),
        "pt" => Some(include_bytes!("../../../data/abbreviations/pt.yaml")),
        _ => None,
    }
}

/// Languages with bundled abbreviation rules.
pub const EMBEDDED_ABBREVIATION_LANGS: &[&str] = &["ca", "de", "en", "es", "fr", "it", "nl", "pt"];
