/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Field normalization steps run before a template is rendered.

use std::sync::LazyLock;

use addrfmt_core::{AddressData, ComponentTable, TemplateTable};
use heck::ToSnakeCase;
use regex::Regex;
use tracing::debug;

use crate::AddressFields;

/// Countries where `district` means a neighbourhood rather than a state
/// district.
pub const SMALL_DISTRICT_COUNTRIES: &[&str] = &["BR", "CR", "ES", "NI", "PY", "RO", "TG", "TM", "XK"];

static COMPONENT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\w*)").unwrap());
static WASHINGTON_DC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^washington,? d\.?c\.?").unwrap());
static POSTCODE_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+;\d+").unwrap());
static MULTI_POSTCODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{5}),\d{5}").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

const MAX_POSTCODE_LEN: usize = 20;

/// A non-empty field value.
pub(crate) fn present<'a>(fields: &'a AddressFields, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Rename camelCase keys to their snake_case component name.
///
/// A key is only renamed when its snake_case form is a known component that
/// the input does not already populate. Renamed keys keep their position.
pub fn normalize_keys(fields: AddressFields, components: &ComponentTable) -> AddressFields {
    let mut out = AddressFields::with_capacity(fields.len());
    for (key, value) in &fields {
        let snake = key.to_snake_case();
        let target = if snake != *key
            && components.is_known(&snake)
            && present(&fields, &snake).is_none()
            && present(&out, &snake).is_none()
        {
            if value.is_empty() {
                continue;
            }
            snake
        } else {
            key.clone()
        };
        if value.is_empty() && present(&out, &target).is_some() {
            continue;
        }
        out.insert(target, value.clone());
    }
    out
}

/// Resolve the country code and apply any `use_country` redirect.
///
/// Returns the code the input was redirected from, if any. Codes that are
/// not two characters long leave the fields untouched.
pub fn resolve_country(
    fields: &mut AddressFields,
    templates: &TemplateTable,
    fallback: Option<&str>,
) -> Option<String> {
    let mut code = present(fields, "country_code").map(str::to_uppercase);
    if !code.as_deref().is_some_and(|c| templates.contains(c)) {
        if let Some(fallback) = fallback {
            code = Some(fallback.to_uppercase());
        }
    }
    let mut code = code.filter(|c| c.chars().count() == 2)?;
    if code == "UK" {
        code = "GB".to_string();
    }

    let mut redirected_from = None;
    if let Some(entry) = templates.get(&code) {
        if let Some(target) = &entry.use_country {
            let target = target.to_uppercase();
            debug!(from = %code, to = %target, "country redirect");
            if let Some(name) = &entry.change_country {
                let country = expand_component(name, fields);
                fields.insert("country".to_string(), country);
            }
            if let Some(("state", value)) = entry.added_component() {
                fields.insert("state".to_string(), value.to_string());
            }
            redirected_from = Some(std::mem::replace(&mut code, target));
        }
    }

    if code == "NL" {
        let switch = present(fields, "state").and_then(|state| {
            let lower = state.to_lowercase();
            if state == "Curaçao" {
                Some(("CW", "Curaçao"))
            } else if lower.contains("sint maarten") {
                Some(("SX", "Sint Maarten"))
            } else if lower.contains("aruba") {
                Some(("AW", "Aruba"))
            } else {
                None
            }
        });
        if let Some((new_code, name)) = switch {
            debug!(to = new_code, "dutch caribbean country switch");
            code = new_code.to_string();
            fields.insert("country".to_string(), name.to_string());
        }
    }

    fields.insert("country_code".to_string(), code);
    redirected_from
}

/// Replace the first `$field` token in `name` with that field's value.
fn expand_component(name: &str, fields: &AddressFields) -> String {
    let Some(captures) = COMPONENT_TOKEN.captures(name) else {
        return name.to_string();
    };
    let (Some(token), Some(field)) = (captures.get(0), captures.get(1)) else {
        return name.to_string();
    };
    let value = present(fields, field.as_str()).unwrap_or_default();
    format!("{}{}{}", &name[..token.start()], value, &name[token.end()..])
}

/// Fill `country` from the country-names table.
pub fn append_country(fields: &mut AddressFields, data: &AddressData) {
    if present(fields, "country").is_some() {
        return;
    }
    let Some(name) = present(fields, "country_code").and_then(|code| data.country_name(code))
    else {
        return;
    };
    fields.insert("country".to_string(), name.to_string());
}

/// Copy alias values onto empty canonical fields.
pub fn resolve_aliases(fields: &mut AddressFields, components: &ComponentTable) {
    let small_district = present(fields, "country_code")
        .is_some_and(|code| SMALL_DISTRICT_COUNTRIES.contains(&code));
    let keys: Vec<String> = fields.keys().cloned().collect();
    for key in keys {
        let canonical = if key == "district" {
            if small_district {
                "neighbourhood"
            } else {
                "state_district"
            }
        } else {
            match components.canonical(&key) {
                Some(name) if name != key => name,
                _ => continue,
            }
        };
        if present(fields, canonical).is_some() {
            continue;
        }
        if let Some(value) = fields.get(&key).cloned() {
            fields.insert(canonical.to_string(), value);
        }
    }
}

/// A numeric `country` next to a `state` is treated as a misplaced state.
pub fn swap_numeric_country(fields: &mut AddressFields) {
    let numeric = present(fields, "country").is_some_and(|c| c.trim().parse::<i64>().is_ok());
    if !numeric || present(fields, "state").is_none() {
        return;
    }
    if let Some(state) = fields.shift_remove("state") {
        fields.insert("country".to_string(), state);
    }
}

/// Derive `state_code` and `county_code` from the subdivision tables.
pub fn derive_subdivision_codes(fields: &mut AddressFields, data: &AddressData) {
    let country = present(fields, "country_code").unwrap_or_default().to_string();

    if present(fields, "state_code").is_none() {
        if let Some(state) = present(fields, "state").map(str::to_string) {
            if let Some(code) = data.state_codes.code_for(&country, &state) {
                fields.insert("state_code".to_string(), code.to_string());
            }
            if WASHINGTON_DC.is_match(&state) {
                fields.insert("state_code".to_string(), "DC".to_string());
                fields.insert("state".to_string(), "District of Columbia".to_string());
                fields.insert("city".to_string(), "Washington".to_string());
            }
        }
    }

    if present(fields, "county_code").is_none() {
        if let Some(county) = present(fields, "county") {
            if let Some(code) = data.county_codes.code_for(&country, county) {
                let code = code.to_string();
                fields.insert("county_code".to_string(), code);
            }
        }
    }
}

/// Move the values of unknown keys into `attention`.
pub fn collect_attention(fields: &mut AddressFields, components: &ComponentTable) {
    let unknown: Vec<&str> = fields
        .iter()
        .filter(|(key, value)| !value.is_empty() && !components.is_known(key))
        .map(|(_, value)| value.as_str())
        .collect();
    if unknown.is_empty() {
        return;
    }
    let joined = unknown.join(", ");
    let attention = match present(fields, "attention") {
        Some(existing) => format!("{existing}, {joined}"),
        None => joined,
    };
    fields.insert("attention".to_string(), attention);
}

/// Drop implausible postcodes and shorten multi-code lists.
pub fn clean_postcode(fields: &mut AddressFields) {
    let Some(postcode) = present(fields, "postcode") else {
        return;
    };
    if postcode.chars().count() > MAX_POSTCODE_LEN || POSTCODE_RANGE.is_match(postcode) {
        debug!(postcode, "dropping postcode");
        fields.shift_remove("postcode");
    } else if let Some(first) = MULTI_POSTCODE
        .captures(postcode)
        .and_then(|captures| captures.get(1))
    {
        let first = first.as_str().to_string();
        fields.insert("postcode".to_string(), first);
    }
}

/// Remove fields holding URLs.
pub fn strip_urls(fields: &mut AddressFields) {
    fields.retain(|_, value| !URL.is_match(value));
}
