/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Per-country layout templates.
//!
//! The templates table maps a two-letter country code (plus the reserved
//! `default` key) to a [`CountryTemplate`]. Top-level entries whose value is
//! a plain string are shared layouts referenced through YAML anchors; they
//! are skipped when the table is loaded.

use indexmap::IndexMap;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Key of the entry used when a country has no entry of its own.
pub const DEFAULT_TEMPLATE_KEY: &str = "default";

/// A `[pattern, replacement]` pair.
///
/// For the `replace` rules of a country the pattern may be prefixed with
/// `field=` to restrict it to a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

impl Substitution {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Split a `field=pattern` rule into its scope and pattern.
    ///
    /// A prefix only counts as a scope when it looks like a component name,
    /// so regexes that happen to contain `=` stay global.
    pub fn scoped(&self) -> (Option<&str>, &str) {
        match self.pattern.split_once('=') {
            Some((field, pattern))
                if !field.is_empty()
                    && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                (Some(field), pattern)
            }
            _ => (None, &self.pattern),
        }
    }
}

#[cfg(feature = "schema")]
impl JsonSchema for Substitution {
    fn schema_name() -> String {
        "Substitution".to_owned()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <(String, String)>::json_schema(generator)
    }
}

impl From<(String, String)> for Substitution {
    fn from((pattern, replacement): (String, String)) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

impl From<Substitution> for (String, String) {
    fn from(value: Substitution) -> Self {
        (value.pattern, value.replacement)
    }
}

/// Formatting rules for one country.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CountryTemplate {
    /// Main layout, used when the address has a road or a postcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_template: Option<String>,
    /// Layout for sparse addresses with neither road nor postcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_template: Option<String>,
    /// Substitutions applied to input values before rendering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replace: Vec<Substitution>,
    /// Substitutions applied to the rendered text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub postformat_replace: Vec<Substitution>,
    /// Format this country with another country's rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_country: Option<String>,
    /// Country name to use after a `use_country` redirect. `$field` tokens
    /// are replaced with the matching input value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_country: Option<String>,
    /// `field=value` to add after a `use_country` redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_component: Option<String>,
}

impl CountryTemplate {
    /// The `add_component` rule split into field and value.
    pub fn added_component(&self) -> Option<(&str, &str)> {
        self.add_component.as_deref()?.split_once('=')
    }
}

/// All country templates, keyed by uppercase country code.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateTable {
    entries: IndexMap<String, CountryTemplate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Country(CountryTemplate),
    Layout(#[allow(dead_code)] String),
}

impl<'de> Deserialize<'de> for TemplateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, RawEntry>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .filter_map(|(key, entry)| match entry {
                RawEntry::Country(template) => Some((key, template)),
                RawEntry::Layout(_) => None,
            })
            .collect();
        Ok(Self { entries })
    }
}

impl TemplateTable {
    pub fn get(&self, code: &str) -> Option<&CountryTemplate> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// The entry under [`DEFAULT_TEMPLATE_KEY`].
    pub fn default_template(&self) -> Option<&CountryTemplate> {
        self.entries.get(DEFAULT_TEMPLATE_KEY)
    }

    pub fn insert(&mut self, code: impl Into<String>, template: CountryTemplate) {
        self.entries.insert(code.into(), template);
    }

    /// Country codes with an entry, excluding the default.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|code| *code != DEFAULT_TEMPLATE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryTemplate)> {
        self.entries.iter().map(|(code, t)| (code.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CountryTemplate)> for TemplateTable {
    fn from_iter<T: IntoIterator<Item = (String, CountryTemplate)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
generic1: &generic1 |
  {{{road}}} {{{house_number}}}
  {{{postcode}}} {{{city}}}
default:
  address_template: *generic1
DE:
  address_template: *generic1
  replace:
    - ["city=^Stadt ", ""]
    - ["^Landkreis ", ""]
  postformat_replace:
    - ["\nBerlin\nBerlin", "\nBerlin"]
AX:
  use_country: FI
  change_country: "Åland, Finland"
PR:
  use_country: US
  add_component: state=Puerto Rico
"#;

    #[test]
    fn test_layout_anchors_are_skipped() {
        let table: TemplateTable = serde_yaml::from_str(TABLE).unwrap();
        assert!(!table.contains("generic1"));
        assert_eq!(table.len(), 4);
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["DE", "AX", "PR"]);
        let de = table.get("DE").unwrap();
        assert_eq!(
            de.address_template.as_deref(),
            Some("{{{road}}} {{{house_number}}}\n{{{postcode}}} {{{city}}}\n")
        );
        assert_eq!(de.address_template, table.default_template().unwrap().address_template);
    }

    #[test]
    fn test_substitution_scope() {
        let table: TemplateTable = serde_yaml::from_str(TABLE).unwrap();
        let rules = &table.get("DE").unwrap().replace;
        assert_eq!(rules[0].scoped(), (Some("city"), "^Stadt "));
        assert_eq!(rules[1].scoped(), (None, "^Landkreis "));
        assert_eq!(Substitution::new("a(?P<x>=)b", "").scoped(), (None, "a(?P<x>=)b"));
    }

    #[test]
    fn test_redirect_fields() {
        let table: TemplateTable = serde_yaml::from_str(TABLE).unwrap();
        let ax = table.get("AX").unwrap();
        assert_eq!(ax.use_country.as_deref(), Some("FI"));
        assert_eq!(ax.change_country.as_deref(), Some("Åland, Finland"));
        assert!(ax.address_template.is_none());
        assert_eq!(
            table.get("PR").unwrap().added_component(),
            Some(("state", "Puerto Rico"))
        );
    }
}
