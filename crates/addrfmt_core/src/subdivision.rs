/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! State and county code tables.

use indexmap::IndexMap;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of a subdivision, either a single string or a map from language
/// tag to localized name (with an optional `default` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum SubdivisionName {
    Simple(String),
    Localized(IndexMap<String, String>),
}

impl SubdivisionName {
    /// Case-insensitive match against any of the names.
    pub fn matches(&self, name: &str) -> bool {
        let wanted = name.to_uppercase();
        match self {
            Self::Simple(value) => value.to_uppercase() == wanted,
            Self::Localized(names) => names.values().any(|value| value.to_uppercase() == wanted),
        }
    }
}

/// Subdivision codes per country: country code, then subdivision code,
/// then name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct SubdivisionTable(IndexMap<String, IndexMap<String, SubdivisionName>>);

impl SubdivisionTable {
    /// Code of the subdivision called `name` in `country`.
    pub fn code_for(&self, country: &str, name: &str) -> Option<&str> {
        self.0
            .get(country)?
            .iter()
            .find(|(_, candidate)| candidate.matches(name))
            .map(|(code, _)| code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SubdivisionTable {
        serde_yaml::from_str(
            r#"
CA:
  ON: Ontario
  QC:
    default: Quebec
    fr: Québec
US:
  DC: District of Columbia
  NY: New York
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_code_lookup_is_case_insensitive() {
        let table = table();
        assert_eq!(table.code_for("US", "new york"), Some("NY"));
        assert_eq!(table.code_for("US", "NEW YORK"), Some("NY"));
        assert_eq!(table.code_for("US", "Ontario"), None);
        assert_eq!(table.code_for("FR", "Ontario"), None);
    }

    #[test]
    fn test_localized_names() {
        let table = table();
        assert_eq!(table.code_for("CA", "Québec"), Some("QC"));
        assert_eq!(table.code_for("CA", "quebec"), Some("QC"));
        assert_eq!(table.code_for("CA", "ontario"), Some("ON"));
    }
}
