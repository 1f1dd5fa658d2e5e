/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The complete set of formatting data.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::abbreviation::AbbreviationRule;
use crate::component::ComponentTable;
use crate::embedded;
use crate::subdivision::SubdivisionTable;
use crate::template::TemplateTable;

pub const TEMPLATES_FILE: &str = "templates.yaml";
pub const COMPONENTS_FILE: &str = "components.yaml";
pub const COUNTRY_NAMES_FILE: &str = "country-names.yaml";
pub const STATE_CODES_FILE: &str = "state-codes.yaml";
pub const COUNTY_CODES_FILE: &str = "county-codes.yaml";
pub const COUNTRY_LANGUAGES_FILE: &str = "country-to-lang.yaml";
pub const ABBREVIATIONS_DIR: &str = "abbreviations";

/// Errors raised while loading formatting data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("templates table has no `default` entry")]
    MissingDefault,
}

/// Every table the formatter consults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressData {
    pub templates: TemplateTable,
    pub components: ComponentTable,
    /// Uppercase country code to display name.
    pub country_names: IndexMap<String, String>,
    pub state_codes: SubdivisionTable,
    pub county_codes: SubdivisionTable,
    /// Uppercase country code to its languages, most common first.
    pub country_languages: IndexMap<String, Vec<String>>,
    /// Language code to abbreviation rules.
    pub abbreviations: IndexMap<String, Vec<AbbreviationRule>>,
}

static EMBEDDED: LazyLock<Result<AddressData, DataError>> =
    LazyLock::new(AddressData::parse_embedded);

impl AddressData {
    /// The bundled data, parsed once per process.
    pub fn embedded() -> Result<&'static AddressData, DataError> {
        EMBEDDED.as_ref().map_err(Clone::clone)
    }

    /// Parse the bundled data into a fresh value.
    pub fn parse_embedded() -> Result<Self, DataError> {
        let mut abbreviations = IndexMap::new();
        for lang in embedded::EMBEDDED_ABBREVIATION_LANGS {
            if let Some(bytes) = embedded::get_abbreviation_bytes(lang) {
                let file = format!("{ABBREVIATIONS_DIR}/{lang}.yaml");
                abbreviations.insert((*lang).to_string(), parse(&file, bytes)?);
            }
        }

        let data = Self {
            templates: parse(TEMPLATES_FILE, embedded::TEMPLATES)?,
            components: parse(COMPONENTS_FILE, embedded::COMPONENTS)?,
            country_names: parse(COUNTRY_NAMES_FILE, embedded::COUNTRY_NAMES)?,
            state_codes: parse(STATE_CODES_FILE, embedded::STATE_CODES)?,
            county_codes: parse(COUNTY_CODES_FILE, embedded::COUNTY_CODES)?,
            country_languages: parse(COUNTRY_LANGUAGES_FILE, embedded::COUNTRY_LANGUAGES)?,
            abbreviations,
        };
        data.check()?;
        Ok(data)
    }

    /// Load the data from a directory laid out like the bundled `data/`.
    ///
    /// The `abbreviations/` subdirectory is optional; every `*.yaml` file in
    /// it is read as the rules for the language named by its file stem.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();

        let mut abbreviations = IndexMap::new();
        let abbreviation_dir = dir.join(ABBREVIATIONS_DIR);
        if abbreviation_dir.is_dir() {
            let entries =
                fs::read_dir(&abbreviation_dir).map_err(|e| io_error(&abbreviation_dir, e))?;
            let mut paths = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| io_error(&abbreviation_dir, e))?.path();
                if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                    paths.push(path);
                }
            }
            paths.sort();
            for path in paths {
                let Some(lang) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                abbreviations.insert(lang.to_string(), read(&path)?);
            }
        }

        let data = Self {
            templates: read(&dir.join(TEMPLATES_FILE))?,
            components: read(&dir.join(COMPONENTS_FILE))?,
            country_names: read(&dir.join(COUNTRY_NAMES_FILE))?,
            state_codes: read(&dir.join(STATE_CODES_FILE))?,
            county_codes: read(&dir.join(COUNTY_CODES_FILE))?,
            country_languages: read(&dir.join(COUNTRY_LANGUAGES_FILE))?,
            abbreviations,
        };
        data.check()?;
        Ok(data)
    }

    fn check(&self) -> Result<(), DataError> {
        if self.templates.default_template().is_none() {
            return Err(DataError::MissingDefault);
        }
        Ok(())
    }

    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.country_names.get(code).map(String::as_str)
    }

    pub fn languages(&self, code: &str) -> &[String] {
        self.country_languages
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn abbreviation_rules(&self, lang: &str) -> &[AbbreviationRule] {
        self.abbreviations
            .get(lang)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn parse<T: DeserializeOwned>(file: &str, bytes: &[u8]) -> Result<T, DataError> {
    serde_yaml::from_slice(bytes).map_err(|e| DataError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })
}

fn read<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    parse(&path.display().to_string(), &bytes)
}

fn io_error(path: &Path, error: std::io::Error) -> DataError {
    DataError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_loads() {
        let data = AddressData::embedded().unwrap();
        assert!(data.templates.default_template().is_some());
        assert!(data.templates.contains("US"));
        assert_eq!(data.components.canonical("town"), Some("city"));
        assert_eq!(data.country_name("DE"), Some("Germany"));
        assert_eq!(data.state_codes.code_for("US", "Texas"), Some("TX"));
        assert_eq!(data.county_codes.code_for("IT", "Milano"), Some("MI"));
        assert_eq!(data.languages("CH").first().map(String::as_str), Some("de"));
        assert!(!data.abbreviation_rules("en").is_empty());
        assert!(data.abbreviation_rules("xx").is_empty());
    }

    #[test]
    fn test_every_redirect_has_a_target() {
        let data = AddressData::embedded().unwrap();
        for (code, template) in data.templates.iter() {
            if let Some(target) = &template.use_country {
                assert!(
                    data.templates.contains(target),
                    "{code} redirects to missing {target}"
                );
            }
        }
    }

    #[test]
    fn test_missing_default_is_rejected() {
        let data = AddressData {
            templates: serde_yaml::from_str("US:\n  address_template: x\n").unwrap(),
            ..AddressData::default()
        };
        assert_eq!(data.check(), Err(DataError::MissingDefault));
    }

    #[test]
    fn test_load_dir_missing_file() {
        let error = AddressData::load_dir("/nonexistent/addrfmt-data").unwrap_err();
        assert!(matches!(error, DataError::Io { .. }));
    }
}
