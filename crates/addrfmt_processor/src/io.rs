/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::Path;

use addrfmt_core::FormatOptions;
use addrfmt_template::Value;
use serde::de::DeserializeOwned;

use crate::fields::fields_from_json;
use crate::{AddressFields, FormatError};

/// Read a JSON or YAML file, chosen by extension (YAML by default).
fn load<T: DeserializeOwned>(path: &Path) -> Result<T, FormatError> {
    let bytes = fs::read(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    match ext {
        "json" => serde_json::from_slice(&bytes)
            .map_err(|e| FormatError::ParseError("JSON".to_string(), e.to_string())),
        _ => serde_yaml::from_slice(&bytes)
            .map_err(|e| FormatError::ParseError("YAML".to_string(), e.to_string())),
    }
}

/// Load addresses from a file holding one address object or a list of them.
pub fn load_addresses(path: &Path) -> Result<Vec<AddressFields>, FormatError> {
    match load::<serde_json::Value>(path)? {
        serde_json::Value::Array(items) => items.into_iter().map(fields_from_json).collect(),
        value => Ok(vec![fields_from_json(value)?]),
    }
}

/// Load formatting options from a config file.
pub fn load_options(path: &Path) -> Result<FormatOptions, FormatError> {
    load(path)
}

/// Load arbitrary data to render a template against.
pub fn load_view(path: &Path) -> Result<Value, FormatError> {
    load::<serde_json::Value>(path).map(Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("addrfmt-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_single_and_list() {
        let path = scratch("one.json", r#"{"road": "Main St", "houseNumber": 10}"#);
        let addresses = load_addresses(&path).unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0]["houseNumber"], "10");

        let path = scratch("many.yaml", "- city: Bern\n- city: Basel\n  postcode: 4051\n");
        let addresses = load_addresses(&path).unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[1]["postcode"], "4051");
    }

    #[test]
    fn test_load_options() {
        let path = scratch("options.yaml", "abbreviate: true\nfallback-country-code: DE\n");
        let options = load_options(&path).unwrap();
        assert!(options.abbreviate);
        assert_eq!(options.fallback_country_code.as_deref(), Some("DE"));
    }

    #[test]
    fn test_parse_errors_name_the_format() {
        let path = scratch("broken.json", "{");
        assert!(matches!(
            load_addresses(&path),
            Err(FormatError::ParseError(ref format, _)) if format == "JSON"
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_view(Path::new("/nonexistent/view.yaml")),
            Err(FormatError::Io(_))
        ));
    }
}
