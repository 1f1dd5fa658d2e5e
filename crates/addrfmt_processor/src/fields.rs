/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Address field maps.

use indexmap::IndexMap;

use crate::FormatError;

/// Address components keyed by name, in input order.
pub type AddressFields = IndexMap<String, String>;

/// Build [`AddressFields`] from `key => value` pairs.
///
/// ```rust
/// let fields = addrfmt_processor::address! {
///     "road" => "Main St",
///     "house_number" => "10",
/// };
/// assert_eq!(fields["road"], "Main St");
/// ```
#[macro_export]
macro_rules! address {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields = $crate::AddressFields::new();
        $(
            fields.insert(::std::string::String::from($key), ::std::string::String::from($value));
        )*
        fields
    }};
}

/// Convert a JSON object into fields.
///
/// Strings are taken as they are, numbers and booleans are written out, and
/// nulls, arrays and nested objects are skipped.
pub fn fields_from_json(value: serde_json::Value) -> Result<AddressFields, FormatError> {
    let serde_json::Value::Object(map) = value else {
        return Err(FormatError::ParseError(
            "address".to_string(),
            "expected an object of address components".to_string(),
        ));
    };

    let mut fields = AddressFields::with_capacity(map.len());
    for (key, value) in map {
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => {
                tracing::debug!(component = %key, "skipping non-scalar component");
                continue;
            }
        };
        fields.insert(key, text);
    }
    Ok(fields)
}
