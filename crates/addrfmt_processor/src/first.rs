/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The `first` section used by layouts to pick the first available value.
//!
//! `{{#first}} {{{town}}} || {{{city}}} || {{{village}}} {{/first}}` renders
//! its body, splits the result on `||` and keeps the first non-empty part.

use std::sync::LazyLock;

use addrfmt_template::Value;
use regex::Regex;

/// Key the selector is bound to in the render view.
pub const FIRST_KEY: &str = "first";

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\|\|\s*").unwrap());

/// First non-empty alternative in `rendered`, trimmed.
pub fn first_available(rendered: &str) -> &str {
    SEPARATOR
        .split(rendered)
        .map(str::trim)
        .find(|part| !part.is_empty())
        .unwrap_or_default()
}

/// The selector as a view value.
pub fn first_value() -> Value {
    Value::computed(|_| {
        Value::lambda(|body, render| Ok(first_available(&render(body)?).to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrfmt_template::Renderer;

    #[test]
    fn test_first_available() {
        assert_eq!(first_available(" ||  || Springfield || Shelbyville "), "Springfield");
        assert_eq!(first_available("Ogdenville"), "Ogdenville");
        assert_eq!(first_available(" ||   || "), "");
        assert_eq!(first_available(""), "");
    }

    #[test]
    fn test_selector_in_template() {
        let view: Value = [
            ("city", Value::from("Springfield")),
            ("village", Value::from("Ogdenville")),
            (FIRST_KEY, first_value()),
        ]
        .into_iter()
        .collect();
        let out = Renderer::new()
            .render(
                "{{#first}} {{{town}}} || {{{city}}} || {{{village}}} {{/first}}!",
                view,
            )
            .unwrap();
        assert_eq!(out, "Springfield!");
    }
}
