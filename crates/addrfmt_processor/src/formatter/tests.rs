/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::*;
use crate::address;
use addrfmt_template::{MemoryCache, TemplateError};

fn formatter() -> Formatter {
    Formatter::embedded().unwrap()
}

fn with_templates(yaml: &str) -> Result<Formatter, FormatError> {
    let data = AddressData {
        templates: serde_yaml::from_str(yaml).unwrap(),
        ..AddressData::embedded().unwrap().clone()
    };
    Formatter::new(data)
}

fn text(formatter: &Formatter, fields: &AddressFields, options: &FormatOptions) -> String {
    formatter.format(fields, options).unwrap().to_string()
}

#[test]
fn test_us_address() {
    let fields = address! {
        "road" => "Main St",
        "houseNumber" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "countryCode" => "US",
    };
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "10 Main St\nSpringfield, 12345\nUnited States of America\n"
    );
}

#[test]
fn test_country_only() {
    let fields = address! { "country_code" => "FR" };
    assert_eq!(text(&formatter(), &fields, &FormatOptions::default()), "France\n");

    let options = FormatOptions {
        append_country: true,
        ..Default::default()
    };
    assert_eq!(text(&formatter(), &fields, &options), "France\n");
}

#[test]
fn test_array_output() {
    let fields = address! {
        "road" => "Main St",
        "house_number" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "country_code" => "US",
    };
    let options = FormatOptions {
        output: OutputKind::Array,
        ..Default::default()
    };
    assert_eq!(
        formatter().format(&fields, &options).unwrap(),
        Formatted::Lines(vec![
            "10 Main St".to_string(),
            "Springfield, 12345".to_string(),
            "United States of America".to_string(),
        ])
    );
}

#[test]
fn test_redirect_uses_target_layout() {
    let fields = address! {
        "country_code" => "PR",
        "road" => "Calle Fortaleza",
        "house_number" => "52",
        "city" => "San Juan",
        "postcode" => "00901",
    };
    let formatter = formatter();
    let normalized = formatter.normalize(&fields, &FormatOptions::default());
    assert_eq!(normalized.template_key, "US");
    assert_eq!(normalized.redirected_from.as_deref(), Some("PR"));
    assert_eq!(
        text(&formatter, &fields, &FormatOptions::default()),
        "52 Calle Fortaleza\nSan Juan, PR 00901\nUnited States of America\n"
    );
}

#[test]
fn test_unknown_country_uses_default() {
    let fields = address! {
        "country_code" => "ZZ",
        "road" => "Rue Neuve",
        "house_number" => "3",
        "postcode" => "1000",
        "city" => "Somewhere",
    };
    let normalized = formatter().normalize(&fields, &FormatOptions::default());
    assert_eq!(normalized.template_key, "default");
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "Rue Neuve 3\n1000 Somewhere\n"
    );
}

#[test]
fn test_option_country_code_overrides_input() {
    let fields = address! {
        "country_code" => "US",
        "road" => "Invalidenstraße",
        "house_number" => "116",
        "postcode" => "10115",
        "city" => "Berlin",
    };
    let options = FormatOptions {
        country_code: Some("de".to_string()),
        ..Default::default()
    };
    assert_eq!(
        text(&formatter(), &fields, &options),
        "Invalidenstraße 116\n10115 Berlin\n"
    );
}

#[test]
fn test_option_country_code_with_camel_case_input() {
    let fields = address! {
        "road" => "Main St",
        "houseNumber" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "countryCode" => "US",
    };
    let options = FormatOptions {
        country_code: Some("US".to_string()),
        ..Default::default()
    };
    let formatter = formatter();
    let normalized = formatter.normalize(&fields, &options);
    assert!(!normalized.fields.contains_key("countryCode"));
    assert!(!normalized.fields.contains_key("attention"));
    assert_eq!(
        text(&formatter, &fields, &options),
        "10 Main St\nSpringfield, 12345\nUnited States of America\n"
    );
}

#[test]
fn test_country_replace_and_county_code() {
    let fields = address! {
        "country_code" => "IT",
        "road" => "Via Torino",
        "house_number" => "21",
        "postcode" => "20123",
        "city" => "Milano",
        "county" => "Città metropolitana di Milano",
    };
    let formatter = formatter();
    let normalized = formatter.normalize(&fields, &FormatOptions::default());
    assert_eq!(normalized.fields["county"], "Milano");
    assert_eq!(normalized.fields["county_code"], "MI");
    assert_eq!(
        text(&formatter, &fields, &FormatOptions::default()),
        "Via Torino 21\n20123 Milano MI\n"
    );
}

#[test]
fn test_postformat_rewrites_postcode() {
    let fields = address! {
        "country_code" => "BR",
        "road" => "Avenida Paulista",
        "house_number" => "1578",
        "district" => "Bela Vista",
        "city" => "São Paulo",
        "state" => "São Paulo",
        "postcode" => "01310200",
    };
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "Avenida Paulista 1578\nBela Vista\nSão Paulo - SP\n01310-200\n"
    );

    let fields = address! {
        "country_code" => "CA",
        "road" => "Wellington Street",
        "house_number" => "111",
        "city" => "Ottawa",
        "state" => "Ontario",
        "postcode" => "K1A0A9",
    };
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "111 Wellington Street\nOttawa ON K1A 0A9\n"
    );
}

#[test]
fn test_abbreviate() {
    let fields = address! {
        "country_code" => "GB",
        "road" => "Baker Street",
        "house_number" => "221B",
        "city" => "London",
        "postcode" => "NW1 6XE",
    };
    let options = FormatOptions {
        abbreviate: true,
        ..Default::default()
    };
    assert_eq!(
        text(&formatter(), &fields, &options),
        "221B Baker St\nLondon\nNW1 6XE\n"
    );
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "221B Baker Street\nLondon\nNW1 6XE\n"
    );

    let fields = address! {
        "country_code" => "DE",
        "road" => "Lange Straße",
        "house_number" => "7",
        "postcode" => "26122",
        "city" => "Oldenburg",
    };
    assert_eq!(text(&formatter(), &fields, &options), "Lange Str. 7\n26122 Oldenburg\n");
}

#[test]
fn test_postcode_cleanup_can_be_disabled() {
    let fields = address! {
        "road" => "Main St",
        "postcode" => "12345,67890",
        "country_code" => "US",
        "city" => "Springfield",
    };
    let normalized = formatter().normalize(&fields, &FormatOptions::default());
    assert_eq!(normalized.fields["postcode"], "12345");

    let options = FormatOptions {
        cleanup_postcode: false,
        ..Default::default()
    };
    let normalized = formatter().normalize(&fields, &options);
    assert_eq!(normalized.fields["postcode"], "12345,67890");
}

#[test]
fn test_urls_are_not_rendered() {
    let fields = address! {
        "house" => "https://example.com/hq",
        "road" => "Main St",
        "house_number" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "country_code" => "US",
    };
    assert_eq!(
        text(&formatter(), &fields, &FormatOptions::default()),
        "10 Main St\nSpringfield, 12345\nUnited States of America\n"
    );
}

#[test]
fn test_blank_render_falls_back_to_values() {
    let fields = address! { "continent" => "Europe" };
    assert_eq!(text(&formatter(), &fields, &FormatOptions::default()), "Europe\n");

    let formatter = with_templates("default:\n  address_template: \"{{{road}}}\"\n").unwrap();
    let fields = address! { "city" => "Bern", "country" => "Switzerland" };
    assert_eq!(
        text(&formatter, &fields, &FormatOptions::default()),
        "Bern, Switzerland\n"
    );
}

#[test]
fn test_invalid_pattern_fails_construction() {
    let error = with_templates(
        "default:\n  address_template: x\n  postformat_replace:\n    - [\"(\", \"\"]\n",
    )
    .unwrap_err();
    assert!(matches!(
        error,
        FormatError::Pattern { ref table, .. } if table == "default.postformat_replace"
    ));
}

#[test]
fn test_validate_templates() {
    assert!(formatter().validate_templates().is_empty());

    let formatter = with_templates(
        "default:\n  address_template: \"{{#first}} {{{road}}}\"\n  fallback_template: ok\n",
    )
    .unwrap();
    let issues = formatter.validate_templates();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].country, "default");
    assert_eq!(issues[0].body, TemplateBody::Address);
    assert!(matches!(
        issues[0].error,
        TemplateError::UnclosedSection { ref name, .. } if name == "first"
    ));
}

#[test]
fn test_injected_cache_is_used() {
    let cache = Arc::new(MemoryCache::new());
    let formatter = formatter().with_cache(cache.clone());
    let fields = address! { "road" => "Main St", "country_code" => "US" };
    formatter.format(&fields, &FormatOptions::default()).unwrap();
    let compiled = cache.len();
    assert!(compiled > 0);
    formatter.format(&fields, &FormatOptions::default()).unwrap();
    assert_eq!(cache.len(), compiled);
}
