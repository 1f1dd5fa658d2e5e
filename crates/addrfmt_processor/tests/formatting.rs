/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use addrfmt_processor::{address, cleanup, FormatOptions, Formatted, OutputKind};

#[test]
fn test_us_address_ends_with_country_name() {
    let fields = address! {
        "road" => "Main St",
        "houseNumber" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "countryCode" => "US",
    };
    let out = format_text(&fields);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["10 Main St", "Springfield, 12345", "United States of America"]);
}

#[test]
fn test_country_code_only() {
    assert_eq!(format_text(&address! { "country_code" => "FR" }), "France\n");
}

#[test]
fn test_unknown_key_becomes_attention() {
    let fields = address! {
        "foo" => "bar",
        "road" => "Main St",
        "city" => "Springfield",
        "country_code" => "US",
    };
    assert!(format_text(&fields).starts_with("bar\n"));
    assert_eq!(format_text(&address! { "foo" => "bar" }), "bar\n");
}

#[test]
fn test_postcode_range_is_dropped() {
    let fields = address! { "postcode" => "12345;67890", "city" => "Springfield" };
    let normalized = formatter().normalize(&fields, &FormatOptions::default());
    assert!(!normalized.fields.contains_key("postcode"));
    assert_eq!(format_text(&fields), "Springfield\n");
}

#[test]
fn test_washington_dc_is_normalized() {
    let fields = address! { "state" => "Washington, DC" };
    let normalized = formatter().normalize(&fields, &FormatOptions::default());
    assert_eq!(normalized.fields["state_code"], "DC");
    assert_eq!(normalized.fields["state"], "District of Columbia");
    assert_eq!(normalized.fields["city"], "Washington");
}

#[test]
fn test_aliases_render_like_canonical_names() {
    let pairs = [
        ("city", "town"),
        ("road", "street"),
        ("postcode", "postal_code"),
        ("house_number", "street_number"),
    ];
    for (canonical, alias) in pairs {
        let original = springfield();
        let renamed = original
            .iter()
            .map(|(key, value)| {
                let key = if key == canonical { alias } else { key.as_str() };
                (key.to_string(), value.clone())
            })
            .collect();
        assert_eq!(
            format_text(&original),
            format_text(&renamed),
            "{alias} should render like {canonical}"
        );
    }
}

#[test]
fn test_new_york_lines_are_kept() {
    let fields = address! {
        "city" => "New York",
        "state" => "New York",
        "country_code" => "US",
    };
    assert_eq!(
        format_text(&fields),
        "New York\nNew York\nUnited States of America\n"
    );
}

#[test]
fn test_other_duplicates_collapse() {
    let fields = address! {
        "city" => "Berlin",
        "state" => "Berlin",
        "country_code" => "DE",
    };
    assert_eq!(format_text(&fields), "Berlin\n");
}

#[test]
fn test_output_is_already_clean() {
    for fields in sample_addresses() {
        let out = format_text(&fields);
        assert!(out.ends_with('\n'), "missing newline: {out:?}");
        let body = out.trim_end_matches('\n');
        assert_eq!(cleanup(body), body, "cleanup not idempotent for {fields:?}");
    }
}

#[test]
fn test_overseas_department_redirect() {
    let fields = address! {
        "country_code" => "GF",
        "road" => "Avenue du Général de Gaulle",
        "house_number" => "1",
        "postcode" => "97300",
        "city" => "Cayenne",
    };
    assert_eq!(
        format_text(&fields),
        "1 Avenue du Général de Gaulle\n97300 Cayenne\nGuyane, France\n"
    );
}

#[test]
fn test_dutch_caribbean() {
    let fields = address! {
        "country_code" => "NL",
        "state" => "Curaçao",
        "road" => "Handelskade",
        "house_number" => "1",
        "city" => "Willemstad",
    };
    assert_eq!(format_text(&fields), "Handelskade 1\nWillemstad\nCuraçao\n");
}

#[test]
fn test_small_district_country() {
    let fields = address! {
        "country_code" => "RO",
        "road" => "Strada Lipscani",
        "house_number" => "5",
        "district" => "Sector 3",
        "postcode" => "030031",
        "city" => "București",
    };
    assert_eq!(
        format_text(&fields),
        "Strada Lipscani 5\nSector 3\n030031 București\n"
    );
}

#[test]
fn test_array_output_drops_blank_lines() {
    let options = FormatOptions {
        output: OutputKind::Array,
        append_country: true,
        ..Default::default()
    };
    let fields = address! { "country_code" => "CH", "city" => "Bern" };
    let formatted = addrfmt_processor::format(&fields, &options).unwrap();
    assert_eq!(
        formatted,
        Formatted::Lines(vec!["Bern".to_string(), "Switzerland".to_string()])
    );
}
