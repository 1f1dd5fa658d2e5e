/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use addrfmt_processor::{address, AddressFields, FormatOptions, Formatter};

// --- Helper Functions for Test Data Construction ---

pub fn formatter() -> Formatter {
    Formatter::embedded().expect("bundled data should load")
}

/// Format with the bundled data and default options.
pub fn format_text(fields: &AddressFields) -> String {
    format_with(fields, &FormatOptions::default())
}

pub fn format_with(fields: &AddressFields, options: &FormatOptions) -> String {
    addrfmt_processor::format(fields, options)
        .expect("formatting should succeed")
        .to_string()
}

/// A complete US street address.
pub fn springfield() -> AddressFields {
    address! {
        "road" => "Main St",
        "house_number" => "10",
        "city" => "Springfield",
        "postcode" => "12345",
        "country_code" => "US",
    }
}

/// A handful of addresses covering different layouts.
pub fn sample_addresses() -> Vec<AddressFields> {
    vec![
        springfield(),
        address! {
            "road" => "Invalidenstraße",
            "house_number" => "116",
            "postcode" => "10115",
            "city" => "Berlin",
            "state" => "Berlin",
            "country" => "Deutschland",
            "country_code" => "de",
        },
        address! {
            "house_number" => "10",
            "road" => "Downing Street",
            "city" => "London",
            "postcode" => "SW1A 2AA",
            "country_code" => "UK",
        },
        address! {
            "road" => "Calle Mayor",
            "postcode" => "28013",
            "city" => "Madrid",
            "district" => "Centro",
            "country_code" => "ES",
        },
        address! {
            "country_code" => "GP",
            "city" => "Pointe-à-Pitre",
            "postcode" => "97110",
        },
        address! { "village" => "Lower Slaughter", "county" => "Gloucestershire" },
        address! { "company" => "ACME", "city" => "Springfield", "countryCode" => "us" },
    ]
}
