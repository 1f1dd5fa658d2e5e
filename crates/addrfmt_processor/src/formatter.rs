/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The formatting pipeline.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use addrfmt_core::{AddressData, FormatOptions, OutputKind};
use addrfmt_template::{escape_none, Renderer, TemplateCache, TemplateError, Value};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cleanup::cleanup;
use crate::first::{first_value, FIRST_KEY};
use crate::normalize;
use crate::select::{self, TemplateBody};
use crate::substitution::SubstitutionTable;
use crate::{AddressFields, FormatError};

/// A formatted address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Formatted {
    /// Lines joined with `\n`, ending in a newline.
    Text(String),
    /// Non-empty lines.
    Lines(Vec<String>),
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Lines(lines) => f.write_str(&lines.join("\n")),
        }
    }
}

fn lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields after normalization, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub fields: AddressFields,
    /// Resolved country code, if any.
    pub country_code: Option<String>,
    /// Key of the template entry that will be rendered.
    pub template_key: String,
    /// Country code that redirected to `country_code`.
    pub redirected_from: Option<String>,
}

/// A template body that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateIssue {
    pub country: String,
    pub body: TemplateBody,
    pub error: TemplateError,
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.body {
            TemplateBody::Address => "address_template",
            TemplateBody::Fallback => "fallback_template",
        };
        write!(f, "{}.{}: {}", self.country, body, self.error)
    }
}

/// Formats address fields with a data set.
///
/// All regex tables in the data are compiled up front, so a `Formatter`
/// that was built successfully never fails on a data pattern.
#[derive(Debug)]
pub struct Formatter {
    data: AddressData,
    renderer: Renderer,
    replace: HashMap<String, SubstitutionTable>,
    postformat: HashMap<String, SubstitutionTable>,
    abbreviations: HashMap<String, SubstitutionTable>,
}

impl Formatter {
    pub fn new(data: AddressData) -> Result<Self, FormatError> {
        let mut replace = HashMap::new();
        let mut postformat = HashMap::new();
        for (code, template) in data.templates.iter() {
            if !template.replace.is_empty() {
                let table =
                    SubstitutionTable::for_fields(&format!("{code}.replace"), &template.replace)?;
                replace.insert(code.to_string(), table);
            }
            if !template.postformat_replace.is_empty() {
                let table = SubstitutionTable::for_text(
                    &format!("{code}.postformat_replace"),
                    &template.postformat_replace,
                )?;
                postformat.insert(code.to_string(), table);
            }
        }

        let mut abbreviations = HashMap::new();
        for (lang, rules) in &data.abbreviations {
            let table =
                SubstitutionTable::for_abbreviations(&format!("abbreviations.{lang}"), rules)?;
            abbreviations.insert(lang.clone(), table);
        }

        Ok(Self {
            data,
            renderer: Renderer::new().with_escape(escape_none),
            replace,
            postformat,
            abbreviations,
        })
    }

    /// A formatter over the bundled data.
    pub fn embedded() -> Result<Self, FormatError> {
        Self::new(AddressData::embedded()?.clone())
    }

    /// Replace the compiled-template cache.
    pub fn with_cache(mut self, cache: Arc<dyn TemplateCache>) -> Self {
        self.renderer = self.renderer.with_cache(cache);
        self
    }

    pub fn data(&self) -> &AddressData {
        &self.data
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Format `fields` according to `options`.
    pub fn format(
        &self,
        fields: &AddressFields,
        options: &FormatOptions,
    ) -> Result<Formatted, FormatError> {
        let normalized = self.normalize(fields, options);
        let text = self.render(&normalized)?;
        Ok(match options.output {
            OutputKind::String => Formatted::Text(text),
            OutputKind::Array => Formatted::Lines(lines(&text)),
        })
    }

    /// Run every normalization step without rendering.
    pub fn normalize(&self, input: &AddressFields, options: &FormatOptions) -> Normalized {
        let mut fields = normalize::normalize_keys(input.clone(), &self.data.components);
        if let Some(code) = &options.country_code {
            fields.insert("country_code".to_string(), code.clone());
        }

        let redirected_from = normalize::resolve_country(
            &mut fields,
            &self.data.templates,
            options.fallback_country_code.as_deref(),
        );
        let country_code = normalize::present(&fields, "country_code").map(str::to_string);
        if options.append_country {
            normalize::append_country(&mut fields, &self.data);
        }
        normalize::resolve_aliases(&mut fields, &self.data.components);

        let template_key =
            select::entry_key(&self.data.templates, country_code.as_deref()).to_string();
        debug!(country = ?country_code, template = %template_key, "selected template");

        normalize::swap_numeric_country(&mut fields);
        for key in redirected_from.iter().chain([&template_key]) {
            if let Some(table) = self.replace.get(key) {
                table.apply_fields(&mut fields);
            }
        }
        normalize::derive_subdivision_codes(&mut fields, &self.data);
        normalize::collect_attention(&mut fields, &self.data.components);
        if options.cleanup_postcode {
            normalize::clean_postcode(&mut fields);
        }
        if options.abbreviate {
            if let Some(code) = &country_code {
                for lang in self.data.languages(code) {
                    if let Some(table) = self.abbreviations.get(lang) {
                        table.apply_fields(&mut fields);
                    }
                }
            }
        }
        normalize::strip_urls(&mut fields);

        Normalized {
            fields,
            country_code,
            template_key,
            redirected_from,
        }
    }

    /// Render normalized fields to text with a trailing newline.
    pub fn render(&self, normalized: &Normalized) -> Result<String, FormatError> {
        let fields = &normalized.fields;
        let kind = select::body_kind(fields);
        let body = select::body(
            self.data.templates.get(&normalized.template_key),
            self.data.templates.default_template(),
            kind,
        );

        let mut text = match body {
            Some(body) => {
                let mut view: IndexMap<String, Value> = fields
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value.as_str())))
                    .collect();
                view.insert(FIRST_KEY.to_string(), first_value());
                let rendered = self.renderer.render(body, Value::Map(view))?;
                cleanup(&rendered)
            }
            None => {
                warn!(template = %normalized.template_key, ?kind, "no template body");
                String::new()
            }
        };

        if let Some(table) = self.postformat.get(&normalized.template_key) {
            text = cleanup(&table.apply(None, &text));
        }

        if text.trim().is_empty() {
            let joined = fields
                .values()
                .filter(|value| !value.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            text = cleanup(&joined);
        }

        text.push('\n');
        Ok(text)
    }

    /// Compile every template body in the data set.
    ///
    /// Returns one issue per body that fails to compile; an empty list means
    /// the whole set is usable.
    pub fn validate_templates(&self) -> Vec<TemplateIssue> {
        let mut issues = Vec::new();
        for (code, template) in self.data.templates.iter() {
            let bodies = [
                (TemplateBody::Address, &template.address_template),
                (TemplateBody::Fallback, &template.fallback_template),
            ];
            for (body, source) in bodies {
                let Some(source) = source else {
                    continue;
                };
                if let Err(error) = self.renderer.compile(source) {
                    issues.push(TemplateIssue {
                        country: code.to_string(),
                        body,
                        error,
                    });
                }
            }
        }
        if self.data.templates.default_template().is_none() {
            warn!("no default template entry");
        }
        issues
    }
}

#[cfg(test)]
mod tests;
