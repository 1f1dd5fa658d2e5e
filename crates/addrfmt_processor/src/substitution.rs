/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Compiled regex substitution tables.
//!
//! Country `replace` rules, `postformat_replace` rules and abbreviation
//! rules all compile into a [`SubstitutionTable`]: an ordered list of
//! `(scope, pattern, replacement)` entries. Each entry replaces the first
//! match of its pattern; a scoped entry only touches the field it names.

use addrfmt_core::{AbbreviationRule, Substitution};
use regex::Regex;

use crate::{AddressFields, FormatError};

#[derive(Debug, Clone)]
struct SubstitutionRule {
    scope: Option<String>,
    regex: Regex,
    replacement: String,
}

#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    rules: Vec<SubstitutionRule>,
}

impl SubstitutionTable {
    /// Compile field rules, honouring `field=pattern` scopes.
    pub fn for_fields(table: &str, rules: &[Substitution]) -> Result<Self, FormatError> {
        rules
            .iter()
            .map(|rule| {
                let (scope, pattern) = rule.scoped();
                compile_rule(table, scope, pattern, &rule.replacement)
            })
            .collect::<Result<_, _>>()
            .map(|rules| Self { rules })
    }

    /// Compile rules applied to whole rendered text.
    pub fn for_text(table: &str, rules: &[Substitution]) -> Result<Self, FormatError> {
        rules
            .iter()
            .map(|rule| compile_rule(table, None, &rule.pattern, &rule.replacement))
            .collect::<Result<_, _>>()
            .map(|rules| Self { rules })
    }

    /// Compile whole-word abbreviations, each scoped to its component.
    pub fn for_abbreviations(table: &str, rules: &[AbbreviationRule]) -> Result<Self, FormatError> {
        let mut compiled = Vec::new();
        for rule in rules {
            for replacement in &rule.replacements {
                let pattern = format!(r"\b{}\b", regex::escape(&replacement.src));
                compiled.push(compile_rule(
                    table,
                    Some(rule.component.as_str()),
                    &pattern,
                    &replacement.dest.replace('$', "$$"),
                )?);
            }
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule that applies to `field` over `text`, in order.
    ///
    /// With `field` set to `None` only unscoped rules run.
    pub fn apply(&self, field: Option<&str>, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            if rule.scope.is_some() && rule.scope.as_deref() != field {
                continue;
            }
            out = rule.regex.replace(&out, rule.replacement.as_str()).into_owned();
        }
        out
    }

    /// Apply the table to every field value.
    pub fn apply_fields(&self, fields: &mut AddressFields) {
        if self.rules.is_empty() {
            return;
        }
        for (key, value) in fields.iter_mut() {
            *value = self.apply(Some(key.as_str()), value);
        }
    }
}

fn compile_rule(
    table: &str,
    scope: Option<&str>,
    pattern: &str,
    replacement: &str,
) -> Result<SubstitutionRule, FormatError> {
    let regex = Regex::new(pattern).map_err(|e| FormatError::Pattern {
        table: table.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(SubstitutionRule {
        scope: scope.map(str::to_string),
        regex,
        replacement: replacement.to_string(),
    })
}
