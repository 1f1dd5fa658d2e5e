/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Cleanup of rendered address text.
//!
//! An ordered list of regex rewrites tidies stray separators and blank
//! lines left by empty fields. After every rewrite, repeated lines and
//! repeated `, ` segments within a line are collapsed to their first
//! occurrence. The pass repeats until the text stops changing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

const MAX_PASSES: usize = 16;

/// Chunks equal to this (ignoring case) are never deduplicated.
const DEDUPE_EXEMPT: &str = "new york";

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"[},\s]+$", ""),
        (r"^[,\s]+", ""),
        (r"^- ", ""),
        (r",\s*,", ", "),
        (r"[ \t]+,[ \t]+", ", "),
        (r"[ \t][ \t]+", " "),
        (r"[ \t]\n", "\n"),
        (r"\n,", "\n"),
        (r",,+", ","),
        (r",\n", "\n"),
        (r"\n[ \t]+", "\n"),
        (r"\n\n+", "\n"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Clean `text` until it reaches a fixed point.
pub fn cleanup(text: &str) -> String {
    let mut current = clean_once(text);
    for pass in 1..MAX_PASSES {
        let next = clean_once(&current);
        if next == current {
            trace!(passes = pass, "cleanup settled");
            break;
        }
        current = next;
    }
    current
}

fn clean_once(text: &str) -> String {
    let mut text = text.to_string();
    for (regex, replacement) in RULES.iter() {
        text = regex.replace_all(&text, *replacement).into_owned();
        text = dedupe(text.split('\n'), "\n", |line| {
            dedupe(line.split(", "), ", ", str::to_string)
        });
    }
    text.trim().to_string()
}

fn dedupe<'a>(
    chunks: impl Iterator<Item = &'a str>,
    glue: &str,
    modify: impl Fn(&str) -> String,
) -> String {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for chunk in chunks {
        let chunk = chunk.trim();
        if chunk.to_lowercase() == DEDUPE_EXEMPT {
            seen.insert(chunk);
            kept.push(chunk.to_string());
            continue;
        }
        if seen.insert(chunk) {
            kept.push(modify(chunk));
        }
    }
    kept.join(glue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_and_separators() {
        let raw = "\n\n10 Main St\nSpringfield,  12345\nUS\n";
        assert_eq!(cleanup(raw), "10 Main St\nSpringfield, 12345\nUS");
    }

    #[test]
    fn test_dangling_commas() {
        assert_eq!(cleanup(", Calle Mayor,\n28013 Madrid\n"), "Calle Mayor\n28013 Madrid");
        assert_eq!(cleanup("a ,, b"), "a, b");
        assert_eq!(cleanup("\n, Norway"), "Norway");
        assert_eq!(cleanup("- SP\n01310-100"), "SP\n01310-100");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(cleanup("Berlin\nBerlin\nGermany"), "Berlin\nGermany");
        assert_eq!(cleanup("Monaco, Monaco\nMonaco"), "Monaco");
        assert_eq!(cleanup("Bern\n3011 Bern"), "Bern\n3011 Bern");
    }

    #[test]
    fn test_new_york_is_never_deduplicated() {
        assert_eq!(
            cleanup("New York\nNew York\nUnited States of America"),
            "New York\nNew York\nUnited States of America"
        );
        assert_eq!(cleanup("new york, New York"), "new york, New York");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "\n\n 10 Main St ,\n\n\nSpringfield ,  12345,,\n, US }\n",
            "- a\n- a\nb , , c\n\t\nd",
            "x, y, x\n y, x\nNew York\nnew york",
            "",
        ];
        for sample in samples {
            let once = cleanup(sample);
            assert_eq!(cleanup(&once), once, "not idempotent for {sample:?}");
        }
    }
}
