/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Forward-only string cursor used by the compiler.

use regex::Regex;

/// A cursor over template source text.
///
/// Positions are byte offsets into the source.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns true once the whole source has been consumed.
    pub fn eos(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Match `re` at the cursor.
    ///
    /// Returns the matched text and advances past it, or returns `""` and
    /// stays put when the pattern does not match exactly here.
    pub fn scan(&mut self, re: &Regex) -> &'a str {
        let rest = self.rest();
        match re.find(rest) {
            Some(m) if m.start() == 0 => {
                self.pos += m.end();
                &rest[..m.end()]
            }
            _ => "",
        }
    }

    /// Consume everything up to the next match of `re`.
    ///
    /// Without a match the rest of the source is consumed.
    pub fn scan_until(&mut self, re: &Regex) -> &'a str {
        let rest = self.rest();
        let end = re.find(rest).map_or(rest.len(), |m| m.start());
        self.pos += end;
        &rest[..end]
    }
}
