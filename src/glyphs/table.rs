// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Lookalike glyphs for the characters a dictionary word may start with.
//! The built-in table is initialised once and never mutated; custom tables
//! can be assembled for embedding the engine with a different glyph set.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Built-in mapping.  Escapes are used because most glyphs are visually
/// indistinguishable from their source letter.  `q` maps to nothing.
const BUILTIN_GLYPHS: [(char, &str); 37] = [
    ('a', "\u{0430}"),
    ('b', "\u{1E05}"),
    ('c', "\u{0441}"),
    ('d', "\u{1E0D}"),
    ('e', "\u{1E1B}"),
    ('f', "\u{1E1F}"),
    ('g', "\u{0123}"),
    ('h', "\u{0125}"),
    ('i', "\u{0456}"),
    ('j', "\u{0458}"),
    ('k', "\u{043A}"),
    ('l', "\u{013A}"),
    ('m', "\u{043C}"),
    ('n', "\u{0144}"),
    ('o', "\u{00F3}"),
    ('p', "\u{1E57}"),
    ('q', ""),
    ('r', "\u{1E59}"),
    ('s', "\u{0455}"),
    ('t', "\u{01AD}"),
    ('u', "\u{1E77}"),
    ('v', "\u{1E7F}"),
    ('w', "\u{1E89}"),
    ('x', "\u{1E8B}"),
    ('y', "\u{1E8F}"),
    ('z', "\u{01B6}"),
    ('0', "\u{FF10}"),
    ('1', "\u{FF11}"),
    ('2', "\u{FF12}"),
    ('3', "\u{FF13}"),
    ('4', "\u{FF14}"),
    ('5', "\u{FF15}"),
    ('6', "\u{FF16}"),
    ('7', "\u{FF17}"),
    ('8', "\u{FF18}"),
    ('9', "\u{FF19}"),
    ('-', "\u{1D360}"),
];

static BUILTIN: Lazy<SubstitutionTable> =
    Lazy::new(|| SubstitutionTable::from_pairs(BUILTIN_GLYPHS));

/// Single-character to lookalike-string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    glyphs: BTreeMap<char, String>,
}

impl SubstitutionTable {
    /// The process-wide table covering `a`-`z`, `0`-`9` and `-`.
    pub fn builtin() -> &'static SubstitutionTable {
        &BUILTIN
    }

    /// Build a table from `(source, glyph)` pairs.  Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            glyphs: pairs
                .into_iter()
                .map(|(source, glyph)| (source, glyph.into()))
                .collect(),
        }
    }

    /// Glyph for `source`, or `None` when the character is outside the table.
    /// Callers turn `None` into `ConvertError::UnsupportedCharacter`.
    pub fn lookup(&self, source: char) -> Option<&str> {
        self.glyphs.get(&source).map(String::as_str)
    }

    pub fn contains(&self, source: char) -> bool {
        self.glyphs.contains_key(&source)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Entries ordered by source character.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.glyphs.iter().map(|(source, glyph)| (*source, glyph.as_str()))
    }
}
