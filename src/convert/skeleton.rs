// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

use crate::error::ConvertError;
use crate::glyphs::SubstitutionTable;

/// Replacement template for one dictionary word.
///
/// Holds one glyph per character of the word, each taken from the table.
/// A glyph may be empty (`q`), in which case that position emits nothing
/// but the remaining positions stay aligned with the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSkeleton<'a> {
    word: &'a str,
    glyphs: Vec<&'a str>,
}

impl<'a> WordSkeleton<'a> {
    /// Every character of `word` must have a table entry.
    pub fn build(word: &'a str, table: &'a SubstitutionTable) -> Result<Self, ConvertError> {
        if word.is_empty() {
            return Err(ConvertError::EmptyWord);
        }

        let glyphs = word
            .chars()
            .map(|ch| {
                table
                    .lookup(ch)
                    .ok_or_else(|| ConvertError::UnsupportedCharacter {
                        word: word.to_string(),
                        character: ch,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { word, glyphs })
    }

    pub fn word(&self) -> &'a str {
        self.word
    }

    pub fn glyphs(&self) -> &[&'a str] {
        &self.glyphs
    }

    /// The skeleton as a single string (lowercase variant).
    pub fn replacement_word(&self) -> String {
        self.glyphs.concat()
    }

    /// Render the replacement for one matched occurrence.  Each position
    /// uses the plain glyph when the matched character equals the word's
    /// character there, and the upper-cased glyph otherwise.
    ///
    /// `found` must be exactly as long as the word in characters; literal
    /// case-insensitive matches always are.
    pub fn render(&self, found: &str) -> String {
        debug_assert_eq!(
            found.chars().count(),
            self.glyphs.len(),
            "match {found:?} is not aligned with {:?}",
            self.word
        );

        let mut out = String::with_capacity(found.len() * 2 + 4);
        for ((found_ch, word_ch), glyph) in found.chars().zip(self.word.chars()).zip(&self.glyphs) {
            if found_ch == word_ch {
                out.push_str(glyph);
            } else {
                out.extend(glyph.chars().flat_map(char::to_uppercase));
            }
        }
        out
    }
}
