// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Dictionary-driven lookalike substitution.
//!
//! Words are processed longest first (stable on input order for equal
//! lengths) so a longer entry is rewritten before a shorter entry it
//! contains can fire inside it.  Each word is matched as a literal,
//! case-insensitive substring, not on word boundaries.

use crate::convert::skeleton::WordSkeleton;
use crate::error::ConvertError;
use crate::glyphs::SubstitutionTable;
use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;
use tracing::debug;

const BOLD_MARKER: &str = "**";

/// Splices allowed per word under `ScanPolicy::Rescan`, per character of input.
const RESCAN_LIMIT_FACTOR: usize = 4;

/// How repeated occurrences of one word are located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Single left-to-right pass.  The cursor moves past every inserted
    /// replacement, so a replacement is never matched again by the same word.
    #[default]
    Forward,
    /// Search again from the start after every splice until nothing matches.
    /// Text produced by earlier replacements can match again.  Bounded by
    /// `RESCAN_LIMIT_FACTOR`; hitting the bound is an error.
    Rescan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Wrap every replaced occurrence in `**` markers.
    pub bold_censor: bool,
    pub policy: ScanPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            bold_censor: true,
            policy: ScanPolicy::Forward,
        }
    }
}

/// Converted text plus how many occurrences each word replaced, in the
/// order the words were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub text: String,
    pub replacements: Vec<(String, usize)>,
}

impl ConvertReport {
    pub fn total(&self) -> usize {
        self.replacements.iter().map(|(_, count)| count).sum()
    }
}

/// Applies dictionaries to text using one substitution table.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'t> {
    table: &'t SubstitutionTable,
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(SubstitutionTable::builtin())
    }
}

impl<'t> Converter<'t> {
    pub fn new(table: &'t SubstitutionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t SubstitutionTable {
        self.table
    }

    pub fn convert<S: AsRef<str>>(
        &self,
        text: &str,
        dictionary: &[S],
        options: &ConvertOptions,
    ) -> Result<String, ConvertError> {
        self.convert_with_report(text, dictionary, options)
            .map(|report| report.text)
    }

    /// Convert `text` and report per-word replacement counts.  Every word is
    /// validated before the text is touched, so an unsupported word fails
    /// the whole call.
    pub fn convert_with_report<S: AsRef<str>>(
        &self,
        text: &str,
        dictionary: &[S],
        options: &ConvertOptions,
    ) -> Result<ConvertReport, ConvertError> {
        self.prepare(dictionary)?.apply(text, options)
    }

    /// Sort the dictionary and build a skeleton and matcher for every word.
    pub fn prepare<'a, S: AsRef<str>>(
        &self,
        dictionary: &'a [S],
    ) -> Result<PreparedDictionary<'a>, ConvertError>
    where
        't: 'a,
    {
        let mut entries = Vec::with_capacity(dictionary.len());
        for word in sorted_longest_first(dictionary) {
            entries.push(PreparedWord {
                skeleton: WordSkeleton::build(word, self.table)?,
                matcher: word_matcher(word)?,
            });
        }
        Ok(PreparedDictionary { entries })
    }
}

struct PreparedWord<'a> {
    skeleton: WordSkeleton<'a>,
    matcher: Regex,
}

/// A dictionary ready to apply: longest word first, each with its
/// replacement skeleton and case-insensitive matcher.
pub struct PreparedDictionary<'a> {
    entries: Vec<PreparedWord<'a>>,
}

impl<'a> PreparedDictionary<'a> {
    /// Words in processing order.
    pub fn words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|entry| entry.skeleton.word())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(
        &self,
        text: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertReport, ConvertError> {
        debug!(
            words = self.entries.len(),
            bytes = text.len(),
            policy = ?options.policy,
            "converting text"
        );

        let mut text = text.to_string();
        let mut replacements = Vec::with_capacity(self.entries.len());
        for PreparedWord { skeleton, matcher } in &self.entries {
            let count = match options.policy {
                ScanPolicy::Forward => {
                    let (next, count) =
                        replace_forward(&text, skeleton, matcher, options.bold_censor);
                    text = next;
                    count
                }
                ScanPolicy::Rescan => {
                    replace_rescan(&mut text, skeleton, matcher, options.bold_censor)?
                }
            };
            if count > 0 {
                debug!(word = skeleton.word(), count, "replaced occurrences");
            }
            replacements.push((skeleton.word().to_string(), count));
        }

        Ok(ConvertReport { text, replacements })
    }
}

/// Convert with the built-in table and the forward scan policy.
pub fn convert<S: AsRef<str>>(
    text: &str,
    dictionary: &[S],
    bold_censor: bool,
) -> Result<String, ConvertError> {
    let options = ConvertOptions {
        bold_censor,
        ..ConvertOptions::default()
    };
    Converter::default().convert(text, dictionary, &options)
}

/// Copy of the dictionary ordered by descending length in characters.
/// `sort_by_key` is stable, so equal lengths keep their input order.
fn sorted_longest_first<S: AsRef<str>>(dictionary: &[S]) -> Vec<&str> {
    let mut words: Vec<&str> = dictionary.iter().map(AsRef::as_ref).collect();
    words.sort_by_key(|word| Reverse(word.chars().count()));
    words
}

fn word_matcher(word: &str) -> Result<Regex, ConvertError> {
    RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
        .map_err(|source| ConvertError::Pattern {
            word: word.to_string(),
            source,
        })
}

fn push_replacement(out: &mut String, skeleton: &WordSkeleton, found: &str, bold: bool) {
    if bold {
        out.push_str(BOLD_MARKER);
    }
    out.push_str(&skeleton.render(found));
    if bold {
        out.push_str(BOLD_MARKER);
    }
}

fn replace_forward(
    text: &str,
    skeleton: &WordSkeleton,
    matcher: &Regex,
    bold: bool,
) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut count = 0;
    for found in matcher.find_iter(text) {
        out.push_str(&text[cursor..found.start()]);
        push_replacement(&mut out, skeleton, found.as_str(), bold);
        cursor = found.end();
        count += 1;
    }
    out.push_str(&text[cursor..]);
    (out, count)
}

fn replace_rescan(
    text: &mut String,
    skeleton: &WordSkeleton,
    matcher: &Regex,
    bold: bool,
) -> Result<usize, ConvertError> {
    let limit = RESCAN_LIMIT_FACTOR * (text.chars().count() + 1);
    let mut count = 0;
    while let Some(found) = matcher.find(text.as_str()) {
        if count == limit {
            return Err(ConvertError::NonTerminatingSubstitution {
                word: skeleton.word().to_string(),
                iterations: count,
            });
        }
        let range = found.range();
        let mut replacement = String::new();
        push_replacement(&mut replacement, skeleton, found.as_str(), bold);
        text.replace_range(range, &replacement);
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::get_dictionary;

    const CAT: &str = "\u{0441}\u{0430}\u{01AD}";

    fn plain() -> ConvertOptions {
        ConvertOptions {
            bold_censor: false,
            ..ConvertOptions::default()
        }
    }

    fn rescan(bold_censor: bool) -> ConvertOptions {
        ConvertOptions {
            bold_censor,
            policy: ScanPolicy::Rescan,
        }
    }

    /// Swaps `a` and `b`, so a replacement can re-form the word with its
    /// neighbours.
    fn swapping_table() -> SubstitutionTable {
        SubstitutionTable::from_pairs([('a', "b"), ('b', "a")])
    }

    #[test]
    fn text_without_the_word_is_unchanged() {
        let text = "Nothing to see here.";
        assert_eq!(convert(text, &["cat"], true).unwrap(), text);
        assert_eq!(convert(text, &["cat"], false).unwrap(), text);
    }

    #[test]
    fn empty_dictionary_is_a_no_op() {
        let empty: [&str; 0] = [];
        assert_eq!(convert("Cat", &empty, true).unwrap(), "Cat");
    }

    #[test]
    fn capitalised_match_uppercases_only_that_position() {
        let table = SubstitutionTable::from_pairs([
            ('c', "\u{0441}"),
            ('a', "\u{0430}"),
            ('t', "\u{01AD}"),
        ]);
        let out = Converter::new(&table).convert("Cat", &["cat"], &plain()).unwrap();
        assert_eq!(out, "\u{0421}\u{0430}\u{01AD}");
    }

    #[test]
    fn builtin_table_rewrites_every_letter() {
        assert_eq!(convert("cat", &["cat"], true).unwrap(), format!("**{CAT}**"));
        assert_eq!(convert("Cat", &["cat"], true).unwrap(), "**\u{0421}\u{0430}\u{01AD}**");
        assert_eq!(convert("CAT", &["cat"], false).unwrap(), "\u{0421}\u{0410}\u{01AC}");
    }

    #[test]
    fn prefix_and_suffix_survive_and_length_adds_up() {
        let text = "I have a Cat at home";
        let out = convert(text, &["cat"], true).unwrap();
        assert!(out.starts_with("I have a **"));
        assert!(out.ends_with("** at home"));
        assert_eq!(
            out.chars().count(),
            text.chars().count() - 3 + CAT.chars().count() + 4
        );
    }

    #[test]
    fn longest_word_wins() {
        let out = convert("cats and cat", &["cat", "cats"], true).unwrap();
        assert_eq!(out, format!("**{CAT}\u{0455}** and **{CAT}**"));
    }

    #[test]
    fn shorter_words_do_not_fire_inside_a_longer_replacement() {
        let out = convert("cats", &["cat", "cats", "ats"], true).unwrap();
        assert_eq!(out, format!("**{CAT}\u{0455}**"));

        let out = convert("Short-Squeeze now", get_dictionary("finance"), true).unwrap();
        assert_eq!(
            out,
            "**\u{0405}\u{0125}\u{00F3}\u{1E59}\u{01AD}\u{1D360}\
             \u{0405}\u{1E77}\u{1E1B}\u{1E1B}\u{01B6}\u{1E1B}** now"
        );
        assert_eq!(out.matches("**").count(), 2);
    }

    #[test]
    fn equal_lengths_keep_input_order() {
        // Whichever of the overlapping words runs first decides the result.
        assert_eq!(
            Converter::default().convert("abc", &["bc", "ab"], &plain()).unwrap(),
            "a\u{1E05}\u{0441}"
        );
        assert_eq!(
            Converter::default().convert("abc", &["ab", "bc"], &plain()).unwrap(),
            "\u{0430}\u{1E05}c"
        );
    }

    #[test]
    fn each_occurrence_gets_its_own_markers() {
        let out = convert("cat dog CAT", &["cat"], true).unwrap();
        assert_eq!(out, format!("**{CAT}** dog **\u{0421}\u{0410}\u{01AC}**"));
    }

    #[test]
    fn disabling_bold_never_inserts_markers() {
        let out = convert("cat dog cat", &["cat", "dog"], false).unwrap();
        assert!(!out.contains("**"));
        assert_eq!(out, format!("{CAT} \u{1E0D}\u{00F3}\u{0123} {CAT}"));
    }

    #[test]
    fn matches_inside_larger_words() {
        let out = convert("Concatenate", &["cat"], true).unwrap();
        assert_eq!(out, format!("Con**{CAT}**enate"));
    }

    #[test]
    fn q_positions_vanish() {
        assert_eq!(
            convert("Quiz quiz", &["quiz"], false).unwrap(),
            "\u{1E77}\u{0456}\u{01B6} \u{1E77}\u{0456}\u{01B6}"
        );
    }

    #[test]
    fn hyphenated_and_numeric_words() {
        let out = convert("To-The-Moon with 401K", &["to-the-moon", "401k"], false).unwrap();
        assert_eq!(
            out,
            "\u{01AC}\u{00F3}\u{1D360}\u{01AC}\u{0125}\u{1E1B}\u{1D360}\
             \u{041C}\u{00F3}\u{00F3}\u{0144} with \u{FF14}\u{FF10}\u{FF11}\u{041A}"
        );
    }

    #[test]
    fn unsupported_word_fails_the_whole_conversion() {
        let err = convert("Apple and cat", &["cat", "Apple"], true).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedCharacter { character: 'A', .. }
        ));
        let err = convert("cafe", &["caf\u{00E9}"], true).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedCharacter { character: '\u{00E9}', .. }
        ));
    }

    #[test]
    fn empty_word_is_rejected() {
        assert!(matches!(
            convert("text", &["cat", ""], true),
            Err(ConvertError::EmptyWord)
        ));
    }

    #[test]
    fn forward_scan_skips_text_it_just_inserted() {
        let table = swapping_table();
        let converter = Converter::new(&table);
        assert_eq!(converter.convert("aab", &["ab"], &plain()).unwrap(), "aba");
        assert_eq!(
            converter.convert("aab", &["ab"], &rescan(false)).unwrap(),
            "baa"
        );
    }

    #[test]
    fn builtin_output_is_stable_when_converted_again() {
        let once = convert("Cats and dogs", &["cat", "dog"], true).unwrap();
        assert_eq!(convert(&once, &["cat", "dog"], true).unwrap(), once);
    }

    #[test]
    fn converting_twice_can_match_again() {
        let table = swapping_table();
        let converter = Converter::new(&table);
        let once = converter.convert("aab", &["ab"], &plain()).unwrap();
        let twice = converter.convert(&once, &["ab"], &plain()).unwrap();
        assert_eq!(once, "aba");
        assert_eq!(twice, "baa");
    }

    #[test]
    fn identity_table_terminates_under_forward_scan() {
        let table = SubstitutionTable::from_pairs([('a', "a"), ('b', "b")]);
        let converter = Converter::new(&table);
        let out = converter
            .convert("ab ab", &["ab"], &ConvertOptions::default())
            .unwrap();
        assert_eq!(out, "**ab** **ab**");
    }

    #[test]
    fn identity_table_is_fatal_under_rescan() {
        let table = SubstitutionTable::from_pairs([('a', "a"), ('b', "b")]);
        let converter = Converter::new(&table);
        let err = converter.convert("ab", &["ab"], &rescan(true)).unwrap_err();
        match err {
            ConvertError::NonTerminatingSubstitution { word, iterations } => {
                assert_eq!(word, "ab");
                assert_eq!(iterations, RESCAN_LIMIT_FACTOR * 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn report_counts_each_word() {
        let report = Converter::default()
            .convert_with_report("cats, cat, dog", &["dog", "cat", "cats", "owl"], &plain())
            .unwrap();
        assert_eq!(
            report.replacements,
            vec![
                ("cats".to_string(), 1),
                ("dog".to_string(), 1),
                ("cat".to_string(), 1),
                ("owl".to_string(), 0),
            ]
        );
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn prepare_orders_words_longest_first() {
        let dictionary = ["dog", "cats", "ox", "cat"];
        let prepared = Converter::default().prepare(&dictionary).unwrap();
        assert_eq!(prepared.words().collect::<Vec<_>>(), vec!["cats", "dog", "cat", "ox"]);
        assert_eq!(prepared.len(), 4);
    }

    #[test]
    fn duplicate_words_are_processed_twice_harmlessly() {
        let report = Converter::default()
            .convert_with_report("cat", &["cat", "cat"], &plain())
            .unwrap();
        assert_eq!(report.text, CAT);
        assert_eq!(report.total(), 1);
    }
}
