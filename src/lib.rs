// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Lookalike-glyph text censor.
//!
//! Words from a dictionary are found case-insensitively in the input and
//! rewritten with a visually similar leading glyph, keeping the original
//! capitalisation position by position.  The `glyphs` module owns the static
//! data (substitution table and embedded word lists); `convert` owns the
//! matching and splicing.

pub mod convert;
pub mod error;
pub mod glyphs;

pub use convert::{
    ConvertContext, ConvertOptions, ConvertReport, Converter, PreparedDictionary, ScanPolicy,
    WordSkeleton, convert, convert_files,
};
pub use error::{ConvertError, DictionaryError};
pub use glyphs::{DictionaryRegistry, SubstitutionTable, get_dictionary, list_dictionary_names};
