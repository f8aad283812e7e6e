// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while converting text against a dictionary.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported character {character:?} at the start of dictionary word {word:?}")]
    UnsupportedCharacter { word: String, character: char },

    #[error("dictionary contains an empty word")]
    EmptyWord,

    #[error("replacement for {word:?} keeps matching itself ({iterations} substitutions)")]
    NonTerminatingSubstitution { word: String, iterations: usize },

    #[error("failed to build matcher for {word:?}: {source}")]
    Pattern {
        word: String,
        #[source]
        source: regex::Error,
    },
}

/// Failures raised while loading a dictionary file from disk.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON dictionary {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot derive a dictionary name from {}", path.display())]
    Unnamed { path: PathBuf },
}
