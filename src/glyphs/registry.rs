// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Named word lists.  The built-in registry is populated from the lists
//! compiled into the binary; callers may clone it and register extra lists
//! loaded from disk.

use crate::error::DictionaryError;
use crate::glyphs::dictionaries;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

static BUILTIN: Lazy<DictionaryRegistry> = Lazy::new(DictionaryRegistry::embedded);

/// Ordered mapping from dictionary name to its words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryRegistry {
    entries: Vec<(String, Vec<String>)>,
}

/// On-disk JSON shapes accepted by `read_dictionary_file`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDictionary {
    Words(Vec<String>),
    Named {
        name: Option<String>,
        words: Vec<String>,
    },
}

impl DictionaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry of the embedded dictionaries.
    pub fn builtin() -> &'static DictionaryRegistry {
        &BUILTIN
    }

    /// Build a fresh registry from the embedded word lists, following the
    /// packaged index order.
    pub fn embedded() -> Self {
        let mut registry = Self::new();
        for name in parse_word_list(dictionaries::embedded_index()) {
            match dictionaries::embedded_word_list(&name) {
                Some(text) => {
                    registry.register(name, parse_word_list(text));
                }
                None => warn!(dictionary = %name, "index names a dictionary that is not embedded"),
            }
        }
        registry
    }

    /// Words registered under `name`.  Unknown names yield an empty slice.
    pub fn get_dictionary(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Registered names in registration order.
    pub fn list_dictionary_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    /// Insert or replace a dictionary.  A replaced entry keeps its position
    /// and its previous words are returned.
    pub fn register(&mut self, name: impl Into<String>, words: Vec<String>) -> Option<Vec<String>> {
        let name = name.into();
        debug!(dictionary = %name, words = words.len(), "registering dictionary");
        if let Some((_, existing)) = self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            return Some(std::mem::replace(existing, words));
        }
        self.entries.push((name, words));
        None
    }

    /// Read a dictionary file and register it, returning the name it was
    /// stored under and the words it replaced, if any.
    pub fn load_file(
        &mut self,
        path: &Path,
    ) -> Result<(String, Option<Vec<String>>), DictionaryError> {
        let (name, words) = read_dictionary_file(path)?;
        let previous = self.register(name.clone(), words);
        Ok((name, previous))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a plain word list: one word per line, surrounding whitespace
/// trimmed, blank lines and `#` comments skipped.  Order and duplicates are
/// preserved.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load a dictionary from disk.  `.json` files hold either an array of words
/// or `{"name": ..., "words": [...]}`; anything else is a plain word list.
/// The file stem names the dictionary unless the JSON supplies a name.
pub fn read_dictionary_file(path: &Path) -> Result<(String, Vec<String>), DictionaryError> {
    let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let (explicit_name, words) = if is_json {
        let parsed: JsonDictionary =
            serde_json::from_str(&text).map_err(|source| DictionaryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        match parsed {
            JsonDictionary::Words(words) => (None, words),
            JsonDictionary::Named { name, words } => (name, words),
        }
    } else {
        (None, parse_word_list(&text))
    };

    let name = dictionary_name(explicit_name, path)?;
    Ok((name, words))
}

/// A non-blank explicit name wins; otherwise the file stem, which must be
/// valid UTF-8.
fn dictionary_name(explicit: Option<String>, path: &Path) -> Result<String, DictionaryError> {
    explicit
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        })
        .ok_or_else(|| DictionaryError::Unnamed {
            path: path.to_path_buf(),
        })
}
