// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

pub mod registry;
pub mod table;

mod dictionaries;

pub use registry::{DictionaryRegistry, parse_word_list, read_dictionary_file};
pub use table::SubstitutionTable;

/// Words of the named embedded dictionary, or an empty slice when unknown.
pub fn get_dictionary(name: &str) -> &'static [String] {
    DictionaryRegistry::builtin().get_dictionary(name)
}

/// Names of the embedded dictionaries in the order they were packaged.
pub fn list_dictionary_names() -> Vec<&'static str> {
    DictionaryRegistry::builtin().list_dictionary_names()
}
