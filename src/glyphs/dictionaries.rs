// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

const INDEX: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/dictionaries/index.txt"
));
const CRYPTO: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/dictionaries/crypto.txt"
));
const GAMING: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/dictionaries/gaming.txt"
));
const FINANCE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/dictionaries/finance.txt"
));
const BRANDS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/dictionaries/brands.txt"
));

/// Packaging order of the embedded dictionaries, one name per line.
pub fn embedded_index() -> &'static str {
    INDEX
}

pub fn embedded_word_list(name: &str) -> Option<&'static str> {
    match name {
        "crypto" => Some(CRYPTO),
        "gaming" => Some(GAMING),
        "finance" => Some(FINANCE),
        "brands" => Some(BRANDS),
        _ => None,
    }
}
