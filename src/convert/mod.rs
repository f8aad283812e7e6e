// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

pub mod converter;
pub mod skeleton;
pub mod stream;

pub use converter::{
    ConvertOptions, ConvertReport, Converter, PreparedDictionary, ScanPolicy, convert,
};
pub use skeleton::WordSkeleton;
pub use stream::{ConvertContext, convert_files};
