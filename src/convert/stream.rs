// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! Apply a prepared dictionary to files or stdin.
//!
//! Each input is read whole and converted in one call, so output matches
//! `PreparedDictionary::apply` on the full text and the rescan bound is
//! per input.

use crate::convert::converter::{ConvertOptions, PreparedDictionary};
use crate::error::ConvertError;
use std::fs::File;
use std::io::{self, Read, Write};
use tracing::debug;

/// Where converted text and diagnostics go, and what to apply to each input.
pub struct ConvertContext<'a> {
    pub out: &'a mut dyn Write,
    pub err_out: &'a mut dyn Write,
    pub dictionary: &'a PreparedDictionary<'a>,
    pub options: ConvertOptions,
    /// Print per-input replacement counts to `err_out`.
    pub stats: bool,
}

/// Why a single input could not be converted.
#[derive(Debug)]
enum InputError {
    Io(io::Error),
    Convert(ConvertError),
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        InputError::Io(err)
    }
}

impl From<ConvertError> for InputError {
    fn from(err: ConvertError) -> Self {
        InputError::Convert(err)
    }
}

/// Convert every path in turn (`-` means stdin, as does an empty list).
/// I/O failures are reported and skipped; the return value is the process
/// exit code.  A conversion error aborts the run since it would repeat for
/// every remaining input.
pub fn convert_files(paths: &[String], ctx: &mut ConvertContext) -> Result<i32, ConvertError> {
    if paths.is_empty() {
        return convert_input("-", ctx);
    }

    let mut had_error = false;
    for path in paths {
        if convert_input(path, ctx)? != 0 {
            had_error = true;
        }
    }

    Ok(if had_error { 1 } else { 0 })
}

fn convert_input(path: &str, ctx: &mut ConvertContext) -> Result<i32, ConvertError> {
    let result = if path == "-" {
        convert_reader(io::stdin().lock(), "(stdin)", ctx)
    } else {
        match File::open(path) {
            Ok(file) => convert_reader(file, path, ctx),
            Err(err) => {
                let _ = writeln!(ctx.err_out, "Cannot open file {path}: {err}");
                return Ok(1);
            }
        }
    };

    match result {
        Ok(()) => Ok(0),
        Err(InputError::Convert(err)) => Err(err),
        Err(InputError::Io(err)) => {
            let _ = writeln!(ctx.err_out, "Error reading {path}: {err}");
            Ok(1)
        }
    }
}

/// Read an input to the end, convert it and write the result.
fn convert_reader<R: Read>(
    mut reader: R,
    label: &str,
    ctx: &mut ConvertContext,
) -> Result<(), InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let report = ctx.dictionary.apply(&text, &ctx.options)?;
    ctx.out.write_all(report.text.as_bytes())?;
    ctx.out.flush()?;

    debug!(input = label, bytes = text.len(), replacements = report.total(), "finished input");
    if ctx.stats {
        write_stats(ctx.err_out, label, &report.replacements)?;
    }
    Ok(())
}

fn write_stats(
    out: &mut dyn Write,
    label: &str,
    replacements: &[(String, usize)],
) -> io::Result<()> {
    let total: usize = replacements.iter().map(|(_, count)| count).sum();
    writeln!(out, "{label}: {total} replacement(s)")?;
    for (word, count) in replacements {
        if *count > 0 {
            writeln!(out, "  {word:<24} {count:>6}")?;
        }
    }
    Ok(())
}
