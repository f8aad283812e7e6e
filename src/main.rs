// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

//! lookalike command-line entry point and CLI orchestration.
//!
//! The binary gathers dictionary words from the embedded lists, any custom
//! list files and ad-hoc `--word` values, then streams the inputs through
//! the converter.  Matching and substitution live in the library; this file
//! only wires user intent into it.

use anyhow::{Context, Result, anyhow};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use lookalike::glyphs::read_dictionary_file;
use lookalike::{ConvertContext, ConvertOptions, Converter, DictionaryRegistry, ScanPolicy};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build-time version information.  CI can bake in a release tag via
/// `LOOKALIKE_VERSION`; otherwise Cargo's package version is used.
const VERSION: &str = match option_env!("LOOKALIKE_VERSION") {
    Some(tag) => tag,
    None => env!("CARGO_PKG_VERSION"),
};

const DEFAULT_LOG_FILTER: &str = "lookalike=warn";

/// Short Git commit that went into the binary, or a placeholder.
fn sha() -> &'static str {
    option_env!("LOOKALIKE_COMMIT").unwrap_or("0000000")
}

/// rustc version baked in at build time.
fn rust_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

fn version_string() -> String {
    format!(
        "lookalike {VERSION} (commit:{}) [rust:{}]",
        sha(),
        rust_version()
    )
}

/// Cached version string with a 'static lifetime for clap metadata.
fn version_str() -> &'static str {
    static VERSION_STR: OnceLock<String> = OnceLock::new();
    VERSION_STR.get_or_init(version_string).as_str()
}

fn main() {
    std::process::exit(match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    });
}

/// Parse arguments, assemble the dictionary, answer informational flags and
/// finally convert the inputs.
fn run() -> Result<i32> {
    let cmd = build_cli();
    let matches = match cmd.try_get_matches() {
        Ok(m) => m,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                if err.kind() == ErrorKind::DisplayHelp {
                    print_usage();
                }
                return Ok(0);
            }
            _ => err.exit(),
        },
    };

    let opts = CliOptions::from_matches(&matches)?;
    init_logging(opts.log_level.as_deref())?;

    if opts.show_version {
        println!("{}", version_string());
        return Ok(0);
    }

    let mut sources = HashMap::new();
    let registry = load_registry(&opts.dict_files, &mut sources)?;

    if run_handlers(&opts, &registry, &sources) {
        return Ok(0);
    }

    let words = collect_words(&opts, &registry);
    if words.is_empty() {
        warn!("no dictionary words selected; input passes through unchanged");
    }

    let converter = Converter::default();
    let prepared = converter
        .prepare(&words)
        .context("dictionary cannot be used for conversion")?;

    let options = ConvertOptions {
        bold_censor: !opts.no_bold,
        policy: if opts.rescan {
            ScanPolicy::Rescan
        } else {
            ScanPolicy::Forward
        },
    };

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let mut ctx = ConvertContext {
        out: &mut stdout,
        err_out: &mut stderr,
        dictionary: &prepared,
        options,
        stats: opts.stats,
    };
    let code = lookalike::convert_files(&opts.files, &mut ctx).context("conversion aborted")?;
    Ok(code)
}

/// Construct the `clap` command with all supported arguments.
fn build_cli() -> Command {
    let cmd = Command::new("lookalike")
        .about("Disguise dictionary words with lookalike glyphs while keeping their case")
        .disable_version_flag(true)
        .version(version_str())
        .arg(
            Arg::new("dict")
                .long("dict")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Dictionary to apply (repeatable)"),
        )
        .arg(
            Arg::new("dict-file")
                .long("dict-file")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Register a word list (.txt) or JSON dictionary (repeatable)"),
        )
        .arg(
            Arg::new("word")
                .long("word")
                .value_name("WORD")
                .action(ArgAction::Append)
                .help("Extra word to disguise (repeatable)"),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .value_name("NAME")
                .help("Print the words of a dictionary and exit"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Diagnostics on stderr: error, warn, info, debug, trace or off"),
        );

    add_flag_args(
        cmd,
        &[
            ("list", "List available dictionaries and exit"),
            ("no-bold", "Do not wrap replacements in ** markers"),
            (
                "rescan",
                "Re-search from the start after every replacement (historical behaviour)",
            ),
            ("stats", "Report replacement counts on stderr"),
            ("version", "Print version information and exit"),
        ],
    )
    .arg(
        Arg::new("files")
            .value_name("FILE")
            .num_args(0..)
            .action(ArgAction::Append)
            .trailing_var_arg(true),
    )
}

/// Add a set of boolean flag arguments that simply flip a boolean when present.
fn add_flag_args(cmd: Command, flags: &[(&'static str, &'static str)]) -> Command {
    let mut out = cmd;
    for (name, help) in flags {
        out = out.arg(
            Arg::new(*name)
                .long(*name)
                .action(ArgAction::SetTrue)
                .help(*help),
        );
    }
    out
}

/// Structured view of the CLI flags.
#[derive(Default)]
struct CliOptions {
    dicts: Vec<String>,
    dict_files: Vec<String>,
    words: Vec<String>,
    list: bool,
    show: Option<String>,
    no_bold: bool,
    rescan: bool,
    stats: bool,
    log_level: Option<String>,
    show_version: bool,
    files: Vec<String>,
}

impl CliOptions {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            dicts: many(matches, "dict"),
            dict_files: many(matches, "dict-file"),
            words: many(matches, "word"),
            list: matches.get_flag("list"),
            show: matches.get_one::<String>("show").cloned(),
            no_bold: matches.get_flag("no-bold"),
            rescan: matches.get_flag("rescan"),
            stats: matches.get_flag("stats"),
            log_level: parse_log_level(matches.get_one::<String>("log-level"))?,
            show_version: matches.get_flag("version"),
            files: many(matches, "files"),
        })
    }
}

fn many(matches: &ArgMatches, name: &str) -> Vec<String> {
    matches
        .get_many::<String>(name)
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}

/// Accept the usual tracing level names, case-insensitively.
fn parse_log_level(value: Option<&String>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            level @ ("error" | "warn" | "info" | "debug" | "trace" | "off") => {
                Ok(Some(level.to_string()))
            }
            other => {
                print_usage();
                Err(anyhow!("invalid value for --log-level: {other}"))
            }
        },
    }
}

/// Install the stderr subscriber.  `--log-level` wins over `RUST_LOG`.
fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("lookalike={level}")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to initialise logging: {err}"))
}

/// Clone the embedded registry and register every `--dict-file`, recording
/// where each custom dictionary came from.  Warns on overrides.
fn load_registry(
    paths: &[String],
    sources: &mut HashMap<String, String>,
) -> Result<DictionaryRegistry> {
    let mut registry = DictionaryRegistry::builtin().clone();
    for path in paths {
        let (name, words) = read_dictionary_file(Path::new(path))
            .with_context(|| format!("failed to load dictionary from {path}"))?;
        let count = words.len();
        if registry.register(name.clone(), words).is_some() {
            match sources.get(&name) {
                Some(previous) => warn!(
                    dictionary = %name,
                    previous = %previous,
                    path = %path,
                    "custom dictionary replaced"
                ),
                None => warn!(
                    dictionary = %name,
                    path = %path,
                    "custom dictionary overrides embedded dictionary"
                ),
            }
        }
        info!(dictionary = %name, words = count, path = %path, "loaded dictionary");
        sources.insert(name, path.clone());
    }
    Ok(registry)
}

/// Handle `--list` and `--show`.  Returns `true` when something was printed
/// so the caller can skip conversion.
fn run_handlers(
    opts: &CliOptions,
    registry: &DictionaryRegistry,
    sources: &HashMap<String, String>,
) -> bool {
    let mut handled = false;

    if opts.list {
        print_dictionary_header();
        for name in registry.list_dictionary_names() {
            print_dictionary_row(name, registry, sources);
        }
        handled = true;
    }

    if let Some(name) = &opts.show {
        if registry.contains(name) {
            let mut words: Vec<&String> = registry.get_dictionary(name).iter().collect();
            words.sort();
            for word in words {
                println!("{word}");
            }
        } else {
            println!("Dictionary not found: {name}");
        }
        handled = true;
    }

    handled
}

fn print_dictionary_header() {
    println!("  {:<16} {:>6} Source", "Name", "Words");
}

fn print_dictionary_row(
    name: &str,
    registry: &DictionaryRegistry,
    sources: &HashMap<String, String>,
) {
    let source = sources.get(name).map(String::as_str).unwrap_or("built-in");
    println!(
        "  {:<16} {:>6} {}",
        name,
        registry.get_dictionary(name).len(),
        source
    );
}

/// Union of the selected dictionaries in argument order, followed by the
/// ad-hoc words.  Unknown dictionary names contribute nothing.  Ad-hoc words
/// are lower-cased since dictionaries are authored in lower case.
fn collect_words(opts: &CliOptions, registry: &DictionaryRegistry) -> Vec<String> {
    let mut words = Vec::new();
    for name in &opts.dicts {
        if !registry.contains(name) {
            warn!(dictionary = %name, "unknown dictionary; treating as empty");
        }
        words.extend(registry.get_dictionary(name).iter().cloned());
    }
    words.extend(opts.words.iter().map(|word| word.trim().to_lowercase()));
    words
}

/// Print the condensed usage guide.
fn print_usage() {
    static USAGE: &str = include_str!("../resources/messages/usage_en.txt");
    println!("\n{USAGE}");
}
