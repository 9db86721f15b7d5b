#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # edulint
//!
//! A Python linter for novices.
//!
//! ## Usage
//!
//! `edulint check student.py` lints a file with the native checkers plus
//! flake8 and pylint when they are installed. `edulint explain R6201`
//! describes a message code. Set `EDULINT_LOG=debug` to see what the tool
//! is doing under the hood.

use std::path::PathBuf;

use anyhow::Result;
use bpaf::*;
use edulint::{
    config::{Translator, lint_config},
    constants::LOG_ENV_VAR,
    linting::{
        checkers::find_message,
        lint_files,
        output::{Format, render},
    },
    util::expand_paths,
};
use tracing::{Level, metadata::LevelFilter, warn};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Options of the `check` command.
#[derive(Debug, Clone)]
struct CheckOpts {
    /// Print problems as JSON.
    json:         bool,
    /// Print problems as a table.
    table:        bool,
    /// Skip flake8.
    no_flake8:    bool,
    /// Skip pylint.
    no_pylint:    bool,
    /// Extra arguments for flake8.
    flake8_args:  Option<String>,
    /// Extra arguments for pylint.
    pylint_args:  Option<String>,
    /// Comma-separated codes/symbols to report exclusively.
    enable:       Option<String>,
    /// Comma-separated codes/symbols to suppress.
    disable:      Option<String>,
    /// Path to a translation file.
    translations: Option<PathBuf>,
    /// Files or directories to lint.
    paths:        Vec<PathBuf>,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Lint files.
    Check(CheckOpts),
    /// Describe message codes.
    Explain(Vec<String>),
    /// Print the version.
    Version,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let json = long("json").help("Print problems as a JSON array").switch();
    let table = long("table").help("Print problems as a table").switch();
    let no_flake8 = long("no-flake8").help("Do not run flake8").switch();
    let no_pylint = long("no-pylint").help("Do not run pylint").switch();
    let flake8_args = long("flake8-args")
        .help("Extra arguments passed through to flake8")
        .argument::<String>("ARGS")
        .optional();
    let pylint_args = long("pylint-args")
        .help("Extra arguments passed through to pylint")
        .argument::<String>("ARGS")
        .optional();
    let enable = long("enable")
        .short('e')
        .help("Only report these comma-separated codes or symbols")
        .argument::<String>("CODES")
        .optional();
    let disable = long("disable")
        .short('d')
        .help("Never report these comma-separated codes or symbols")
        .argument::<String>("CODES")
        .optional();
    let translations = long("translations")
        .help("Translation file for message texts")
        .argument::<PathBuf>("FILE")
        .optional();
    let paths = positional::<PathBuf>("PATH")
        .help("Python files or directories to lint")
        .some("expected at least one file to lint");

    let check_opts = construct!(CheckOpts {
        json,
        table,
        no_flake8,
        no_pylint,
        flake8_args,
        pylint_args,
        enable,
        disable,
        translations,
        paths
    });
    let check = construct!(Cmd::Check(check_opts))
        .to_options()
        .command("check")
        .help("Lint Python files");

    let codes = positional::<String>("CODE")
        .help("Message code or symbol, e.g. R6201 or simplifiable-if-return")
        .some("expected at least one code to explain");
    let explain = construct!(Cmd::Explain(codes))
        .to_options()
        .command("explain")
        .help("Describe what a message code means");

    let version = pure(Cmd::Version)
        .to_options()
        .command("version")
        .help("Print the version");

    construct!([check, explain, version])
        .to_options()
        .descr("A Python linter that gives beginner-friendly feedback.")
        .run()
}

/// Splits a comma-separated CLI value into trimmed, non-empty entries.
fn split_csv(value: Option<String>) -> Option<Vec<String>> {
    value.map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Runs the `check` command; returns the process exit code.
fn run_check(opts: CheckOpts) -> Result<i32> {
    let translations = match &opts.translations {
        Some(path) => Some(Translator::from_file(path)?),
        None => None,
    };

    let split_args =
        |args: String| args.split_whitespace().map(str::to_string).collect::<Vec<_>>();
    let config = lint_config()
        .no_flake8(opts.no_flake8)
        .no_pylint(opts.no_pylint)
        .maybe_enable(split_csv(opts.enable))
        .maybe_disable(split_csv(opts.disable))
        .maybe_flake8_args(opts.flake8_args.map(split_args))
        .maybe_pylint_args(opts.pylint_args.map(split_args))
        .maybe_translations(translations)
        .build();

    let files = expand_paths(&opts.paths)?;
    if files.is_empty() {
        warn!("no Python files found under the given paths");
        return Ok(0);
    }

    let problems = lint_files(&files, &config)?;

    let format = if opts.json {
        Format::Json
    } else if opts.table {
        Format::Table
    } else {
        Format::Plain
    };
    let rendered = render(&problems, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    Ok(if problems.is_empty() { 0 } else { 1 })
}

/// Runs the `explain` command; returns the process exit code.
fn run_explain(targets: Vec<String>) -> i32 {
    let mut missing = false;
    for target in targets {
        match find_message(&target) {
            Some(spec) => {
                println!("{} ({})", spec.code, spec.symbol);
                println!("  {}", spec.description);
            }
            None => {
                eprintln!("edulint: no such message: {target}");
                missing = true;
            }
        }
    }
    if missing { 1 } else { 0 }
}

/// Initializes tracing from the `EDULINT_LOG` environment variable.
fn setup_tracing() {
    let level = match std::env::var(LOG_ENV_VAR).as_deref() {
        Ok("trace") => Level::TRACE,
        Ok("debug") => Level::DEBUG,
        Ok("info") => Level::INFO,
        Ok("error") => Level::ERROR,
        _ => Level::WARN,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(LevelFilter::from_level(level))
        .init();
}

fn main() {
    setup_tracing();

    let result = match options() {
        Cmd::Check(opts) => run_check(opts),
        Cmd::Explain(targets) => Ok(run_explain(targets)),
        Cmd::Version => {
            println!("edulint {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("edulint: {err:#}");
            std::process::exit(2);
        }
    }
}
