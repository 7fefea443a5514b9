//! Command-line argument definitions

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use braincrap_core::{BalanceScope, Target, TranslateConfig};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::driver::{CleanupPolicy, CompileOptions};

pub const DEFAULT_OUTPUT: &str = "bc.out";

/// Printed after the display name by `-v`: `Braincrap v0.1.0`
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Build the `braincrap` command
pub fn command() -> Command {
    Command::new("braincrap")
        .display_name("Braincrap")
        .version(VERSION_TEXT)
        .about("Translate Braincrap source to C, C0 or plain Brainfuck")
        .disable_version_flag(true)
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Braincrap source file")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .visible_alias("out")
                .value_name("NAME")
                .help("Output to file NAME")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .value_name("LANG")
                .help("Language to compile to (c, bf, c0)")
                .value_parser(|s: &str| s.parse::<Target>())
                .default_value("c"),
        )
        .arg(
            Arg::new("include-dir")
                .short('I')
                .long("include-dir")
                .value_name("DIR")
                .help("Search DIR for included files not found as written")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("global-brackets")
                .long("global-brackets")
                .help("Allow loops to open and close in different macros or files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict-brackets")
                .long("strict-brackets")
                .help("Check bracket balance for the bf target too")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Maximum nesting of macro expansions and includes")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("clean-on-nested-error")
                .long("clean-on-nested-error")
                .help("Remove the output file for errors raised inside included files too")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .visible_alias("ver")
                .help("Show version information")
                .action(ArgAction::Version),
        )
}

/// Convert parsed arguments into compile options
pub fn options_from_matches(matches: &ArgMatches) -> Result<CompileOptions> {
    let input = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .ok_or_else(|| anyhow!("No input file"))?;
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let target = matches.get_one::<Target>("target").copied().unwrap_or_default();

    let mut config = TranslateConfig {
        include_dirs: matches
            .get_many::<PathBuf>("include-dir")
            .map(|dirs| dirs.cloned().collect())
            .unwrap_or_default(),
        strict_brackets: matches.get_flag("strict-brackets"),
        ..Default::default()
    };
    if matches.get_flag("global-brackets") {
        config.balance_scope = BalanceScope::Global;
    }
    if let Some(depth) = matches.get_one::<usize>("max-depth") {
        if *depth == 0 {
            return Err(anyhow!("Argument to '--max-depth' must be at least 1"));
        }
        config.max_depth = *depth;
    }

    let cleanup = if matches.get_flag("clean-on-nested-error") {
        CleanupPolicy::Always
    } else {
        CleanupPolicy::MainOnly
    };

    Ok(CompileOptions {
        input,
        output,
        target,
        config,
        cleanup,
        debug: matches.get_flag("debug"),
    })
}
