use std::path::Path;
use std::process;

use anyhow::Result;
use braincrap_cli::{args, driver};
use clap::error::ErrorKind;

fn progname() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "braincrap".to_string())
}

fn main() -> Result<()> {
    let progname = progname();

    // No arguments at all: show usage and succeed.
    if std::env::args_os().len() <= 1 {
        args::command().print_help()?;
        return Ok(());
    }

    let matches = match args::command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            err.print()?;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return Ok(()),
                _ => process::exit(1),
            }
        }
    };

    let options = match args::options_from_matches(&matches) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{progname}: {err}");
            process::exit(1);
        }
    };

    // Initialize logging
    braincrap_core::init_tracing(options.debug);

    if let Err(err) = driver::compile(&options) {
        eprintln!("{}", err.diagnostic(&progname));
        process::exit(1);
    }

    Ok(())
}
