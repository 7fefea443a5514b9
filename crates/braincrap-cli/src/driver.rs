//! Top-level compilation: file I/O around the core translator.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use braincrap_core::{BraincrapError, Target, TranslateConfig, Translator};
use tracing::{debug, info, warn};

/// When a failed translation removes the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// Only when the error was raised while scanning the input file itself,
    /// not inside a file it includes
    #[default]
    MainOnly,
    /// For every translation error
    Always,
}

/// Everything needed for one run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target: Target,
    pub config: TranslateConfig,
    pub cleanup: CleanupPolicy,
    pub debug: bool,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, target: Target) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            target,
            config: TranslateConfig::default(),
            cleanup: CleanupPolicy::default(),
            debug: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error("Unable to open file '{}'", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to open file '{}'", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write file '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Translate(#[from] BraincrapError),
}

impl DriverError {
    /// One-line diagnostic prefixed with the program name.
    ///
    /// Translation errors already start with the frame name, giving
    /// `prog:file: message`; the rest read `prog: message`.
    pub fn diagnostic(&self, progname: &str) -> String {
        match self {
            DriverError::Translate(err) if err.display_name().is_some() => {
                format!("{progname}:{err}")
            }
            _ => format!("{progname}: {self}"),
        }
    }
}

/// Translate `options.input` into `options.output`.
pub fn compile(options: &CompileOptions) -> Result<(), DriverError> {
    let source = fs::read(&options.input).map_err(|source| DriverError::OpenInput {
        path: options.input.clone(),
        source,
    })?;
    let display_name = options.input.to_string_lossy().into_owned();

    let file = File::create(&options.output).map_err(|source| DriverError::CreateOutput {
        path: options.output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    info!(
        "Compiling {} to {} ({})",
        display_name,
        options.output.display(),
        options.target
    );

    let result = write_program(&mut writer, options, &source, &display_name);
    // Close the file before any removal.
    let flushed = writer.flush();
    drop(writer);

    match result {
        Ok(()) => flushed.map_err(|source| DriverError::Write {
            path: options.output.clone(),
            source,
        }),
        Err(err) => {
            if let DriverError::Translate(translate_err) = &err {
                if should_remove(options.cleanup, translate_err, &display_name) {
                    remove_output(&options.output);
                }
            }
            Err(err)
        }
    }
}

fn write_program(
    writer: &mut impl Write,
    options: &CompileOptions,
    source: &[u8],
    display_name: &str,
) -> Result<(), DriverError> {
    let write_err = |source| DriverError::Write {
        path: options.output.clone(),
        source,
    };

    writer
        .write_all(options.target.header().as_bytes())
        .map_err(write_err)?;

    {
        let mut translator =
            Translator::new(options.target, options.config.clone(), &mut *writer);
        translator.translate_file(source, display_name, &options.input)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let names: String = translator
                .macros()
                .iter()
                .map(|(name, _)| char::from(name))
                .collect();
            debug!("{} macros defined: {}", translator.macros().len(), names);
        }
    }

    writer
        .write_all(options.target.footer().as_bytes())
        .map_err(write_err)
}

fn should_remove(policy: CleanupPolicy, err: &BraincrapError, main_name: &str) -> bool {
    match policy {
        CleanupPolicy::Always => true,
        CleanupPolicy::MainOnly => err.display_name() == Some(main_name),
    }
}

fn remove_output(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}
