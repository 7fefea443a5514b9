//! # Braincrap Core
//!
//! Translator for Braincrap, a Brainfuck dialect with single-character
//! macros, file inclusion and line comments. Provides:
//! - The macro table and include resolution
//! - A single-pass scanner that expands directives in place
//! - Code generators for portable C, helper-function C ("C0") and plain
//!   Brainfuck
//!
//! The command-line front end lives in `braincrap-cli`; this crate only
//! writes the translated body to a caller-supplied sink.

#![warn(clippy::all)]

use std::path::PathBuf;

pub mod codegen;
pub mod include;
pub mod macros;
pub mod scanner;
pub mod target;

// Re-export commonly used types
pub use codegen::{generator_for, CodeGenerator, Instruction};
pub use include::Includer;
pub use macros::MacroTable;
pub use scanner::{translate, Translator};
pub use target::{Target, UnknownTarget};

/// Braincrap translator version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter covering the translator and its command-line front end
pub fn log_directive(debug: bool) -> &'static str {
    if debug {
        "warn,braincrap_core=debug,braincrap_cli=debug"
    } else {
        "warn"
    }
}

/// Initialize tracing for the translator, logging to stderr.
///
/// `RUST_LOG` takes precedence over the built-in directive.
pub fn init_tracing(debug: bool) {
    let directive = log_directive(debug);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

    // A second initialisation (tests, embedding) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// How bracket balance is scoped across macro and include frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalanceScope {
    /// Every frame keeps its own counter; loops may not straddle a macro
    /// body or included file.
    #[default]
    PerFrame,
    /// One counter for the whole run, checked when the root frame ends.
    Global,
}

/// Translator configuration
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Scope of the bracket-balance counter
    pub balance_scope: BalanceScope,
    /// Check brackets even for generators that pass them through unchecked
    pub strict_brackets: bool,
    /// Maximum number of simultaneously open frames
    pub max_depth: usize,
    /// Directories searched when an include name does not open as given
    pub include_dirs: Vec<PathBuf>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            balance_scope: BalanceScope::PerFrame,
            strict_brackets: false,
            max_depth: 1000,
            include_dirs: Vec::new(),
        }
    }
}

/// Fatal translation errors.
///
/// Every variant except `Io` names the frame (input file, included file)
/// it was raised in; the rendered message starts with that name.
#[derive(thiserror::Error, Debug)]
pub enum BraincrapError {
    #[error("{file}: Invalid macro character '{name}' at position {offset}")]
    InvalidMacroChar {
        file: String,
        name: char,
        offset: usize,
    },

    #[error("{file}: Unable to include file '{path}'")]
    IncludeNotFound {
        file: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: Recursive include of '{path}'")]
    IncludeCycle { file: String, path: String },

    #[error("{file}: Unmatched ']' at position {offset}")]
    UnmatchedCloseBracket { file: String, offset: usize },

    #[error("{file}: Unmatched '['")]
    UnmatchedOpenBracket { file: String },

    #[error("{file}: Expansion nested deeper than {depth} frames")]
    ExpansionTooDeep { file: String, depth: usize },

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

impl BraincrapError {
    /// Display name of the frame the error was raised in
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::InvalidMacroChar { file, .. }
            | Self::IncludeNotFound { file, .. }
            | Self::IncludeCycle { file, .. }
            | Self::UnmatchedCloseBracket { file, .. }
            | Self::UnmatchedOpenBracket { file }
            | Self::ExpansionTooDeep { file, .. } => Some(file),
            Self::Io(_) => None,
        }
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, BraincrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_diagnostics() {
        let err = BraincrapError::InvalidMacroChar {
            file: "main.bc".to_string(),
            name: '+',
            offset: 4,
        };
        assert_eq!(
            err.to_string(),
            "main.bc: Invalid macro character '+' at position 4"
        );

        let err = BraincrapError::UnmatchedOpenBracket {
            file: "lib.bc".to_string(),
        };
        assert_eq!(err.to_string(), "lib.bc: Unmatched '['");
        assert_eq!(err.display_name(), Some("lib.bc"));
    }

    #[test]
    fn test_io_error_has_no_frame() {
        let err = BraincrapError::from(std::io::Error::other("disk full"));
        assert!(err.display_name().is_none());
    }

    #[test]
    fn test_log_directive_covers_both_crates() {
        let quiet = log_directive(false);
        assert_eq!(quiet, "warn");
        let verbose = log_directive(true);
        assert!(verbose.contains("braincrap_core=debug"));
        assert!(verbose.contains("braincrap_cli=debug"));
        assert!(tracing_subscriber::EnvFilter::try_new(verbose).is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = TranslateConfig::default();
        assert_eq!(config.balance_scope, BalanceScope::PerFrame);
        assert!(!config.strict_brackets);
        assert_eq!(config.max_depth, 1000);
        assert!(config.include_dirs.is_empty());
    }
}
