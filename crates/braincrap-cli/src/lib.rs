//! Braincrap CLI - command-line front end for the Braincrap translator
//!
//! Handles argument parsing, reading the input file, writing the per-target
//! header and footer around the translated body, and removing the output
//! file when translation fails.

pub mod args;
pub mod driver;

// Re-export commonly used types for convenience
pub use args::{command, options_from_matches};
pub use driver::{compile, CleanupPolicy, CompileOptions, DriverError};
