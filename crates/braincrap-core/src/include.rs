//! Include resolution for `$file` directives.
//!
//! The name is opened exactly as written (relative to the working
//! directory). Configured search directories are tried only after that fails.
//! Files currently being translated are tracked so that an include cycle is
//! reported instead of recursing forever.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

/// A loaded include file
#[derive(Debug)]
pub struct IncludedFile {
    /// Path the content was read from
    pub path: PathBuf,
    /// Identity used for cycle detection
    pub key: PathBuf,
    pub content: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Includer {
    search_dirs: Vec<PathBuf>,
    active: HashSet<PathBuf>,
}

impl Includer {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            active: HashSet::new(),
        }
    }

    /// Read `name`, falling back to the search directories for relative
    /// names. The error from opening the name as written is returned when
    /// every candidate fails.
    pub fn load(&self, name: &str) -> io::Result<IncludedFile> {
        let literal = Path::new(name);
        let first_error = match fs::read(literal) {
            Ok(content) => return Ok(self.loaded(literal.to_path_buf(), content)),
            Err(e) => e,
        };

        if literal.is_relative() && !name.is_empty() {
            for dir in &self.search_dirs {
                let candidate = dir.join(literal);
                trace!("Trying include candidate {}", candidate.display());
                if let Ok(content) = fs::read(&candidate) {
                    return Ok(self.loaded(candidate, content));
                }
            }
        }

        Err(first_error)
    }

    /// Identity of `path` for cycle detection: canonical where possible
    pub fn key_for(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn loaded(&self, path: PathBuf, content: Vec<u8>) -> IncludedFile {
        let key = Self::key_for(&path);
        debug!("Included {} ({} bytes)", path.display(), content.len());
        IncludedFile { path, key, content }
    }

    /// Mark `key` as being translated. Returns false if it already is.
    pub fn enter(&mut self, key: &Path) -> bool {
        self.active.insert(key.to_path_buf())
    }

    pub fn leave(&mut self, key: &Path) {
        self.active.remove(key);
    }
}
