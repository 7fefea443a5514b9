//! Macro table
//!
//! Maps a single-byte macro name to its raw body. Bodies are stored exactly
//! as written and re-scanned at every use, so directives inside a body take
//! effect at the point of use, not at definition time.

use std::rc::Rc;

use indexmap::IndexMap;

/// Bytes that can never name a macro: the eight instructions, the
/// directive markers `$` and `#`, and whitespace.
const RESERVED_NAMES: &[u8] = b"$#+-<>[].,\n\t \x0c\r\x0b";

/// Whether `name` may be bound by a `#` directive.
pub fn is_valid_name(name: u8) -> bool {
    !RESERVED_NAMES.contains(&name) && (0x20..=0x7e).contains(&name)
}

/// Insertion-ordered macro store; a later definition replaces the body of an
/// earlier one with the same name.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: IndexMap<u8, Rc<[u8]>>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `body`. Name validity is checked by the scanner.
    pub fn define(&mut self, name: u8, body: &[u8]) {
        self.macros.insert(name, Rc::from(body));
    }

    /// Body of the most recent definition of `name`.
    ///
    /// The body is reference counted so an expansion in progress keeps its
    /// text even if the body redefines its own name.
    pub fn lookup(&self, name: u8) -> Option<Rc<[u8]>> {
        self.macros.get(&name).cloned()
    }

    pub fn contains(&self, name: u8) -> bool {
        self.macros.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Macros in first-definition order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.macros.iter().map(|(name, body)| (*name, body.as_ref()))
    }
}
