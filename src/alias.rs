use std::collections::HashMap;

/// Mutable mapping from a short alias name to its replacement command string.
///
/// Names are unique: a later `define` for the same name overwrites the
/// earlier one. Expansions are opaque command strings handed to the OS
/// interpreter at execution time; they are never resolved against each other,
/// so an alias whose expansion begins with another alias name gets exactly
/// one substitution pass. The table lives for one shell session and is not
/// persisted.
///
/// Only the synchronous session loop ever mutates the table, so no locking
/// is needed. Anyone introducing alias mutation from a background task must
/// add synchronization first.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an alias.
    pub fn define(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.entries.insert(name.into(), expansion.into());
    }

    /// Look up the expansion for a name, if one was defined.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}
