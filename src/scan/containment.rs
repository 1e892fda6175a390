//! Containment Resolver
//!
//! Maps a line number to the definition that most narrowly contains it,
//! approximated as the last definition starting at or before that line.
//! This is a positional heuristic, not block parsing: a definition owns every
//! line up to the start of the next one.

use super::definitions::Definition;

/// Owner of a line within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// No definition starts at or before the line
    Module,
    /// Index into the file's definition list
    Definition(usize),
}

/// Line-to-definition lookup over one file's definitions.
#[derive(Debug, Clone, Copy)]
pub struct Containment<'a> {
    definitions: &'a [Definition],
}

impl<'a> Containment<'a> {
    /// `definitions` must be in ascending line order, as the definition
    /// scanner returns them.
    pub fn new(definitions: &'a [Definition]) -> Self {
        debug_assert!(definitions.windows(2).all(|w| w[0].line <= w[1].line));
        Self { definitions }
    }

    /// Resolve the owner of a 1-based line
    pub fn owner_of(&self, line: u32) -> Owner {
        match self.definitions.partition_point(|d| d.line <= line) {
            0 => Owner::Module,
            n => Owner::Definition(n - 1),
        }
    }

    /// The definition record behind an owner, if it is not the module
    pub fn definition(&self, owner: Owner) -> Option<&'a Definition> {
        match owner {
            Owner::Module => None,
            Owner::Definition(idx) => self.definitions.get(idx),
        }
    }

    /// Name of the owner, falling back to the module's name
    pub fn owner_name<'m>(&self, owner: Owner, module_name: &'m str) -> &'m str
    where
        'a: 'm,
    {
        self.definition(owner)
            .map(|d| d.name.as_str())
            .unwrap_or(module_name)
    }
}
