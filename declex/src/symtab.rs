//! # symtab
//!
//! Declaration symbol table built on [`indexmap::IndexMap`].
//!
//! The table maps each declared identifier to the type keyword that most
//! recently preceded it and to an ordinal id assigned in first-seen order,
//! starting at 1. Lookups by name are hashed; iteration follows ordinal
//! order.
//!
//! [`build`] derives a fresh table from a token sequence. It is a single
//! left-to-right fold with one slot of carry-over state, the *pending type*:
//!
//! - a type keyword (`int`, `float`, `double`, `char`) fills the slot,
//!   overwriting whatever was there;
//! - an identifier not yet in the table is inserted with the pending type
//!   (or [`UNKNOWN_TYPE`] if the slot is empty) and empties the slot;
//! - an identifier already in the table changes nothing, and the slot keeps
//!   its value;
//! - every other token is skipped.
//!
//! ## Example
//! ```rust
//! # use declex::{build, scan};
//! let table = build(&scan("int a = 5 ; float b = a ;").unwrap());
//! assert_eq!(table.len(), 2);
//! let b = table.get("b").unwrap();
//! assert_eq!(b.inferred_type.as_str(), "float");
//! assert_eq!(b.ordinal, 2);
//! ```

use crate::{Token, TokenKind};
use indexmap::{IndexMap, map::Entry};
use smartstring::alias::String;
use std::fmt;

/// Type recorded for an identifier seen with no pending type keyword.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// One declared identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolEntry {
    /// Identifier text; unique within a table.
    pub name: String,
    /// Text of the type keyword that preceded the first occurrence, or
    /// [`UNKNOWN_TYPE`].
    pub inferred_type: String,
    /// 1-based first-seen order.
    pub ordinal: usize,
}

/// Identifiers in first-seen order, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    tab: IndexMap<String, SymbolEntry>,
}

impl SymbolTable {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self {
            tab: IndexMap::new(),
        }
    }

    /// Returns the number of entries currently stored in the symbol table.
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    /// Returns `true` if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Inserts `name` with `inferred_type` if it is not present yet.
    ///
    /// Returns the entry's ordinal and whether it was newly inserted. An
    /// existing entry keeps its type and ordinal.
    ///
    /// # Examples
    /// ```
    /// # use declex::SymbolTable;
    /// let mut st = SymbolTable::new();
    /// assert_eq!(st.declare("a", "int"), (1, true));
    /// assert_eq!(st.declare("a", "char"), (1, false));
    /// assert_eq!(st.get("a").unwrap().inferred_type.as_str(), "int");
    /// ```
    pub fn declare(
        &mut self,
        name: impl AsRef<str>,
        inferred_type: impl AsRef<str>,
    ) -> (usize, bool) {
        let next = self.tab.len() + 1;
        match self.tab.entry(String::from(name.as_ref())) {
            Entry::Occupied(o) => (o.get().ordinal, false),
            Entry::Vacant(v) => {
                let entry = SymbolEntry {
                    name: v.key().clone(),
                    inferred_type: String::from(inferred_type.as_ref()),
                    ordinal: next,
                };
                v.insert(entry);
                (next, true)
            }
        }
    }

    /// Returns `true` if `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.tab.contains_key(name)
    }

    /// Looks up an entry by identifier text.
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.tab.get(name)
    }

    /// Looks up an entry by its 1-based ordinal.
    pub fn by_ordinal(&self, ordinal: usize) -> Option<&SymbolEntry> {
        let index = ordinal.checked_sub(1)?;
        self.tab.get_index(index).map(|(_, entry)| entry)
    }

    /// Entries in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.tab.values()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a SymbolEntry;
    type IntoIter = indexmap::map::Values<'a, String, SymbolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.tab.values()
    }
}

/// Column listing: `ID`, `Name`, `Type`, one entry per line.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());
        writeln!(f, "{:<4} {:<width$} Type", "ID", "Name")?;
        for e in self {
            writeln!(
                f,
                "{:<4} {:<width$} {}",
                e.ordinal,
                e.name.as_str(),
                e.inferred_type
            )?;
        }
        Ok(())
    }
}

/// Derives a symbol table from a token sequence.
///
/// Never fails; the same sequence always produces the same table.
pub fn build(tokens: &[Token]) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut pending_type: Option<&str> = None;

    for tok in tokens {
        match tok.kind {
            TokenKind::Keyword if tok.is_type_keyword() => {
                log::trace!("pending type {}", tok.text);
                pending_type = Some(tok.text.as_str());
            }
            TokenKind::Identifier => {
                let ty = pending_type.unwrap_or(UNKNOWN_TYPE);
                let (ordinal, inserted) = table.declare(&tok.text, ty);
                if inserted {
                    log::trace!("declared {} : {} as #{}", tok.text, ty, ordinal);
                    pending_type = None;
                }
            }
            _ => {}
        }
    }

    log::debug!("built symbol table with {} entries", table.len());
    table
}
