//! Scoped reader interface and the guard that keeps scope pushes and pops paired.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Key of a field or nested table: a name ("skill_graph"), an integer id, or the
/// position of an entry among the integer-keyed entries of the current table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKey<'a> {
    Name(&'a str),
    Id(u32),
    /// 0-based index into the list returned by `read_table_keys` for the current table.
    /// Unlike `Id`, this reaches every entry when ids repeat.
    Entry(usize),
}

impl<'a> From<&'a str> for TableKey<'a> {
    fn from(name: &'a str) -> Self {
        TableKey::Name(name)
    }
}

impl From<u32> for TableKey<'_> {
    fn from(id: u32) -> Self {
        TableKey::Id(id)
    }
}

impl fmt::Display for TableKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Name(name) => write!(f, "{}", name),
            TableKey::Id(id) => write!(f, "{}", id),
            TableKey::Entry(position) => write!(f, "#{}", position),
        }
    }
}

/// Hierarchical reader over a structured data source.
///
/// All reads are relative to the current scope. `open_table` pushes a scope and
/// `close_table` pops it; the reader never rebalances on its own, so callers
/// should go through [`ScopeGuard`] rather than pairing the calls by hand.
pub trait DescriptorReader {
    /// Human-readable name of the source (usually the file path), for diagnostics.
    fn source_name(&self) -> &str;

    /// Integer keys of the table `table` in the current scope, in source order.
    /// Returns an empty list when the table is absent. Once `table` is open, the entry
    /// at index `i` of this list is addressed by `TableKey::Entry(i)`.
    fn read_table_keys(&self, table: TableKey<'_>) -> Vec<u32>;

    /// Push the nested table `key` as the current scope. Returns false when it does not exist.
    fn open_table(&mut self, key: TableKey<'_>) -> bool;

    /// Pop the current scope.
    fn close_table(&mut self);

    /// Number of scopes currently open.
    fn scope_depth(&self) -> usize;

    /// Unsigned integer field of the current scope. None when absent or not a `u32`.
    fn read_uint(&self, key: TableKey<'_>) -> Option<u32>;

    /// String field of the current scope.
    fn read_string(&self, key: TableKey<'_>) -> Option<String>;

    /// Flat sequence of unsigned integers in the current scope. Empty when absent.
    fn read_uint_vector(&self, key: TableKey<'_>) -> Vec<u32>;
}

/// An open reader scope. Dropping the guard closes the scope.
///
/// The guard derefs to the reader, so nested scopes are opened from it:
/// `ScopeGuard::open(&mut *outer, key)`.
pub struct ScopeGuard<'r, R: DescriptorReader + ?Sized> {
    reader: &'r mut R,
}

impl<'r, R: DescriptorReader + ?Sized> ScopeGuard<'r, R> {
    /// Open `key` in the reader's current scope; None (and nothing to close) when it does not exist.
    pub fn open(reader: &'r mut R, key: TableKey<'_>) -> Option<Self> {
        if reader.open_table(key) {
            Some(Self { reader })
        } else {
            None
        }
    }
}

impl<R: DescriptorReader + ?Sized> Deref for ScopeGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.reader
    }
}

impl<R: DescriptorReader + ?Sized> DerefMut for ScopeGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.reader
    }
}

impl<R: DescriptorReader + ?Sized> Drop for ScopeGuard<'_, R> {
    fn drop(&mut self) {
        self.reader.close_table();
    }
}
