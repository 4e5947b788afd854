//! Dictionary encoding for dimension values.
//!
//! A dictionary maps each distinct string value of a dimension to a small
//! non-negative integer id. Rows store ids, never strings. Ids are dense and
//! assigned in insertion order, so `cardinality()` is also the next free id.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Dictionary id of a dimension value.
pub type DictId = u32;

/// Converts a dense index into a `DictId`.
#[inline]
fn dict_id(index: usize) -> DictId {
    debug_assert!(
        index <= DictId::MAX as usize,
        "dictionary index {} exceeds the DictId range",
        index
    );
    index as DictId
}

/// Bidirectional id <-> name mapping for one dimension.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    names: Vec<String>,
    ids: HashMap<String, DictId>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from an ordered list of values.
    ///
    /// The first occurrence of a value gets the id; later duplicates map onto it.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = Self::new();
        for value in values {
            dictionary.intern(value);
        }
        dictionary
    }

    /// Returns the id of `name`, assigning the next free id if it is new.
    pub fn intern(&mut self, name: impl Into<String>) -> DictId {
        let name = name.into();
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = dict_id(self.names.len());
        self.ids.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    /// Looks up the id assigned to `name`.
    #[inline]
    pub fn lookup_id(&self, name: &str) -> Option<DictId> {
        self.ids.get(name).copied()
    }

    /// Looks up the name assigned to `id`.
    #[inline]
    pub fn lookup_name(&self, id: DictId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Returns the number of distinct values.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.names.len()
    }

    /// Returns true if `id` is assigned.
    #[inline]
    pub fn contains_id(&self, id: DictId) -> bool {
        (id as usize) < self.names.len()
    }

    /// Iterates `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DictId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(id, name)| (dict_id(id), name.as_str()))
    }
}
