// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key selectors and single-level grouping.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use ggnest_core::{Key, Record};
use hashbrown::HashMap;

/// Computes the grouping key of a record.
///
/// Implemented by [`FieldSelector`], [`CellSelector`], and any `Fn(&Record) -> K` closure, so
/// callers can group by derived values (e.g. the day of a timestamp) with [`group_by`].
pub trait KeySelector {
    /// The key type. Groups are formed by `Eq` on this type.
    type Key: Clone + Eq + Hash;

    /// Returns the key of `record`.
    fn select(&self, record: &Record) -> Self::Key;
}

impl<F, K> KeySelector for F
where
    F: Fn(&Record) -> K,
    K: Clone + Eq + Hash,
{
    type Key = K;

    fn select(&self, record: &Record) -> K {
        self(record)
    }
}

/// Selects the normalized value of one field.
///
/// Missing fields and nulls select [`Key::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    field: String,
}

impl FieldSelector {
    /// Selects `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Returns the selected field name.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl KeySelector for FieldSelector {
    type Key = Key;

    fn select(&self, record: &Record) -> Key {
        record.key(&self.field)
    }
}

/// Selects a `(row, col)` pair for grid facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSelector {
    /// Selector for the column (x) key.
    pub x: FieldSelector,
    /// Selector for the row (y) key.
    pub y: FieldSelector,
}

impl KeySelector for CellSelector {
    /// `(row, col)`.
    type Key = (Key, Key);

    fn select(&self, record: &Record) -> (Key, Key) {
        (self.y.select(record), self.x.select(record))
    }
}

/// Records sharing one key, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, K> {
    /// The shared key.
    pub key: K,
    /// The records, in input order.
    pub records: Vec<&'a Record>,
}

/// Groups `records` by `selector`.
///
/// Groups are returned in the order their key is first seen; records keep their input order
/// within a group. Every record lands in exactly one group. Empty input yields no groups.
pub fn group_by<'a, S: KeySelector + ?Sized>(
    records: impl IntoIterator<Item = &'a Record>,
    selector: &S,
) -> Vec<Group<'a, S::Key>> {
    let mut index: HashMap<S::Key, usize> = HashMap::new();
    let mut groups: Vec<Group<'a, S::Key>> = Vec::new();

    for record in records {
        let key = selector.select(record);
        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    records: alloc::vec![record],
                });
            }
        }
    }

    groups
}
