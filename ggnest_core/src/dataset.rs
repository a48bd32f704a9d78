// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned record sequences, and joining several datasets into one.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::{Record, Value};

/// Field used by [`Dataset::join`] to tag each record with its source dataset.
pub const DATASET_FIELD: &str = "dataset";

/// An owned, ordered sequence of records.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Dataset {
    records: Vec<Record>,
}

/// A dataset with an optional name, used as input to [`Dataset::join`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedDataset {
    /// Name written into the [`DATASET_FIELD`] of each joined record.
    ///
    /// Unnamed datasets are tagged with their position in the join instead.
    #[cfg_attr(feature = "serde", serde(default, rename = "key"))]
    pub name: Option<String>,
    /// The records.
    #[cfg_attr(feature = "serde", serde(rename = "values"))]
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Concatenate several datasets into one, in order.
    ///
    /// Every output record carries a [`DATASET_FIELD`] naming its source: the dataset's name,
    /// or its zero-based position if unnamed. Records that already have a non-null
    /// [`DATASET_FIELD`] keep it.
    ///
    /// A single dataset has nothing to be told apart from, so its records are returned
    /// untagged.
    pub fn join(datasets: impl IntoIterator<Item = NamedDataset>) -> Self {
        let mut datasets: Vec<NamedDataset> = datasets.into_iter().collect();
        if datasets.len() == 1 {
            let only = datasets.remove(0);
            log::trace!("single dataset of {} records, not tagged", only.records.len());
            return Self::new(only.records);
        }

        let mut records = Vec::new();
        for (index, dataset) in datasets.into_iter().enumerate() {
            let tag = match dataset.name {
                Some(name) => Value::Str(name),
                None => Value::from(index as f64),
            };
            log::trace!(
                "joining {} records tagged {:?}",
                dataset.records.len(),
                tag
            );
            records.extend(dataset.records.into_iter().map(|record| {
                if record.get(DATASET_FIELD).is_some_and(|v| !v.is_null()) {
                    record
                } else {
                    record.with(DATASET_FIELD, tag.clone())
                }
            }));
        }
        Self { records }
    }

    /// Returns the records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Consumes the dataset, returning its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::Key;

    #[test]
    fn join_tags_records_by_name_or_position() {
        let joined = Dataset::join([
            NamedDataset {
                name: Some("sales".into()),
                records: vec![Record::new().with("units", 1)],
            },
            NamedDataset {
                name: None,
                records: vec![
                    Record::new().with("units", 2),
                    Record::new().with("units", 3).with(DATASET_FIELD, "kept"),
                ],
            },
        ]);

        let tags: Vec<Key> = joined.iter().map(|r| r.key(DATASET_FIELD)).collect();
        assert_eq!(
            tags,
            [Key::from("sales"), Key::from(1.0), Key::from("kept")]
        );
    }

    #[test]
    fn join_of_one_dataset_leaves_records_untagged() {
        let records = vec![Record::new().with("units", 1), Record::new().with("units", 2)];
        let joined = Dataset::join([NamedDataset {
            name: None,
            records: records.clone(),
        }]);
        assert_eq!(joined.records(), &records[..]);
        assert!(joined.iter().all(|r| !r.contains(DATASET_FIELD)));

        let named = Dataset::join([NamedDataset {
            name: Some("sales".into()),
            records: records.clone(),
        }]);
        assert_eq!(named.into_records(), records);
    }

    #[test]
    fn join_of_nothing_is_empty() {
        assert!(Dataset::join([]).is_empty());
    }
}
