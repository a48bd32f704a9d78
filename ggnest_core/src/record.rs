// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, immutable records.

extern crate alloc;

use alloc::string::String;

use smallvec::SmallVec;

use crate::{Key, Value};

/// An ordered mapping from field name to [`Value`].
///
/// Records are built with [`Record::with`] (or collected from `(name, value)` pairs) and are
/// read-only afterwards. Field order is the order of first insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: SmallVec<[(String, Value); 4]>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this record with `name` set to `value`.
    ///
    /// Setting an existing field replaces its value in place and keeps its position.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    fn insert(&mut self, name: String, value: Value) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| (n == field).then_some(v))
    }

    /// Returns the normalized grouping key of `field`.
    ///
    /// A missing field yields [`Key::Missing`], the same key as an explicit null.
    pub fn key(&self, field: &str) -> Key {
        self.get(field).map_or(Key::Missing, Value::to_key)
    }

    /// Returns `true` if the record has a field called `field` (even if it is null).
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterates `(name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (n, v) in iter {
            record.insert(n.into(), v.into());
        }
        record
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    extern crate alloc;

    use alloc::string::String;
    use core::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Record;
    use crate::Value;

    impl Serialize for Record {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self.fields() {
                map.serialize_entry(name, value)?;
            }
            map.end()
        }
    }

    struct RecordVisitor;

    impl<'de> Visitor<'de> for RecordVisitor {
        type Value = Record;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of field names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
            let mut record = Record::new();
            while let Some((name, value)) = access.next_entry::<String, Value>()? {
                record.insert(name, value);
            }
            Ok(record)
        }
    }

    impl<'de> Deserialize<'de> for Record {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(RecordVisitor)
        }
    }
}
