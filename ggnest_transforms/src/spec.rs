// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition spec types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Errors returned when a [`PartitionSpec`] is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    /// The level at `level` cannot be evaluated.
    #[error("invalid partition level {level}: {reason}")]
    InvalidSpec {
        /// Index of the offending level.
        level: usize,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A field name at `level` is the empty string.
    ///
    /// An empty name is ambiguous with "no split"; omit the level instead.
    #[error("partition level {level} has an empty field name")]
    EmptyFieldName {
        /// Index of the offending level.
        level: usize,
    },
}

/// The variant of a [`Level`], without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKind {
    /// See [`Level::Flow`].
    Flow,
    /// See [`Level::Grid`].
    Grid,
    /// See [`Level::Group`].
    Group,
    /// See [`Level::Leaf`].
    Leaf,
}

impl LevelKind {
    /// Returns `true` for levels that divide the canvas into facets.
    pub fn is_facet(self) -> bool {
        matches!(self, Self::Flow | Self::Grid)
    }
}

/// One level of a [`PartitionSpec`].
///
/// With the `serde` feature, levels are tagged by `kind`:
/// `{"kind": "flow", "field": "country"}`, `{"kind": "grid", "fieldX": "a", "fieldY": "b"}`,
/// `{"kind": "group", "field": "series"}`, `{"kind": "leaf"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Level {
    /// Facet by the distinct values of `field`, packed into an automatic grid.
    Flow {
        /// Field to split on.
        field: String,
    },
    /// Facet by two fields, one per grid axis.
    ///
    /// Both fields are required; they are optional here so a partially specified grid can
    /// be represented and rejected by [`PartitionSpec::validate`].
    Grid {
        /// Field whose values become grid columns.
        #[cfg_attr(
            feature = "serde",
            serde(rename = "fieldX", default, skip_serializing_if = "Option::is_none")
        )]
        field_x: Option<String>,
        /// Field whose values become grid rows.
        #[cfg_attr(
            feature = "serde",
            serde(rename = "fieldY", default, skip_serializing_if = "Option::is_none")
        )]
        field_y: Option<String>,
    },
    /// Split a facet into named groups (e.g. one line per series).
    Group {
        /// Field to split on.
        field: String,
    },
    /// Terminal level: the records a geometry draws, with no further split.
    Leaf,
}

impl Level {
    /// Flow facet on `field`.
    pub fn flow(field: impl Into<String>) -> Self {
        Self::Flow {
            field: field.into(),
        }
    }

    /// Grid facet with columns from `field_x` and rows from `field_y`.
    pub fn grid(field_x: impl Into<String>, field_y: impl Into<String>) -> Self {
        Self::Grid {
            field_x: Some(field_x.into()),
            field_y: Some(field_y.into()),
        }
    }

    /// Group on `field`.
    pub fn group(field: impl Into<String>) -> Self {
        Self::Group {
            field: field.into(),
        }
    }

    /// Returns the kind of this level.
    pub fn kind(&self) -> LevelKind {
        match self {
            Self::Flow { .. } => LevelKind::Flow,
            Self::Grid { .. } => LevelKind::Grid,
            Self::Group { .. } => LevelKind::Group,
            Self::Leaf => LevelKind::Leaf,
        }
    }

    fn validate(&self, level: usize) -> Result<(), PartitionError> {
        let check_name = |name: &str| {
            if name.is_empty() {
                Err(PartitionError::EmptyFieldName { level })
            } else {
                Ok(())
            }
        };
        match self {
            Self::Flow { field } | Self::Group { field } => check_name(field),
            Self::Grid { field_x, field_y } => {
                let Some(x) = field_x else {
                    return Err(PartitionError::InvalidSpec {
                        level,
                        reason: "grid level is missing fieldX",
                    });
                };
                let Some(y) = field_y else {
                    return Err(PartitionError::InvalidSpec {
                        level,
                        reason: "grid level is missing fieldY",
                    });
                };
                check_name(x)?;
                check_name(y)
            }
            Self::Leaf => Ok(()),
        }
    }
}

/// An ordered list of partition levels, outermost first.
///
/// An empty spec is valid and partitions everything into a single leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PartitionSpec {
    levels: Vec<Level>,
}

impl PartitionSpec {
    /// Create a spec from levels. Call [`PartitionSpec::validate`] before use, or let
    /// [`partition`](crate::partition) do it.
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Returns the levels.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Returns the level at `index`, or `None` past the end.
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Returns the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if there are no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Checks that every level can be evaluated.
    ///
    /// Rejects grid levels missing an axis field, empty field names, a [`Level::Leaf`] that
    /// is followed by further levels (which could never be reached), and facet levels nested
    /// under a [`Level::Group`]. Groups share their facet's box, so a facet below one would
    /// have no box of its own.
    pub fn validate(&self) -> Result<(), PartitionError> {
        let mut grouped = false;
        for (index, level) in self.levels.iter().enumerate() {
            level.validate(index)?;
            if matches!(level, Level::Leaf) && index + 1 != self.levels.len() {
                return Err(PartitionError::InvalidSpec {
                    level: index,
                    reason: "leaf level must be last",
                });
            }
            if grouped && level.kind().is_facet() {
                return Err(PartitionError::InvalidSpec {
                    level: index,
                    reason: "facet levels must come before group levels",
                });
            }
            grouped |= matches!(level, Level::Group { .. });
        }
        Ok(())
    }
}

impl From<Vec<Level>> for PartitionSpec {
    fn from(levels: Vec<Level>) -> Self {
        Self::new(levels)
    }
}

impl FromIterator<Level> for PartitionSpec {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn grid_without_field_y_is_invalid() {
        let spec = PartitionSpec::new(vec![Level::Grid {
            field_x: Some("x".into()),
            field_y: None,
        }]);
        assert!(matches!(
            spec.validate(),
            Err(PartitionError::InvalidSpec { level: 0, .. })
        ));
    }

    #[test]
    fn empty_field_names_are_rejected() {
        let spec = PartitionSpec::new(vec![Level::flow("country"), Level::group("")]);
        assert_eq!(
            spec.validate(),
            Err(PartitionError::EmptyFieldName { level: 1 })
        );

        let spec = PartitionSpec::new(vec![Level::grid("", "y")]);
        assert_eq!(
            spec.validate(),
            Err(PartitionError::EmptyFieldName { level: 0 })
        );
    }

    #[test]
    fn leaf_must_be_last() {
        let spec = PartitionSpec::new(vec![Level::Leaf, Level::group("g")]);
        assert!(matches!(
            spec.validate(),
            Err(PartitionError::InvalidSpec { level: 0, .. })
        ));
        assert_eq!(PartitionSpec::new(vec![Level::group("g"), Level::Leaf]).validate(), Ok(()));
        assert_eq!(PartitionSpec::default().validate(), Ok(()));
    }

    #[test]
    fn facets_cannot_nest_under_groups() {
        let spec = PartitionSpec::new(vec![Level::group("g"), Level::flow("f")]);
        assert!(matches!(
            spec.validate(),
            Err(PartitionError::InvalidSpec { level: 1, .. })
        ));
        let spec = PartitionSpec::new(vec![
            Level::flow("f"),
            Level::group("g"),
            Level::grid("x", "y"),
        ]);
        assert!(matches!(
            spec.validate(),
            Err(PartitionError::InvalidSpec { level: 2, .. })
        ));

        let spec = PartitionSpec::new(vec![
            Level::grid("x", "y"),
            Level::flow("f"),
            Level::group("g"),
            Level::group("h"),
            Level::Leaf,
        ]);
        assert_eq!(spec.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn levels_are_tagged_by_kind() {
        let spec: PartitionSpec = serde_json::from_str(
            r#"[
                {"kind": "grid", "fieldX": "day", "fieldY": "region"},
                {"kind": "flow", "field": "country"},
                {"kind": "group", "field": "series"},
                {"kind": "leaf"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            spec.levels(),
            [
                Level::grid("day", "region"),
                Level::flow("country"),
                Level::group("series"),
                Level::Leaf,
            ]
        );

        let partial: PartitionSpec =
            serde_json::from_str(r#"[{"kind": "grid", "fieldX": "x"}]"#).unwrap();
        assert!(partial.validate().is_err());
    }
}
