// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facet partitioning for `GGNest`.
//!
//! This crate turns a flat sequence of [`Record`](ggnest_core::Record)s into a labeled tree
//! of partitions, one tree level per [`Level`] of a [`PartitionSpec`]:
//! - facet levels (`Flow`, `Grid`) split the data into small multiples,
//! - `Group` levels split a facet into series, and
//! - leaves hold the records a geometry draws.
//!
//! Partitioning is a pure function of `(records, spec)`:
//! - groups appear in the order their key is first seen in the input (never sorted),
//! - every record lands in exactly one leaf, in input order, and
//! - the tree always has at least one leaf, even for empty input.

#![no_std]

extern crate alloc;

mod partition;
mod select;
mod spec;

pub use partition::{Leaves, NodeContent, NodeKey, PartitionNode, PartitionTree, partition};
pub use select::{CellSelector, FieldSelector, Group, KeySelector, group_by};
pub use spec::{Level, LevelKind, PartitionError, PartitionSpec};
