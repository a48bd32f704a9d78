// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed records and grouping keys for `GGNest`.
//!
//! This crate is the data model shared by the partitioning and layout crates:
//! - [`Value`] is a single, already-typed cell (string, number, date, or null),
//! - [`Record`] is an ordered, immutable field-name to value mapping,
//! - [`Key`] is the normalized value used for grouping, and
//! - [`Dataset`] owns a sequence of records and can join several named datasets.
//!
//! Parsing raw text into typed values is out of scope; records arrive typed.

#![no_std]

extern crate alloc;

mod dataset;
mod record;
mod value;

pub use dataset::{DATASET_FIELD, Dataset, NamedDataset};
pub use record::Record;
pub use value::{Date, Key, Value};
