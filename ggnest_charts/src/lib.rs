// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facet layout for `GGNest` partition trees.
//!
//! This crate sits between partitioning and rendering:
//! - [`FlowGrid`] / [`flow_layout`] pack any number of flow facets into a grid shaped by the
//!   canvas aspect ratio,
//! - [`grid_layout`] splits a canvas into a fixed rows x cols grid, and
//! - [`arrange_facets`] walks a [`PartitionTree`](ggnest_transforms::PartitionTree) and gives
//!   every innermost facet its box on the canvas.
//!
//! Drawing marks inside the facets is left to the renderer.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod facet;
#[cfg(not(feature = "std"))]
mod float;
mod layout;

pub use facet::{FacetPanel, arrange_facets};
pub use layout::{FacetGeometry, FlowGrid, LayoutError, Size, flow_layout, grid_layout};
