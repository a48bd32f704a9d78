// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facet grid layout.
//!
//! Two arrangements are supported:
//! - **Flow**: an arbitrary number of facets packed into a near-square grid whose shape follows
//!   the canvas aspect ratio ([`FlowGrid`]).
//! - **Grid**: a fixed `rows x cols` grid where rows split the height evenly and columns split
//!   the width evenly ([`grid_layout`]).
//!
//! Both are pure functions of their inputs. They run after partitioning, once the canvas size
//! is known, and are recomputed on every resize.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Errors returned by facet layout.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The canvas has a non-positive (or non-finite) width or height.
    #[error("invalid canvas size {width}x{height}: both dimensions must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Layout was requested for zero facets.
    ///
    /// Callers lay out a single placeholder facet for "no data".
    #[error("facet layout needs at least one facet")]
    DegenerateFacetCount,
}

/// A width/height pair used by facet layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub(crate) fn validate(self) -> Result<Self, LayoutError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(LayoutError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Placement of one facet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacetGeometry {
    /// Position of the facet in its sibling order.
    pub index: usize,
    /// Zero-based grid row.
    pub row: usize,
    /// Zero-based grid column.
    pub col: usize,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Facet width.
    pub width: f64,
    /// Facet height.
    pub height: f64,
}

impl FacetGeometry {
    /// A single facet covering `rect`.
    pub fn covering(rect: Rect) -> Self {
        Self {
            index: 0,
            row: 0,
            col: 0,
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// The facet box as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The facet size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns this geometry translated by `origin`.
    #[must_use]
    pub fn offset(mut self, origin: Point) -> Self {
        self.x += origin.x;
        self.y += origin.y;
        self
    }
}

/// The grid shape chosen for a flow facet layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowGrid {
    /// Number of facets.
    pub count: usize,
    /// Canvas size.
    pub size: Size,
    /// Width:height ratio used to shape the grid, floored to a whole number (or its inverse
    /// for tall canvases).
    pub aspect_ratio: f64,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl FlowGrid {
    /// Chooses rows and columns for `count` facets on a canvas of `size`.
    ///
    /// Wide canvases get `ceil(count / ratio)` rows for `ratio = floor(width / height)`. When
    /// there are fewer facets than the ratio, all of them share a single row across the full
    /// width.
    pub fn new(count: usize, size: Size) -> Result<Self, LayoutError> {
        let size = size.validate()?;
        if count == 0 {
            return Err(LayoutError::DegenerateFacetCount);
        }

        let aspect_ratio = aspect_ratio(size);
        let n = count as f64;
        let (rows, cols) = if n < aspect_ratio {
            (1, count)
        } else {
            let rows = if aspect_ratio >= 1.0 {
                (n / aspect_ratio).ceil()
            } else {
                (aspect_ratio / n).ceil()
            };
            let rows = whole(rows).clamp(1, count);
            (rows, count.div_ceil(rows))
        };

        log::trace!(
            "flow grid for {count} facets on {}x{}: ratio {aspect_ratio}, {rows}x{cols}",
            size.width,
            size.height
        );
        Ok(Self {
            count,
            size,
            aspect_ratio,
            rows,
            cols,
        })
    }

    /// Size of a single facet cell.
    pub fn facet_size(&self) -> Size {
        Size::new(
            self.size.width / self.cols as f64,
            self.size.height / self.rows as f64,
        )
    }

    /// Placement of facet `index`, or `None` if it is out of range.
    pub fn geometry(&self, index: usize) -> Option<FacetGeometry> {
        if index >= self.count {
            return None;
        }
        let cell = self.facet_size();
        let row = index / self.cols;
        let col = index % self.cols;
        Some(FacetGeometry {
            index,
            row,
            col,
            x: col as f64 * cell.width,
            y: row as f64 * cell.height,
            width: cell.width,
            height: cell.height,
        })
    }

    /// Placements of all facets, in index order.
    pub fn geometries(&self) -> Vec<FacetGeometry> {
        (0..self.count).filter_map(|i| self.geometry(i)).collect()
    }
}

/// Lays out `count` flow facets on a canvas of `size`.
///
/// Same as [`FlowGrid::new`] followed by [`FlowGrid::geometries`].
pub fn flow_layout(count: usize, size: Size) -> Result<Vec<FacetGeometry>, LayoutError> {
    Ok(FlowGrid::new(count, size)?.geometries())
}

/// Lays out a fixed `rows x cols` facet grid on a canvas of `size`, in row-major order.
///
/// Every row gets an equal share of the height and every column an equal share of the
/// width.
pub fn grid_layout(
    rows: usize,
    cols: usize,
    size: Size,
) -> Result<Vec<FacetGeometry>, LayoutError> {
    let size = size.validate()?;
    if rows == 0 || cols == 0 {
        return Err(LayoutError::DegenerateFacetCount);
    }
    let width = size.width / cols as f64;
    let height = size.height / rows as f64;

    let mut out = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            out.push(FacetGeometry {
                index: row * cols + col,
                row,
                col,
                x: col as f64 * width,
                y: row as f64 * height,
                width,
                height,
            });
        }
    }
    Ok(out)
}

/// Whole-number width:height ratio, or the inverse of the whole height:width ratio on tall
/// canvases. Quotients that overflow stay infinite (and their inverse zero), so extreme
/// canvases still fall into the single-row rule.
fn aspect_ratio(size: Size) -> f64 {
    if size.width >= size.height {
        (size.width / size.height).floor()
    } else {
        1.0 / (size.height / size.width).floor()
    }
}

fn whole(v: f64) -> usize {
    if v.is_finite() && v >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "v is a finite, non-negative whole number from ceil"
        )]
        {
            v as usize
        }
    } else {
        0
    }
}
