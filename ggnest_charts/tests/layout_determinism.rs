// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Determinism and tiling properties of flow layout.

use ggnest_charts::{FlowGrid, Size, flow_layout};
use proptest::prelude::*;

proptest! {
    #[test]
    fn layout_is_idempotent(
        count in 1_usize..64,
        width in 1.0_f64..2000.0,
        height in 1.0_f64..2000.0,
    ) {
        let size = Size::new(width, height);
        let a = flow_layout(count, size).unwrap();
        let b = flow_layout(count, size).unwrap();
        prop_assert_eq!(a.len(), count);
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.x.to_bits(), y.x.to_bits());
            prop_assert_eq!(x.y.to_bits(), y.y.to_bits());
            prop_assert_eq!(x.width.to_bits(), y.width.to_bits());
            prop_assert_eq!(x.height.to_bits(), y.height.to_bits());
        }
    }

    #[test]
    fn facets_stay_inside_the_canvas(
        count in 1_usize..64,
        width in 1.0_f64..2000.0,
        height in 1.0_f64..2000.0,
    ) {
        let grid = FlowGrid::new(count, Size::new(width, height)).unwrap();
        prop_assert!(grid.rows * grid.cols >= count);
        for (i, g) in grid.geometries().into_iter().enumerate() {
            prop_assert_eq!(g.index, i);
            prop_assert!(g.row < grid.rows && g.col < grid.cols);
            prop_assert!(g.x + g.width <= width + 1e-6);
            prop_assert!(g.y + g.height <= height + 1e-6);
        }
    }
}

#[test]
fn spec_example_places_facet_four() {
    let grid = FlowGrid::new(6, Size::new(300.0, 150.0)).unwrap();
    assert_eq!((grid.rows, grid.cols), (3, 2));
    let g = grid.geometries()[4];
    assert_eq!((g.row, g.col), (2, 0));
    assert_eq!((g.x, g.y, g.width, g.height), (0.0, 100.0, 150.0, 50.0));
}
