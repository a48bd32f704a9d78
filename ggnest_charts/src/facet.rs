// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The facet arrange pass: assigns a canvas box to every facet of a partition tree.
//!
//! Facet levels nest: each `Flow` or `Grid` level subdivides the box of its parent facet.
//! `Group` and `Leaf` levels share their facet's box, so the pass stops descending at the
//! first non-facet level and emits one [`FacetPanel`] per innermost facet.

extern crate alloc;

use alloc::vec::Vec;

use ggnest_core::Key;
use ggnest_transforms::{Level, LevelKind, NodeKey, PartitionNode, PartitionSpec, PartitionTree};
use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::layout::{FacetGeometry, FlowGrid, LayoutError, Size, grid_layout};

/// One innermost facet: where it goes, and what it draws.
#[derive(Clone, Debug, PartialEq)]
pub struct FacetPanel<'t, 'a> {
    /// Keys of the facet nodes leading to this panel, outermost first.
    ///
    /// Empty for the single placeholder panel of a tree with no facet levels.
    pub path: Vec<NodeKey>,
    /// Placement in canvas coordinates. `index`, `row` and `col` are relative to the
    /// innermost facet level.
    pub geometry: FacetGeometry,
    /// The partitions drawn inside this panel (groups or leaves).
    pub nodes: &'t [PartitionNode<'a>],
}

impl FacetPanel<'_, '_> {
    /// Number of records drawn inside this panel.
    pub fn record_count(&self) -> usize {
        self.nodes.iter().map(PartitionNode::record_count).sum()
    }
}

/// Assigns a box inside `view` to every innermost facet of `tree`.
///
/// A tree without facet levels yields one placeholder panel covering `view`, so callers
/// always have at least one panel to draw into.
pub fn arrange_facets<'t, 'a>(
    tree: &'t PartitionTree<'a>,
    view: Rect,
) -> Result<Vec<FacetPanel<'t, 'a>>, LayoutError> {
    Size::new(view.width(), view.height()).validate()?;

    let mut panels = Vec::new();
    let mut path = Vec::new();
    arrange_level(
        tree.nodes(),
        tree.spec(),
        FacetGeometry::covering(view),
        &mut path,
        &mut panels,
    )?;
    log::debug!(
        "arranged {} facet panels in {}x{}",
        panels.len(),
        view.width(),
        view.height()
    );
    Ok(panels)
}

fn facet_kind(nodes: &[PartitionNode<'_>], spec: &PartitionSpec) -> Option<LevelKind> {
    let first = nodes.first().filter(|n| !n.is_leaf())?;
    spec.level(first.level())
        .map(Level::kind)
        .filter(|kind| kind.is_facet())
}

fn arrange_level<'t, 'a>(
    nodes: &'t [PartitionNode<'a>],
    spec: &PartitionSpec,
    cell: FacetGeometry,
    path: &mut Vec<NodeKey>,
    panels: &mut Vec<FacetPanel<'t, 'a>>,
) -> Result<(), LayoutError> {
    let origin = Point::new(cell.x, cell.y);
    let boxes = match facet_kind(nodes, spec) {
        Some(LevelKind::Flow) => FlowGrid::new(nodes.len(), cell.size())?.geometries(),
        Some(LevelKind::Grid) => grid_cells(nodes, cell.size())?,
        _ => {
            panels.push(FacetPanel {
                path: path.clone(),
                geometry: cell,
                nodes,
            });
            return Ok(());
        }
    };

    for (node, geometry) in nodes.iter().zip(boxes) {
        path.push(node.key().clone());
        arrange_level(
            node.children(),
            spec,
            geometry.offset(origin),
            path,
            panels,
        )?;
        path.pop();
    }
    Ok(())
}

/// Places grid cells by the first-occurrence order of their row and column keys.
///
/// Returns one geometry per node, aligned with `nodes`. Row/column combinations that have no
/// node stay empty.
fn grid_cells(
    nodes: &[PartitionNode<'_>],
    size: Size,
) -> Result<Vec<FacetGeometry>, LayoutError> {
    let mut rows: HashMap<&Key, usize> = HashMap::new();
    let mut cols: HashMap<&Key, usize> = HashMap::new();
    let mut positions = Vec::with_capacity(nodes.len());
    for node in nodes {
        let NodeKey::Cell { row, col } = node.key() else {
            continue;
        };
        let next_row = rows.len();
        let r = *rows.entry(row).or_insert(next_row);
        let next_col = cols.len();
        let c = *cols.entry(col).or_insert(next_col);
        positions.push((r, c));
    }

    let n_cols = cols.len();
    let cells = grid_layout(rows.len(), n_cols, size)?;
    log::trace!(
        "grid facets: {} rows x {n_cols} cols for {} cells",
        rows.len(),
        positions.len()
    );
    Ok(positions
        .into_iter()
        .map(|(r, c)| cells[r * n_cols + c])
        .collect())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use ggnest_core::Record;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        a - b < 1e-9 && b - a < 1e-9
    }

    #[test]
    fn no_facet_levels_yield_one_placeholder_panel() {
        let records = vec![Record::new().with("series", "a")];
        let spec = PartitionSpec::new(vec![Level::group("series")]);
        let tree = PartitionTree::build(&records, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(10.0, 20.0, 110.0, 70.0)).unwrap();

        assert_eq!(panels.len(), 1);
        assert!(panels[0].path.is_empty());
        assert_eq!(panels[0].geometry.rect(), Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(panels[0].nodes.len(), 1);
        assert_eq!(panels[0].record_count(), 1);
    }

    #[test]
    fn empty_data_still_gets_a_panel() {
        let none: [Record; 0] = [];
        let spec = PartitionSpec::new(vec![Level::flow("country")]);
        let tree = PartitionTree::build(&none, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(0.0, 0.0, 300.0, 150.0)).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].record_count(), 0);
    }

    #[test]
    fn flow_facets_follow_the_flow_grid() {
        let records: Vec<Record> = (0..6).map(|i| Record::new().with("f", i)).collect();
        let spec = PartitionSpec::new(vec![Level::flow("f"), Level::Leaf]);
        let tree = PartitionTree::build(&records, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(0.0, 0.0, 300.0, 150.0)).unwrap();

        assert_eq!(panels.len(), 6);
        let p = &panels[4];
        assert_eq!(p.path, [NodeKey::Value(Key::from(4.0))]);
        assert_eq!((p.geometry.row, p.geometry.col), (2, 0));
        assert!(approx(p.geometry.y, 100.0));
        assert!(approx(p.geometry.width, 150.0));
        assert!(approx(p.geometry.height, 50.0));
        assert_eq!(p.record_count(), 1);
    }

    #[test]
    fn grid_cells_are_placed_by_key_domains() {
        let records = vec![
            Record::new().with("x", "a").with("y", "top"),
            Record::new().with("x", "b").with("y", "bottom"),
            Record::new().with("x", "b").with("y", "top"),
        ];
        let spec = PartitionSpec::new(vec![Level::grid("x", "y")]);
        let tree = PartitionTree::build(&records, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();

        // 2x2 grid with the ("bottom", "a") cell left empty.
        assert_eq!(panels.len(), 3);
        let bottom_b = &panels[1];
        assert_eq!((bottom_b.geometry.row, bottom_b.geometry.col), (1, 1));
        assert_eq!(
            bottom_b.geometry.rect(),
            Rect::new(100.0, 50.0, 200.0, 100.0)
        );
        let top_b = &panels[2];
        assert_eq!((top_b.geometry.row, top_b.geometry.col), (0, 1));
    }

    #[test]
    fn nested_facets_subdivide_their_parent() {
        let records = vec![
            Record::new().with("y", "r0").with("x", "c0").with("f", 1),
            Record::new().with("y", "r0").with("x", "c0").with("f", 2),
            Record::new().with("y", "r1").with("x", "c0").with("f", 1),
        ];
        let spec = PartitionSpec::new(vec![
            Level::grid("x", "y"),
            Level::flow("f"),
            Level::group("series"),
        ]);
        let tree = PartitionTree::build(&records, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(0.0, 0.0, 400.0, 200.0)).unwrap();

        // Two grid rows of 400x100; the first holds two flow facets side by side.
        assert_eq!(panels.len(), 3);
        assert_eq!(panels[0].geometry.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(panels[1].geometry.rect(), Rect::new(200.0, 0.0, 400.0, 100.0));
        assert_eq!(panels[2].geometry.rect(), Rect::new(0.0, 100.0, 400.0, 200.0));
        assert_eq!(panels[1].path.len(), 2);
        assert!(panels.iter().all(|p| p.nodes.len() == 1));
    }

    #[test]
    fn empty_view_is_rejected() {
        let records = [Record::new()];
        let tree = PartitionTree::build(&records, &PartitionSpec::default()).unwrap();
        assert!(matches!(
            arrange_facets(&tree, Rect::new(0.0, 0.0, 0.0, 10.0)),
            Err(LayoutError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            arrange_facets(&tree, Rect::new(0.0, 0.0, f64::INFINITY, 1.0)),
            Err(LayoutError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn facets_under_a_group_never_reach_layout() {
        let records: Vec<Record> = (0..4)
            .map(|i| Record::new().with("g", "a").with("f", i))
            .collect();
        let spec = PartitionSpec::new(vec![Level::group("g"), Level::flow("f")]);
        assert!(PartitionTree::build(&records, &spec).is_err());

        // The same split with the facet level first gets one panel per flow facet.
        let spec = PartitionSpec::new(vec![Level::flow("f"), Level::group("g")]);
        let tree = PartitionTree::build(&records, &spec).unwrap();
        let panels = arrange_facets(&tree, Rect::new(0.0, 0.0, 300.0, 150.0)).unwrap();
        assert_eq!(panels.len(), 4);
    }
}
