// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The partition tree and the recursive partitioning pass.

extern crate alloc;

use alloc::vec::Vec;

use ggnest_core::{Key, Record};
use hashbrown::HashSet;

use crate::select::{CellSelector, FieldSelector, group_by};
use crate::spec::{Level, PartitionError, PartitionSpec};

/// The key a [`PartitionNode`] was split on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// No grouping field applies; used by leaf nodes.
    Ungrouped,
    /// The key of a `Flow` or `Group` level.
    Value(Key),
    /// The `(row, col)` keys of a `Grid` level.
    Cell {
        /// Key of the row (y) field.
        row: Key,
        /// Key of the column (x) field.
        col: Key,
    },
}

/// Either the child partitions of a node, or the records of a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent<'a> {
    /// Child partitions, in first-occurrence order.
    Branch(Vec<PartitionNode<'a>>),
    /// The records of this partition, in input order.
    Leaf(Vec<&'a Record>),
}

/// A node of the partition tree.
///
/// Nodes borrow the input records and are read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionNode<'a> {
    key: NodeKey,
    level: usize,
    content: NodeContent<'a>,
}

impl<'a> PartitionNode<'a> {
    fn leaf(level: usize, records: Vec<&'a Record>) -> Self {
        Self {
            key: NodeKey::Ungrouped,
            level,
            content: NodeContent::Leaf(records),
        }
    }

    /// The key this node was split on.
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Index of the spec level this node belongs to.
    ///
    /// For leaves this is one past the last grouping level above them.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The node's children or records.
    pub fn content(&self) -> &NodeContent<'a> {
        &self.content
    }

    /// Returns `true` for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf(_))
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Self] {
        match &self.content {
            NodeContent::Branch(children) => children,
            NodeContent::Leaf(_) => &[],
        }
    }

    /// Leaf records; `None` for branch nodes.
    pub fn records(&self) -> Option<&[&'a Record]> {
        match &self.content {
            NodeContent::Branch(_) => None,
            NodeContent::Leaf(records) => Some(records),
        }
    }

    /// Iterates the leaves under (and including) this node, depth first.
    pub fn leaves(&self) -> Leaves<'_, 'a> {
        Leaves {
            stack: alloc::vec![self],
        }
    }

    /// Total number of records under this node.
    pub fn record_count(&self) -> usize {
        self.leaves()
            .filter_map(Self::records)
            .map(<[_]>::len)
            .sum()
    }
}

/// Depth-first iterator over leaf nodes, in tree order.
#[derive(Debug, Clone)]
pub struct Leaves<'t, 'a> {
    stack: Vec<&'t PartitionNode<'a>>,
}

impl<'t, 'a> Iterator for Leaves<'t, 'a> {
    type Item = &'t PartitionNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &node.content {
                NodeContent::Leaf(_) => return Some(node),
                NodeContent::Branch(children) => self.stack.extend(children.iter().rev()),
            }
        }
        None
    }
}

/// Partitions `records` by the levels of `spec`, starting at `level_index`.
///
/// Returns the nodes of `level_index`:
/// - past the last level, or at a [`Level::Leaf`], a single leaf node holding all `records`
///   (even when there are none);
/// - otherwise one node per distinct key, in first-occurrence order, each partitioned
///   recursively by the following levels.
///
/// The spec is validated first; on error no tree is built.
pub fn partition<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    spec: &PartitionSpec,
    level_index: usize,
) -> Result<Vec<PartitionNode<'a>>, PartitionError> {
    if let Err(err) = spec.validate() {
        log::debug!("rejecting partition spec: {err}");
        return Err(err);
    }
    Ok(nest(records.into_iter().collect(), spec, level_index))
}

fn nest<'a>(
    records: Vec<&'a Record>,
    spec: &PartitionSpec,
    level_index: usize,
) -> Vec<PartitionNode<'a>> {
    let Some(level) = spec.level(level_index) else {
        return alloc::vec![PartitionNode::leaf(level_index, records)];
    };

    let input_len = records.len();
    let nodes: Vec<PartitionNode<'a>> = match level {
        Level::Leaf => return alloc::vec![PartitionNode::leaf(level_index, records)],
        Level::Flow { field } | Level::Group { field } => {
            group_by(records, &FieldSelector::new(field.as_str()))
                .into_iter()
                .map(|g| PartitionNode {
                    key: NodeKey::Value(g.key),
                    level: level_index,
                    content: NodeContent::Branch(nest(g.records, spec, level_index + 1)),
                })
                .collect()
        }
        Level::Grid { field_x, field_y } => {
            // Both fields are present once the spec has been validated.
            let (Some(x), Some(y)) = (field_x, field_y) else {
                return alloc::vec![PartitionNode::leaf(level_index, records)];
            };
            let cells = CellSelector {
                x: FieldSelector::new(x.as_str()),
                y: FieldSelector::new(y.as_str()),
            };
            group_by(records, &cells)
                .into_iter()
                .map(|g| {
                    let (row, col) = g.key;
                    PartitionNode {
                        key: NodeKey::Cell { row, col },
                        level: level_index,
                        content: NodeContent::Branch(nest(g.records, spec, level_index + 1)),
                    }
                })
                .collect()
        }
    };

    log::trace!(
        "level {level_index} ({:?}): {} partitions from {input_len} records",
        level.kind(),
        nodes.len()
    );

    // Grouping an empty input yields no groups; keep the leaf-always-exists contract.
    if nodes.is_empty() {
        return alloc::vec![PartitionNode::leaf(level_index, Vec::new())];
    }
    nodes
}

/// A partitioned dataset: the top-level nodes under a synthetic root, plus the spec that
/// produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTree<'a> {
    spec: PartitionSpec,
    nodes: Vec<PartitionNode<'a>>,
}

impl<'a> PartitionTree<'a> {
    /// Validates `spec` and partitions `records` from the first level.
    pub fn build(
        records: impl IntoIterator<Item = &'a Record>,
        spec: &PartitionSpec,
    ) -> Result<Self, PartitionError> {
        let nodes = partition(records, spec, 0)?;
        let tree = Self {
            spec: spec.clone(),
            nodes,
        };
        log::debug!(
            "partitioned {} records into {} leaves over {} levels",
            tree.record_count(),
            tree.leaf_count(),
            tree.spec.len()
        );
        Ok(tree)
    }

    /// The spec the tree was built from.
    pub fn spec(&self) -> &PartitionSpec {
        &self.spec
    }

    /// The top-level nodes (children of the synthetic root).
    pub fn nodes(&self) -> &[PartitionNode<'a>] {
        &self.nodes
    }

    /// Iterates all leaves, depth first.
    pub fn leaves(&self) -> impl Iterator<Item = &PartitionNode<'a>> + '_ {
        self.nodes.iter().flat_map(PartitionNode::leaves)
    }

    /// Number of leaves; at least one.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Total number of records across all leaves.
    pub fn record_count(&self) -> usize {
        self.nodes.iter().map(PartitionNode::record_count).sum()
    }

    /// Distinct keys produced at `level`, in depth-first order of first appearance.
    ///
    /// This is the set of facet (or group) labels for that level across the whole tree.
    pub fn level_keys(&self, level: usize) -> Vec<&NodeKey> {
        let mut seen: HashSet<&NodeKey> = HashSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<&PartitionNode<'a>> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.level == level && !node.is_leaf() {
                if seen.insert(&node.key) {
                    out.push(&node.key);
                }
                continue;
            }
            stack.extend(node.children().iter().rev());
        }
        out
    }
}
