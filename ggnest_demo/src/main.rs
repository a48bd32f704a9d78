// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Facet partitioning demos for `GGNest`.
//!
//! Each demo partitions a small sales dataset with a JSON partition spec, logs the resulting
//! tree, arranges the facets on a canvas and writes the facet frames to an SVG file.
//!
//! Run with `RUST_LOG=debug` to see the partitioning and layout passes.

mod svg;

use std::error::Error;

use ggnest_charts::arrange_facets;
use ggnest_core::{Dataset, NamedDataset, Record};
use ggnest_transforms::{NodeContent, NodeKey, PartitionNode, PartitionSpec, PartitionTree};
use kurbo::Rect;
use log::info;

const DEMOS: [(&str, &str); 3] = [
    (
        "flow_by_country",
        r#"[{"kind": "flow", "field": "country"}, {"kind": "group", "field": "product"}, {"kind": "leaf"}]"#,
    ),
    (
        "grid_year_by_region",
        r#"[{"kind": "grid", "fieldX": "dataset", "fieldY": "region"}, {"kind": "group", "field": "product"}]"#,
    ),
    (
        "grid_then_flow",
        r#"[{"kind": "grid", "fieldX": "dataset", "fieldY": "region"}, {"kind": "flow", "field": "country"}]"#,
    ),
];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let dataset = sales();
    info!("loaded {} records", dataset.len());

    let view = Rect::new(0.0, 0.0, 640.0, 320.0);
    for (name, spec_json) in DEMOS {
        let spec: PartitionSpec = serde_json::from_str(spec_json)?;
        let tree = PartitionTree::build(&dataset, &spec)?;
        info!(
            "{name}: {} leaves, {} records",
            tree.leaf_count(),
            tree.record_count()
        );
        for node in tree.nodes() {
            log_node(node, 1);
        }

        let panels = arrange_facets(&tree, view)?;
        let mut frames = svg::SvgFrames::default();
        frames.set_view_box(view);
        for panel in &panels {
            frames.push_panel(panel);
        }

        let path = format!("ggnest_demo_{name}.svg");
        std::fs::write(&path, frames.to_svg_string())?;
        println!("wrote {path} ({} facets)", panels.len());
    }
    Ok(())
}

fn log_node(node: &PartitionNode<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = match node.key() {
        NodeKey::Ungrouped => "*".to_string(),
        NodeKey::Value(k) => k.to_string(),
        NodeKey::Cell { row, col } => format!("({row}, {col})"),
    };
    match node.content() {
        NodeContent::Branch(children) => {
            info!("{indent}{label} [level {}]", node.level());
            for child in children {
                log_node(child, depth + 1);
            }
        }
        NodeContent::Leaf(records) => info!("{indent}{label}: {} records", records.len()),
    }
}

fn records(rows: &[(&str, &str, &str, i32)]) -> Vec<Record> {
    rows.iter()
        .map(|&(country, region, product, units)| {
            Record::new()
                .with("country", country)
                .with("region", region)
                .with("product", product)
                .with("units", units)
        })
        .collect()
}

fn sales() -> Dataset {
    let this_year = records(&[
        ("US", "Americas", "widgets", 12),
        ("US", "Americas", "gadgets", 7),
        ("CA", "Americas", "widgets", 4),
        ("DE", "Europe", "widgets", 9),
        ("FR", "Europe", "gadgets", 3),
        ("JP", "Asia", "gadgets", 11),
    ]);
    let mut last_year = records(&[
        ("US", "Americas", "widgets", 10),
        ("DE", "Europe", "gadgets", 5),
        ("JP", "Asia", "widgets", 8),
    ]);
    // No region: lands in the "undefined" grid row.
    last_year.push(Record::new().with("country", "BR").with("product", "widgets"));

    Dataset::join([
        NamedDataset {
            name: Some("2024".into()),
            records: last_year,
        },
        NamedDataset {
            name: Some("2025".into()),
            records: this_year,
        },
    ])
}
