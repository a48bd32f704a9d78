// Copyright 2025 the GGNest Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of facet frames for `ggnest_demo`.
//!
//! Only the facet boxes and their labels are drawn; marks are left to a real renderer.

use ggnest_charts::FacetPanel;
use ggnest_transforms::NodeKey;
use kurbo::Rect;

#[derive(Debug, Default)]
pub(crate) struct SvgFrames {
    view_box: Option<Rect>,
    frames: Vec<Frame>,
}

#[derive(Debug)]
struct Frame {
    rect: Rect,
    label: String,
    records: usize,
}

impl SvgFrames {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn push_panel(&mut self, panel: &FacetPanel<'_, '_>) {
        self.frames.push(Frame {
            rect: panel.geometry.rect(),
            label: panel_label(&panel.path),
            records: panel.record_count(),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let (w, h) = (view_box.width(), view_box.height());
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {w} {h}" width="{w}" height="{h}">"#,
            view_box.x0, view_box.y0
        ));
        out.push('\n');

        for frame in &self.frames {
            let r = frame.rect;
            let label = escape_xml(&frame.label);
            out.push_str(&format!(
                r#"<g class="facet" data-key="{label}" transform="translate({},{})">"#,
                r.x0, r.y0
            ));
            out.push('\n');
            out.push_str(&format!(
                r##"<rect width="{}" height="{}" fill="none" stroke="#999999"/>"##,
                r.width(),
                r.height()
            ));
            out.push('\n');
            out.push_str(&format!(
                r#"<text x="4" y="14" font-size="11">{label} ({} rows)</text>"#,
                frame.records
            ));
            out.push_str("\n</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn panel_label(path: &[NodeKey]) -> String {
    if path.is_empty() {
        return "all".to_string();
    }
    path.iter()
        .map(|key| match key {
            NodeKey::Ungrouped => "all".to_string(),
            NodeKey::Value(k) => k.to_string(),
            NodeKey::Cell { row, col } => format!("{row} / {col}"),
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn escape_xml(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use ggnest_core::Key;

    use super::*;

    #[test]
    fn frames_are_written_as_labelled_groups() {
        let mut frames = SvgFrames::default();
        frames.set_view_box(Rect::new(0.0, 0.0, 200.0, 100.0));
        frames.frames.push(Frame {
            rect: Rect::new(100.0, 0.0, 200.0, 50.0),
            label: panel_label(&[NodeKey::Value(Key::from("R&D"))]),
            records: 2,
        });

        let svg = frames.to_svg_string();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"<g class="facet" data-key="R&amp;D" transform="translate(100,0)">"#));
        assert!(svg.contains("R&amp;D (2 rows)</text>\n</g>\n"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn labels_join_the_facet_path() {
        let path = [
            NodeKey::Cell {
                row: Key::Missing,
                col: Key::from("2024"),
            },
            NodeKey::Value(Key::from(3.0)),
        ];
        assert_eq!(panel_label(&path), "undefined / 2024 > 3");
        assert_eq!(panel_label(&[]), "all");
        assert_eq!(escape_xml(r#"<a b='c'>"#), "&lt;a b=&apos;c&apos;&gt;");
    }
}
