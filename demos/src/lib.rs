// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the outline demos: a text renderer and a fixed-height row layout.
//!
//! These stand in for the presentation layer that a real toolkit would provide.

use std::fmt::Write as _;

use kurbo::{Point, Rect};
use understory_outline::{Address, Tree};

/// Render the visible rows of `tree` as an indented text outline.
///
/// Collapsed nodes with children are marked `▸`, expanded ones `▾`.
pub fn render_outline(tree: &Tree) -> String {
    let mut out = String::new();
    for row in tree.visible_rows() {
        let marker = match (row.node.is_leaf(), row.node.is_expanded()) {
            (true, _) => ' ',
            (false, true) => '▾',
            (false, false) => '▸',
        };
        let _ = writeln!(
            out,
            "{:indent$}{marker} {} ({})",
            "",
            row.node.label(),
            row.node.id(),
            indent = row.depth() * 2
        );
    }
    out
}

/// Fixed-height layout of the visible rows, top to bottom.
#[derive(Clone, Debug)]
pub struct RowLayout {
    rows: Vec<(Address, Rect)>,
}

impl RowLayout {
    /// Lay out the visible rows of `tree` at `row_height`, indenting each level by
    /// `indent`, inside a view `width` wide.
    pub fn new(tree: &Tree, row_height: f64, indent: f64, width: f64) -> Self {
        let rows = tree
            .visible_rows()
            .enumerate()
            .map(|(i, row)| {
                let y0 = i as f64 * row_height;
                let x0 = row.depth() as f64 * indent;
                (row.address, Rect::new(x0, y0, width, y0 + row_height))
            })
            .collect();
        Self { rows }
    }

    /// The row under `point`, if any.
    pub fn hit(&self, point: Point) -> Option<(&Address, Rect)> {
        self.rows
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(address, rect)| (address, *rect))
    }

    /// Bounds of the row laid out for `address`.
    pub fn rect_of(&self, address: &Address) -> Option<Rect> {
        self.rows
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, rect)| *rect)
    }

    /// Number of laid out rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows were laid out.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use understory_outline::{DropPosition, Node};

    fn sample() -> Tree {
        Tree::new(vec![
            Node::new("1", "Parent").with_children(vec![
                Node::new("1-1", "First"),
                Node::new("1-2", "Second"),
            ]),
            Node::new("2", "Closed")
                .with_children(vec![Node::new("2-1", "Hidden")])
                .with_expanded(false),
        ])
    }

    #[test]
    fn renders_visible_rows() {
        assert_eq!(
            render_outline(&sample()),
            "▾ Parent (1)\n    First (1-1)\n    Second (1-2)\n▸ Closed (2)\n"
        );
    }

    #[test]
    fn layout_hits_rows() {
        let layout = RowLayout::new(&sample(), 20.0, 16.0, 200.0);
        assert_eq!(layout.len(), 4);
        let (address, rect) = layout.hit(Point::new(50.0, 25.0)).unwrap();
        assert_eq!(address, &Address::from([0, 0]));
        assert_eq!(rect, Rect::new(16.0, 20.0, 200.0, 40.0));
        assert!(layout.hit(Point::new(50.0, 80.0)).is_none());
        assert_eq!(layout.rect_of(&Address::root(1)), Some(Rect::new(0.0, 60.0, 200.0, 80.0)));
    }

    #[test]
    fn json_round_trip_accepts_title_and_defaults() {
        let tree: Tree = serde_json::from_str(
            r#"[{"id": "1", "title": "Parent", "children": [{"id": "1-1", "label": "A"}]}]"#,
        )
        .unwrap();
        assert_eq!(tree.roots()[0].label(), "Parent");
        assert!(tree.roots()[0].is_expanded());
        assert!(tree.roots()[0].children()[0].is_leaf());

        let json = serde_json::to_string(&tree).unwrap();
        let back: Tree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn drop_position_and_address_serialize_as_plain_values() {
        assert_eq!(
            serde_json::to_string(&DropPosition::Inside).unwrap(),
            "\"inside\""
        );
        assert_eq!(serde_json::to_string(&Address::from([0, 2])).unwrap(), "[0,2]");
    }
}
