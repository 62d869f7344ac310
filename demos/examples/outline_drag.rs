// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and drop in a text outline, driven by simulated pointer events.
//!
//! This example shows how to combine:
//! - a [`Tree`] loaded from JSON,
//! - a fixed-height row layout for hit testing,
//! - [`DropZones`] to turn pointer positions into drop positions,
//! - [`DragController`] to run the gesture and produce the next snapshot.
//!
//! Set `RUST_LOG=trace` to see the controller's transitions.
//!
//! Run:
//! - `cargo run -p understory_outline_demos --example outline_drag`

use kurbo::Point;
use understory_outline::{DragController, DropOutcome, DropZones, HoverFeedback, Tree};
use understory_outline_demos::{RowLayout, render_outline};

const OUTLINE: &str = r#"[
    {"id": "inbox", "title": "Inbox", "children": [
        {"id": "draft", "title": "Draft"},
        {"id": "sent", "title": "Sent"}
    ]},
    {"id": "archive", "title": "Archive", "children": [
        {"id": "2024", "title": "2024", "expanded": false, "children": [
            {"id": "old", "title": "Old thread"}
        ]}
    ]},
    {"id": "trash", "title": "Trash"}
]"#;

const ROW_HEIGHT: f64 = 20.0;
const INDENT: f64 = 16.0;
const WIDTH: f64 = 240.0;

/// Press at `from`, move to `to`, release.
fn drag(tree: &Tree, zones: &DropZones, from: Point, to: Point) -> DropOutcome {
    let layout = RowLayout::new(tree, ROW_HEIGHT, INDENT, WIDTH);
    let mut controller = DragController::new();

    let Some((source, _)) = layout.hit(from) else {
        println!("  press at {from:?} hit no row");
        return DropOutcome::Ignored;
    };
    controller.begin_drag_at(tree, source);

    match layout.hit(to) {
        Some((target, rect)) => {
            let feedback = controller.update_hover_at(target.clone(), rect, to, zones);
            if let Some(hover) = controller.hover() {
                let marker = match feedback {
                    Some(HoverFeedback::Accepted) => "ok",
                    _ => "no",
                };
                println!(
                    "  hover {:?} {} [{marker}]",
                    hover.position,
                    tree.locate(&hover.target).map_or("?", |node| node.label())
                );
            }
        }
        None => controller.clear_hover(),
    }
    controller.commit(tree)
}

/// Center of the `index`-th visible row, offset vertically by `dy`.
fn row_point(index: usize, dy: f64) -> Point {
    Point::new(WIDTH / 2.0, index as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0 + dy)
}

fn report(step: &str, outcome: DropOutcome, tree: Tree) -> Tree {
    match &outcome {
        DropOutcome::Moved(_) => println!("{step}: moved"),
        DropOutcome::Rejected(reason) => println!("{step}: rejected ({reason})"),
        DropOutcome::Ignored => println!("{step}: ignored"),
    }
    let next = outcome.into_tree(tree);
    print!("{}", render_outline(&next));
    println!();
    next
}

fn main() {
    env_logger::init();

    let tree: Tree = match serde_json::from_str(OUTLINE) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("invalid outline: {err}");
            return;
        }
    };
    if let Err(err) = tree.validate() {
        eprintln!("invalid outline: {err}");
        return;
    }
    log::info!("loaded outline with {} nodes", tree.node_count());
    println!("initial:");
    print!("{}", render_outline(&tree));
    println!();

    let zones = DropZones::default();

    // Rows: 0 Inbox, 1 Draft, 2 Sent, 3 Archive, 4 2024, 5 Trash.
    // Draft onto the middle of Archive: becomes Archive's first child.
    let outcome = drag(&tree, &zones, row_point(1, 0.0), row_point(3, 0.0));
    let tree = report("Draft inside Archive", outcome, tree);

    // Rows: 0 Inbox, 1 Sent, 2 Archive, 3 Draft, 4 2024, 5 Trash.
    // Trash onto the top edge of Inbox: becomes the first root.
    let outcome = drag(&tree, &zones, row_point(5, 0.0), row_point(0, -8.0));
    let tree = report("Trash before Inbox", outcome, tree);

    // Rows: 0 Trash, 1 Inbox, 2 Sent, 3 Archive, 4 Draft, 5 2024.
    // Archive into its own child: rejected, the tree is unchanged.
    let outcome = drag(&tree, &zones, row_point(3, 0.0), row_point(4, 0.0));
    let tree = report("Archive inside Draft", outcome, tree);

    // Sent below the last row: no drop target, nothing happens.
    let outcome = drag(&tree, &zones, row_point(2, 0.0), row_point(20, 0.0));
    let tree = report("Sent into empty space", outcome, tree);

    // A gesture that is abandoned half way never touches the tree.
    let layout = RowLayout::new(&tree, ROW_HEIGHT, INDENT, WIDTH);
    let mut controller = DragController::new();
    if let Some((source, _)) = layout.hit(row_point(1, 0.0)) {
        controller.begin_drag_at(&tree, source);
    }
    if let Some((target, rect)) = layout.hit(row_point(0, 0.0)) {
        let point = row_point(0, 0.0);
        controller.update_hover_at(target.clone(), rect, point, &zones);
    }
    controller.cancel();
    let outcome = controller.commit(&tree);
    report("cancelled drag", outcome, tree);
}
