// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer position → drop position.
//!
//! An outline row is split into horizontal bands. With the default configuration the
//! top quarter means "before this row", the bottom quarter "after this row", and the
//! middle "inside this row":
//!
//! ```text
//! y0 ┌──────────────────────┐
//!    │ Before               │  edge_fraction
//!    ├──────────────────────┤
//!    │ Inside               │
//!    ├──────────────────────┤
//!    │ After                │  edge_fraction
//! y1 └──────────────────────┘
//! ```
//!
//! Rows are expected in the same coordinate space as the pointer, typically the world
//! space of whatever the presentation layer used to lay the rows out.

use kurbo::{Point, Rect};

use crate::{Address, DragController, DropPosition, HoverFeedback};

/// Band layout for classifying pointer positions over a row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropZones {
    /// Fraction of the row height, at the top and at the bottom, that selects
    /// [`DropPosition::Before`] and [`DropPosition::After`].
    ///
    /// Clamped to `0.0..=0.5`. At `0.5` the inside band disappears.
    pub edge_fraction: f64,
    /// Whether the middle band selects [`DropPosition::Inside`].
    ///
    /// When `false` the row is split in two halves, before and after, for targets that
    /// cannot take children.
    pub allow_inside: bool,
}

impl Default for DropZones {
    fn default() -> Self {
        Self {
            edge_fraction: 0.25,
            allow_inside: true,
        }
    }
}

impl DropZones {
    /// Zones that never produce [`DropPosition::Inside`].
    pub fn siblings_only() -> Self {
        Self {
            allow_inside: false,
            ..Self::default()
        }
    }

    /// Classify `point` against `row`.
    ///
    /// Returns `None` if the point is outside the row (the row's bottom and right edges
    /// are exclusive) or the row has no height.
    pub fn classify(&self, row: Rect, point: Point) -> Option<DropPosition> {
        // Also rules out rows with no height.
        if !row.contains(point) {
            return None;
        }
        let t = (point.y - row.y0) / row.height();
        let edge = if self.allow_inside {
            self.edge_fraction.clamp(0.0, 0.5)
        } else {
            0.5
        };
        Some(if t < edge {
            DropPosition::Before
        } else if t >= 1.0 - edge {
            DropPosition::After
        } else {
            DropPosition::Inside
        })
    }
}

impl DragController {
    /// Hover the row of `target`, laid out at `row`, with the pointer at `point`.
    ///
    /// Classifies the pointer with `zones` and forwards to
    /// [`update_hover`](Self::update_hover). If the pointer is not over the row the hover
    /// is cleared and `None` is returned.
    pub fn update_hover_at(
        &mut self,
        target: Address,
        row: Rect,
        point: Point,
        zones: &DropZones,
    ) -> Option<HoverFeedback> {
        match zones.classify(row, point) {
            Some(position) => self.update_hover(target, position),
            None => {
                self.clear_hover();
                None
            }
        }
    }
}
