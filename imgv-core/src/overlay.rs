//! Placement rules for the coordinate labels drawn around a selection.

use crate::geometry::VisualRect;

/// Share of the image height next to the top and bottom edges where a label
/// drawn outside the box would be clipped.
pub const EDGE_MARGIN: f64 = 0.1;

/// Where a corner label is drawn relative to the selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    Inside,
    Outside,
}

/// Placement of the label showing the top-left corner.
///
/// Normally drawn above the box; moves inside when the box starts within the
/// top margin of the image.
pub fn start_label(visual: &VisualRect, image_height: f64) -> LabelPlacement {
    if visual.top / image_height < EDGE_MARGIN {
        LabelPlacement::Inside
    } else {
        LabelPlacement::Outside
    }
}

/// Placement of the label showing the bottom-right corner.
///
/// Normally drawn below the box; moves inside when the box ends within the
/// bottom margin of the image.
pub fn end_label(visual: &VisualRect, image_height: f64) -> LabelPlacement {
    if visual.bottom / image_height > 1.0 - EDGE_MARGIN {
        LabelPlacement::Inside
    } else {
        LabelPlacement::Outside
    }
}
