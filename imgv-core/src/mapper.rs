//! Translation of raw pointer events into image-space coordinates.

use crate::geometry::{ClientPoint, ImageGeometry, Point, ScreenPoint};

/// A single pointer sample delivered by the input surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// The primary mouse pointer.
    Mouse(ClientPoint),
    /// Active touch points in the order they went down. Only the first one is
    /// tracked; an empty list carries no usable position.
    Touch(Vec<ClientPoint>),
}

impl PointerEvent {
    /// The client position this event stands for, if any.
    pub fn client_point(&self) -> Option<ClientPoint> {
        let point = match self {
            PointerEvent::Mouse(point) => *point,
            PointerEvent::Touch(touches) => *touches.first()?,
        };

        point.is_finite().then_some(point)
    }
}

/// Where a pointer event landed, both on the image and on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    /// Position in decoded image pixels, always inside the image.
    pub image: Point,
    /// Position relative to the rendered image's top-left corner. Not
    /// clamped, so it may lie outside the image when the pointer overshoots.
    pub screen: ScreenPoint,
}

/// Maps `event` onto the image described by `geometry`.
///
/// Returns `None` when no position can be derived: the event has no active
/// touch, carries non-finite coordinates, or the image has no on-screen area
/// large enough to scale from.
pub fn map(event: &PointerEvent, geometry: &ImageGeometry) -> Option<PointerPosition> {
    let client = event.client_point()?;
    let bounds = &geometry.bounding_box;

    if bounds.is_degenerate() {
        tracing::trace!(?bounds, "Skipping pointer mapping for degenerate bounding box");
        return None;
    }

    let scale_x = geometry.size.width() / bounds.width;
    let scale_y = geometry.size.height() / bounds.height;

    if !scale_x.is_finite() || !scale_y.is_finite() {
        tracing::trace!(?bounds, "Skipping pointer mapping for unrepresentable scale");
        return None;
    }

    let screen = ScreenPoint::new(client.x - bounds.left, client.y - bounds.top);
    let image = geometry.size.clamp(screen.x * scale_x, screen.y * scale_y);

    tracing::trace!(?client, ?image, ?screen, "Mapped pointer");

    Some(PointerPosition { image, screen })
}
