use crate::{
    geometry::{ImageGeometry, Point, Rect, VisualRect},
    mapper::{self, PointerEvent, PointerPosition},
};

/// Drag lifecycle of the selection gesture.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress. The anchor stays fixed until the drag ends.
    Dragging { anchor: Point },
}

/// A pointer notification coming from the input surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Down(PointerEvent),
    Move(PointerEvent),
    Up,
    Leave,
}

/// A value published to subscribers whenever it changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Published {
    /// `None` means the pointer is not over the surface anymore.
    Pointer(Option<PointerPosition>),
    /// `None` means there is no selection.
    Selection(Option<Rect>),
}

type Subscriber = Box<dyn FnMut(&Published) + Send>;

/// Owns the drag state and the last published pointer and selection.
///
/// Consumers observe the controller either through [`subscribe`] or by
/// reading the snapshots; nothing outside the controller mutates them.
///
/// [`subscribe`]: SelectionController::subscribe
#[derive(Default)]
pub struct SelectionController {
    state: DragState,
    pointer: Option<PointerPosition>,
    selection: Option<Rect>,

    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state)
            .field("pointer", &self.pointer)
            .field("selection", &self.selection)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with every published change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Published) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Anchor of the drag in progress.
    pub fn anchor(&self) -> Option<Point> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { anchor } => Some(anchor),
        }
    }

    pub fn pointer(&self) -> Option<&PointerPosition> {
        self.pointer.as_ref()
    }

    /// The selection in drag order.
    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn visual_selection(&self) -> Option<VisualRect> {
        self.selection.as_ref().map(Rect::to_visual)
    }

    /// Maps `input` onto the image and dispatches it.
    ///
    /// Events that cannot be mapped are dropped without touching the drag
    /// state or anything published so far.
    pub fn handle(&mut self, input: &PointerInput, geometry: &ImageGeometry) {
        match input {
            PointerInput::Down(event) => match mapper::map(event, geometry) {
                Some(position) => self.pointer_down(position.image),
                None => tracing::trace!("Ignoring unmappable pointer down"),
            },
            PointerInput::Move(event) => match mapper::map(event, geometry) {
                Some(position) => self.pointer_move(position),
                None => tracing::trace!("Ignoring unmappable pointer move"),
            },
            PointerInput::Up => self.pointer_up(),
            PointerInput::Leave => self.pointer_leave(),
        }
    }

    /// Starts a drag anchored at `point`.
    ///
    /// A drag already in progress is replaced, since its release may have
    /// happened outside the surface.
    pub fn pointer_down(&mut self, point: Point) {
        tracing::debug!(anchor = ?point, "Selection drag started");

        self.state = DragState::Dragging { anchor: point };
        self.set_selection(Some(Rect::degenerate(point)));
    }

    /// Publishes the pointer and, while dragging, the updated selection.
    pub fn pointer_move(&mut self, position: PointerPosition) {
        self.set_pointer(Some(position));

        if let DragState::Dragging { anchor } = self.state {
            self.set_selection(Some(Rect::from_corners(anchor, position.image)));
        }
    }

    /// Ends the drag. The selection stays as it was.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            tracing::debug!(selection = ?self.selection, "Selection drag finished");
        }

        self.state = DragState::Idle;
    }

    /// The pointer left the surface: the drag stops but its result is kept.
    pub fn pointer_leave(&mut self) {
        if self.is_dragging() {
            tracing::debug!(selection = ?self.selection, "Selection drag left the surface");
        }

        self.state = DragState::Idle;
        self.set_pointer(None);
    }

    /// Drops everything tied to the previous image's pixel space.
    pub fn image_replaced(&mut self) {
        tracing::debug!("Image replaced, clearing selection");

        self.state = DragState::Idle;
        self.set_pointer(None);
        self.set_selection(None);
    }

    fn set_pointer(&mut self, pointer: Option<PointerPosition>) {
        self.pointer = pointer;
        self.publish(Published::Pointer(pointer));
    }

    fn set_selection(&mut self, selection: Option<Rect>) {
        self.selection = selection;
        self.publish(Published::Selection(selection));
    }

    fn publish(&mut self, published: Published) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&published);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::geometry::{BoundingBox, ClientPoint, ImageSize, ScreenPoint};

    fn geometry() -> ImageGeometry {
        ImageGeometry::new(
            ImageSize::new(1000.0, 800.0).unwrap(),
            BoundingBox::new(10.0, 10.0, 500.0, 400.0),
        )
    }

    fn mouse(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Mouse(ClientPoint::new(x, y))
    }

    fn recorded(controller: &mut SelectionController) -> Arc<Mutex<Vec<Published>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        controller.subscribe(move |published| sink.lock().unwrap().push(*published));
        log
    }

    #[test]
    fn test_drag_sequence() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                anchor: Point::new(200.0, 100.0)
            }
        );
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 200.0, 100.0))
        );

        controller.handle(&PointerInput::Move(mouse(260.0, 210.0)), &geometry);
        assert_eq!(
            controller.pointer().map(|pos| pos.image),
            Some(Point::new(500.0, 400.0))
        );
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );
        assert_eq!(
            controller.visual_selection(),
            Some(VisualRect {
                left: 200.0,
                top: 100.0,
                right: 500.0,
                bottom: 400.0,
                width: 300.0,
                height: 300.0,
            })
        );

        controller.handle(&PointerInput::Up, &geometry);
        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );
    }

    #[test]
    fn test_click_without_movement() {
        let mut controller = SelectionController::new();

        controller.pointer_down(Point::new(42.0, 17.0));
        controller.pointer_up();

        assert_eq!(controller.state(), DragState::Idle);
        let selection = controller.selection().unwrap();
        assert_eq!(selection, Rect::new(42.0, 17.0, 42.0, 17.0));
        assert_eq!(selection.to_visual().width, 0.0);
        assert_eq!(selection.to_visual().height, 0.0);
    }

    #[test]
    fn test_inverted_drag_keeps_anchor() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(260.0, 210.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(110.0, 60.0)), &geometry);

        assert_eq!(
            controller.selection(),
            Some(Rect::new(500.0, 400.0, 200.0, 100.0))
        );
        assert_eq!(controller.anchor(), Some(Point::new(500.0, 400.0)));
    }

    #[test]
    fn test_move_while_idle_only_updates_pointer() {
        let geometry = geometry();
        let mut controller = SelectionController::new();
        let log = recorded(&mut controller);

        controller.handle(&PointerInput::Move(mouse(110.0, 60.0)), &geometry);

        assert_eq!(controller.selection(), None);
        assert_eq!(
            *log.lock().unwrap(),
            vec![Published::Pointer(Some(PointerPosition {
                image: Point::new(200.0, 100.0),
                screen: ScreenPoint::new(100.0, 50.0),
            }))]
        );
    }

    #[test]
    fn test_overshoot_is_clamped_while_dragging() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(-300.0, 2000.0)), &geometry);

        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 0.0, 800.0))
        );
    }

    #[test]
    fn test_leave_stops_drag_and_keeps_selection() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(260.0, 210.0)), &geometry);
        controller.handle(&PointerInput::Leave, &geometry);

        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(controller.pointer(), None);
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );

        controller.handle(&PointerInput::Move(mouse(300.0, 300.0)), &geometry);
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );
    }

    #[test]
    fn test_image_replaced_mid_drag() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(260.0, 210.0)), &geometry);
        controller.image_replaced();

        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(controller.selection(), None);
        assert_eq!(controller.pointer(), None);
        assert_eq!(controller.visual_selection(), None);

        controller.handle(&PointerInput::Move(mouse(300.0, 300.0)), &geometry);
        assert_eq!(controller.selection(), None);
    }

    #[test]
    fn test_unmappable_events_change_nothing() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(260.0, 210.0)), &geometry);

        let log = recorded(&mut controller);
        let pointer = controller.pointer().copied();

        controller.handle(&PointerInput::Move(PointerEvent::Touch(Vec::new())), &geometry);
        controller.handle(
            &PointerInput::Move(mouse(300.0, 300.0)),
            &ImageGeometry::new(geometry.size, BoundingBox::new(10.0, 10.0, 0.0, 0.0)),
        );

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(controller.pointer().copied(), pointer);
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                anchor: Point::new(200.0, 100.0)
            }
        );
        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );

        controller.handle(&PointerInput::Down(PointerEvent::Touch(Vec::new())), &geometry);
        assert_eq!(controller.anchor(), Some(Point::new(200.0, 100.0)));
    }

    #[test]
    fn test_published_order() {
        let geometry = geometry();
        let mut controller = SelectionController::new();
        let log = recorded(&mut controller);

        controller.handle(&PointerInput::Down(mouse(110.0, 60.0)), &geometry);
        controller.handle(&PointerInput::Move(mouse(260.0, 210.0)), &geometry);
        controller.handle(&PointerInput::Up, &geometry);
        controller.image_replaced();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Published::Selection(Some(Rect::new(200.0, 100.0, 200.0, 100.0))),
                Published::Pointer(Some(PointerPosition {
                    image: Point::new(500.0, 400.0),
                    screen: ScreenPoint::new(250.0, 200.0),
                })),
                Published::Selection(Some(Rect::new(200.0, 100.0, 500.0, 400.0))),
                Published::Pointer(None),
                Published::Selection(None),
            ]
        );
    }

    #[test]
    fn test_new_drag_replaces_selection() {
        let mut controller = SelectionController::new();

        controller.pointer_down(Point::new(10.0, 10.0));
        controller.pointer_down(Point::new(50.0, 60.0));

        assert_eq!(controller.anchor(), Some(Point::new(50.0, 60.0)));
        assert_eq!(
            controller.selection(),
            Some(Rect::new(50.0, 60.0, 50.0, 60.0))
        );
    }

    #[test]
    fn test_multi_touch_tracks_first_point() {
        let geometry = geometry();
        let mut controller = SelectionController::new();

        controller.handle(
            &PointerInput::Down(PointerEvent::Touch(vec![ClientPoint::new(110.0, 60.0)])),
            &geometry,
        );
        controller.handle(
            &PointerInput::Move(PointerEvent::Touch(vec![
                ClientPoint::new(260.0, 210.0),
                ClientPoint::new(20.0, 20.0),
            ])),
            &geometry,
        );

        assert_eq!(
            controller.selection(),
            Some(Rect::new(200.0, 100.0, 500.0, 400.0))
        );
    }
}
