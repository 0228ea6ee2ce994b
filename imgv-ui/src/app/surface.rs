//! The interactive layer drawn on top of the picture.
//!
//! Turns mouse and touch events into pointer input for the selection
//! controller and paints the selection box, its labels, the drag guides and
//! the crosshair.

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{canvas as canvas_widget, image, stack};
use iced::{
    Color, ContentFit, Element, Length, Pixels, Point, Rectangle, Renderer, Size, Theme, mouse,
    touch,
};
use imgv_core::{
    BoundingBox, ClientPoint, ImageGeometry, ImageSize, LabelPlacement, PointerEvent,
    PointerInput, SelectionController, end_label, start_label,
};

use crate::app::picture::Picture;

const ACCENT: Color = Color::from_rgb(0.94, 0.27, 0.27);
const LABEL_BACKGROUND: Color = Color::from_rgba(0.06, 0.09, 0.16, 0.9);
const LABEL_SIZE: f32 = 11.0;
const LABEL_HEIGHT: f32 = 16.0;
const HANDLE_RADIUS: f32 = 3.0;
const CROSSHAIR: f32 = 8.0;

#[derive(Debug, Clone)]
pub enum Message {
    Pointer {
        input: PointerInput,
        geometry: ImageGeometry,
    },
}

pub fn view<'a>(picture: &'a Picture, controller: &'a SelectionController) -> Element<'a, Message> {
    stack![
        image(picture.handle().clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain),
        canvas_widget(Surface {
            size: picture.size(),
            controller,
        })
        .width(Length::Fill)
        .height(Length::Fill),
    ]
    .into()
}

struct Surface<'a> {
    size: ImageSize,
    controller: &'a SelectionController,
}

#[derive(Debug, Default)]
struct State {
    hovered: bool,
    fingers: Vec<(touch::Finger, Point)>,
}

impl State {
    fn touches(&self) -> PointerEvent {
        PointerEvent::Touch(
            self.fingers
                .iter()
                .map(|(_, position)| client_point(*position))
                .collect(),
        )
    }
}

impl Surface<'_> {
    /// Where the picture is drawn inside `container`, in the same coordinates
    /// as `container`.
    fn image_box(&self, container: Rectangle) -> BoundingBox {
        BoundingBox::fit_contain(
            BoundingBox::new(
                f64::from(container.x),
                f64::from(container.y),
                f64::from(container.width),
                f64::from(container.height),
            ),
            self.size,
        )
    }

    fn pointer_input(
        &self,
        state: &mut State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<PointerInput> {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_over(bounds)?;

                Some(PointerInput::Down(PointerEvent::Mouse(client_point(
                    position,
                ))))
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if bounds.contains(*position) {
                    state.hovered = true;

                    Some(PointerInput::Move(PointerEvent::Mouse(client_point(
                        *position,
                    ))))
                } else if std::mem::take(&mut state.hovered) {
                    Some(PointerInput::Leave)
                } else {
                    None
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                std::mem::take(&mut state.hovered).then_some(PointerInput::Leave)
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                self.controller.is_dragging().then_some(PointerInput::Up)
            }
            canvas::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }

                let first = state.fingers.is_empty();
                state.fingers.push((*id, *position));

                first.then(|| PointerInput::Down(state.touches()))
            }
            canvas::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                let finger = state.fingers.iter_mut().find(|(finger, _)| finger == id)?;
                finger.1 = *position;

                Some(PointerInput::Move(state.touches()))
            }
            canvas::Event::Touch(
                touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
            ) => {
                let before = state.fingers.len();
                state.fingers.retain(|(finger, _)| finger != id);

                (before > 0 && state.fingers.is_empty()).then_some(PointerInput::Up)
            }
            _ => None,
        }
    }

    fn draw_selection(&self, frame: &mut Frame, image_box: &BoundingBox) {
        let Some(visual) = self.controller.visual_selection() else {
            return;
        };

        let relative = visual.relative_to(self.size);
        let top_left = Point::new(
            (image_box.left + relative.left * image_box.width) as f32,
            (image_box.top + relative.top * image_box.height) as f32,
        );
        let size = Size::new(
            (relative.width * image_box.width) as f32,
            (relative.height * image_box.height) as f32,
        );
        let bottom_right = Point::new(top_left.x + size.width, top_left.y + size.height);

        frame.fill_rectangle(top_left, size, Color { a: 0.1, ..ACCENT });
        frame.stroke(
            &Path::rectangle(top_left, size),
            Stroke::default().with_width(1.0).with_color(ACCENT),
        );

        for corner in [
            top_left,
            Point::new(bottom_right.x, top_left.y),
            Point::new(top_left.x, bottom_right.y),
            bottom_right,
        ] {
            frame.fill(&Path::circle(corner, HANDLE_RADIUS), ACCENT);
        }

        let start_y = match start_label(&visual, self.size.height()) {
            LabelPlacement::Inside => top_left.y + 6.0,
            LabelPlacement::Outside => top_left.y - LABEL_HEIGHT - 6.0,
        };
        draw_label(
            frame,
            Point::new(top_left.x, start_y),
            format!(
                "START: X{} Y{}",
                visual.left.round(),
                visual.top.round()
            ),
        );

        let end_text = format!(
            "END: X{} Y{}",
            visual.right.round(),
            visual.bottom.round()
        );
        let end_y = match end_label(&visual, self.size.height()) {
            LabelPlacement::Inside => bottom_right.y - LABEL_HEIGHT - 6.0,
            LabelPlacement::Outside => bottom_right.y + 6.0,
        };
        draw_label(
            frame,
            Point::new(bottom_right.x - label_width(&end_text), end_y),
            end_text,
        );
    }

    fn draw_guides(&self, frame: &mut Frame, image_box: &BoundingBox) {
        let Some(anchor) = self.controller.anchor() else {
            return;
        };

        let x = (image_box.left + anchor.x / self.size.width() * image_box.width) as f32;
        let y = (image_box.top + anchor.y / self.size.height() * image_box.height) as f32;
        let left = image_box.left as f32;
        let top = image_box.top as f32;
        let right = (image_box.left + image_box.width) as f32;
        let bottom = (image_box.top + image_box.height) as f32;
        let stroke = Stroke::default()
            .with_width(1.0)
            .with_color(Color { a: 0.2, ..ACCENT });

        frame.stroke(&Path::line(Point::new(x, top), Point::new(x, bottom)), stroke);
        frame.stroke(&Path::line(Point::new(left, y), Point::new(right, y)), stroke);
    }

    fn draw_crosshair(&self, frame: &mut Frame, image_box: &BoundingBox) {
        let Some(pointer) = self.controller.pointer() else {
            return;
        };

        let center = Point::new(
            (image_box.left + pointer.screen.x) as f32,
            (image_box.top + pointer.screen.y) as f32,
        );
        let stroke = Stroke::default().with_width(1.0).with_color(ACCENT);

        frame.stroke(
            &Path::line(
                Point::new(center.x - CROSSHAIR, center.y),
                Point::new(center.x + CROSSHAIR, center.y),
            ),
            stroke,
        );
        frame.stroke(
            &Path::line(
                Point::new(center.x, center.y - CROSSHAIR),
                Point::new(center.x, center.y + CROSSHAIR),
            ),
            stroke,
        );

        let (x, y) = pointer.image.rounded();
        draw_label(
            frame,
            Point::new(center.x + 10.0, center.y + 10.0),
            format!("{x}, {y}"),
        );
    }
}

impl canvas::Program<Message> for Surface<'_> {
    type State = State;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let input = self.pointer_input(state, event, bounds, cursor)?;
        let geometry = ImageGeometry::new(self.size, self.image_box(bounds));

        Some(canvas::Action::publish(Message::Pointer { input, geometry }))
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let image_box = self.image_box(Rectangle::with_size(bounds.size()));

        if !image_box.is_degenerate() {
            self.draw_guides(&mut frame, &image_box);
            self.draw_selection(&mut frame, &image_box);
            self.draw_crosshair(&mut frame, &image_box);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn client_point(position: Point) -> ClientPoint {
    ClientPoint::new(f64::from(position.x), f64::from(position.y))
}

fn label_width(content: &str) -> f32 {
    content.chars().count() as f32 * LABEL_SIZE * 0.6 + 6.0
}

fn draw_label(frame: &mut Frame, position: Point, content: String) {
    frame.fill_rectangle(
        position,
        Size::new(label_width(&content), LABEL_HEIGHT),
        LABEL_BACKGROUND,
    );
    frame.fill_text(Text {
        content,
        position: Point::new(position.x + 3.0, position.y + 2.0),
        color: Color::WHITE,
        size: Pixels(LABEL_SIZE),
        ..Text::default()
    });
}
