use crate::{geometry::RoundedRect, selection::SelectionController};

/// Placeholder shown for a value that is not available.
pub const EMPTY: &str = "--";

/// Numeric readout of the pointer and the selection, in whole pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    pub pointer: Option<(i64, i64)>,
    pub selection: Option<RoundedRect>,
}

impl Readout {
    pub fn from_controller(controller: &SelectionController) -> Self {
        Self {
            pointer: controller.pointer().map(|pos| pos.image.rounded()),
            selection: controller.selection().map(|rect| rect.rounded()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_some()
    }

    pub fn pointer_x(&self) -> String {
        display(self.pointer.map(|(x, _)| x))
    }

    pub fn pointer_y(&self) -> String {
        display(self.pointer.map(|(_, y)| y))
    }

    /// Selection bounds in drag order: `x`, `y`, `x1`, `y1`.
    pub fn selection_bounds(&self) -> [String; 4] {
        let rect = self.selection.as_ref();

        [
            display(rect.map(|r| r.x)),
            display(rect.map(|r| r.y)),
            display(rect.map(|r| r.x1)),
            display(rect.map(|r| r.y1)),
        ]
    }
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, x1, y1] = self.selection_bounds();

        write!(
            f,
            "pointer: {}, {} | selection: {x}, {y} -> {x1}, {y1}",
            self.pointer_x(),
            self.pointer_y()
        )
    }
}

fn display(value: Option<i64>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{ImageSize, Point, ScreenPoint},
        mapper::PointerPosition,
    };

    #[test]
    fn test_empty_readout() {
        let readout = Readout::from_controller(&SelectionController::new());

        assert!(!readout.is_active());
        assert_eq!(readout.pointer_x(), "--");
        assert_eq!(readout.pointer_y(), "--");
        assert_eq!(readout.selection_bounds(), ["--", "--", "--", "--"]);
        assert_eq!(
            readout.to_string(),
            "pointer: --, -- | selection: --, -- -> --, --"
        );
    }

    #[test]
    fn test_rounded_readout() {
        let size = ImageSize::new(1000.0, 800.0).unwrap();
        let mut controller = SelectionController::new();

        controller.pointer_down(Point::new(200.4, 99.5));
        controller.pointer_move(PointerPosition {
            image: size.clamp(10.6, 1200.0),
            screen: ScreenPoint::new(5.3, 600.0),
        });

        let readout = Readout::from_controller(&controller);

        assert!(readout.is_active());
        assert_eq!(readout.pointer, Some((11, 800)));
        assert_eq!(readout.selection_bounds(), ["200", "100", "11", "800"]);
        assert_eq!(
            readout.to_string(),
            "pointer: 11, 800 | selection: 200, 100 -> 11, 800"
        );
    }
}
