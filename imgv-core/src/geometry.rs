use snafu::{Snafu, ensure};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// A position in image space, measured in decoded pixels of the source image.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounds both coordinates to whole pixels for display.
    pub fn rounded(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// A position relative to the top-left corner of the rendered image, in
/// on-screen pixels. Only meaningful for overlay placement.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A raw position in viewport coordinates, as delivered by input devices.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClientPoint {
    pub x: f64,
    pub y: f64,
}

impl ClientPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A rectangle defined by a drag gesture.
///
/// `(x, y)` is the anchor where the gesture began and `(x1, y1)` is the last
/// pointer position. The corners are kept in the order the user dragged them,
/// so `x > x1` or `y > y1` are both valid. Use [`Rect::to_visual`] to get the
/// ordered form.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, x1: f64, y1: f64) -> Self {
        Self { x, y, x1, y1 }
    }

    /// Creates a rectangle spanning from `anchor` to `corner`.
    pub fn from_corners(anchor: Point, corner: Point) -> Self {
        Self::new(anchor.x, anchor.y, corner.x, corner.y)
    }

    /// Zero-area rectangle at a single point.
    pub fn degenerate(point: Point) -> Self {
        Self::from_corners(point, point)
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn corner(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Orders the corners into top-left / bottom-right form.
    pub fn to_visual(&self) -> VisualRect {
        let left = self.x.min(self.x1);
        let top = self.y.min(self.y1);
        let right = self.x.max(self.x1);
        let bottom = self.y.max(self.y1);

        VisualRect {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Rounds all four bounds to whole pixels, keeping the drag order.
    pub fn rounded(&self) -> RoundedRect {
        RoundedRect {
            x: self.x.round() as i64,
            y: self.y.round() as i64,
            x1: self.x1.round() as i64,
            y1: self.y1.round() as i64,
        }
    }
}

/// A [`Rect`] rounded to integer pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundedRect {
    pub x: i64,
    pub y: i64,
    pub x1: i64,
    pub y1: i64,
}

impl std::fmt::Display for RoundedRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) - ({}, {})", self.x, self.y, self.x1, self.y1)
    }
}

/// The normalized form of a [`Rect`].
///
/// Always satisfies `left <= right` and `top <= bottom`, so `width` and
/// `height` are never negative. Derived on demand for rendering and never
/// used as the source of truth.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VisualRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl VisualRect {
    /// Normalizing an already normalized rectangle yields the same rectangle.
    pub fn to_visual(&self) -> VisualRect {
        Rect::new(self.left, self.top, self.right, self.bottom).to_visual()
    }

    /// Expresses this rectangle as fractions of the natural image size.
    pub fn relative_to(&self, size: ImageSize) -> RelativeRect {
        RelativeRect {
            left: self.left / size.width,
            top: self.top / size.height,
            width: self.width / size.width,
            height: self.height / size.height,
        }
    }
}

/// A rectangle in fractions (`0.0..=1.0`) of the image size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RelativeRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    width: f64,
    height: f64,
}

impl ImageSize {
    /// # Errors
    /// Returns an error if either dimension is not a finite positive number.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        ensure!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            error::InvalidImageSize { width, height }
        );

        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Clamps an image-space point into `[0, width] x [0, height]`.
    pub fn clamp(&self, x: f64, y: f64) -> Point {
        Point::new(x.clamp(0.0, self.width), y.clamp(0.0, self.height))
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// On-screen box of the rendered image in client coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A box with no usable area, typically because the image is not laid
    /// out yet.
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    /// Box occupied by an image of `size` scaled to fit inside `container`
    /// with its aspect ratio preserved and centred on both axes.
    pub fn fit_contain(container: BoundingBox, size: ImageSize) -> Self {
        let scale = (container.width / size.width).min(container.height / size.height);
        let width = size.width * scale;
        let height = size.height * scale;

        Self {
            left: container.left + (container.width - width) / 2.0,
            top: container.top + (container.height - height) / 2.0,
            width,
            height,
        }
    }
}

/// Everything the mapper needs to know about the rendered image at the
/// moment an event is handled.
///
/// The bounding box moves whenever the surface is resized or scrolled, so a
/// fresh value has to be supplied with every event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    pub size: ImageSize,
    pub bounding_box: BoundingBox,
}

impl ImageGeometry {
    pub fn new(size: ImageSize, bounding_box: BoundingBox) -> Self {
        Self { size, bounding_box }
    }
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Invalid image size: {width}x{height}"))]
        InvalidImageSize { width: f64, height: f64 },
    }
}
