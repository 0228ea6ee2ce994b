mod analysis;
mod geometry;
mod mapper;
mod overlay;
mod readout;
mod selection;

pub use analysis::{AnalysisRequest, Region};
pub use geometry::{
    BoundingBox, ClientPoint, Error as GeometryError, ImageGeometry, ImageSize, Point, Rect,
    RelativeRect, RoundedRect, ScreenPoint, VisualRect,
};
pub use mapper::{PointerEvent, PointerPosition, map};
pub use overlay::{EDGE_MARGIN, LabelPlacement, end_label, start_label};
pub use readout::Readout;
pub use selection::{DragState, PointerInput, Published, SelectionController};
