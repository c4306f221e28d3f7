pub mod model;
pub mod view;

pub use model::{Point, SegmentGeometry, WheelGeometry, WheelScene};
pub use view::draw;

pub const WHEEL_MARGIN: f64 = 12.0;
pub const REFERENCE_RADIUS: f64 = 150.0; // sizes below are tuned for this radius
pub const LABEL_RADIUS_FACTOR: f64 = 0.7; // label distance from center
pub const POINTER_LENGTH_FACTOR: f64 = 1.0;
pub const POINTER_WIDTH: f64 = 5.0;
pub const ARROW_LENGTH: f64 = 16.0;
pub const ARROW_WIDTH: f64 = 14.0;
pub const HUB_RADIUS: f64 = 8.0;
pub const OUTLINE_WIDTH: f64 = 2.0;
pub const LABEL_FONT_SIZE: f64 = 13.0;
