use crate::config::Anchor;
use crate::gui::wheel::{
    LABEL_RADIUS_FACTOR, POINTER_LENGTH_FACTOR, REFERENCE_RADIUS, WHEEL_MARGIN,
};
use whirl::{Choice, Label, segment};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away along a screen angle in radians.
    pub fn polar(self, distance: f64, radians: f64) -> Self {
        Self::new(
            self.x + distance * radians.cos(),
            self.y + distance * radians.sin(),
        )
    }
}

/// Converts a wheel angle (degrees, clockwise from the anchor) into a cairo angle in radians.
///
/// Segments and the pointer both go through here, so the drawn winner always sits under the
/// pointer.
pub fn screen_angle(anchor: Anchor, degrees: f64) -> f64 {
    (anchor.screen_degrees() + degrees).to_radians()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
    pub scale: f64,
}

impl WheelGeometry {
    /// Largest wheel that fits the drawing area.
    pub fn fit(width: f64, height: f64) -> Self {
        let radius = (width.min(height) / 2.0 - WHEEL_MARGIN).max(1.0);
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            scale: radius / REFERENCE_RADIUS,
        }
    }

    pub fn pointer_tip(&self, anchor: Anchor, angle: f64) -> Point {
        self.center.polar(
            self.radius * POINTER_LENGTH_FACTOR,
            screen_angle(anchor, angle),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub start: f64,
    pub end: f64,
    pub label_at: Point,
}

impl SegmentGeometry {
    pub fn calculate(
        index: usize,
        count: usize,
        anchor: Anchor,
        wheel: &WheelGeometry,
    ) -> Option<Self> {
        let (start, end) = segment::span(index, count).ok()?;
        let middle = screen_angle(anchor, (start + end) / 2.0);

        Some(Self {
            start: screen_angle(anchor, start),
            end: screen_angle(anchor, end),
            label_at: wheel
                .center
                .polar(wheel.radius * LABEL_RADIUS_FACTOR, middle),
        })
    }
}

/// Everything the draw function needs. Shared with the timer callbacks through the component.
#[derive(Debug, Clone)]
pub struct WheelScene {
    pub labels: Vec<Label>,
    pub pointer: f64,
    pub anchor: Anchor,
    pub font: String,
}

impl WheelScene {
    pub fn new(choices: &[Choice], anchor: Anchor, font: impl Into<String>) -> Self {
        Self {
            labels: choices.iter().map(|c| c.name.clone()).collect(),
            pointer: 0.0,
            anchor,
            font: font.into(),
        }
    }

    pub fn segments(&self, wheel: &WheelGeometry) -> Vec<SegmentGeometry> {
        let count = self.labels.len();
        (0..count)
            .filter_map(|i| SegmentGeometry::calculate(i, count, self.anchor, wheel))
            .collect()
    }
}
