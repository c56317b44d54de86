//! Polyline component: an ordered run of 3D points plus its line style.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The one color every polyline is drawn with.
pub const LINE_COLOR: &str = "#509EF0";

/// Lower bound for a rendered line width.
pub const MIN_LINE_WIDTH: f32 = 0.1;
/// Upper bound for a rendered line width.
pub const MAX_LINE_WIDTH: f32 = 10.0;

/// Visual style shared by every polyline one generator emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub opacity: f32,
    pub line_width: f32,
    pub dashed: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            line_width: 1.0,
            dashed: false,
        }
    }
}

impl LineStyle {
    pub fn new(opacity: f32, line_width: f32) -> Self {
        Self {
            opacity,
            line_width,
            dashed: false,
        }
    }

    /// Same style with a different opacity.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    /// Clamp opacity into [0, 1] and width into the renderable range.
    pub fn normalized(self) -> Self {
        let opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let line_width = if self.line_width.is_finite() {
            self.line_width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
        } else {
            1.0
        };
        Self {
            opacity,
            line_width,
            dashed: self.dashed,
        }
    }
}

/// An ordered list of 3D points rendered as one connected line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    pub points: Vec<Vec3>,
    pub color: String,
    pub opacity: f32,
    pub line_width: f32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dashed: bool,
    /// Rendered with an arrow head at the last point.
    #[serde(default, skip_serializing_if = "is_false")]
    pub arrow: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Polyline {
    /// Create a polyline in [`LINE_COLOR`] with a normalized style.
    pub fn new(points: Vec<Vec3>, style: LineStyle) -> Self {
        let style = style.normalized();
        Self {
            points,
            color: LINE_COLOR.to_string(),
            opacity: style.opacity,
            line_width: style.line_width,
            dashed: style.dashed,
            arrow: false,
        }
    }

    /// Two-point line from `a` to `b`.
    pub fn segment(a: Vec3, b: Vec3, style: LineStyle) -> Self {
        Self::new(vec![a, b], style)
    }

    /// Mark the polyline as arrow-terminated.
    pub fn with_arrow(mut self) -> Self {
        self.arrow = true;
        self
    }

    /// The style this polyline is drawn with.
    pub fn style(&self) -> LineStyle {
        LineStyle {
            opacity: self.opacity,
            line_width: self.line_width,
            dashed: self.dashed,
        }
    }

    /// Whether the last point coincides with the first (within `eps`).
    pub fn is_closed(&self, eps: f32) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => first.distance(*last) <= eps,
            _ => false,
        }
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_new_clamps_style() {
        let line = Polyline::new(vec![Vec3::ZERO, Vec3::X], LineStyle::new(4.0, 0.0));
        assert_eq!(line.opacity, 1.0);
        assert_eq!(line.line_width, MIN_LINE_WIDTH);
        assert_eq!(line.color, LINE_COLOR);

        let line = Polyline::new(vec![Vec3::ZERO, Vec3::X], LineStyle::new(f32::NAN, f32::INFINITY));
        assert_eq!(line.opacity, 1.0);
        assert_eq!(line.line_width, 1.0);
    }

    #[test]
    fn polyline_serializes_to_wire_shape() {
        let line = Polyline::segment(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), LineStyle::new(0.5, 1.5));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["points"][1], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["color"], "#509EF0");
        assert_eq!(json["lineWidth"], 1.5);
        assert!(json.get("dashed").is_none());
        assert!(json.get("arrow").is_none());

        let json = serde_json::to_value(line.with_arrow()).unwrap();
        assert_eq!(json["arrow"], true);
    }

    #[test]
    fn polyline_closed_and_length() {
        let square = Polyline::new(
            vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::Y,
                Vec3::ZERO,
            ],
            LineStyle::default(),
        );
        assert!(square.is_closed(1e-6));
        assert!((square.length() - 4.0).abs() < 1e-6);

        let open = Polyline::segment(Vec3::ZERO, Vec3::X, LineStyle::default());
        assert!(!open.is_closed(1e-6));
    }
}
