//! Geometry validation for generated polylines.
//!
//! Filtering is non-fatal: it only ever shrinks the list.

use crate::polyline::Polyline;

/// Minimum number of points a drawable polyline needs.
pub const MIN_POINTS: usize = 2;

/// True when the polyline has at least two points and every coordinate is finite.
pub fn is_well_formed(line: &Polyline) -> bool {
    line.points.len() >= MIN_POINTS && line.points.iter().all(|p| p.is_finite())
}

/// Result of running the validator over a list of polylines.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub lines: Vec<Polyline>,
    /// How many input polylines were discarded.
    pub dropped: usize,
}

/// Drop malformed polylines and normalize the style of the survivors.
/// Generation order is preserved.
pub fn validate_lines(lines: Vec<Polyline>) -> Validated {
    let input = lines.len();
    let lines: Vec<Polyline> = lines
        .into_iter()
        .filter(is_well_formed)
        .map(|mut line| {
            let style = line.style().normalized();
            line.opacity = style.opacity;
            line.line_width = style.line_width;
            line
        })
        .collect();
    let dropped = input - lines.len();
    if dropped > 0 {
        log::debug!("Geometry validator dropped {} of {} polylines", dropped, input);
    }
    Validated { lines, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::LineStyle;
    use glam::Vec3;

    fn line(points: Vec<Vec3>) -> Polyline {
        Polyline::new(points, LineStyle::default())
    }

    #[test]
    fn validator_drops_short_and_non_finite() {
        let lines = vec![
            line(vec![Vec3::ZERO, Vec3::X]),
            line(vec![Vec3::ZERO]),
            line(vec![]),
            line(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]),
            line(vec![Vec3::new(0.0, f32::INFINITY, 0.0), Vec3::X]),
            line(vec![Vec3::Y, Vec3::X, Vec3::Z]),
        ];
        let validated = validate_lines(lines);
        assert_eq!(validated.lines.len(), 2);
        assert_eq!(validated.dropped, 4);
        assert_eq!(validated.lines[0].points, vec![Vec3::ZERO, Vec3::X]);
        assert_eq!(validated.lines[1].points.len(), 3);
    }

    #[test]
    fn validator_repairs_style() {
        let mut bad = line(vec![Vec3::ZERO, Vec3::X]);
        bad.opacity = f32::NAN;
        bad.line_width = -3.0;
        let validated = validate_lines(vec![bad]);
        assert_eq!(validated.lines[0].opacity, 1.0);
        assert!(validated.lines[0].line_width > 0.0);
    }

    #[test]
    fn validator_on_empty_input() {
        let validated = validate_lines(Vec::new());
        assert!(validated.lines.is_empty());
        assert_eq!(validated.dropped, 0);
    }
}
