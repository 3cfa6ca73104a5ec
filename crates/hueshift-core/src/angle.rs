//! Dial geometry: pointer positions to hue angles and back.
//!
//! Angles are measured in degrees clockwise from 12 o'clock, in y-down screen
//! coordinates. This matches the hue wheel drawn by the viewer: red at the
//! top, green at 4 o'clock, blue at 8 o'clock.

use crate::arc::normalize_degrees;
use crate::HueArc;

/// Point in y-down screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position, growing to the right
    pub x: f64,
    /// Vertical position, growing downward
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which end of a [`HueArc`] a drag is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// The arc start
    Start,
    /// The arc end
    End,
}

/// Dial angle of `point` around `center`, in `[0, 360)`.
///
/// The center itself maps to 0.
///
/// ```
/// use hueshift_core::angle::{screen_point_to_angle, Point};
///
/// let c = Point::new(100.0, 100.0);
/// assert_eq!(screen_point_to_angle(Point::new(100.0, 0.0), c), 0.0);
/// assert_eq!(screen_point_to_angle(Point::new(200.0, 100.0), c), 90.0);
/// assert_eq!(screen_point_to_angle(Point::new(0.0, 100.0), c), 270.0);
/// ```
pub fn screen_point_to_angle(point: Point, center: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    normalize_degrees(dx.atan2(-dy).to_degrees())
}

/// Point at `radius` from `center` in the direction of `degrees`.
pub fn angle_to_screen_point(center: Point, radius: f64, degrees: f64) -> Point {
    let rad = degrees.to_radians();
    Point::new(center.x + radius * rad.sin(), center.y - radius * rad.cos())
}

/// Shortest circular distance between two angles, in `[0, 180]`.
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Handle grabbed by a press at `angle`, if any.
///
/// The nearer handle within `tolerance` degrees wins; equal distances pick
/// [`Handle::Start`].
///
/// ```
/// use hueshift_core::angle::{pick_handle, Handle};
/// use hueshift_core::HueArc;
///
/// let arc = HueArc::new(150.0, 270.0);
/// assert_eq!(pick_handle(155.0, &arc, 10.0), Some(Handle::Start));
/// assert_eq!(pick_handle(262.0, &arc, 10.0), Some(Handle::End));
/// assert_eq!(pick_handle(200.0, &arc, 10.0), None);
/// ```
pub fn pick_handle(angle: f64, arc: &HueArc, tolerance: f64) -> Option<Handle> {
    let ds = angular_distance(angle, arc.start);
    let de = angular_distance(angle, arc.end);
    if ds <= de && ds <= tolerance {
        Some(Handle::Start)
    } else if de <= tolerance {
        Some(Handle::End)
    } else {
        None
    }
}

/// Polyline along the clockwise sweep of `arc`, `segments + 1` points.
///
/// A zero sweep yields `segments + 1` copies of the start point.
pub fn arc_points(center: Point, radius: f64, arc: &HueArc, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    let sweep = arc.sweep();
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            angle_to_screen_point(center, radius, arc.start + sweep * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const C: Point = Point::new(100.0, 100.0);

    #[test]
    fn cardinal_directions() {
        assert_eq!(screen_point_to_angle(Point::new(100.0, 5.0), C), 0.0);
        assert_eq!(screen_point_to_angle(Point::new(195.0, 100.0), C), 90.0);
        assert_eq!(screen_point_to_angle(Point::new(100.0, 195.0), C), 180.0);
        assert_eq!(screen_point_to_angle(Point::new(5.0, 100.0), C), 270.0);
    }

    #[test]
    fn diagonal_quadrants() {
        assert_abs_diff_eq!(screen_point_to_angle(Point::new(150.0, 50.0), C), 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(screen_point_to_angle(Point::new(50.0, 50.0), C), 315.0, epsilon = 1e-9);
    }

    #[test]
    fn center_maps_to_zero() {
        assert_eq!(screen_point_to_angle(C, C), 0.0);
    }

    #[test]
    fn point_angle_inverse() {
        for deg in [0.0, 33.0, 90.0, 181.5, 270.0, 359.0] {
            let p = angle_to_screen_point(C, 95.0, deg);
            assert_abs_diff_eq!(screen_point_to_angle(p, C), deg, epsilon = 1e-9);
        }
    }

    #[test]
    fn distance_is_circular() {
        assert_eq!(angular_distance(355.0, 5.0), 10.0);
        assert_eq!(angular_distance(5.0, 355.0), 10.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(42.0, 42.0), 0.0);
    }

    #[test]
    fn pick_handle_across_zero() {
        let arc = HueArc::new(2.0, 90.0);
        assert_eq!(pick_handle(356.0, &arc, 10.0), Some(Handle::Start));
    }

    #[test]
    fn pick_handle_tie_prefers_start() {
        let arc = HueArc::new(100.0, 110.0);
        assert_eq!(pick_handle(105.0, &arc, 10.0), Some(Handle::Start));
        let same = HueArc::new(40.0, 40.0);
        assert_eq!(pick_handle(40.0, &same, 10.0), Some(Handle::Start));
    }

    #[test]
    fn pick_handle_outside_tolerance() {
        let arc = HueArc::new(150.0, 270.0);
        assert_eq!(pick_handle(139.0, &arc, 10.0), None);
        assert_eq!(pick_handle(140.0, &arc, 10.0), Some(Handle::Start));
    }

    #[test]
    fn arc_points_follow_sweep() {
        let arc = HueArc::new(350.0, 10.0);
        let pts = arc_points(C, 50.0, &arc, 4);
        assert_eq!(pts.len(), 5);
        let mid = screen_point_to_angle(pts[2], C);
        assert!(angular_distance(mid, 0.0) < 1e-9, "mid {mid}");
        assert_abs_diff_eq!(screen_point_to_angle(pts[4], C), 10.0, epsilon = 1e-9);
    }
}
