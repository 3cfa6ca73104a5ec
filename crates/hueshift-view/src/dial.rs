//! Dial widgets: painting and pointer mapping for the hue dials.

use egui::{Color32, Painter, Pos2, Response, Shape, Stroke};
use hueshift_core::angle::{angle_to_screen_point, arc_points, screen_point_to_angle, Point};
use hueshift_core::{HueArc, PaletteEntry};

/// Side of the square dial canvas.
pub const DIAL_SIZE: f32 = 200.0;
/// Radius of the dial border.
pub const DIAL_RADIUS: f32 = 95.0;
/// Stroke and fill color of the dials.
pub const DIAL_COLOR: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);
/// Width of the output needle.
pub const NEEDLE_WIDTH: f32 = 5.0;
/// Radius of palette dots and arc handles.
pub const DOT_RADIUS: f32 = 5.0;

const SECTOR_SEGMENTS: usize = 64;

fn to_point(p: Pos2) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}

fn to_pos(p: Point) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}

fn on_circle(center: Pos2, radius: f64, degrees: f64) -> Pos2 {
    to_pos(angle_to_screen_point(to_point(center), radius, degrees))
}

/// Dial angle under the pointer driving `response`.
pub fn pointer_angle(response: &Response, center: Pos2) -> Option<f64> {
    response
        .interact_pointer_pos()
        .map(|pos| screen_point_to_angle(to_point(pos), to_point(center)))
}

/// Distance of a palette dot from the dial center.
///
/// More saturated colors sit further out, between 20 and 90 from the center.
pub fn palette_dot_distance(entry: &PaletteEntry) -> f64 {
    20.0 + 70.0 * (entry.hsl.s / 100.0).clamp(0.0, 1.0)
}

/// Triangle fan covering the selected sector of `arc`.
pub fn sector_triangles(center: Pos2, radius: f32, arc: &HueArc) -> Vec<[Pos2; 3]> {
    let rim: Vec<Pos2> = arc_points(to_point(center), f64::from(radius), arc, SECTOR_SEGMENTS)
        .into_iter()
        .map(to_pos)
        .collect();
    rim.windows(2).map(|w| [center, w[0], w[1]]).collect()
}

/// Paint the input dial: border, selected sector, handles and palette dots.
pub fn paint_input(painter: &Painter, center: Pos2, arc: &HueArc, palette: &[PaletteEntry]) {
    let stroke = Stroke::new(1.0, DIAL_COLOR);
    painter.circle_stroke(center, DIAL_RADIUS, stroke);

    if arc.sweep() > 0.0 {
        for [a, b, c] in sector_triangles(center, DIAL_RADIUS, arc) {
            painter.add(Shape::convex_polygon(vec![a, b, c], DIAL_COLOR, Stroke::NONE));
        }
    }
    let radius = f64::from(DIAL_RADIUS);
    painter.line_segment([center, on_circle(center, radius, arc.start)], stroke);
    painter.line_segment([center, on_circle(center, radius, arc.end)], stroke);

    for entry in palette {
        let pos = on_circle(center, palette_dot_distance(entry), entry.hsl.h);
        let [r, g, b] = entry.rgb.to_array();
        painter.circle_filled(pos, DOT_RADIUS, Color32::from_rgb(r, g, b));
    }

    let handle_stroke = Stroke::new(1.5, DIAL_COLOR);
    for angle in [arc.start, arc.end] {
        painter.circle(on_circle(center, radius, angle), DOT_RADIUS, Color32::WHITE, handle_stroke);
    }
}

/// Paint the output dial: border and a thick needle at `output`.
pub fn paint_output(painter: &Painter, center: Pos2, output: f64) {
    painter.circle_stroke(center, DIAL_RADIUS, Stroke::new(1.0, DIAL_COLOR));
    painter.line_segment(
        [center, on_circle(center, f64::from(DIAL_RADIUS), output)],
        Stroke::new(NEEDLE_WIDTH, DIAL_COLOR),
    );
}
