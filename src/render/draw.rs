//! Raster drawing helpers on top of `imageproc`.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

/// Fill a closed ring given in pixel coordinates.
///
/// Rings with fewer than three distinct vertices are skipped.
pub fn fill_ring(canvas: &mut RgbImage, ring: &[(f32, f32)], color: Rgb<u8>) {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(ring.len());
    for &(x, y) in ring {
        let point = Point::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    // draw_polygon_mut rejects an explicitly closed ring
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &points, color);
}

/// Paint `edge` over every `inside` pixel that touches a pixel of another color.
///
/// Used to trace coastlines after the land has been filled.
pub fn trace_edges(canvas: &mut RgbImage, inside: Rgb<u8>, edge: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let mask: Vec<bool> = canvas.pixels().map(|pixel| *pixel == inside).collect();
    let is_inside = |x: u32, y: u32| mask[(y * width + x) as usize];

    for y in 0..height {
        for x in 0..width {
            if !is_inside(x, y) {
                continue;
            }
            let touches_outside = (x > 0 && !is_inside(x - 1, y))
                || (x + 1 < width && !is_inside(x + 1, y))
                || (y > 0 && !is_inside(x, y - 1))
                || (y + 1 < height && !is_inside(x, y + 1));
            if touches_outside {
                canvas.put_pixel(x, y, edge);
            }
        }
    }
}

/// Whether a shape reaching `reach` pixels from `center` can touch the canvas.
///
/// Off-canvas positions are skipped before any cast to `i32`, since the
/// projection does not clamp and casts saturate.
pub fn touches_canvas(canvas: &RgbImage, center: (f32, f32), reach: f32) -> bool {
    let (width, height) = canvas.dimensions();
    center.0 >= -reach
        && center.0 <= width as f32 + reach
        && center.1 >= -reach
        && center.1 <= height as f32 + reach
}

/// Clip a segment to the canvas grown by `margin` pixels on every side.
///
/// Returns `None` when no part of the segment is inside.
pub fn clip_segment(
    canvas: &RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    margin: f32,
) -> Option<((f32, f32), (f32, f32))> {
    let (width, height) = canvas.dimensions();
    let margin = margin as f64;
    let (min_x, max_x) = (-margin, width as f64 + margin);
    let (min_y, max_y) = (-margin, height as f64 + margin);
    // f64 keeps the crossing points accurate for far-away endpoints
    let (x0, y0) = (start.0 as f64, start.1 as f64);
    let (dx, dy) = (end.0 as f64 - x0, end.1 as f64 - y0);

    // Liang-Barsky
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| ((x0 + dx * t) as f32, (y0 + dy * t) as f32);
    Some((at(t0), at(t1)))
}

/// Draw a line of the given pixel width.
///
/// Wide lines are stamped as circles along the segment. Parts of the line
/// off the canvas are clipped away first.
pub fn draw_thick_line(
    canvas: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    color: Rgb<u8>,
    width: f32,
) {
    let Some((start, end)) = clip_segment(canvas, start, end, width + 1.0) else {
        return;
    };
    if width <= 1.5 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }

    let radius = (width / 2.0).round() as i32;
    let length = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
    let steps = length.ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = start.0 + (end.0 - start.0) * t;
        let y = start.1 + (end.1 - start.1) * t;
        draw_filled_circle_mut(canvas, (x.round() as i32, y.round() as i32), radius, color);
    }
}

/// Draw a dotted polyline: `dash` pixels on, `dash` pixels off.
///
/// The dash phase carries over from one segment to the next.
pub fn draw_dotted_polyline(canvas: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>, dash: f32) {
    let dash = dash.max(1.0);
    let mut travelled = 0.0f32;

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = ((end.0 - start.0).powi(2) + (end.1 - start.1).powi(2)).sqrt();
        if length == 0.0 {
            continue;
        }

        let mut offset = 0.0f32;
        while offset < length {
            let phase = (travelled + offset) % (2.0 * dash);
            let remaining_in_phase = if phase < dash { dash - phase } else { 2.0 * dash - phase };
            let next = (offset + remaining_in_phase.max(0.01)).min(length);
            if phase < dash {
                let a = lerp(start, end, offset / length);
                let b = lerp(start, end, next / length);
                draw_line_segment_mut(canvas, a, b, color);
            }
            offset = next;
        }
        travelled = (travelled + length) % (2.0 * dash);
    }
}

/// Filled circular marker with the given diameter in pixels.
///
/// Markers entirely off the canvas are skipped.
pub fn draw_marker(canvas: &mut RgbImage, center: (f32, f32), diameter: f32, color: Rgb<u8>) {
    let radius = (diameter / 2.0).round().max(1.0);
    if !touches_canvas(canvas, center, radius) {
        return;
    }
    let radius = radius as i32;
    draw_filled_circle_mut(
        canvas,
        (center.0.round() as i32, center.1.round() as i32),
        radius,
        color,
    );
}

fn lerp(start: (f32, f32), end: (f32, f32), t: f32) -> (f32, f32) {
    (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t)
}
