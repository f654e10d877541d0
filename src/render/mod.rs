//! World map rendering.
//!
//! Every render paints a fresh canvas: the base map, then one marker per point
//! with its label placed one degree east and north of the marker. The image is
//! written as PNG and dropped before returning.

pub mod basemap;
pub mod draw;
pub mod point;
pub mod projection;

use ab_glyph::{FontArc, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{CityMapError, Result};
use crate::logger::Log;

pub use basemap::{Basemap, BasemapStyle};
pub use point::{PointRecord, RenderPoint, points_from_json};
pub use projection::PlateCarree;

/// Canvas size and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub dpi: u32,
    pub width_inches: f32,
    pub height_inches: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            width_inches: DEFAULT_WIDTH_INCHES,
            height_inches: DEFAULT_HEIGHT_INCHES,
        }
    }
}

impl RenderSettings {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let width = (self.width_inches * self.dpi as f32).round().max(1.0) as u32;
        let height = (self.height_inches * self.dpi as f32).round().max(1.0) as u32;
        (width, height)
    }

    /// Convert a size in typographic points to pixels at this DPI.
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi as f32 / POINTS_PER_INCH
    }
}

/// Load a TrueType/OpenType font, falling back to common system fonts.
///
/// Returns `None` when nothing usable is found.
pub fn load_font(configured: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = configured {
        match read_font(path) {
            Some(font) => return Some(font),
            None => Log::log_warning(&format!(
                "Could not load font {}, trying system fonts",
                path.display()
            )),
        }
    }

    FALLBACK_FONT_PATHS
        .iter()
        .map(Path::new)
        .filter(|path| path.exists())
        .find_map(read_font)
}

fn read_font(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    let font = FontArc::try_from_vec(bytes).ok()?;
    Log::log_debug(&format!("Using label font {}", path.display()));
    Some(font)
}

fn check_finite(point: &RenderPoint) -> Result<()> {
    if point.latitude.is_finite() && point.longitude.is_finite() {
        Ok(())
    } else {
        Err(CityMapError::Render(format!(
            "point {:?} has a non-finite position ({}, {})",
            point.label, point.latitude, point.longitude
        )))
    }
}

/// Pixel position a point's label is anchored at: one degree east and north
/// of the marker.
pub fn label_anchor(projection: &PlateCarree, point: &RenderPoint) -> (f32, f32) {
    projection.project(
        point.longitude + LABEL_OFFSET_DEGREES,
        point.latitude + LABEL_OFFSET_DEGREES,
    )
}

pub struct MapRenderer {
    settings: RenderSettings,
    basemap: Basemap,
    font: Option<FontArc>,
}

impl MapRenderer {
    /// Create a renderer. Without a font, markers are drawn unlabeled.
    pub fn new(settings: RenderSettings, basemap: Basemap, font: Option<FontArc>) -> Self {
        if font.is_none() {
            Log::log_warning("No label font available; map markers will have no labels");
        }
        Self {
            settings,
            basemap,
            font,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Plot `points` on a world map and write it to `output_path` as PNG.
    ///
    /// An empty slice produces the bare base map. Returns `output_path`.
    pub fn render(&self, output_path: impl AsRef<Path>, points: &[RenderPoint]) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        points.iter().try_for_each(check_finite)?;
        let canvas = self.draw(points);
        self.save(canvas, output_path)?;
        Log::log_debug(&format!(
            "Rendered {} point(s) to {}",
            points.len(),
            output_path.display()
        ));
        Ok(output_path.to_path_buf())
    }

    /// Draw a straight line between two points, with both markers labeled.
    pub fn render_route(
        &self,
        output_path: impl AsRef<Path>,
        from: &RenderPoint,
        to: &RenderPoint,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        check_finite(from)?;
        check_finite(to)?;
        let canvas = self.draw_route(from, to);
        self.save(canvas, output_path)?;
        Log::log_debug(&format!(
            "Rendered route {} -> {} to {}",
            from.label,
            to.label,
            output_path.display()
        ));
        Ok(output_path.to_path_buf())
    }

    /// Draw the map for `points` without writing it anywhere.
    pub fn draw(&self, points: &[RenderPoint]) -> RgbImage {
        let (mut canvas, projection) = self.base_canvas();
        let marker = self.settings.points_to_pixels(MARKER_SIZE_PT);

        for point in points {
            let center = projection.project(point.longitude, point.latitude);
            draw::draw_marker(&mut canvas, center, marker, Rgb(MARKER_COLOR));
        }
        for point in points {
            self.draw_label(&mut canvas, &projection, point, LABEL_SIZE_PT);
        }

        canvas
    }

    pub fn draw_route(&self, from: &RenderPoint, to: &RenderPoint) -> RgbImage {
        let (mut canvas, projection) = self.base_canvas();
        let start = projection.project(from.longitude, from.latitude);
        let end = projection.project(to.longitude, to.latitude);

        draw::draw_thick_line(
            &mut canvas,
            start,
            end,
            Rgb(ROUTE_COLOR),
            self.settings.points_to_pixels(ROUTE_WIDTH_PT),
        );
        let marker = self.settings.points_to_pixels(MARKER_SIZE_PT * 1.5);
        draw::draw_marker(&mut canvas, start, marker, Rgb(ROUTE_MARKER_COLOR));
        draw::draw_marker(&mut canvas, end, marker, Rgb(ROUTE_MARKER_COLOR));

        self.draw_label(&mut canvas, &projection, from, ROUTE_LABEL_SIZE_PT);
        self.draw_label(&mut canvas, &projection, to, ROUTE_LABEL_SIZE_PT);

        canvas
    }

    fn base_canvas(&self) -> (RgbImage, PlateCarree) {
        let (width, height) = self.settings.pixel_size();
        let projection = PlateCarree::new(width, height);
        let mut canvas = RgbImage::new(width, height);

        let style = BasemapStyle {
            ocean: Rgb(OCEAN_COLOR),
            land: Rgb(LAND_COLOR),
            coastline: Rgb(COASTLINE_COLOR),
            border: Rgb(BORDER_COLOR),
            border_dash: self.settings.points_to_pixels(BORDER_DOT_PT),
        };
        self.basemap.paint(&mut canvas, &projection, &style);

        (canvas, projection)
    }

    // Text sits above and to the right of its anchor, like a baseline-left label.
    fn draw_label(
        &self,
        canvas: &mut RgbImage,
        projection: &PlateCarree,
        point: &RenderPoint,
        size_pt: f32,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        if point.label.is_empty() {
            return;
        }

        let scale = PxScale::from(self.settings.points_to_pixels(size_pt));
        let (x, y) = label_anchor(projection, point);
        let (text_width, text_height) = text_size(scale, font, &point.label);
        let (text_width, text_height) = (text_width as f32, text_height as f32);

        let (width, height) = canvas.dimensions();
        let visible = x + text_width >= 0.0
            && x <= width as f32
            && y >= 0.0
            && y - text_height <= height as f32;
        if !visible {
            return;
        }

        draw_text_mut(
            canvas,
            Rgb(LABEL_COLOR),
            x.round() as i32,
            (y - text_height).round() as i32,
            scale,
            font,
            &point.label,
        );
    }

    fn save(&self, canvas: RgbImage, output_path: &Path) -> Result<()> {
        canvas.save_with_format(output_path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_renderer() -> MapRenderer {
        let settings = RenderSettings {
            dpi: 36,
            width_inches: 10.0,
            height_inches: 5.0,
        };
        MapRenderer::new(settings, Basemap::builtin().unwrap(), None)
    }

    #[test]
    fn test_default_settings_are_2000_by_1000() {
        let settings = RenderSettings::default();
        assert_eq!(settings.pixel_size(), (2000, 1000));
        assert!((settings.points_to_pixels(72.0) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_default_base_map_has_national_borders() {
        let renderer = small_renderer();
        let canvas = renderer.draw(&[]);

        // United States and Canada along the 49th parallel, inland
        let (width, height) = renderer.settings().pixel_size();
        let projection = PlateCarree::new(width, height);
        let (x0, y) = projection.project(-120.0, 49.0);
        let (x1, _) = projection.project(-97.0, 49.0);
        let y = y.round() as u32;
        let border_pixels = (x0.round() as u32..=x1.round() as u32)
            .flat_map(|x| (y - 1..=y + 1).map(move |y| (x, y)))
            .filter(|&(x, y)| *canvas.get_pixel(x, y) == Rgb(BORDER_COLOR))
            .count();
        assert!(border_pixels > 5, "border pixels: {}", border_pixels);

        // Land just north and south of the border line stays land
        let (x, y) = projection.project(-110.0, 45.0);
        assert_eq!(*canvas.get_pixel(x as u32, y as u32), Rgb(LAND_COLOR));
    }

    #[test]
    fn test_marker_is_drawn_at_projected_position() {
        let renderer = small_renderer();
        let canvas = renderer.draw(&[RenderPoint::new("X", 10.0, 20.0)]);

        let (width, height) = renderer.settings().pixel_size();
        let (x, y) = PlateCarree::new(width, height).project(20.0, 10.0);
        assert_eq!(*canvas.get_pixel(x.round() as u32, y.round() as u32), Rgb(MARKER_COLOR));
    }

    #[test]
    fn test_draw_is_deterministic() {
        let renderer = small_renderer();
        let points = [RenderPoint::new("A", 48.85, 2.35), RenderPoint::new("B", -33.87, 151.21)];
        assert_eq!(renderer.draw(&points), renderer.draw(&points));
    }

    #[test]
    fn test_route_draws_line_between_points() {
        let renderer = small_renderer();
        let from = RenderPoint::new("A", 0.0, -100.0);
        let to = RenderPoint::new("B", 0.0, -60.0);
        let canvas = renderer.draw_route(&from, &to);

        let (width, height) = renderer.settings().pixel_size();
        let (x, y) = PlateCarree::new(width, height).project(-80.0, 0.0);
        assert_eq!(*canvas.get_pixel(x.round() as u32, y.round() as u32), Rgb(ROUTE_COLOR));
    }

    #[test]
    fn test_render_returns_output_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.png");

        let written = small_renderer().render(&path, &[]).unwrap();
        assert_eq!(written, path);
        assert!(path.exists());
    }

    #[test]
    fn test_render_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("map.png");
        assert!(small_renderer().render(&path, &[]).is_err());
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.png");
        let points = [RenderPoint::new("Nowhere", f64::NAN, 0.0)];

        let err = small_renderer().render(&path, &points).unwrap_err();
        assert!(matches!(err, CityMapError::Render(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_extreme_coordinates_do_not_panic() {
        let renderer = MapRenderer::new(
            RenderSettings {
                dpi: 36,
                width_inches: 10.0,
                height_inches: 5.0,
            },
            Basemap::builtin().unwrap(),
            load_font(None),
        );
        let points = [
            RenderPoint::new("South", -1e12, 0.0),
            RenderPoint::new("North", 1e12, 0.0),
            RenderPoint::new("West", 0.0, -1e12),
            RenderPoint::new("East", 0.0, 1e12),
        ];

        let canvas = renderer.draw(&points);
        assert_eq!(canvas, renderer.draw(&[]));

        let canvas = renderer.draw_route(&points[0], &points[3]);
        assert_eq!(canvas.dimensions(), (360, 180));
    }

    #[test]
    fn test_label_anchor_is_one_degree_north_east() {
        let projection = PlateCarree::new(2000, 1000);
        let point = RenderPoint::new("Paris", 48.8566, 2.3522);

        let anchor = label_anchor(&projection, &point);
        assert_eq!(anchor, projection.project(3.3522, 49.8566));

        let (marker_x, marker_y) = projection.project(point.longitude, point.latitude);
        let (dx, dy) = projection.scale();
        assert!((anchor.0 - marker_x - dx as f32).abs() < 1e-3);
        assert!((marker_y - anchor.1 - dy as f32).abs() < 1e-3);
    }

    #[test]
    fn test_label_is_drawn_beside_marker_when_font_available() {
        let Some(font) = load_font(None) else {
            return;
        };
        let settings = RenderSettings::default();
        let labeled = MapRenderer::new(settings, Basemap::builtin().unwrap(), Some(font));
        let plain = MapRenderer::new(settings, Basemap::builtin().unwrap(), None);
        let point = RenderPoint::new("Hobart", -42.8821, 147.3272);

        let with_label = labeled.draw(std::slice::from_ref(&point));
        let without_label = plain.draw(std::slice::from_ref(&point));

        // Text lands above and right of the anchor, inside the box it measures
        let projection = PlateCarree::new(2000, 1000);
        let (x, y) = label_anchor(&projection, &point);
        let (x, y) = (x.round() as u32, y.round() as u32);
        let changed: Vec<(u32, u32)> = with_label
            .enumerate_pixels()
            .filter(|&(px, py, pixel)| *pixel != *without_label.get_pixel(px, py))
            .map(|(px, py, _)| (px, py))
            .collect();

        assert!(!changed.is_empty());
        assert!(changed.iter().all(|&(px, py)| px + 2 >= x && py <= y + 2));
    }

    #[test]
    fn test_missing_configured_font_falls_back_quietly() {
        // Whatever the system has, a bad path must not panic.
        let _ = load_font(Some(Path::new("/nonexistent/font.ttf")));
    }
}
