//! Equirectangular (Plate Carrée) projection onto the full canvas.

/// Maps longitude -180..180 to x 0..width and latitude 90..-90 to y 0..height.
///
/// Nothing is clamped: coordinates outside those ranges land off the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateCarree {
    width: u32,
    height: u32,
}

impl PlateCarree {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel position of a geographic coordinate.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f32, f32) {
        let x = (longitude + 180.0) / 360.0 * self.width as f64;
        let y = (90.0 - latitude) / 180.0 * self.height as f64;
        (x as f32, y as f32)
    }

    /// Pixels per degree along each axis.
    pub fn scale(&self) -> (f64, f64) {
        (self.width as f64 / 360.0, self.height as f64 / 180.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_and_centre() {
        let projection = PlateCarree::new(2000, 1000);

        assert_eq!(projection.project(-180.0, 90.0), (0.0, 0.0));
        assert_eq!(projection.project(0.0, 0.0), (1000.0, 500.0));
        assert_eq!(projection.project(180.0, -90.0), (2000.0, 1000.0));
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let projection = PlateCarree::new(360, 180);

        let (x, y) = projection.project(200.0, 100.0);
        assert!(x > 360.0);
        assert!(y < 0.0);
    }

    #[test]
    fn test_scale() {
        let projection = PlateCarree::new(720, 360);
        assert_eq!(projection.scale(), (2.0, 2.0));
    }
}
