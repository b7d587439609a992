//! Region geometry and pixel extraction
//!
//! Rectangles arrive in canvas coordinates from pointer input. They are
//! normalized, checked against the minimum size, and cut out of the image
//! as a pixel list for the sampler.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::color::analysis::Pixel;
use crate::color::conversion::Color;

/// Stable identifier of a region within a session
pub type RegionId = u64;

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by a drag from `start` to `end`, in any direction
    pub fn from_corners(start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            x: start.0.min(end.0),
            y: start.1.min(end.1),
            width: (end.0 - start.0).abs(),
            height: (end.1 - start.1).abs(),
        }
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True unless both sides strictly exceed `min_size`
    pub fn is_degenerate(&self, min_size: f64) -> bool {
        !(self.width > min_size && self.height > min_size)
    }

    /// Integer pixel bounds `(x0, y0, x1, y1)` clipped to an image, half-open
    ///
    /// Coordinates are truncated toward zero. Returns `None` when nothing of
    /// the rectangle lies inside the image.
    pub fn pixel_bounds(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x = self.x.trunc() as i64;
        let y = self.y.trunc() as i64;
        let w = self.width.trunc() as i64;
        let h = self.height.trunc() as i64;

        let x0 = x.clamp(0, i64::from(image_width));
        let y0 = y.clamp(0, i64::from(image_height));
        let x1 = x.saturating_add(w).clamp(0, i64::from(image_width));
        let y1 = y.saturating_add(h).clamp(0, i64::from(image_height));

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Copy the pixels under `rect` out of `image`, row by row
///
/// Parts of the rectangle outside the image contribute nothing.
pub fn extract_pixels(image: &RgbaImage, rect: &Rect) -> Vec<Pixel> {
    let Some((x0, y0, x1, y1)) = rect.pixel_bounds(image.width(), image.height()) else {
        return Vec::new();
    };

    let mut pixels = Vec::with_capacity(((x1 - x0) * (y1 - y0)) as usize);
    for y in y0..y1 {
        for x in x0..x1 {
            pixels.push(*image.get_pixel(x, y));
        }
    }
    pixels
}

/// A user-drawn rectangle and its sampled color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub rect: Rect,
    /// Set once sampled, never changed afterwards
    pub color: Option<Color>,
}

impl Region {
    pub fn new(id: RegionId, rect: Rect, color: Option<Color>) -> Self {
        Self { id, rect, color }
    }
}

/// Display label for the region at a 0-based position, e.g. "Square 1"
pub fn label(index: usize) -> String {
    format!("Square {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn test_from_corners_normalizes_drag_direction() {
        let rect = Rect::from_corners((40.0, 30.0), (10.0, 50.0));
        assert_eq!(rect, Rect::new(10.0, 30.0, 30.0, 20.0));
    }

    #[test]
    fn test_is_degenerate_requires_strictly_larger() {
        assert!(Rect::new(0.0, 0.0, 5.0, 20.0).is_degenerate(5.0));
        assert!(Rect::new(0.0, 0.0, 20.0, 3.0).is_degenerate(5.0));
        assert!(!Rect::new(0.0, 0.0, 5.5, 6.0).is_degenerate(5.0));
    }

    #[test]
    fn test_pixel_bounds_truncates_and_clips() {
        let rect = Rect::new(2.7, 3.2, 10.9, 4.5);
        assert_eq!(rect.pixel_bounds(100, 100), Some((2, 3, 12, 7)));

        let overhang = Rect::new(-5.0, 95.0, 20.0, 20.0);
        assert_eq!(overhang.pixel_bounds(100, 100), Some((0, 95, 15, 100)));

        let outside = Rect::new(200.0, 0.0, 10.0, 10.0);
        assert_eq!(outside.pixel_bounds(100, 100), None);
    }

    #[test]
    fn test_pixel_bounds_unbounded_sides_clip_to_image() {
        let wide = Rect::new(1.0, 0.0, f64::INFINITY, 10.0);
        assert_eq!(wide.pixel_bounds(20, 20), Some((1, 0, 20, 10)));

        let tall = Rect::new(0.0, 3.0, 5.0, f64::MAX);
        assert_eq!(tall.pixel_bounds(20, 20), Some((0, 3, 5, 20)));

        assert!(!wide.is_finite());
        assert!(!Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_finite());
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).is_finite());
    }

    #[test]
    fn test_extract_pixels_row_major() {
        let image = gradient(20, 20);
        let pixels = extract_pixels(&image, &Rect::new(1.0, 2.0, 3.0, 2.0));
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[0], Rgba([1, 2, 0, 255]));
        assert_eq!(pixels[2], Rgba([3, 2, 0, 255]));
        assert_eq!(pixels[5], Rgba([3, 3, 0, 255]));
    }

    #[test]
    fn test_extract_pixels_outside_image_is_empty() {
        let image = gradient(10, 10);
        assert!(extract_pixels(&image, &Rect::new(50.0, 50.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_label_is_one_based() {
        assert_eq!(label(0), "Square 1");
        assert_eq!(label(9), "Square 10");
    }
}
