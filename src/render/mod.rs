//! Chart rendering
//!
//! Drawing goes through the [`Surface`] trait, a small immediate-mode
//! canvas. [`RasterSurface`] implements it over an RGBA image and can encode
//! the result as PNG; the radial impact chart lives in [`radial`].

mod font;
mod raster;
pub mod radial;

pub use radial::render;
pub use raster::RasterSurface;

use std::ops::RangeInclusive;

use image::Rgba;

/// Accepted chart edge lengths in pixels
pub const CHART_SIZE_RANGE: RangeInclusive<u32> = 100..=1000;

/// Common color definitions
pub mod colors {
    use image::Rgba;

    pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
    pub const SLATE_100: Rgba<u8> = Rgba([241, 245, 249, 255]);
    pub const SLATE_200: Rgba<u8> = Rgba([226, 232, 240, 255]);
    pub const SLATE_300: Rgba<u8> = Rgba([203, 213, 225, 255]);
    pub const SLATE_500: Rgba<u8> = Rgba([100, 116, 139, 255]);
    pub const SLATE_900: Rgba<u8> = Rgba([15, 23, 42, 255]);
    pub const ORANGE: Rgba<u8> = Rgba([249, 115, 22, 255]);
    pub const RED: Rgba<u8> = Rgba([239, 68, 68, 255]);
    pub const AMBER: Rgba<u8> = Rgba([245, 158, 11, 255]);
    pub const EMERALD: Rgba<u8> = Rgba([16, 185, 129, 255]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` (screen coordinates, y down)
    pub fn polar(&self, angle: f64, radius: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}

/// Circular arc stroked clockwise from `start_angle` to `end_angle`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba<u8>),
    /// Left-to-right blend between `x0` and `x1`
    HorizontalGradient {
        x0: f64,
        x1: f64,
        from: Rgba<u8>,
        to: Rgba<u8>,
    },
}

impl Paint {
    pub fn color_at(&self, x: f64) -> Rgba<u8> {
        match *self {
            Paint::Solid(color) => color,
            Paint::HorizontalGradient { x0, x1, from, to } => {
                let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
                interpolate_color(from, to, t)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Text is anchored vertically at its middle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Rgba<u8>,
    pub align: TextAlign,
}

/// Immediate-mode drawing target
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn clear(&mut self);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba<u8>);
    fn stroke_arc(&mut self, arc: &ArcStroke, paint: &Paint);
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba<u8>);
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// Interpolate between two colors
pub fn interpolate_color(c1: Rgba<u8>, c2: Rgba<u8>, t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t) * a as f64 + t * b as f64).round() as u8;
    Rgba([
        mix(c1.0[0], c2.0[0]),
        mix(c1.0[1], c2.0[1]),
        mix(c1.0[2], c2.0[2]),
        mix(c1.0[3], c2.0[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_color() {
        let c1 = Rgba([0, 0, 0, 255]);
        let c2 = Rgba([255, 255, 255, 255]);

        assert_eq!(interpolate_color(c1, c2, 0.0), c1);
        assert_eq!(interpolate_color(c1, c2, 1.0), c2);
        assert_eq!(interpolate_color(c1, c2, 0.5), Rgba([128, 128, 128, 255]));
        assert_eq!(interpolate_color(c1, c2, 7.0), c2);
    }

    #[test]
    fn test_gradient_endpoints() {
        let paint = Paint::HorizontalGradient {
            x0: 0.0,
            x1: 300.0,
            from: colors::ORANGE,
            to: colors::RED,
        };
        assert_eq!(paint.color_at(-5.0), colors::ORANGE);
        assert_eq!(paint.color_at(300.0), colors::RED);
        assert_eq!(Paint::Solid(colors::AMBER).color_at(42.0), colors::AMBER);
    }

    #[test]
    fn test_polar() {
        let c = Point::new(150.0, 150.0);
        let p = c.polar(std::f64::consts::FRAC_PI_2, 10.0);
        assert!((p.x - 150.0).abs() < 1e-9);
        assert!((p.y - 160.0).abs() < 1e-9);
    }
}
