//! RGBA raster surface

use std::f64::consts::TAU;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::{colors, ArcStroke, Paint, Point, Surface, TextAlign, TextStyle};

/// Pixel surface with hard-edged coverage: a pixel is painted when its
/// center falls inside the shape, so output is fully deterministic.
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, colors::TRANSPARENT),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    fn plot(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u64) < self.image.width() as u64 && (y as u64) < self.image.height() as u64 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Pixel index range covering `[min, max]`, clipped to `[0, limit)`
    fn span(min: f64, max: f64, limit: u32) -> std::ops::Range<i64> {
        let lo = min.floor().max(0.0) as i64;
        let hi = (max.ceil() as i64 + 1).min(limit as i64);
        lo..hi.max(lo)
    }

    fn fill_where(&mut self, min: Point, max: Point, mut shade: impl FnMut(f64, f64) -> Option<Rgba<u8>>) {
        let (w, h) = (self.image.width(), self.image.height());
        for py in Self::span(min.y, max.y, h) {
            for px in Self::span(min.x, max.x, w) {
                if let Some(color) = shade(px as f64 + 0.5, py as f64 + 0.5) {
                    self.plot(px, py, color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = colors::TRANSPARENT;
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba<u8>) {
        if radius <= 0.0 {
            return;
        }

        let r2 = radius * radius;
        self.fill_where(
            Point::new(center.x - radius, center.y - radius),
            Point::new(center.x + radius, center.y + radius),
            |x, y| {
                let (dx, dy) = (x - center.x, y - center.y);
                (dx * dx + dy * dy <= r2).then_some(color)
            },
        );
    }

    fn stroke_arc(&mut self, arc: &ArcStroke, paint: &Paint) {
        let sweep = arc.end_angle - arc.start_angle;
        if sweep <= 0.0 || arc.radius <= 0.0 || arc.width <= 0.0 {
            return;
        }

        let half = arc.width / 2.0;
        let outer = arc.radius + half;
        self.fill_where(
            Point::new(arc.center.x - outer, arc.center.y - outer),
            Point::new(arc.center.x + outer, arc.center.y + outer),
            |x, y| {
                let (dx, dy) = (x - arc.center.x, y - arc.center.y);
                let distance = dx.hypot(dy);
                if (distance - arc.radius).abs() > half {
                    return None;
                }

                let offset = (dy.atan2(dx) - arc.start_angle).rem_euclid(TAU);
                (sweep >= TAU || offset <= sweep).then(|| paint.color_at(x))
            },
        );
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba<u8>) {
        let half = (width / 2.0).max(0.5);
        let (vx, vy) = (to.x - from.x, to.y - from.y);
        let length2 = vx * vx + vy * vy;

        self.fill_where(
            Point::new(from.x.min(to.x) - half, from.y.min(to.y) - half),
            Point::new(from.x.max(to.x) + half, from.y.max(to.y) + half),
            |x, y| {
                // distance from the pixel center to the segment
                let t = if length2 > 0.0 {
                    (((x - from.x) * vx + (y - from.y) * vy) / length2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (cx, cy) = (from.x + t * vx, from.y + t * vy);
                ((x - cx).hypot(y - cy) <= half).then_some(color)
            },
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        let scale = font::scale_for(style.size);
        let width = font::text_width(text, scale) as f64;
        let height = (GLYPH_HEIGHT * scale) as f64;

        let left = match style.align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - width / 2.0,
            TextAlign::Right => at.x - width,
        }
        .round() as i64;
        let top = (at.y - height / 2.0).round() as i64;
        let scale = scale as i64;

        for (index, c) in text.chars().enumerate() {
            let origin_x = left + index as i64 * ADVANCE as i64 * scale;
            for (row, bits) in font::glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let x0 = origin_x + col as i64 * scale;
                    let y0 = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.plot(x0 + dx, y0 + dy, style.color);
                        }
                    }
                }
            }
        }
    }
}
