/// Software rasterizer: an RGBA pixel buffer that implements `DrawingSurface`

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use crate::rendering::paint::{Color, DrawingSurface, Glyph};
use crate::rendering::Screenshot;
use crate::Result;

/// RGBA surface with source-over compositing. Pixels are covered when their
/// centre falls inside a shape; there is no anti-aliasing.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Raw RGBA bytes in row-major order
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Hex SHA-256 of the raw pixel buffer, stable across platforms
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.image.width().to_le_bytes());
        hasher.update(self.image.height().to_le_bytes());
        hasher.update(self.image.as_raw());
        hex::encode(hasher.finalize())
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn screenshot(&self) -> Result<Screenshot> {
        Ok(Screenshot {
            width: self.image.width(),
            height: self.image.height(),
            png_data: self.to_png()?,
        })
    }

    /// Blend `color` into every pixel in the clipped box whose centre passes `covers`.
    fn fill_where<F>(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color, covers: F)
    where
        F: Fn(f64, f64) -> bool,
    {
        let (w, h) = self.image.dimensions();
        let px0 = x0.floor().max(0.0) as u32;
        let py0 = y0.floor().max(0.0) as u32;
        let px1 = (x1.ceil().max(0.0) as u32).min(w);
        let py1 = (y1.ceil().max(0.0) as u32).min(h);
        for py in py0..py1 {
            for px in px0..px1 {
                if covers(px as f64 + 0.5, py as f64 + 0.5) {
                    blend(self.image.get_pixel_mut(px, py), color);
                }
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Color) {
    let sa = src.a.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

impl DrawingSurface for RasterSurface {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_linear_gradient(&mut self, from: (f64, f64), to: (f64, f64), start: Color, end: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len2 = dx * dx + dy * dy;
        let (w, h) = self.image.dimensions();
        for py in 0..h {
            for px in 0..w {
                let t = if len2 > 0.0 {
                    (((px as f64 + 0.5 - from.0) * dx + (py as f64 + 0.5 - from.1) * dy) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let c = Color {
                    r: lerp(start.r, end.r, t),
                    g: lerp(start.g, end.g, t),
                    b: lerp(start.b, end.b, t),
                    a: start.a + (end.a - start.a) * t as f32,
                };
                blend(self.image.get_pixel_mut(px, py), c);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r2 = radius * radius;
        self.fill_where(cx - radius, cy - radius, cx + radius, cy + radius, color, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= r2
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.fill_where(x, y, x + width, y + height, color, |px, py| {
            px >= x && px < x + width && py >= y && py < y + height
        });
    }

    fn draw_glyph(&mut self, glyph: Glyph, cx: f64, cy: f64, size: f64, color: Color) {
        match glyph {
            Glyph::Camera => {
                // body, viewfinder hump, lens
                self.fill_rect(cx - 0.5 * size, cy - 0.3 * size, size, 0.65 * size, color);
                self.fill_rect(cx - 0.2 * size, cy - 0.42 * size, 0.4 * size, 0.12 * size, color);
                self.fill_circle(cx, cy + 0.03 * size, 0.22 * size, Color::rgb(0, 0, 0).with_alpha(0.35));
                self.fill_circle(cx, cy + 0.03 * size, 0.1 * size, color);
            }
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64, color: Color) {
        let half = line_width / 2.0;
        let (ox0, oy0, ox1, oy1) = (x - half, y - half, x + width + half, y + height + half);
        let (ix0, iy0, ix1, iy1) = (x + half, y + half, x + width - half, y + height - half);
        self.fill_where(ox0, oy0, ox1, oy1, color, |px, py| {
            let outer = px >= ox0 && px < ox1 && py >= oy0 && py < oy1;
            let inner = px >= ix0 && px < ix1 && py >= iy0 && py < iy1;
            outer && !inner
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_surface_is_transparent() {
        let s = RasterSurface::blank(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert!(s.as_rgba().iter().all(|b| *b == 0));
    }

    #[test]
    fn opaque_rect_replaces_pixels() {
        let mut s = RasterSurface::blank(4, 4);
        s.fill_rect(1.0, 1.0, 2.0, 2.0, Color::rgb(255, 0, 0));
        assert_eq!(s.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(s.pixel(2, 2), [255, 0, 0, 255]);
        assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(s.pixel(3, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn translucent_fill_blends_over_opaque() {
        let mut s = RasterSurface::blank(1, 1);
        s.fill_rect(0.0, 0.0, 1.0, 1.0, Color::rgb(0, 0, 0));
        s.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE.with_alpha(0.5));
        let p = s.pixel(0, 0);
        assert_eq!(p[3], 255);
        assert!((127..=128).contains(&p[0]));
    }

    #[test]
    fn gradient_runs_from_start_to_end() {
        let mut s = RasterSurface::blank(10, 1);
        s.fill_linear_gradient((0.0, 0.0), (10.0, 0.0), Color::rgb(0, 0, 0), Color::rgb(200, 200, 200));
        assert!(s.pixel(0, 0)[0] < s.pixel(9, 0)[0]);
        assert_eq!(s.pixel(0, 0)[3], 255);
    }

    #[test]
    fn circle_clips_to_surface() {
        let mut s = RasterSurface::blank(8, 8);
        s.fill_circle(0.0, 0.0, 3.0, Color::WHITE);
        assert_eq!(s.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(s.pixel(7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn stroke_covers_only_the_edge() {
        let mut s = RasterSurface::blank(6, 6);
        s.stroke_rect(0.0, 0.0, 6.0, 6.0, 2.0, Color::WHITE);
        assert_eq!(s.pixel(0, 3)[3], 255);
        assert_eq!(s.pixel(5, 3)[3], 255);
        assert_eq!(s.pixel(3, 0)[3], 255);
        assert_eq!(s.pixel(3, 3)[3], 0);
    }

    #[test]
    fn clear_resets_pixels() {
        let mut s = RasterSurface::blank(2, 2);
        s.fill_rect(0.0, 0.0, 2.0, 2.0, Color::WHITE);
        s.clear();
        assert!(s.as_rgba().iter().all(|b| *b == 0));
    }

    #[test]
    fn png_export_has_signature() {
        let mut s = RasterSurface::blank(16, 8);
        s.fill_rect(0.0, 0.0, 16.0, 8.0, Color::rgb(10, 20, 30));
        let shot = s.screenshot().unwrap();
        assert_eq!(shot.width, 16);
        assert_eq!(shot.height, 8);
        assert_eq!(&shot.png_data[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn digest_tracks_pixel_changes() {
        let a = RasterSurface::blank(4, 4);
        let mut b = RasterSurface::blank(4, 4);
        assert_eq!(a.digest(), b.digest());
        b.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        assert_ne!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
    }
}
