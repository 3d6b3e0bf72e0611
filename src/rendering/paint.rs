/// Canvas-style paint API shared by every drawing backend

/// Straight (non-premultiplied) RGBA colour with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse a `#RRGGBB` string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Glyphs the surfaces know how to draw. There is no font stack, so symbols
/// are drawn as vector shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Camera,
}

/// Recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Clear {
        width: u32,
        height: u32,
    },
    LinearGradient {
        from: (f64, f64),
        to: (f64, f64),
        start: Color,
        end: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Glyph {
        glyph: Glyph,
        cx: f64,
        cy: f64,
        size: f64,
        color: Color,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Color,
    },
}

/// A 2-D drawing context of fixed logical size.
///
/// The subset mirrors what the placeholder generator needs from an HTML
/// canvas: clearing, a full-surface linear gradient, filled circles and
/// rectangles, a centred glyph and a rectangle stroke. Alpha is carried by
/// each colour rather than by a global alpha register.
pub trait DrawingSurface {
    /// Create a fully transparent surface
    fn blank(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Fill the whole surface with a two-stop gradient along `from -> to`
    fn fill_linear_gradient(&mut self, from: (f64, f64), to: (f64, f64), start: Color, end: Color);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Draw `glyph` centred on `(cx, cy)` inside a `size` × `size` box
    fn draw_glyph(&mut self, glyph: Glyph, cx: f64, cy: f64, size: f64, color: Color);

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64, color: Color);
}

/// Surface that records every call instead of drawing pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<PaintCommand>,
}

impl RecordingSurface {
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Circle { .. }))
            .count()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Rect { .. }))
            .count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(PaintCommand::Clear {
            width: self.width,
            height: self.height,
        });
    }

    fn fill_linear_gradient(&mut self, from: (f64, f64), to: (f64, f64), start: Color, end: Color) {
        self.commands.push(PaintCommand::LinearGradient { from, to, start, end });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.commands.push(PaintCommand::Circle { cx, cy, radius, color });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(PaintCommand::Rect { x, y, width, height, color });
    }

    fn draw_glyph(&mut self, glyph: Glyph, cx: f64, cy: f64, size: f64, color: Color) {
        self.commands.push(PaintCommand::Glyph { glyph, cx, cy, size, color });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, line_width: f64, color: Color) {
        self.commands.push(PaintCommand::StrokeRect {
            x,
            y,
            width,
            height,
            line_width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#FF6B6B"), Some(Color::rgb(255, 107, 107)));
        assert_eq!(Color::from_hex("#85c1e9"), Some(Color::rgb(0x85, 0xC1, 0xE9)));
        assert_eq!(Color::from_hex("FF6B6B"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn clear_drops_earlier_commands() {
        let mut s = RecordingSurface::blank(10, 10);
        s.fill_circle(1.0, 1.0, 1.0, Color::WHITE);
        s.clear();
        assert_eq!(s.commands(), &[PaintCommand::Clear { width: 10, height: 10 }]);
        assert_eq!(s.circle_count(), 0);
    }
}
