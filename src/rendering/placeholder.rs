//! Procedural placeholder images.
//!
//! Every placeholder is a two-colour diagonal gradient with translucent
//! circles, a few white speckles, a centred camera glyph and a thin border.
//! The number of circles is the only thing the quality tier changes.

use rand::Rng;

use crate::gallery::quality::QualityTier;
use crate::rendering::paint::{Color, DrawingSurface, Glyph};

/// Background and circle colours
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE",
    "#85C1E9",
];

const CIRCLE_ALPHA: f32 = 0.3;
const MIN_RADIUS: f64 = 10.0;
const RADIUS_SPREAD: f64 = 50.0;
const SPECKLE_COUNT: usize = 5;
const SPECKLE_ALPHA: f32 = 0.4;
const GLYPH_SIZE: f64 = 32.0;
const GLYPH_ALPHA: f32 = 0.9;
const BORDER_WIDTH: f64 = 2.0;
const BORDER_ALPHA: f32 = 0.3;

/// Circles drawn for a tier
pub fn shape_count(tier: QualityTier) -> usize {
    match tier {
        QualityTier::High => 20,
        QualityTier::Medium => 10,
        QualityTier::Low => 5,
    }
}

fn palette_color<R: Rng>(rng: &mut R) -> Color {
    let hex = PALETTE[rng.gen_range(0..PALETTE.len())];
    // the palette is a constant table of valid #RRGGBB strings
    Color::from_hex(hex).unwrap_or(Color::WHITE)
}

/// Clear `surface` and draw a procedural image of `width` × `height` on it.
pub fn render_placeholder<S, R>(surface: &mut S, width: u32, height: u32, tier: QualityTier, rng: &mut R)
where
    S: DrawingSurface + ?Sized,
    R: Rng,
{
    let (w, h) = (width as f64, height as f64);
    surface.clear();

    let start = palette_color(rng);
    let end = palette_color(rng);
    surface.fill_linear_gradient((0.0, 0.0), (w, h), start, end);

    for _ in 0..shape_count(tier) {
        let x = rng.gen::<f64>() * w;
        let y = rng.gen::<f64>() * h;
        let radius = rng.gen::<f64>() * RADIUS_SPREAD + MIN_RADIUS;
        let color = palette_color(rng).with_alpha(CIRCLE_ALPHA);
        surface.fill_circle(x, y, radius, color);
    }

    for _ in 0..SPECKLE_COUNT {
        let x = rng.gen::<f64>() * w;
        let y = rng.gen::<f64>() * h;
        let size = rng.gen::<f64>() * 3.0 + 1.0;
        surface.fill_rect(x, y, size, size, Color::WHITE.with_alpha(SPECKLE_ALPHA));
    }

    surface.draw_glyph(Glyph::Camera, w / 2.0, h / 2.0, GLYPH_SIZE, Color::WHITE.with_alpha(GLYPH_ALPHA));
    surface.stroke_rect(0.0, 0.0, w, h, BORDER_WIDTH, Color::WHITE.with_alpha(BORDER_ALPHA));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::{PaintCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn palette_entries_parse() {
        for hex in PALETTE {
            assert!(Color::from_hex(hex).is_some(), "bad palette entry {}", hex);
        }
    }

    #[test]
    fn draw_order_is_gradient_circles_speckles_glyph_border() {
        let mut s = RecordingSurface::blank(300, 250);
        let mut rng = StdRng::seed_from_u64(7);
        render_placeholder(&mut s, 300, 250, QualityTier::Low, &mut rng);

        let cmds = s.commands();
        assert_eq!(cmds.len(), 1 + 1 + 5 + 5 + 1 + 1);
        assert!(matches!(cmds[0], PaintCommand::Clear { width: 300, height: 250 }));
        assert!(matches!(
            cmds[1],
            PaintCommand::LinearGradient { from, to, .. } if from == (0.0, 0.0) && to == (300.0, 250.0)
        ));
        assert!(cmds[2..7].iter().all(|c| matches!(c, PaintCommand::Circle { .. })));
        assert!(cmds[7..12].iter().all(|c| matches!(c, PaintCommand::Rect { .. })));
        assert!(matches!(
            cmds[12],
            PaintCommand::Glyph { glyph: Glyph::Camera, cx, cy, .. } if cx == 150.0 && cy == 125.0
        ));
        assert!(matches!(cmds[13], PaintCommand::StrokeRect { line_width, .. } if line_width == 2.0));
    }

    #[test]
    fn shapes_stay_within_their_ranges() {
        let mut s = RecordingSurface::blank(300, 250);
        let mut rng = StdRng::seed_from_u64(42);
        render_placeholder(&mut s, 300, 250, QualityTier::High, &mut rng);

        for cmd in s.commands() {
            match *cmd {
                PaintCommand::Circle { cx, cy, radius, color } => {
                    assert!((0.0..300.0).contains(&cx));
                    assert!((0.0..250.0).contains(&cy));
                    assert!((10.0..60.0).contains(&radius));
                    assert_eq!(color.a, 0.3);
                }
                PaintCommand::Rect { width, height, color, .. } => {
                    assert!((1.0..4.0).contains(&width));
                    assert_eq!(width, height);
                    assert_eq!(color, Color::WHITE.with_alpha(0.4));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn rendering_twice_replaces_previous_drawing() {
        let mut s = RecordingSurface::blank(300, 250);
        let mut rng = StdRng::seed_from_u64(1);
        render_placeholder(&mut s, 300, 250, QualityTier::High, &mut rng);
        render_placeholder(&mut s, 300, 250, QualityTier::Low, &mut rng);
        assert_eq!(s.circle_count(), 5);
    }
}
