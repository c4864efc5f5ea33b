//! Rasterize laid-out glyphs into a disc texture with the 8x8 bitmap font.

use diorama_materials::{Paint, PixelBuffer};
use font8x8::UnicodeFonts;

use crate::layout::GlyphPlacement;

/// Burn every placement into `buffer`, each glyph cell scaled to `glyph_px`
/// pixels and rotated about its centre.
///
/// Placements are relative to the buffer centre. Each destination pixel is
/// mapped back into the glyph cell, so rotated glyphs have no holes. Glyphs the
/// font lacks are skipped; anything outside the buffer is clipped.
pub fn burn_glyphs(
    buffer: &mut PixelBuffer,
    placements: &[GlyphPlacement],
    glyph_px: f32,
    paint: Paint,
) {
    if glyph_px <= 0.0 || buffer.is_empty() {
        return;
    }
    let half = glyph_px * 0.5;
    let reach = half * std::f32::consts::SQRT_2;
    let cell = 8.0 / glyph_px;
    let origin = [buffer.width() as f32 * 0.5, buffer.height() as f32 * 0.5];

    let mut skipped = 0usize;
    for placement in placements {
        let Some(bitmap) = font8x8::BASIC_FONTS.get(placement.glyph) else {
            skipped += 1;
            continue;
        };
        let cx = origin[0] + placement.x;
        let cy = origin[1] + placement.y;
        let (sin, cos) = placement.rotation.sin_cos();

        let x0 = (cx - reach).floor().max(0.0) as u32;
        let y0 = (cy - reach).floor().max(0.0) as u32;
        let x1 = ((cx + reach).ceil().max(0.0) as u32).min(buffer.width());
        let y1 = ((cy + reach).ceil().max(0.0) as u32).min(buffer.height());

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                // Undo the glyph rotation to land in its unrotated cell.
                let lx = dx * cos + dy * sin + half;
                let ly = -dx * sin + dy * cos + half;
                if lx < 0.0 || ly < 0.0 {
                    continue;
                }
                let col = (lx * cell) as usize;
                let row = (ly * cell) as usize;
                if col < 8 && row < 8 && bitmap[row] & (1 << col) != 0 {
                    buffer.blend(px, py, paint);
                }
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} glyphs missing from the bitmap font");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_materials::PixelFormat;
    use std::f32::consts::PI;

    const INK: Paint = Paint::opaque([0, 255, 255]);

    fn inked(buffer: &PixelBuffer) -> Vec<(u32, u32)> {
        let mut hits = Vec::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if buffer.rgba_at(x, y)[3] > 0 {
                    hits.push((x, y));
                }
            }
        }
        hits
    }

    fn placed(glyph: char, x: f32, y: f32, rotation: f32) -> GlyphPlacement {
        GlyphPlacement {
            glyph,
            x,
            y,
            rotation,
        }
    }

    #[test]
    fn test_unrotated_glyph_matches_font_bitmap() {
        let mut buffer = PixelBuffer::new(8, 8, PixelFormat::Rgba);
        burn_glyphs(&mut buffer, &[placed('A', 0.0, 0.0, 0.0)], 8.0, INK);

        let bitmap = font8x8::BASIC_FONTS.get('A').unwrap();
        for y in 0..8u32 {
            for x in 0..8u32 {
                let expected = bitmap[y as usize] & (1 << x) != 0;
                let lit = buffer.rgba_at(x, y)[3] > 0;
                assert_eq!(lit, expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_glyph_lands_near_its_placement() {
        let mut buffer = PixelBuffer::new(128, 128, PixelFormat::Rgba);
        burn_glyphs(&mut buffer, &[placed('M', 40.0, -30.0, 0.7)], 16.0, INK);
        let hits = inked(&buffer);
        assert!(!hits.is_empty());
        for (x, y) in hits {
            let dx = x as f32 + 0.5 - 104.0;
            let dy = y as f32 + 0.5 - 34.0;
            assert!(dx.hypot(dy) <= 8.0 * std::f32::consts::SQRT_2 + 1.0);
        }
    }

    #[test]
    fn test_half_turn_mirrors_glyph() {
        let mut upright = PixelBuffer::new(32, 32, PixelFormat::Rgba);
        let mut flipped = PixelBuffer::new(32, 32, PixelFormat::Rgba);
        burn_glyphs(&mut upright, &[placed('F', 0.0, 0.0, 0.0)], 16.0, INK);
        burn_glyphs(&mut flipped, &[placed('F', 0.0, 0.0, PI)], 16.0, INK);

        let mut matched = 0;
        let hits = inked(&upright);
        for &(x, y) in &hits {
            if flipped.rgba_at(31 - x, 31 - y)[3] > 0 {
                matched += 1;
            }
        }
        assert!(matched * 10 >= hits.len() * 9, "{matched}/{}", hits.len());
    }

    #[test]
    fn test_missing_glyph_and_offscreen_are_ignored() {
        let mut buffer = PixelBuffer::new(16, 16, PixelFormat::Rgba);
        burn_glyphs(
            &mut buffer,
            &[placed('\u{2603}', 0.0, 0.0, 0.0), placed('A', 500.0, 500.0, 0.0)],
            8.0,
            INK,
        );
        assert!(inked(&buffer).is_empty());
    }

    #[test]
    fn test_non_positive_size_draws_nothing() {
        let mut buffer = PixelBuffer::new(16, 16, PixelFormat::Rgba);
        burn_glyphs(&mut buffer, &[placed('A', 0.0, 0.0, 0.0)], 0.0, INK);
        assert!(inked(&buffer).is_empty());
    }
}
