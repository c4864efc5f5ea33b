//! Radial glyph layout around the centre of a square disc texture.

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::Rng;

/// Characters used for random inscriptions and padding.
pub const FILLER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// Length of each filler word appended while padding a ring.
const FILLER_WORD_LEN: usize = 3;

/// One glyph's transform, relative to the texture centre (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub glyph: char,
    pub x: f32,
    pub y: f32,
    /// Clockwise rotation in radians applied about the glyph's own centre.
    pub rotation: f32,
}

/// How a disc's text is arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// One glyph at dead centre, unrotated.
    Single,
    /// Glyphs evenly spaced around a circle, each turned tangent to it.
    Ring,
}

/// Stock settings for one rotating disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingDisc {
    /// Disc radius in scene units (used by the renderer, not the layout).
    pub radius: f32,
    /// Length of the random seed inscription.
    pub text_len: usize,
    /// Minimum number of glyphs around the ring.
    pub char_count: usize,
    pub mode: LayoutMode,
    /// Angular speed in radians per frame; negative spins the other way.
    pub spin: f32,
}

/// Outer, middle, and centre discs.
pub const fn default_discs() -> [RingDisc; 3] {
    [
        RingDisc {
            radius: 12.0,
            text_len: 10,
            char_count: 32,
            mode: LayoutMode::Ring,
            spin: 0.0004,
        },
        RingDisc {
            radius: 7.0,
            text_len: 5,
            char_count: 24,
            mode: LayoutMode::Ring,
            spin: -0.0006,
        },
        RingDisc {
            radius: 4.0,
            text_len: 1,
            char_count: 1,
            mode: LayoutMode::Single,
            spin: 0.0008,
        },
    ]
}

/// `len` random characters from [`FILLER_ALPHABET`], trimmed of surrounding spaces.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let text: String = (0..len)
        .map(|_| FILLER_ALPHABET[rng.random_range(0..FILLER_ALPHABET.len())] as char)
        .collect();
    text.trim().to_string()
}

/// Ring radius in pixels for a square texture of `buffer_size` pixels.
pub fn text_radius(buffer_size: u32) -> f32 {
    (buffer_size as f32 / 3.2).floor()
}

fn visible_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Append short random words until `text` holds at least `target` visible characters.
fn pad_text<R: Rng + ?Sized>(rng: &mut R, text: &str, target: usize) -> String {
    let mut padded = text.to_string();
    while visible_len(&padded) < target {
        padded.push(' ');
        padded.push_str(&random_text(rng, FILLER_WORD_LEN));
    }
    padded
}

/// Lay out `text` on a disc texture of `buffer_size` pixels.
///
/// Whitespace is never placed. [`LayoutMode::Single`] yields the first visible
/// character at the origin, or nothing when `text` has none, and ignores
/// `target_chars`. [`LayoutMode::Ring`] yields exactly `target_chars`
/// placements, padding `text` with random filler words when it is too short.
/// Glyph `i` of `n` sits at angle `i · 2π/n` with rotation `i · 2π/n + π/2`,
/// so each glyph's baseline follows the ring.
pub fn layout<R: Rng + ?Sized>(
    rng: &mut R,
    text: &str,
    target_chars: usize,
    mode: LayoutMode,
    buffer_size: u32,
) -> Vec<GlyphPlacement> {
    match mode {
        LayoutMode::Single => text
            .chars()
            .find(|c| !c.is_whitespace())
            .map(|glyph| GlyphPlacement {
                glyph,
                x: 0.0,
                y: 0.0,
                rotation: 0.0,
            })
            .into_iter()
            .collect(),
        LayoutMode::Ring => {
            if target_chars == 0 {
                return Vec::new();
            }
            let padded = pad_text(rng, text, target_chars);
            let radius = text_radius(buffer_size);
            let step = TAU / target_chars as f32;

            let placements: Vec<GlyphPlacement> = padded
                .chars()
                .filter(|c| !c.is_whitespace())
                .take(target_chars)
                .enumerate()
                .map(|(i, glyph)| {
                    let angle = i as f32 * step;
                    GlyphPlacement {
                        glyph,
                        x: angle.cos() * radius,
                        y: angle.sin() * radius,
                        rotation: angle + FRAC_PI_2,
                    }
                })
                .collect();

            log::debug!(
                "laid out {} glyphs on a {radius} px ring",
                placements.len()
            );
            placements
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    #[test]
    fn test_single_glyph_at_centre() {
        let placements = layout(&mut rng(), "A", 1, LayoutMode::Single, 2048);
        assert_eq!(
            placements,
            vec![GlyphPlacement {
                glyph: 'A',
                x: 0.0,
                y: 0.0,
                rotation: 0.0
            }]
        );
    }

    #[test]
    fn test_single_skips_leading_whitespace() {
        let placements = layout(&mut rng(), "  QR", 1, LayoutMode::Single, 512);
        assert_eq!(placements[0].glyph, 'Q');
    }

    #[test]
    fn test_single_with_blank_text_is_empty() {
        assert!(layout(&mut rng(), "", 1, LayoutMode::Single, 512).is_empty());
        assert!(layout(&mut rng(), "   ", 1, LayoutMode::Single, 512).is_empty());
    }

    #[test]
    fn test_single_consumes_no_randomness() {
        let mut used = rng();
        let _ = layout(&mut used, "", 1, LayoutMode::Single, 512);
        assert_eq!(used.random::<u64>(), rng().random::<u64>());
    }

    #[test]
    fn test_ring_places_exact_count_with_even_spacing() {
        let n = 32;
        let placements = layout(&mut rng(), "ARCANE", n, LayoutMode::Ring, 2048);
        assert_eq!(placements.len(), n);

        let step = TAU / n as f32;
        let radius = text_radius(2048);
        for (i, p) in placements.iter().enumerate() {
            let angle = i as f32 * step;
            assert!((p.rotation - (angle + FRAC_PI_2)).abs() < 1e-6);
            assert!((p.x - angle.cos() * radius).abs() < 1e-3, "x of glyph {i}");
            assert!((p.y - angle.sin() * radius).abs() < 1e-3, "y of glyph {i}");
            assert!(!p.glyph.is_whitespace());
        }
        let word: String = placements.iter().take(6).map(|p| p.glyph).collect();
        assert_eq!(word, "ARCANE");
    }

    #[test]
    fn test_ring_truncates_long_text() {
        let placements = layout(&mut rng(), "THE QUICK BROWN FOX", 5, LayoutMode::Ring, 640);
        let text: String = placements.iter().map(|p| p.glyph).collect();
        assert_eq!(text, "THEQU");
        assert_eq!(placements[0].x, 200.0);
        assert_eq!(placements[0].y, 0.0);
        // Texture y grows downward, so the second glyph sits below the first.
        let step = TAU / 5.0;
        assert!((placements[1].x - step.cos() * 200.0).abs() < 1e-3);
        assert!((placements[1].y - step.sin() * 200.0).abs() < 1e-3);
        assert!(placements[1].y > 0.0);
    }

    #[test]
    fn test_ring_zero_target_is_empty() {
        assert!(layout(&mut rng(), "ABC", 0, LayoutMode::Ring, 2048).is_empty());
    }

    #[test]
    fn test_ring_padding_is_reproducible() {
        let a = layout(&mut rng(), "", 24, LayoutMode::Ring, 1024);
        let b = layout(&mut rng(), "", 24, LayoutMode::Ring, 1024);
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }

    #[test]
    fn test_random_text_is_trimmed_alphabet() {
        let mut rng = rng();
        for len in 0..20 {
            let text = random_text(&mut rng, len);
            assert!(text.len() <= len);
            assert_eq!(text, text.trim());
            assert!(text.bytes().all(|b| FILLER_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_text_radius_floors() {
        assert_eq!(text_radius(2048), 640.0);
        assert_eq!(text_radius(100), 31.0);
    }
}
