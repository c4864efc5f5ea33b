//! Texture recipes: fixed, ordered drawing pipelines that bake the platform's
//! stone albedo and bump maps, the fluted pillar texture, and the soft glow
//! sprite used by the ambient particles.
//!
//! Stone geometry (ring radii, seam lengths, crack spread) is expressed in a
//! square reference frame of `reference_size` pixels and scaled to the target
//! resolution, so a 512 px bake looks like a downscaled 2048 px one.

use rand::Rng;

use crate::noise_color::NoiseParameters;
use crate::pixel::{Paint, PixelBuffer, PixelFormat};

/// Concentric circle outlines, largest first.
///
/// Radii run `start, start - step, ...` while they stay above `min_radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStrokes {
    pub start: f32,
    pub step: f32,
    pub min_radius: f32,
    pub width: f32,
    /// Per-ring color; resampled for every ring.
    pub tint: NoiseParameters,
}

impl RingStrokes {
    /// The ring radii in drawing order. A non-positive `step` yields only `start`.
    pub fn radii(&self) -> Vec<f32> {
        let mut radii = Vec::new();
        let mut r = self.start;
        while r > self.min_radius {
            radii.push(r);
            if self.step <= 0.0 {
                break;
            }
            r -= self.step;
        }
        radii
    }
}

/// Radial joints between the platform's stone blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeamStrokes {
    /// Number of evenly spaced seams; seam `s` sits at angle `s / count * 2π`.
    pub count: u32,
    pub outer: f32,
    pub inner: f32,
    pub width: f32,
    /// Per-seam color; resampled for every seam.
    pub tint: NoiseParameters,
}

/// Random-walk crack polylines scattered around the texture centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrackStrokes {
    pub count: u32,
    /// Full width of the square the crack start points are drawn from.
    pub spread: f32,
    /// Segments per crack.
    pub segments: u32,
    /// Full width of the per-segment random step on each axis.
    pub jitter: f32,
    pub width: f32,
    pub paint: Paint,
}

/// Small square blotches of perturbed base color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speckles {
    pub count: u32,
    /// Edge length of each blotch in pixels (unscaled).
    pub size: u32,
    pub tint: NoiseParameters,
}

/// Cheap banded noise: `base + amplitude * (sin(x·f)·sin(y·f) + rand()) * 0.5`.
///
/// This is not gradient noise. The sinusoid gives faint large-scale banding and
/// the unweighted random term adds per-pixel grain on top; the grain is the
/// intended micro-detail of the bump map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoherentNoise {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl CoherentNoise {
    /// Intensity for pixel `(x, y)` given one uniform draw in `[0, 1)`.
    pub fn intensity(&self, x: u32, y: u32, draw: f32) -> f32 {
        let f = self.frequency;
        let banding = (x as f32 * f).sin() * (y as f32 * f).sin();
        self.base + self.amplitude * (banding + draw) * 0.5
    }
}

/// RGBA stone albedo: fill, rings, seams, cracks, speckles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoneAlbedo {
    pub base: [u8; 3],
    pub reference_size: f32,
    pub rings: RingStrokes,
    pub seams: SeamStrokes,
    pub cracks: CrackStrokes,
    pub speckles: Speckles,
}

impl Default for StoneAlbedo {
    fn default() -> Self {
        let base = [110, 116, 145];
        Self {
            base,
            reference_size: 2048.0,
            rings: RingStrokes {
                start: 600.0,
                step: 200.0,
                min_radius: 80.0,
                width: 18.0,
                tint: NoiseParameters::offset(base, -10.0, 20.0),
            },
            seams: SeamStrokes {
                count: 32,
                outer: 720.0,
                inner: 120.0,
                width: 6.0,
                tint: NoiseParameters::offset(base, -30.0, 30.0),
            },
            cracks: CrackStrokes {
                count: 40,
                spread: 900.0,
                segments: 6,
                jitter: 60.0,
                width: 2.0,
                paint: Paint::rgba(30, 30, 40, 0.9),
            },
            speckles: Speckles {
                count: 2000,
                size: 2,
                tint: NoiseParameters::offset(base, 0.0, 40.0),
            },
        }
    }
}

/// Grayscale stone height map: fill, banded noise, dark rings, seams, cracks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoneBump {
    pub base: u8,
    pub reference_size: f32,
    pub noise: CoherentNoise,
    pub rings: RingStrokes,
    pub seams: SeamStrokes,
    pub cracks: CrackStrokes,
}

impl Default for StoneBump {
    fn default() -> Self {
        Self {
            base: 0x9f,
            reference_size: 2048.0,
            noise: CoherentNoise {
                base: 159.0,
                amplitude: 20.0,
                frequency: 0.2,
            },
            rings: RingStrokes {
                start: 600.0,
                step: 200.0,
                min_radius: 80.0,
                width: 8.0,
                tint: NoiseParameters::flat_gray(0x2a as f32),
            },
            seams: SeamStrokes {
                count: 32,
                outer: 720.0,
                inner: 120.0,
                width: 3.0,
                tint: NoiseParameters::flat_gray(0x2a as f32),
            },
            cracks: CrackStrokes {
                count: 40,
                spread: 900.0,
                segments: 6,
                jitter: 60.0,
                width: 3.0,
                paint: Paint::gray(0x2f),
            },
        }
    }
}

/// RGBA pillar texture: lightened fill, vertical flute stripes with a thin
/// shadow line on their left edge, speckles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillarTexture {
    /// Stone color shared with the platform.
    pub base: [u8; 3],
    /// Added to `base` for the fill.
    pub lift: f32,
    pub reference_size: f32,
    pub stripes: u32,
    /// Stripe width as a fraction of the stripe spacing.
    pub stripe_fraction: f32,
    pub stripe_tint: NoiseParameters,
    pub shadow: Paint,
    pub shadow_width: f32,
    /// Shadow line offset to the left of each stripe, as a fraction of spacing.
    pub shadow_offset: f32,
    pub speckles: Speckles,
}

impl Default for PillarTexture {
    fn default() -> Self {
        let base = [110, 116, 145];
        Self {
            base,
            lift: 20.0,
            reference_size: 512.0,
            stripes: 12,
            stripe_fraction: 0.3,
            stripe_tint: NoiseParameters::offset(base, -15.0, 15.0),
            shadow: Paint::rgba(0, 0, 0, 0.2),
            shadow_width: 2.0,
            shadow_offset: 0.15,
            speckles: Speckles {
                count: 1000,
                size: 2,
                tint: NoiseParameters::offset(base, 0.0, 30.0),
            },
        }
    }
}

/// One color stop of a radial gradient. `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub rgb: [u8; 3],
    pub alpha: f32,
}

/// RGBA radial gradient sprite on a transparent background.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowSprite {
    /// Radius in pixels inside which the first stop applies unchanged.
    pub inner_radius: f32,
    /// Stops sorted by ascending offset.
    pub stops: Vec<GradientStop>,
}

impl Default for GlowSprite {
    fn default() -> Self {
        Self {
            inner_radius: 1.0,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    rgb: [230, 180, 255],
                    alpha: 1.0,
                },
                GradientStop {
                    offset: 0.3,
                    rgb: [160, 80, 230],
                    alpha: 0.95,
                },
                GradientStop {
                    offset: 1.0,
                    rgb: [30, 10, 60],
                    alpha: 0.0,
                },
            ],
        }
    }
}

impl GlowSprite {
    /// Interpolated `(rgb, alpha)` at gradient position `t`, clamped to the end stops.
    pub fn color_at(&self, t: f32) -> ([f32; 3], f32) {
        let Some(first) = self.stops.first() else {
            return ([0.0; 3], 0.0);
        };
        let rgb = |stop: &GradientStop| stop.rgb.map(f32::from);

        if t <= first.offset {
            return (rgb(first), first.alpha);
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                let k = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
                let (a, b) = (rgb(lo), rgb(hi));
                let mixed = [0, 1, 2].map(|c| a[c] + (b[c] - a[c]) * k);
                return (mixed, lo.alpha + (hi.alpha - lo.alpha) * k);
            }
        }
        let last = &self.stops[self.stops.len() - 1];
        (rgb(last), last.alpha)
    }
}

/// A complete texture pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Recipe {
    StoneAlbedo(StoneAlbedo),
    StoneBump(StoneBump),
    Pillar(PillarTexture),
    GlowSprite(GlowSprite),
}

impl Recipe {
    /// Pixel format this recipe produces.
    pub fn format(&self) -> PixelFormat {
        match self {
            Recipe::StoneBump(_) => PixelFormat::Gray,
            Recipe::StoneAlbedo(_) | Recipe::Pillar(_) | Recipe::GlowSprite(_) => PixelFormat::Rgba,
        }
    }
}

/// Bake `recipe` into a new `width * height` buffer.
///
/// Stages run strictly in order on one buffer and all randomness comes from
/// `rng`, so a seeded generator reproduces the texture byte for byte. A zero
/// dimension returns an empty buffer.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    recipe: &Recipe,
) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height, recipe.format());
    if buffer.is_empty() {
        return buffer;
    }

    match recipe {
        Recipe::StoneAlbedo(albedo) => stone_albedo(rng, &mut buffer, albedo),
        Recipe::StoneBump(bump) => stone_bump(rng, &mut buffer, bump),
        Recipe::Pillar(pillar) => pillar_texture(rng, &mut buffer, pillar),
        Recipe::GlowSprite(sprite) => glow_sprite(&mut buffer, sprite),
    }

    log::debug!(
        "synthesized {:?} texture {}x{}",
        buffer.format(),
        width,
        height
    );
    buffer
}

/// Maps reference-frame lengths onto the target buffer.
struct Frame {
    center: [f32; 2],
    scale: f32,
}

impl Frame {
    fn new(buffer: &PixelBuffer, reference_size: f32) -> Self {
        let short_side = buffer.width().min(buffer.height()) as f32;
        let scale = if reference_size > 0.0 {
            short_side / reference_size
        } else {
            1.0
        };
        Self {
            center: [buffer.width() as f32 * 0.5, buffer.height() as f32 * 0.5],
            scale,
        }
    }

    fn len(&self, reference: f32) -> f32 {
        reference * self.scale
    }

    /// Stroke widths never drop below one pixel.
    fn stroke(&self, reference: f32) -> f32 {
        (reference * self.scale).max(1.0)
    }
}

fn stone_albedo<R: Rng + ?Sized>(rng: &mut R, buffer: &mut PixelBuffer, recipe: &StoneAlbedo) {
    let frame = Frame::new(buffer, recipe.reference_size);
    buffer.fill(Paint::opaque(recipe.base));
    draw_rings(rng, buffer, &frame, &recipe.rings);
    draw_seams(rng, buffer, &frame, &recipe.seams);
    draw_cracks(rng, buffer, &frame, &recipe.cracks);
    draw_speckles(rng, buffer, &recipe.speckles);
}

fn stone_bump<R: Rng + ?Sized>(rng: &mut R, buffer: &mut PixelBuffer, recipe: &StoneBump) {
    let frame = Frame::new(buffer, recipe.reference_size);
    buffer.fill(Paint::gray(recipe.base));
    draw_noise_field(rng, buffer, &recipe.noise);
    draw_rings(rng, buffer, &frame, &recipe.rings);
    draw_seams(rng, buffer, &frame, &recipe.seams);
    draw_cracks(rng, buffer, &frame, &recipe.cracks);
}

fn pillar_texture<R: Rng + ?Sized>(rng: &mut R, buffer: &mut PixelBuffer, recipe: &PillarTexture) {
    let frame = Frame::new(buffer, recipe.reference_size);
    let lifted = NoiseParameters::offset(recipe.base, recipe.lift, 0.0);
    buffer.fill(lifted.paint(rng));

    if recipe.stripes > 0 {
        let spacing = buffer.width() as f32 / recipe.stripes as f32;
        let bottom = buffer.height() as f32;
        let stripe_width = (spacing * recipe.stripe_fraction).max(1.0);
        let shadow_width = frame.stroke(recipe.shadow_width);

        for i in 0..recipe.stripes {
            let x = (i as f32 + 0.5) * spacing;
            let tint = recipe.stripe_tint.paint(rng);
            buffer.stroke_segment([x, 0.0], [x, bottom], stripe_width, tint);

            let sx = x - spacing * recipe.shadow_offset;
            buffer.stroke_segment([sx, 0.0], [sx, bottom], shadow_width, recipe.shadow);
        }
    }

    draw_speckles(rng, buffer, &recipe.speckles);
}

fn glow_sprite(buffer: &mut PixelBuffer, sprite: &GlowSprite) {
    let frame = Frame::new(buffer, 0.0);
    let outer = buffer.width().min(buffer.height()) as f32 * 0.5;
    let inner = sprite.inner_radius;

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let dx = x as f32 + 0.5 - frame.center[0];
            let dy = y as f32 + 0.5 - frame.center[1];
            let d = (dx * dx + dy * dy).sqrt();
            let t = if outer > inner {
                ((d - inner) / (outer - inner)).clamp(0.0, 1.0)
            } else if d < outer {
                0.0
            } else {
                1.0
            };
            let (rgb, alpha) = sprite.color_at(t);
            buffer.put(x, y, rgb, alpha);
        }
    }
}

fn draw_noise_field<R: Rng + ?Sized>(rng: &mut R, buffer: &mut PixelBuffer, noise: &CoherentNoise) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let v = noise.intensity(x, y, rng.random::<f32>());
            buffer.put(x, y, [v; 3], 1.0);
        }
    }
}

fn draw_rings<R: Rng + ?Sized>(
    rng: &mut R,
    buffer: &mut PixelBuffer,
    frame: &Frame,
    rings: &RingStrokes,
) {
    let width = frame.stroke(rings.width);
    for radius in rings.radii() {
        let paint = rings.tint.paint(rng);
        buffer.stroke_circle(frame.center, frame.len(radius), width, paint);
    }
}

fn draw_seams<R: Rng + ?Sized>(
    rng: &mut R,
    buffer: &mut PixelBuffer,
    frame: &Frame,
    seams: &SeamStrokes,
) {
    let width = frame.stroke(seams.width);
    let [cx, cy] = frame.center;
    let (outer, inner) = (frame.len(seams.outer), frame.len(seams.inner));

    for s in 0..seams.count {
        let angle = s as f32 / seams.count as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let paint = seams.tint.paint(rng);
        buffer.stroke_segment(
            [cx + cos * outer, cy + sin * outer],
            [cx + cos * inner, cy + sin * inner],
            width,
            paint,
        );
    }
}

fn draw_cracks<R: Rng + ?Sized>(
    rng: &mut R,
    buffer: &mut PixelBuffer,
    frame: &Frame,
    cracks: &CrackStrokes,
) {
    let width = frame.stroke(cracks.width);
    let spread = frame.len(cracks.spread);
    let jitter = frame.len(cracks.jitter);
    let [cx, cy] = frame.center;
    let mut points = Vec::with_capacity(cracks.segments as usize + 1);

    for _ in 0..cracks.count {
        points.clear();
        let mut x = cx + (rng.random::<f32>() - 0.5) * spread;
        let mut y = cy + (rng.random::<f32>() - 0.5) * spread;
        points.push([x, y]);
        for _ in 0..cracks.segments {
            x += (rng.random::<f32>() - 0.5) * jitter;
            y += (rng.random::<f32>() - 0.5) * jitter;
            points.push([x, y]);
        }
        buffer.stroke_polyline(&points, width, cracks.paint);
    }
}

fn draw_speckles<R: Rng + ?Sized>(rng: &mut R, buffer: &mut PixelBuffer, speckles: &Speckles) {
    let (w, h) = (buffer.width(), buffer.height());
    for _ in 0..speckles.count {
        let paint = speckles.tint.paint(rng);
        let x = rng.random_range(0..w);
        let y = rng.random_range(0..h);
        buffer.fill_rect(x, y, speckles.size, speckles.size, paint);
    }
}
