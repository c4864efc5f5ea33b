//! One pass over every generator, writing textures, geometry and a manifest to disk.

use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use diorama_config::Config;
use diorama_glyphs::{LayoutMode, burn_glyphs, default_discs, layout, random_text};
use diorama_materials::{
    GlowSprite, Paint, PillarTexture, PixelBuffer, PixelFormat, Recipe, StoneAlbedo, StoneBump,
    TextureError, save_png, synthesize,
};
use diorama_mesh::{
    FluteParams, MeshError, box_positions, cylinder, default_rings, flute, jitter, ring_blocks,
};
use diorama_space::{SpiralParams, flatten_colors, flatten_positions, sample_spiral};
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// Edge length of the particle glow sprite.
const GLOW_SPRITE_SIZE: u32 = 128;
/// Pillars stand at the four cardinal points just inside the rim.
const PILLAR_COUNT: usize = 4;
const PILLAR_RING_RADIUS: f32 = 10.4;
const PILLAR_RADIUS: f32 = 0.6;
const PILLAR_SEGMENTS: u32 = 20;
/// Pillar bases sink this far below the platform top.
const PILLAR_BASE_DEPTH: f32 = 0.2;
/// Centre glyph height as a fraction of the disc texture.
const CENTER_GLYPH_FRACTION: f32 = 0.3;

/// Failures that stop one bake step.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("failed to encode {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a bake, written as `manifest.json`.
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    pub seed: Option<u64>,
    pub stars: usize,
    pub blocks: usize,
    pub pillars: usize,
    /// Vertices in the shared fluted shaft.
    pub pillar_vertices: usize,
    pub textures: Vec<String>,
    pub geometry: Vec<String>,
}

/// Star attributes as flat arrays, ready for a point-cloud upload.
#[derive(Debug, Serialize)]
struct GalaxyCloud {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct StoneBlock {
    center: [f32; 3],
    size: [f32; 3],
    yaw: f32,
    /// Jittered box positions in block-local space.
    positions: Vec<f32>,
}

/// Every pillar instances one fluted shaft at its own centre.
#[derive(Debug, Serialize)]
struct PillarSet {
    centers: Vec<[f32; 3]>,
    positions: Vec<f32>,
    normals: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct PlatformGeometry {
    blocks: Vec<StoneBlock>,
    pillars: PillarSet,
}

/// Run every generator once and write the results under `config.output.directory`.
pub fn bake_all<R: Rng + ?Sized>(rng: &mut R, config: &Config) -> Result<Manifest, BakeError> {
    let out = config.output.directory.as_path();
    let mut manifest = Manifest {
        seed: config.seed,
        ..Manifest::default()
    };

    let galaxy = bake_galaxy(rng, config);
    manifest.stars = galaxy.sizes.len();
    manifest.geometry.push(write_json(&galaxy, out, "galaxy")?);

    manifest.textures.extend(bake_platform_textures(rng, config, out)?);

    let platform = PlatformGeometry {
        blocks: bake_blocks(rng, config)?,
        pillars: bake_pillars(config)?,
    };
    manifest.blocks = platform.blocks.len();
    manifest.pillars = platform.pillars.centers.len();
    manifest.pillar_vertices = platform.pillars.positions.len() / 3;
    manifest.geometry.push(write_json(&platform, out, "platform")?);

    manifest.textures.extend(bake_discs(rng, config, out)?);

    let path = write_json(&manifest, out, "manifest")?;
    info!("Wrote {path} to {}", out.display());
    Ok(manifest)
}

fn write_json<T: Serialize>(value: &T, out: &Path, name: &str) -> Result<String, BakeError> {
    let file = format!("{name}.json");
    let json = serde_json::to_string_pretty(value).map_err(|source| BakeError::Json {
        name: file.clone(),
        source,
    })?;
    std::fs::create_dir_all(out).map_err(|source| BakeError::Io {
        path: out.to_path_buf(),
        source,
    })?;
    let path = out.join(&file);
    std::fs::write(&path, json).map_err(|source| BakeError::Io { path, source })?;
    Ok(file)
}

fn bake_galaxy<R: Rng + ?Sized>(rng: &mut R, config: &Config) -> GalaxyCloud {
    let galaxy = &config.galaxy;
    let params = SpiralParams {
        count: galaxy.count as usize,
        radius: galaxy.radius,
        arm_count: galaxy.arm_count,
        arm_tightness: galaxy.arm_tightness,
        height_scale: galaxy.height_scale,
    };
    let stars = sample_spiral(rng, &params);
    let core = stars
        .iter()
        .filter(|s| s.position.length() < galaxy.radius * 0.25)
        .count();
    info!(
        "Galaxy: {} stars over {} arms, {} within the core",
        stars.len(),
        galaxy.arm_count,
        core
    );
    GalaxyCloud {
        positions: flatten_positions(&stars),
        colors: flatten_colors(&stars),
        sizes: stars.iter().map(|s| s.size).collect(),
    }
}

fn write_texture(buffer: &PixelBuffer, out: &Path, name: &str) -> Result<String, BakeError> {
    let file = format!("{name}.png");
    save_png(buffer, &out.join(&file))?;
    info!(
        "Texture {file}: {}x{} {:?}",
        buffer.width(),
        buffer.height(),
        buffer.format()
    );
    Ok(file)
}

fn bake_platform_textures<R: Rng + ?Sized>(
    rng: &mut R,
    config: &Config,
    out: &Path,
) -> Result<Vec<String>, BakeError> {
    let size = config.platform.texture_size;
    let pillar_size = config.platform.pillar_texture_size;

    let bakes = [
        ("platform_albedo", size, Recipe::StoneAlbedo(StoneAlbedo::default())),
        ("platform_bump", size, Recipe::StoneBump(StoneBump::default())),
        ("pillar", pillar_size, Recipe::Pillar(PillarTexture::default())),
        (
            "glow_sprite",
            GLOW_SPRITE_SIZE,
            Recipe::GlowSprite(GlowSprite::default()),
        ),
    ];

    let mut files = Vec::with_capacity(bakes.len());
    for (name, edge, recipe) in &bakes {
        let buffer = synthesize(rng, *edge, *edge, recipe);
        files.push(write_texture(&buffer, out, name)?);
    }
    Ok(files)
}

fn bake_blocks<R: Rng + ?Sized>(
    rng: &mut R,
    config: &Config,
) -> Result<Vec<StoneBlock>, BakeError> {
    let thickness = config.platform.thickness;
    let placements = ring_blocks(&default_rings(), thickness);
    let mut blocks = Vec::with_capacity(placements.len());
    for block in &placements {
        let positions = box_positions(block.size.x, block.size.y, block.size.z);
        blocks.push(StoneBlock {
            center: block.center.to_array(),
            size: block.size.to_array(),
            yaw: block.yaw,
            positions: jitter(rng, &positions, block.size.y)?,
        });
    }
    let vertices: usize = blocks.iter().map(|b| b.positions.len() / 3).sum();
    info!("Platform: {} stone blocks, {vertices} vertices", blocks.len());
    Ok(blocks)
}

fn bake_pillars(config: &Config) -> Result<PillarSet, BakeError> {
    let height = config.platform.thickness * 2.2;
    let params = FluteParams {
        flute_count: config.platform.flute_count,
        depth: config.platform.fluting_depth,
    };
    let shaft = cylinder(PILLAR_RADIUS, height, PILLAR_SEGMENTS);
    let fluted = flute(&shaft.positions, &shaft.normals, &params)?;

    let centers = (0..PILLAR_COUNT)
        .map(|i| {
            let angle = i as f32 * FRAC_PI_2;
            [
                angle.cos() * PILLAR_RING_RADIUS,
                height * 0.5 - PILLAR_BASE_DEPTH,
                angle.sin() * PILLAR_RING_RADIUS,
            ]
        })
        .collect();
    info!(
        "Pillars: {PILLAR_COUNT} shafts with {} flutes, {} vertices each",
        params.flute_count,
        fluted.positions.len() / 3
    );
    Ok(PillarSet {
        centers,
        positions: fluted.positions,
        normals: fluted.normals,
    })
}

fn bake_discs<R: Rng + ?Sized>(
    rng: &mut R,
    config: &Config,
    out: &Path,
) -> Result<Vec<String>, BakeError> {
    let glyphs = &config.glyphs;
    let size = glyphs.texture_size;
    let [r, g, b, a] = glyphs.color;
    let ink = Paint::rgba(r, g, b, a as f32 / 255.0);

    let mut files = Vec::new();
    for (i, disc) in default_discs().iter().enumerate() {
        let text = random_text(rng, disc.text_len);
        let placements = layout(rng, &text, disc.char_count, disc.mode, size);
        let glyph_px = match disc.mode {
            LayoutMode::Single => size as f32 * CENTER_GLYPH_FRACTION,
            LayoutMode::Ring => glyphs.glyph_px as f32,
        };

        let mut buffer = PixelBuffer::new(size, size, PixelFormat::Rgba);
        burn_glyphs(&mut buffer, &placements, glyph_px, ink);
        info!(
            "Disc {i}: radius {} with {} glyphs",
            disc.radius,
            placements.len()
        );
        files.push(write_texture(&buffer, out, &format!("disc_{i}"))?);
    }
    Ok(files)
}
