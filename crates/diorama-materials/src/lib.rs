//! Procedural surface textures: pixel buffers, raster primitives, color noise,
//! and the stone, pillar, and glow-sprite recipes baked for the diorama.

mod export;
mod noise_color;
mod pixel;
mod raster;
mod recipe;

pub use export::{TextureError, save_png};
pub use noise_color::NoiseParameters;
pub use pixel::{Paint, PixelBuffer, PixelFormat};
pub use recipe::{
    CoherentNoise, CrackStrokes, GlowSprite, GradientStop, PillarTexture, Recipe, RingStrokes,
    SeamStrokes, Speckles, StoneAlbedo, StoneBump, synthesize,
};
