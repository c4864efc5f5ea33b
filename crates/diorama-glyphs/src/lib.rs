//! Magic-circle glyph discs: radial text layout and bitmap glyph burning.

mod burn;
mod layout;

pub use burn::burn_glyphs;
pub use layout::{
    FILLER_ALPHABET, GlyphPlacement, LayoutMode, RingDisc, default_discs, layout, random_text,
    text_radius,
};
