//! File format handlers for Atlus sprite data
//!
//! `spr` holds the sprite container; `tmx` is the texture format embedded in
//! it. Both read through the position-addressable [`common::SprReader`].

pub mod common;
pub mod texture;
pub mod tmx;
pub mod spr;

// Re-export common types for convenience
pub use common::{Color, SprReader};
pub use texture::{PixelData, PixelFormat, Texture, TextureDecoder};

// Re-export main document types
pub use spr::{SprFile, SprReadOptions, SpriteRecord, TranslationMode, parse_spr_bytes, read_spr};
pub use tmx::{TmxDecoder, TmxHeader, parse_tmx_bytes};
