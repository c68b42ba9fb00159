//! SPR (Atlus sprite container) format module
//!
//! An SPR file is a header, a texture offset table pointing at embedded TMX
//! records, and a sprite offset table pointing at sprite descriptors that
//! name a rectangle inside one of those textures.

mod document;
mod reader;

// Public API
pub use document::{
    Point, SPR_HEADER_SIZE, SPR_MAGIC, Size, SprFile, SprHeader, SpriteRecord, TranslationMode,
};
pub use reader::{
    SPRITE_DESCRIPTOR_TAIL, SprReadOptions, decode_spr, parse_spr_bytes, parse_spr_bytes_with,
    read_spr, read_spr_with,
};
