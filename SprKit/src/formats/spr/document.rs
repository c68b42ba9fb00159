//! SPR container and sprite record types

use super::super::common::Color;
use super::super::texture::Texture;
use crate::error::{Error, Result};

/// "SPR0" read as a little-endian u32.
pub const SPR_MAGIC: u32 = 0x30525053;

/// Size of the fixed SPR header in bytes.
pub const SPR_HEADER_SIZE: u64 = 0x20;

/// Whether the per-sprite translation is added to the bounding rectangle.
///
/// Known decoders disagree on this, so it is always chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationMode {
    /// Use the rectangle corners as stored.
    #[default]
    Ignore,
    /// Add `(x_translate, y_translate)` to both corners before sizing.
    Apply,
}

/// An integer 2D point in texture pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a sprite rectangle. Either may be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// One sprite: a rectangle inside one of the container's textures.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRecord {
    /// Top-left corner in the texture's pixel space.
    pub position: Point,
    /// Rectangle size after clamping to the texture.
    pub size: Size,
    /// Index into [`SprFile::textures`]. Not validated while parsing.
    pub texture_index: i32,
    /// Per-corner tint colors, carried through untouched.
    pub corner_colors: [Color; 4],
    /// Raw translation stored in the descriptor.
    pub translate: Point,
}

impl SpriteRecord {
    /// A placeholder record that carries no pixels.
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }
}

/// The fixed header fields of an SPR container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprHeader {
    pub magic: u32,
    pub texture_count: u16,
    pub sprite_count: u16,
    /// Relative to [`SprFile::file_start`].
    pub texture_table_offset: u32,
    /// Relative to [`SprFile::file_start`].
    pub sprite_table_offset: u32,
}

/// A decoded SPR container.
#[derive(Debug, Clone, PartialEq)]
pub struct SprFile {
    pub header: SprHeader,
    /// Stream position the container started at.
    pub file_start: u64,
    pub textures: Vec<Texture>,
    pub sprites: Vec<SpriteRecord>,
    /// Position just past the container's data, where the reader is left.
    pub end_offset: u64,
}

impl SprFile {
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Resolve the texture a sprite points at.
    ///
    /// # Errors
    /// Returns [`Error::TextureIndexOutOfRange`] if the record's index is invalid.
    pub fn texture_for(&self, sprite: usize, record: &SpriteRecord) -> Result<&Texture> {
        usize::try_from(record.texture_index)
            .ok()
            .and_then(|i| self.textures.get(i))
            .ok_or(Error::TextureIndexOutOfRange {
                sprite,
                texture_index: record.texture_index,
                texture_count: self.textures.len(),
            })
    }

    /// Sprites that reference `texture_index`, with their container indices.
    pub fn sprites_for_texture(
        &self,
        texture_index: usize,
    ) -> impl Iterator<Item = (usize, &SpriteRecord)> {
        self.sprites
            .iter()
            .enumerate()
            .filter(move |(_, s)| usize::try_from(s.texture_index).ok() == Some(texture_index))
    }

    /// Number of sprites that are dummies.
    #[must_use]
    pub fn dummy_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_dummy()).count()
    }
}
