//! SPR container reading
//!
//! Table entries hold absolute offsets; the tables themselves are located
//! relative to the position the container starts at, so an SPR embedded in
//! a larger stream decodes the same way as a standalone file.

use std::path::Path;

use image::Rgba;

use super::super::common::{Color, SprReader};
use super::super::texture::{Texture, TextureDecoder};
use super::super::tmx::TmxDecoder;
use super::document::{
    Point, SPR_HEADER_SIZE, SPR_MAGIC, Size, SprFile, SprHeader, SpriteRecord, TranslationMode,
};
use crate::error::{Error, Result};

// Sprite descriptor layout, relative to the descriptor's offset
const SPRITE_TEXTURE_INDEX_OFFSET: u64 = 20;
const SPRITE_RESERVED_AFTER_TEXTURE: u64 = 44;
const SPRITE_RESERVED_AFTER_TRANSLATE: u64 = 8;

/// Descriptor bytes that follow the tint colors and are never read.
pub const SPRITE_DESCRIPTOR_TAIL: u64 = 28;

/// Options controlling how an SPR container is decoded.
///
/// # Example
///
/// ```
/// use sprkit::formats::spr::{SprReadOptions, TranslationMode};
///
/// let options = SprReadOptions::new().with_translation(TranslationMode::Apply);
/// assert_eq!(options.translation, TranslationMode::Apply);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SprReadOptions {
    /// Whether sprite translations are applied to the bounding rectangles.
    pub translation: TranslationMode,
}

impl SprReadOptions {
    /// Options matching the stored rectangles (translation ignored).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translation mode.
    #[must_use]
    pub fn with_translation(mut self, translation: TranslationMode) -> Self {
        self.translation = translation;
        self
    }
}

/// Read an SPR file from disk with default options
///
/// # Errors
/// Returns an error if the file cannot be read or has an invalid format.
pub fn read_spr<P: AsRef<Path>>(path: P) -> Result<SprFile> {
    read_spr_with(path, &SprReadOptions::new())
}

/// Read an SPR file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has an invalid format.
pub fn read_spr_with<P: AsRef<Path>>(path: P, options: &SprReadOptions) -> Result<SprFile> {
    let data = std::fs::read(path)?;
    parse_spr_bytes_with(&data, options)
}

/// Parse SPR data from bytes with default options
///
/// # Errors
/// Returns an error if the data has an invalid SPR format.
pub fn parse_spr_bytes(data: &[u8]) -> Result<SprFile> {
    parse_spr_bytes_with(data, &SprReadOptions::new())
}

/// Parse SPR data from bytes, decoding embedded textures as TMX
///
/// # Errors
/// Returns an error if the data has an invalid SPR format.
pub fn parse_spr_bytes_with(data: &[u8], options: &SprReadOptions) -> Result<SprFile> {
    decode_spr(&mut SprReader::new(data), &TmxDecoder, options)
}

/// Decode an SPR container starting at the reader's current position.
///
/// On success the reader is left at [`SprFile::end_offset`] (or at the end of
/// the data if the last descriptor's tail is cut short), so a caller can keep
/// reading whatever follows the container.
///
/// # Errors
/// Fails on a bad magic, on any read or seek outside the data, and on any
/// error from `decoder`. Sprite records that reference a missing texture do
/// not fail here.
pub fn decode_spr(
    reader: &mut SprReader<'_>,
    decoder: &dyn TextureDecoder,
    options: &SprReadOptions,
) -> Result<SprFile> {
    let file_start = reader.position();
    let header = read_header(reader)?;
    let mut largest_offset = file_start + SPR_HEADER_SIZE;

    tracing::debug!(
        "SPR header at {}: {} textures @ 0x{:X}, {} sprites @ 0x{:X}",
        file_start,
        header.texture_count,
        header.texture_table_offset,
        header.sprite_count,
        header.sprite_table_offset
    );

    reader.seek(file_start + u64::from(header.texture_table_offset))?;
    let mut textures = Vec::with_capacity(usize::from(header.texture_count));
    for _ in 0..header.texture_count {
        reader.skip(4)?;
        let offset = reader.read_u32()?;
        let resume = reader.position();

        reader.seek(u64::from(offset))?;
        textures.push(decoder.decode(reader)?);
        largest_offset = largest_offset.max(reader.position());

        reader.seek(resume)?;
    }

    reader.seek(file_start + u64::from(header.sprite_table_offset))?;
    let mut sprites = Vec::with_capacity(usize::from(header.sprite_count));
    for index in 0..usize::from(header.sprite_count) {
        reader.skip(4)?;
        let offset = reader.read_u32()?;
        let resume = reader.position();

        reader.seek(u64::from(offset) + SPRITE_TEXTURE_INDEX_OFFSET)?;
        sprites.push(read_sprite(reader, index, &textures, options.translation)?);
        largest_offset = largest_offset.max(reader.position() + SPRITE_DESCRIPTOR_TAIL);

        reader.seek(resume)?;
    }

    if largest_offset > reader.len() {
        tracing::debug!(
            "SPR data ends at {} but descriptors extend to {}",
            reader.len(),
            largest_offset
        );
    }
    reader.seek(largest_offset.min(reader.len()))?;

    Ok(SprFile {
        header,
        file_start,
        textures,
        sprites,
        end_offset: largest_offset,
    })
}

fn read_header(reader: &mut SprReader<'_>) -> Result<SprHeader> {
    reader.skip(8)?;
    let magic = reader.read_u32()?;
    if magic != SPR_MAGIC {
        return Err(Error::InvalidSprMagic {
            expected: SPR_MAGIC,
            found: magic,
        });
    }
    reader.skip(8)?;

    Ok(SprHeader {
        magic,
        texture_count: reader.read_u16()?,
        sprite_count: reader.read_u16()?,
        texture_table_offset: reader.read_u32()?,
        sprite_table_offset: reader.read_u32()?,
    })
}

/// Read one sprite descriptor; the reader must be at its texture index field.
fn read_sprite(
    reader: &mut SprReader<'_>,
    index: usize,
    textures: &[Texture],
    translation: TranslationMode,
) -> Result<SpriteRecord> {
    let texture_index = reader.read_i32()?;
    reader.skip(SPRITE_RESERVED_AFTER_TEXTURE)?;
    let translate = Point::new(reader.read_i32()?, reader.read_i32()?);
    reader.skip(SPRITE_RESERVED_AFTER_TRANSLATE)?;

    let mut x1 = reader.read_i32()?;
    let mut y1 = reader.read_i32()?;
    let mut x2 = reader.read_i32()?;
    let mut y2 = reader.read_i32()?;

    let mut corner_colors: [Color; 4] = [Rgba([0; 4]); 4];
    for color in &mut corner_colors {
        *color = Rgba(reader.read_array::<4>()?);
    }

    if translation == TranslationMode::Apply {
        x1 = x1.wrapping_add(translate.x);
        x2 = x2.wrapping_add(translate.x);
        y1 = y1.wrapping_add(translate.y);
        y2 = y2.wrapping_add(translate.y);
    }

    let mut size = Size::new(x2.wrapping_sub(x1), y2.wrapping_sub(y1));

    // Some unused sprites have bounds larger than their texture
    match usize::try_from(texture_index).ok().and_then(|i| textures.get(i)) {
        Some(texture) => {
            let max_width = i32::try_from(texture.width).unwrap_or(i32::MAX);
            let max_height = i32::try_from(texture.height).unwrap_or(i32::MAX);
            if size.width > max_width || size.height > max_height {
                tracing::debug!(
                    "Sprite {index}: clamping {}x{} to texture {texture_index} ({max_width}x{max_height})",
                    size.width,
                    size.height
                );
            }
            size.width = size.width.min(max_width);
            size.height = size.height.min(max_height);
        }
        None => tracing::warn!(
            "Sprite {index} references texture {texture_index}, but only {} exist",
            textures.len()
        ),
    }

    Ok(SpriteRecord {
        position: Point::new(x1, y1),
        size,
        texture_index,
        corner_colors,
        translate,
    })
}
