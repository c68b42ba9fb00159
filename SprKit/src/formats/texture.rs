//! Decoded texture model shared by every texture codec
//!
//! The SPR container does not care how its embedded textures are stored; it
//! only needs a [`TextureDecoder`] that turns the bytes at an offset into a
//! [`Texture`] and leaves the reader at the end of the record.

use image::RgbaImage;

use super::common::{Color, SprReader};
use crate::error::{Error, Result};

/// PS2 GS pixel storage modes used by TMX textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 32-bit RGBA
    Psmct32,
    /// 24-bit RGB
    Psmct24,
    /// 16-bit RGBA 5:5:5:1
    Psmct16,
    /// 16-bit RGBA 5:5:5:1, signed variant
    Psmct16s,
    /// 8-bit palette indices
    Psmt8,
    /// 4-bit palette indices
    Psmt4,
}

impl PixelFormat {
    /// Map a raw PSM value to a known format.
    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Psmct32),
            0x01 => Some(Self::Psmct24),
            0x02 => Some(Self::Psmct16),
            0x0A => Some(Self::Psmct16s),
            0x13 => Some(Self::Psmt8),
            0x14 => Some(Self::Psmt4),
            _ => None,
        }
    }

    /// Bits used by one pixel (or one palette index).
    #[must_use]
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::Psmct32 => 32,
            Self::Psmct24 => 24,
            Self::Psmct16 | Self::Psmct16s => 16,
            Self::Psmt8 => 8,
            Self::Psmt4 => 4,
        }
    }

    /// Whether pixels are palette indices rather than colors.
    #[must_use]
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::Psmt8 | Self::Psmt4)
    }

    /// Number of palette entries an indexed format addresses.
    #[must_use]
    pub fn palette_len(self) -> usize {
        match self {
            Self::Psmt8 => 256,
            Self::Psmt4 => 16,
            _ => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Psmct32 => "PSMCT32",
            Self::Psmct24 => "PSMCT24",
            Self::Psmct16 => "PSMCT16",
            Self::Psmct16s => "PSMCT16S",
            Self::Psmt8 => "PSMT8",
            Self::Psmt4 => "PSMT4",
        }
    }
}

/// Where a texture's colors come from. Exactly one form is authoritative.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// One palette index per pixel.
    Indexed {
        palette: Vec<Color>,
        indices: Vec<u8>,
    },
    /// One color per pixel.
    Direct(Vec<Color>),
}

/// A decoded texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub mip_map_count: u8,
    pub pixel_format: PixelFormat,
    /// Human-readable identifier stored in the texture metadata (may be empty).
    pub name: String,
    pub data: PixelData,
}

impl Texture {
    /// The palette, or an empty slice for direct-color textures.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        match &self.data {
            PixelData::Indexed { palette, .. } => palette,
            PixelData::Direct(_) => &[],
        }
    }

    /// The palette indices, or an empty slice for direct-color textures.
    #[must_use]
    pub fn index_data(&self) -> &[u8] {
        match &self.data {
            PixelData::Indexed { indices, .. } => indices,
            PixelData::Direct(_) => &[],
        }
    }

    /// The raw colors, or an empty slice for indexed textures.
    #[must_use]
    pub fn raw_pixels(&self) -> &[Color] {
        match &self.data {
            PixelData::Indexed { .. } => &[],
            PixelData::Direct(colors) => colors,
        }
    }

    /// One color per pixel, row-major, with palettes resolved.
    ///
    /// # Errors
    /// Returns [`Error::PaletteIndexOutOfBounds`] if an index has no palette entry.
    pub fn expanded_pixels(&self) -> Result<Vec<Color>> {
        match &self.data {
            PixelData::Indexed { palette, indices } => expand_palette(palette, indices),
            PixelData::Direct(colors) => Ok(colors.clone()),
        }
    }

    /// Render the texture into an RGBA image.
    pub fn to_image(&self) -> Result<RgbaImage> {
        pixels_to_image(self.width, self.height, &self.expanded_pixels()?)
    }
}

/// Resolve palette indices into colors.
///
/// # Errors
/// Fails on the first index that is not below `palette.len()`.
pub fn expand_palette(palette: &[Color], indices: &[u8]) -> Result<Vec<Color>> {
    indices
        .iter()
        .map(|&index| {
            palette
                .get(usize::from(index))
                .copied()
                .ok_or(Error::PaletteIndexOutOfBounds {
                    index,
                    palette_len: palette.len(),
                })
        })
        .collect()
}

/// Pack row-major colors into an [`RgbaImage`].
pub fn pixels_to_image(width: u32, height: u32, pixels: &[Color]) -> Result<RgbaImage> {
    let raw: Vec<u8> = pixels.iter().flat_map(|c| c.0).collect();
    RgbaImage::from_raw(width, height, raw).ok_or(Error::ImageBufferFailed)
}

/// A codec for the textures embedded in a container.
pub trait TextureDecoder {
    /// Decode the texture starting at the reader's current position.
    ///
    /// On success the reader must be left at the end of the texture record.
    fn decode(&self, reader: &mut SprReader<'_>) -> Result<Texture>;
}
