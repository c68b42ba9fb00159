//! TMX texture reading
//!
//! Colors are stored with PS2 GS alpha (0x80 = opaque) and 8-bit CLUTs use
//! the GS block layout, so both are normalised while reading.

use super::super::common::{Color, SprReader};
use super::super::texture::{PixelData, PixelFormat, Texture, TextureDecoder};
use crate::error::{Error, Result};
use image::Rgba;

/// Tag stored at offset 8 of every TMX record.
pub const TMX_MAGIC: [u8; 4] = *b"TMX0";

/// Size of the fixed TMX header in bytes.
pub const TMX_HEADER_SIZE: u64 = 0x40;

const USER_COMMENT_LEN: usize = 28;

/// Fixed TMX header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmxHeader {
    pub flag: u16,
    pub user_id: u16,
    /// Size of the whole record, header included.
    pub file_size: u32,
    pub palette_count: u8,
    pub palette_format: u8,
    pub width: u16,
    pub height: u16,
    pub pixel_format: u8,
    pub mip_map_count: u8,
    pub mip_kl: u16,
    pub wrap_modes: u8,
    pub user_texture_id: u32,
    pub user_clut_id: u32,
    /// NUL-terminated texture name.
    pub user_comment: String,
}

impl TmxHeader {
    /// Read the header at the reader's current position.
    pub fn read(reader: &mut SprReader<'_>) -> Result<Self> {
        let flag = reader.read_u16()?;
        let user_id = reader.read_u16()?;
        let file_size = reader.read_u32()?;

        let magic = reader.read_array::<4>()?;
        if magic != TMX_MAGIC {
            return Err(Error::InvalidTmxMagic(magic));
        }
        reader.skip(4)?;

        let palette_count = reader.read_u8()?;
        let palette_format = reader.read_u8()?;
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        let pixel_format = reader.read_u8()?;
        let mip_map_count = reader.read_u8()?;
        let mip_kl = reader.read_u16()?;
        reader.skip(1)?;
        let wrap_modes = reader.read_u8()?;
        let user_texture_id = reader.read_u32()?;
        let user_clut_id = reader.read_u32()?;

        let comment = reader.read_array::<USER_COMMENT_LEN>()?;
        let end = comment.iter().position(|&b| b == 0).unwrap_or(USER_COMMENT_LEN);
        let user_comment = String::from_utf8_lossy(&comment[..end]).into_owned();

        Ok(Self {
            flag,
            user_id,
            file_size,
            palette_count,
            palette_format,
            width,
            height,
            pixel_format,
            mip_map_count,
            mip_kl,
            wrap_modes,
            user_texture_id,
            user_clut_id,
            user_comment,
        })
    }
}

/// Decoder for TMX textures; the default codec for SPR containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TmxDecoder;

impl TextureDecoder for TmxDecoder {
    fn decode(&self, reader: &mut SprReader<'_>) -> Result<Texture> {
        let start = reader.position();
        let header = TmxHeader::read(reader)?;

        let pixel_format = PixelFormat::from_raw(header.pixel_format)
            .ok_or(Error::UnsupportedPixelFormat(header.pixel_format))?;
        if header.width == 0 || header.height == 0 {
            return Err(Error::InvalidTexture {
                message: format!("zero-sized texture {}x{}", header.width, header.height),
            });
        }
        let pixel_count = usize::from(header.width) * usize::from(header.height);

        let data = if pixel_format.is_indexed() {
            let clut_format = PixelFormat::from_raw(header.palette_format)
                .filter(|f| !f.is_indexed())
                .ok_or(Error::UnsupportedPixelFormat(header.palette_format))?;
            if header.palette_count == 0 {
                return Err(Error::InvalidTexture {
                    message: format!("{} texture without a palette", pixel_format.as_str()),
                });
            }

            let palette_len = pixel_format.palette_len();
            let mut palette = read_colors(reader, clut_format, palette_len)?;
            if pixel_format == PixelFormat::Psmt8 {
                palette = unswizzle_clut(&palette);
            }
            // Only the first palette is used for expansion
            let extra = u64::from(header.palette_count - 1)
                * (palette_len * clut_format.bits_per_pixel() / 8) as u64;
            reader.skip(extra)?;

            let indices = read_indices(reader, pixel_format, pixel_count)?;
            PixelData::Indexed { palette, indices }
        } else {
            PixelData::Direct(read_colors(reader, pixel_format, pixel_count)?)
        };

        // Mipmaps are not decoded; jump to the end of the record
        let end = (start + u64::from(header.file_size)).max(reader.position());
        reader.seek(end)?;

        tracing::debug!(
            "TMX '{}': {}x{} {} ({} mipmaps), {} bytes",
            header.user_comment,
            header.width,
            header.height,
            pixel_format.as_str(),
            header.mip_map_count,
            end - start
        );

        Ok(Texture {
            width: u32::from(header.width),
            height: u32::from(header.height),
            mip_map_count: header.mip_map_count,
            pixel_format,
            name: header.user_comment,
            data,
        })
    }
}

/// Decode a standalone TMX file.
///
/// # Errors
/// Returns an error if the data is not a supported TMX texture.
pub fn parse_tmx_bytes(data: &[u8]) -> Result<Texture> {
    TmxDecoder.decode(&mut SprReader::new(data))
}

/// Scale GS alpha (0..=0x80) to 8-bit alpha.
fn scale_alpha(alpha: u8) -> u8 {
    if alpha >= 0x80 {
        0xFF
    } else {
        ((u16::from(alpha) * 0xFF) / 0x80) as u8
    }
}

fn read_colors(reader: &mut SprReader<'_>, format: PixelFormat, count: usize) -> Result<Vec<Color>> {
    let bytes = reader.read_bytes(count * format.bits_per_pixel() / 8)?;
    let colors = match format {
        PixelFormat::Psmct32 => bytes
            .chunks_exact(4)
            .map(|c| Rgba([c[0], c[1], c[2], scale_alpha(c[3])]))
            .collect(),
        PixelFormat::Psmct24 => bytes
            .chunks_exact(3)
            .map(|c| Rgba([c[0], c[1], c[2], 0xFF]))
            .collect(),
        PixelFormat::Psmct16 | PixelFormat::Psmct16s => bytes
            .chunks_exact(2)
            .map(|c| {
                let v = u16::from_le_bytes([c[0], c[1]]);
                let r = ((v & 0x1F) << 3) as u8;
                let g = (((v >> 5) & 0x1F) << 3) as u8;
                let b = (((v >> 10) & 0x1F) << 3) as u8;
                let a = if v & 0x8000 != 0 { 0xFF } else { 0 };
                Rgba([r, g, b, a])
            })
            .collect(),
        PixelFormat::Psmt8 | PixelFormat::Psmt4 => {
            return Err(Error::InvalidTexture {
                message: format!("{} is not a color format", format.as_str()),
            });
        }
    };
    Ok(colors)
}

fn read_indices(reader: &mut SprReader<'_>, format: PixelFormat, count: usize) -> Result<Vec<u8>> {
    match format {
        PixelFormat::Psmt8 => Ok(reader.read_bytes(count)?.to_vec()),
        PixelFormat::Psmt4 => {
            let bytes = reader.read_bytes(count.div_ceil(2))?;
            let mut indices: Vec<u8> = bytes.iter().flat_map(|&b| [b & 0x0F, b >> 4]).collect();
            indices.truncate(count);
            Ok(indices)
        }
        _ => Err(Error::InvalidTexture {
            message: format!("{} is not an indexed format", format.as_str()),
        }),
    }
}

/// Undo the GS CLUT layout: entries 8..16 and 16..24 of every 32 are swapped.
fn unswizzle_clut(palette: &[Color]) -> Vec<Color> {
    (0..palette.len())
        .map(|i| palette[(i & !0x18) | ((i & 0x08) << 1) | ((i & 0x10) >> 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(pixel_format: u8, palette_format: u8, palette_count: u8, w: u16, h: u16, body: usize) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(TMX_HEADER_SIZE as u32 + body as u32).to_le_bytes());
        out.extend_from_slice(&TMX_MAGIC);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(palette_count);
        out.push(palette_format);
        out.extend_from_slice(&w.to_le_bytes());
        out.extend_from_slice(&h.to_le_bytes());
        out.push(pixel_format);
        out.push(1);
        out.extend_from_slice(&0u16.to_le_bytes());
        out.push(0);
        out.push(0);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        let mut comment = [0u8; USER_COMMENT_LEN];
        comment[..4].copy_from_slice(b"test");
        out.extend_from_slice(&comment);
        out
    }

    #[test]
    fn test_decode_psmct32() {
        let mut data = header(0x00, 0, 0, 2, 1, 8);
        data.extend_from_slice(&[255, 0, 0, 0x80, 0, 255, 0, 0x40]);

        let texture = parse_tmx_bytes(&data).unwrap();
        assert_eq!(texture.name, "test");
        assert_eq!(texture.pixel_format, PixelFormat::Psmct32);
        assert_eq!(
            texture.expanded_pixels().unwrap(),
            vec![Rgba([255, 0, 0, 255]), Rgba([0, 255, 0, 127])]
        );
    }

    #[test]
    fn test_decode_psmt4_unpacks_low_nibble_first() {
        let palette: Vec<u8> = (0..16u8).flat_map(|i| [i, i, i, 0x80]).collect();
        let mut data = header(0x14, 0x00, 1, 3, 1, palette.len() + 2);
        data.extend_from_slice(&palette);
        data.extend_from_slice(&[0x21, 0x0F]);

        let texture = parse_tmx_bytes(&data).unwrap();
        assert_eq!(texture.index_data(), &[1, 2, 15]);
        assert_eq!(texture.palette().len(), 16);
        assert_eq!(texture.expanded_pixels().unwrap()[2], Rgba([15, 15, 15, 255]));
    }

    #[test]
    fn test_decode_psmt8_unswizzles_palette() {
        let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, 0, 0, 0x80]).collect();
        let mut data = header(0x13, 0x00, 1, 2, 1, palette.len() + 2);
        data.extend_from_slice(&palette);
        data.extend_from_slice(&[8, 16]);

        let texture = parse_tmx_bytes(&data).unwrap();
        let pixels = texture.expanded_pixels().unwrap();
        assert_eq!(pixels[0], Rgba([16, 0, 0, 255]));
        assert_eq!(pixels[1], Rgba([8, 0, 0, 255]));
    }

    #[test]
    fn test_reader_ends_at_file_size() {
        let mut data = header(0x01, 0, 0, 1, 1, 3 + 13);
        data.extend_from_slice(&[1, 2, 3]);
        data.extend_from_slice(&[0xEE; 13]);
        data.extend_from_slice(&[0xAB; 4]);

        let mut reader = SprReader::new(&data);
        let texture = TmxDecoder.decode(&mut reader).unwrap();
        assert_eq!(texture.raw_pixels(), &[Rgba([1, 2, 3, 255])]);
        assert_eq!(reader.position(), TMX_HEADER_SIZE + 16);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = header(0x00, 0, 0, 1, 1, 4);
        data[8..12].copy_from_slice(b"NOPE");
        data.extend_from_slice(&[0; 4]);
        assert!(matches!(parse_tmx_bytes(&data), Err(Error::InvalidTmxMagic(m)) if &m == b"NOPE"));
    }

    #[test]
    fn test_rejects_unknown_pixel_format() {
        let data = header(0x30, 0, 0, 1, 1, 0);
        assert!(matches!(parse_tmx_bytes(&data), Err(Error::UnsupportedPixelFormat(0x30))));
    }
}
