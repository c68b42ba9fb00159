//! Sprite sub-rectangle extraction

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::formats::common::Color;
use crate::formats::spr::SpriteRecord;
use crate::formats::texture::pixels_to_image;

/// Pixels cut out for one sprite record.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteImage {
    /// `width * height` colors, row-major.
    Pixels {
        width: u32,
        height: u32,
        pixels: Vec<Color>,
    },
    /// The record has no area; nothing was copied.
    Dummy,
}

impl SpriteImage {
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        matches!(self, Self::Dummy)
    }

    /// Convert to an [`RgbaImage`], or `None` for a dummy.
    pub fn into_image(self) -> Result<Option<RgbaImage>> {
        match self {
            Self::Pixels {
                width,
                height,
                pixels,
            } => pixels_to_image(width, height, &pixels).map(Some),
            Self::Dummy => Ok(None),
        }
    }
}

/// Copy a record's rectangle out of its texture's expanded pixels.
///
/// Records with a non-positive width or height yield [`SpriteImage::Dummy`].
///
/// # Errors
/// Returns [`Error::SpriteOutOfBounds`] if any source pixel would fall outside
/// `texture_pixels`. Nothing is read in that case.
pub fn extract_sprite(
    texture_pixels: &[Color],
    texture_width: u32,
    record: &SpriteRecord,
) -> Result<SpriteImage> {
    if record.is_dummy() {
        return Ok(SpriteImage::Dummy);
    }

    let width = i64::from(record.size.width);
    let height = i64::from(record.size.height);
    let stride = i64::from(texture_width);
    let x = i64::from(record.position.x);
    let y = i64::from(record.position.y);

    // Every source index lies between the first and the last one
    let first = y * stride + x;
    let last = (y + height - 1) * stride + x + width - 1;
    let len = texture_pixels.len();
    if first < 0 || last >= len as i64 {
        return Err(Error::SpriteOutOfBounds {
            x: record.position.x,
            y: record.position.y,
            width: record.size.width,
            height: record.size.height,
            len,
        });
    }

    let row_len = width as usize;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in 0..height {
        let start = ((y + row) * stride + x) as usize;
        pixels.extend_from_slice(&texture_pixels[start..start + row_len]);
    }

    Ok(SpriteImage::Pixels {
        width: record.size.width as u32,
        height: record.size.height as u32,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::spr::{Point, Size};
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn numbered(count: u8) -> Vec<Color> {
        (0..count).map(|i| Rgba([i, i, i, 255])).collect()
    }

    fn record(x: i32, y: i32, w: i32, h: i32) -> SpriteRecord {
        SpriteRecord {
            position: Point::new(x, y),
            size: Size::new(w, h),
            texture_index: 0,
            corner_colors: [Rgba([0; 4]); 4],
            translate: Point::default(),
        }
    }

    fn values(image: &SpriteImage) -> Vec<u8> {
        match image {
            SpriteImage::Pixels { pixels, .. } => pixels.iter().map(|p| p[0]).collect(),
            SpriteImage::Dummy => panic!("expected pixels"),
        }
    }

    #[test]
    fn test_top_left_quad() {
        let sprite = extract_sprite(&numbered(16), 4, &record(0, 0, 2, 2)).unwrap();
        assert_eq!(values(&sprite), vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_offset_rectangle() {
        let sprite = extract_sprite(&numbered(16), 4, &record(1, 2, 3, 2)).unwrap();
        assert_eq!(values(&sprite), vec![9, 10, 11, 13, 14, 15]);
        if let SpriteImage::Pixels { width, height, pixels } = sprite {
            assert_eq!((width, height), (3, 2));
            assert_eq!(pixels.len(), 6);
        }
    }

    #[test]
    fn test_dummy_records() {
        let pixels = numbered(16);
        for (w, h) in [(0, 2), (2, 0), (-1, 3), (3, -1), (0, 0)] {
            assert!(extract_sprite(&pixels, 4, &record(0, 0, w, h)).unwrap().is_dummy());
        }
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let pixels = numbered(16);
        for r in [record(0, 3, 2, 2), record(-1, 0, 2, 2), record(0, -1, 1, 1), record(3, 3, 2, 1)] {
            assert!(matches!(
                extract_sprite(&pixels, 4, &r),
                Err(Error::SpriteOutOfBounds { len: 16, .. })
            ));
        }
    }

    #[test]
    fn test_into_image() {
        let sprite = extract_sprite(&numbered(16), 4, &record(2, 1, 2, 3)).unwrap();
        let image = sprite.into_image().unwrap().unwrap();
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(*image.get_pixel(1, 2), Rgba([15, 15, 15, 255]));
        assert!(SpriteImage::Dummy.into_image().unwrap().is_none());
    }
}
