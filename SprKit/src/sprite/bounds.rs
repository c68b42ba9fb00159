//! Sprite bounds overlay for texture previews

use image::{Rgba, RgbaImage};

use crate::formats::common::Color;
use crate::formats::spr::SpriteRecord;

/// Outline color used for sprite bounds.
pub const BOUNDS_COLOR: Color = Rgba([255, 0, 0, 255]);

/// Copy `texture` and outline every non-dummy record on the copy.
///
/// Outlines are one pixel wide; parts that fall outside the image are clipped.
pub fn annotate_bounds<'a, I>(texture: &RgbaImage, records: I) -> RgbaImage
where
    I: IntoIterator<Item = &'a SpriteRecord>,
{
    let mut annotated = texture.clone();
    for record in records.into_iter().filter(|r| !r.is_dummy()) {
        draw_outline(&mut annotated, record, BOUNDS_COLOR);
    }
    annotated
}

fn draw_outline(image: &mut RgbaImage, record: &SpriteRecord, color: Color) {
    let (img_w, img_h) = (i64::from(image.width()), i64::from(image.height()));
    if img_w == 0 || img_h == 0 {
        return;
    }

    let left = i64::from(record.position.x);
    let top = i64::from(record.position.y);
    let right = left + i64::from(record.size.width) - 1;
    let bottom = top + i64::from(record.size.height) - 1;

    let mut put = |x: i64, y: i64| {
        if (0..img_w).contains(&x) && (0..img_h).contains(&y) {
            image.put_pixel(x as u32, y as u32, color);
        }
    };

    for x in left.max(0)..=right.min(img_w - 1) {
        put(x, top);
        put(x, bottom);
    }
    for y in top.max(0)..=bottom.min(img_h - 1) {
        put(left, y);
        put(right, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::spr::{Point, Size};

    const BACKGROUND: Color = Rgba([0, 0, 255, 255]);

    fn record(x: i32, y: i32, w: i32, h: i32) -> SpriteRecord {
        SpriteRecord {
            position: Point::new(x, y),
            size: Size::new(w, h),
            texture_index: 0,
            corner_colors: [Rgba([0; 4]); 4],
            translate: Point::default(),
        }
    }

    fn outlined(image: &RgbaImage) -> Vec<(u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == BOUNDS_COLOR)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_outline_leaves_interior_and_input() {
        let texture = RgbaImage::from_pixel(5, 5, BACKGROUND);
        let annotated = annotate_bounds(&texture, &[record(1, 1, 3, 3)]);

        assert!(texture.pixels().all(|p| *p == BACKGROUND));
        assert_eq!(*annotated.get_pixel(2, 2), BACKGROUND);
        assert_eq!(*annotated.get_pixel(0, 0), BACKGROUND);
        assert_eq!(
            outlined(&annotated),
            vec![(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn test_single_pixel_rectangle() {
        let texture = RgbaImage::from_pixel(3, 3, BACKGROUND);
        let annotated = annotate_bounds(&texture, &[record(2, 0, 1, 1)]);
        assert_eq!(outlined(&annotated), vec![(2, 0)]);
    }

    #[test]
    fn test_dummies_are_skipped() {
        let texture = RgbaImage::from_pixel(4, 4, BACKGROUND);
        let annotated = annotate_bounds(&texture, &[record(0, 0, 0, 3), record(1, 1, -2, 2)]);
        assert_eq!(annotated, texture);
    }

    #[test]
    fn test_outline_is_clipped() {
        let texture = RgbaImage::from_pixel(4, 4, BACKGROUND);
        let annotated = annotate_bounds(&texture, &[record(2, 2, 10, 10), record(-3, -3, 4, 4)]);

        assert_eq!(outlined(&annotated), vec![(0, 0), (2, 2), (3, 2), (2, 3)]);
    }
}
