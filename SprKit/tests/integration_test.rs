use pretty_assertions::assert_eq;
use sprkit::formats::tmx::{TMX_HEADER_SIZE, TMX_MAGIC};
use sprkit::prelude::*;
use sprkit::sprite::sprite_file_stem;
use image::Rgba;
use std::path::Path;
use tempfile::tempdir;

/// Route library logs through the test harness; `RUST_LOG` still applies.
fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

const PSMCT32: u8 = 0x00;
const PSMT4: u8 = 0x14;

/// A TMX record with a single mip level.
fn tmx(name: &str, pixel_format: u8, palette_count: u8, width: u16, height: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(TMX_HEADER_SIZE as u32 + body.len() as u32).to_le_bytes());
    out.extend_from_slice(&TMX_MAGIC);
    out.extend_from_slice(&[0; 4]);
    out.push(palette_count);
    out.push(PSMCT32);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(pixel_format);
    out.push(1);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.push(0);
    out.push(0);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    let mut comment = [0u8; 28];
    comment[..name.len()].copy_from_slice(name.as_bytes());
    out.extend_from_slice(&comment);
    out.extend_from_slice(body);
    out
}

/// 4x4 direct-color texture whose red channel is the pixel index.
fn numbered_tmx() -> Vec<u8> {
    let body: Vec<u8> = (0..16u8).flat_map(|i| [i, 0, 0, 0x80]).collect();
    tmx("icons", PSMCT32, 0, 4, 4, &body)
}

/// 4x2 4-bit texture: grey palette, indices 0..8.
fn nibble_tmx() -> Vec<u8> {
    let mut body: Vec<u8> = (0..16u8).flat_map(|i| [i * 16, i * 16, i * 16, 0x80]).collect();
    body.extend_from_slice(&[0x10, 0x32, 0x54, 0x76]);
    tmx("font", PSMT4, 1, 4, 2, &body)
}

struct Sprite {
    texture: i32,
    translate: (i32, i32),
    rect: [i32; 4],
}

fn sprite(texture: i32, rect: [i32; 4]) -> Sprite {
    Sprite {
        texture,
        translate: (0, 0),
        rect,
    }
}

/// Header, texture table, sprite table, TMX records, then 144-byte descriptors.
fn container(textures: &[Vec<u8>], sprites: &[Sprite]) -> Vec<u8> {
    let texture_table = 0x20u32;
    let sprite_table = texture_table + 8 * textures.len() as u32;
    let mut cursor = sprite_table + 8 * sprites.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(b"SPR0");
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&(textures.len() as u16).to_le_bytes());
    out.extend_from_slice(&(sprites.len() as u16).to_le_bytes());
    out.extend_from_slice(&texture_table.to_le_bytes());
    out.extend_from_slice(&sprite_table.to_le_bytes());

    for (i, texture) in textures.iter().enumerate() {
        out.extend_from_slice(&(i as u32).to_le_bytes());
        out.extend_from_slice(&cursor.to_le_bytes());
        cursor += texture.len() as u32;
    }
    for i in 0..sprites.len() {
        out.extend_from_slice(&(i as u32).to_le_bytes());
        out.extend_from_slice(&(cursor + 144 * i as u32).to_le_bytes());
    }
    for texture in textures {
        out.extend_from_slice(texture);
    }
    for s in sprites {
        let mut desc = vec![0u8; 144];
        desc[20..24].copy_from_slice(&s.texture.to_le_bytes());
        desc[68..72].copy_from_slice(&s.translate.0.to_le_bytes());
        desc[72..76].copy_from_slice(&s.translate.1.to_le_bytes());
        for (i, v) in s.rect.iter().enumerate() {
            desc[84 + i * 4..88 + i * 4].copy_from_slice(&v.to_le_bytes());
        }
        desc[100..104].copy_from_slice(&[10, 20, 30, 40]);
        out.extend_from_slice(&desc);
    }
    out
}

fn sample() -> Vec<u8> {
    container(
        &[numbered_tmx(), nibble_tmx()],
        &[
            sprite(0, [0, 0, 2, 2]),
            sprite(1, [1, 0, 4, 2]),
            sprite(0, [3, 3, 3, 3]),
            sprite(0, [0, 0, 10, 10]),
            sprite(7, [0, 0, 1, 1]),
        ],
    )
}

#[test]
fn test_parse_container() {
    init_logging();
    let data = sample();
    let spr = parse_spr_bytes(&data).unwrap();

    assert_eq!(spr.header.texture_count, 2);
    assert_eq!(spr.header.sprite_count, 5);
    assert_eq!(spr.header.texture_table_offset, 0x20);
    assert_eq!(spr.header.sprite_table_offset, 0x30);
    assert_eq!(spr.end_offset, data.len() as u64);

    assert_eq!(spr.textures[0].name, "icons");
    assert_eq!(spr.textures[1].name, "font");
    assert_eq!(spr.textures[1].pixel_format, PixelFormat::Psmt4);
    assert_eq!((spr.textures[1].width, spr.textures[1].height), (4, 2));

    let first = &spr.sprites[0];
    assert_eq!(first.position, Point::new(0, 0));
    assert_eq!(first.size, Size::new(2, 2));
    assert_eq!(first.corner_colors[0], Rgba([10, 20, 30, 40]));

    // (0,0)-(10,10) on a 4x4 texture
    assert_eq!(spr.sprites[3].size, Size::new(4, 4));
    assert!(spr.sprites[2].is_dummy());
    assert_eq!(spr.dummy_count(), 1);
}

#[test]
fn test_extract_scenarios() {
    let spr = parse_spr_bytes(&sample()).unwrap();
    let pixels = expand_textures(&spr).unwrap();
    let results = extract_sprites(&spr, &pixels);

    let red = |image: &SpriteImage| match image {
        SpriteImage::Pixels { pixels, .. } => pixels.iter().map(|p| p[0]).collect::<Vec<u8>>(),
        SpriteImage::Dummy => Vec::new(),
    };

    assert_eq!(red(results[0].as_ref().unwrap()), vec![0, 1, 4, 5]);
    assert_eq!(red(results[1].as_ref().unwrap()), vec![16, 32, 48, 80, 96, 112]);
    assert!(results[2].as_ref().unwrap().is_dummy());
    assert_eq!(red(results[3].as_ref().unwrap()), (0..16).collect::<Vec<u8>>());
    assert!(matches!(results[4], Err(Error::TextureIndexOutOfRange { sprite: 4, .. })));
}

#[test]
fn test_translation_modes() {
    let mut shifted = sprite(0, [0, 0, 2, 2]);
    shifted.translate = (1, 2);
    let data = container(&[numbered_tmx()], &[shifted]);

    let ignored = parse_spr_bytes(&data).unwrap();
    assert_eq!(ignored.sprites[0].position, Point::new(0, 0));
    assert_eq!(ignored.sprites[0].translate, Point::new(1, 2));

    let options = SprReadOptions::new().with_translation(TranslationMode::Apply);
    let applied = parse_spr_bytes_with(&data, &options).unwrap();
    assert_eq!(applied.sprites[0].position, Point::new(1, 2));
    assert_eq!(applied.sprites[0].size, Size::new(2, 2));

    let pixels = expand_textures(&applied).unwrap();
    match extract_sprites(&applied, &pixels).remove(0).unwrap() {
        SpriteImage::Pixels { pixels, .. } => {
            assert_eq!(pixels.iter().map(|p| p[0]).collect::<Vec<_>>(), vec![9, 10, 13, 14]);
        }
        SpriteImage::Dummy => panic!("expected pixels"),
    }
}

#[test]
fn test_extract_file_to_directory() {
    init_logging();
    let temp = tempdir().unwrap();
    let source = temp.path().join("menu.spr");
    std::fs::write(&source, sample()).unwrap();
    let dest = temp.path().join("menu");

    let result = extract_file(&source, &dest, &ExtractionOptions::new(), |_| {}).unwrap();

    assert_eq!(result.written, 3);
    assert_eq!(result.dummies, 1);
    assert_eq!(result.failed, 1);
    assert_eq!(sprite_file_stem(2, 5), "Sprite2");

    let sprite = image::open(dest.join("Sprite1.png")).unwrap().to_rgba8();
    assert_eq!(sprite.dimensions(), (3, 2));
    assert_eq!(*sprite.get_pixel(0, 1), Rgba([80, 80, 80, 255]));
    assert!(dest.join("Sprite2.dummy").is_file());
    assert!(!dest.join("Sprite4.png").exists());
}

#[test]
fn test_extract_file_bounds_mode() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("menu.spr");
    std::fs::write(&source, sample()).unwrap();
    let dest = temp.path().join("out");

    let options = ExtractionOptions::new().with_bounds(true);
    let result = extract_file(&source, &dest, &options, |_| {}).unwrap();
    assert_eq!(result.written, 4);

    let plain = image::open(dest.join("font.png")).unwrap().to_rgba8();
    let bounds = image::open(dest.join("font_bounds.png")).unwrap().to_rgba8();
    assert_eq!(*plain.get_pixel(1, 0), Rgba([16, 16, 16, 255]));
    assert_eq!(*bounds.get_pixel(1, 0), BOUNDS_COLOR);
    assert_eq!(*bounds.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert!(dest.join("icons_bounds.png").is_file());
}

#[test]
fn test_batch_extract_preserves_structure() {
    init_logging();
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    std::fs::create_dir_all(source.path().join("ui")).unwrap();
    std::fs::write(source.path().join("ui/menu.spr"), sample()).unwrap();
    std::fs::write(source.path().join("broken.spr"), b"not a container").unwrap();

    let files = find_spr_files(source.path());
    assert_eq!(files.len(), 2);

    let result = batch_extract(
        &files,
        source.path(),
        dest.path(),
        &ExtractionOptions::new().with_invalid_as_dummy(true),
        |_| {},
    );

    assert_eq!(result.success_count, 0);
    assert_eq!(result.fail_count, 2);
    assert!(dest.path().join("ui/menu/Sprite0.png").is_file());
    assert!(dest.path().join("ui/menu/Sprite4.dummy").is_file());
    assert!(result.results.iter().any(|m| m.starts_with("Failed broken.spr")));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("missing.spr");
    assert!(matches!(read_spr(Path::new(&missing)), Err(Error::Io(_))));
}
