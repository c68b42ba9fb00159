//! CLI command for SPR inspection

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::formats::spr::{SprFile, SprReadOptions, TranslationMode, read_spr_with};

#[derive(Serialize)]
struct SprInfo {
    path: String,
    texture_count: usize,
    sprite_count: usize,
    dummy_count: usize,
    end_offset: u64,
    textures: Vec<TextureInfo>,
    sprites: Vec<SpriteInfo>,
}

#[derive(Serialize)]
struct TextureInfo {
    index: usize,
    name: String,
    width: u32,
    height: u32,
    pixel_format: &'static str,
    mip_map_count: u8,
    sprite_count: usize,
}

#[derive(Serialize)]
struct SpriteInfo {
    index: usize,
    texture_index: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    translate_x: i32,
    translate_y: i32,
    dummy: bool,
}

impl SprInfo {
    fn new(path: &Path, spr: &SprFile) -> Self {
        let textures = spr
            .textures
            .iter()
            .enumerate()
            .map(|(index, t)| TextureInfo {
                index,
                name: t.name.clone(),
                width: t.width,
                height: t.height,
                pixel_format: t.pixel_format.as_str(),
                mip_map_count: t.mip_map_count,
                sprite_count: spr.sprites_for_texture(index).count(),
            })
            .collect();

        let sprites = spr
            .sprites
            .iter()
            .enumerate()
            .map(|(index, s)| SpriteInfo {
                index,
                texture_index: s.texture_index,
                x: s.position.x,
                y: s.position.y,
                width: s.size.width,
                height: s.size.height,
                translate_x: s.translate.x,
                translate_y: s.translate.y,
                dummy: s.is_dummy(),
            })
            .collect();

        Self {
            path: path.to_string_lossy().to_string(),
            texture_count: spr.texture_count(),
            sprite_count: spr.sprite_count(),
            dummy_count: spr.dummy_count(),
            end_offset: spr.end_offset,
            textures,
            sprites,
        }
    }
}

/// Show the textures and sprites of an SPR file
pub fn execute(source: &Path, translation: TranslationMode, json: bool) -> anyhow::Result<()> {
    let options = SprReadOptions::new().with_translation(translation);
    let spr = read_spr_with(source, &options)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let info = SprInfo::new(source, &spr);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("SPR Information: {}", info.path);
    println!();
    println!("Textures: {}", info.texture_count);
    println!(
        "Sprites: {} ({} dummies)",
        info.sprite_count, info.dummy_count
    );
    println!("Data ends at: 0x{:X}", info.end_offset);
    println!();

    println!("Textures:");
    for t in &info.textures {
        let name = if t.name.is_empty() { "<unnamed>" } else { t.name.as_str() };
        println!(
            "  [{:>3}] {:<28} {:>4}x{:<4} {:<7} {:>4} sprites",
            t.index, name, t.width, t.height, t.pixel_format, t.sprite_count
        );
    }
    println!();

    println!("Sprites:");
    for s in &info.sprites {
        let note = if s.dummy { "  (dummy)" } else { "" };
        println!(
            "  [{:>4}] tex {:>3}  at ({}, {})  {}x{}{note}",
            s.index, s.texture_index, s.x, s.y, s.width, s.height
        );
    }

    Ok(())
}
