//! # SprKit
//!
//! A pure-Rust library for the sprite containers used by Persona 3 and
//! Persona 4 (Atlus SPR files with embedded TMX textures).
//!
//! ## Supported Formats
//!
//! - **SPR** - Sprite containers: header, texture table, sprite table
//! - **TMX** - PS2 textures (32/24/16-bit direct color, 8/4-bit indexed)
//!
//! ## Quick Start
//!
//! ### Reading a Container
//!
//! ```no_run
//! use sprkit::formats::spr::read_spr;
//!
//! let spr = read_spr("font.spr")?;
//! println!("{} textures, {} sprites", spr.texture_count(), spr.sprite_count());
//! # Ok::<(), sprkit::Error>(())
//! ```
//!
//! ### Extracting Sprites
//!
//! ```no_run
//! use std::path::Path;
//! use sprkit::sprite::{ExtractionOptions, extract_file};
//!
//! let options = ExtractionOptions::new().with_invalid_as_dummy(true);
//! extract_file(Path::new("font.spr"), Path::new("font/"), &options, |_| {})?;
//! # Ok::<(), sprkit::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use sprkit::prelude::*;
//!
//! let options = SprReadOptions::new().with_translation(TranslationMode::Apply);
//! assert_eq!(options.translation, TranslationMode::Apply);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `sprkit` command-line binary

pub mod error;
pub mod formats;

// Top-level domain modules
pub mod sprite;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::common::{Color, SprReader};
    pub use crate::formats::texture::{PixelData, PixelFormat, Texture, TextureDecoder};
    pub use crate::formats::tmx::{TmxDecoder, parse_tmx_bytes};
    pub use crate::formats::spr::{
        Point, Size, SprFile, SprReadOptions, SpriteRecord, TranslationMode, decode_spr,
        parse_spr_bytes, parse_spr_bytes_with, read_spr, read_spr_with,
    };

    // Sprite extraction
    pub use crate::sprite::{
        BOUNDS_COLOR, BatchSprResult, ExtractionOptions, ExtractionResult, SpriteImage,
        SpritePhase, SpriteProgress, annotate_bounds, batch_extract, expand_textures, export_bounds_to_dir,
        extract_file, extract_sprite, extract_sprites, extract_to_dir, find_spr_files,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
