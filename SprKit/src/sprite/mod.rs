//! Sprite extraction from decoded SPR containers
//!
//! - [`extract_sprite`] cuts one record's rectangle out of its texture
//! - [`annotate_bounds`] outlines records on a texture preview
//! - [`batch`] runs both in parallel and writes PNG output
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use sprkit::formats::spr::read_spr;
//! use sprkit::sprite::{ExtractionOptions, extract_to_dir};
//!
//! let spr = read_spr("font.spr")?;
//! let result = extract_to_dir(&spr, Path::new("font"), &ExtractionOptions::new(), |_| {})?;
//! println!("{} sprites written", result.written);
//! # Ok::<(), sprkit::Error>(())
//! ```

pub mod types;
pub mod options;
pub mod extract;
pub mod bounds;
pub mod batch;

// Re-exports
pub use types::*;
pub use options::ExtractionOptions;
pub use extract::{SpriteImage, extract_sprite};
pub use bounds::{BOUNDS_COLOR, annotate_bounds};
pub use batch::{
    batch_extract, expand_textures, export_bounds_to_dir, extract_file, extract_record,
    extract_sprites, extract_to_dir, find_spr_files, save_png, sprite_file_stem,
    texture_file_stem,
};
