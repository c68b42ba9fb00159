use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::formats::spr::TranslationMode;

pub mod batch;
pub mod bounds;
pub mod execute;
pub mod extract;
pub mod info;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every sprite of an SPR file as PNG
    Extract {
        /// Source SPR file
        source: PathBuf,

        /// Output directory (default: folder named after the source, next to it)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Add each sprite's stored translation to its rectangle
        #[arg(long)]
        apply_translation: bool,

        /// Write a .dummy marker for sprites that cannot be extracted
        #[arg(long)]
        invalid_as_dummy: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Export each texture with the sprite bounds drawn on a copy
    Bounds {
        /// Source SPR file
        source: PathBuf,

        /// Output directory (default: folder named after the source, next to it)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Add each sprite's stored translation to its rectangle
        #[arg(long)]
        apply_translation: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show textures and sprites of an SPR file
    Info {
        /// Source SPR file
        source: PathBuf,

        /// Add each sprite's stored translation to its rectangle
        #[arg(long)]
        apply_translation: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract every SPR file under a directory
    Batch {
        /// Directory to search for .spr files
        source: PathBuf,

        /// Output directory (source structure is preserved)
        #[arg(short, long)]
        destination: PathBuf,

        /// Export textures with bounds instead of individual sprites
        #[arg(long)]
        bounds: bool,

        /// Add each sprite's stored translation to its rectangle
        #[arg(long)]
        apply_translation: bool,
    },
}

/// Map the `--apply-translation` flag onto a translation mode.
pub(crate) fn translation_mode(apply: bool) -> TranslationMode {
    if apply {
        TranslationMode::Apply
    } else {
        TranslationMode::Ignore
    }
}

/// The output directory: `destination`, or `<source dir>/<source stem>`.
///
/// A source without an extension gets `_sprites` appended instead, so the
/// directory never collides with the file itself.
pub(crate) fn resolve_destination(source: &Path, destination: Option<&Path>) -> PathBuf {
    match destination {
        Some(dest) => dest.to_path_buf(),
        None if source.extension().is_some() => source.with_extension(""),
        None => {
            let name = source.file_name().unwrap_or_default().to_string_lossy();
            source.with_file_name(format!("{name}_sprites"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_destination_is_next_to_source() {
        assert_eq!(
            resolve_destination(Path::new("data/font.spr"), None),
            PathBuf::from("data/font")
        );
        assert_eq!(
            resolve_destination(Path::new("data/font.spr"), Some(Path::new("out"))),
            PathBuf::from("out")
        );
        assert_eq!(
            resolve_destination(Path::new("data/font"), None),
            PathBuf::from("data/font_sprites")
        );
    }

    #[test]
    fn test_translation_flag() {
        assert_eq!(translation_mode(true), TranslationMode::Apply);
        assert_eq!(translation_mode(false), TranslationMode::Ignore);
    }
}
