//! Parallel sprite extraction and directory output
//!
//! Sprites and textures are independent once a container is parsed, so every
//! per-item step here runs on rayon with atomic progress counters. Results are
//! always collected in index order.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::bounds::annotate_bounds;
use super::extract::{SpriteImage, extract_sprite};
use super::options::ExtractionOptions;
use super::types::{BatchSprResult, ExtractionResult, SpritePhase, SpriteProgress};
use crate::error::{Error, Result};
use crate::formats::common::Color;
use crate::formats::spr::{SprFile, SpriteRecord, read_spr_with};
use crate::formats::texture::Texture;

/// Expand every texture of a container to direct color, in texture order.
///
/// # Errors
/// Fails on the first texture with a palette index past its palette.
pub fn expand_textures(spr: &SprFile) -> Result<Vec<Vec<Color>>> {
    spr.textures
        .par_iter()
        .map(Texture::expanded_pixels)
        .collect()
}

/// Extract sprite `index` of a container.
///
/// `texture_pixels` holds the expanded pixels of each texture, as returned by
/// [`expand_textures`].
///
/// # Errors
/// Returns [`Error::TextureIndexOutOfRange`] or [`Error::SpriteOutOfBounds`]
/// for records that cannot be cut from their texture.
pub fn extract_record(
    spr: &SprFile,
    texture_pixels: &[Vec<Color>],
    index: usize,
    record: &SpriteRecord,
) -> Result<SpriteImage> {
    if record.is_dummy() {
        return Ok(SpriteImage::Dummy);
    }

    let texture = spr.texture_for(index, record)?;
    let pixels = usize::try_from(record.texture_index)
        .ok()
        .and_then(|i| texture_pixels.get(i))
        .ok_or(Error::TextureIndexOutOfRange {
            sprite: index,
            texture_index: record.texture_index,
            texture_count: texture_pixels.len(),
        })?;

    extract_sprite(pixels, texture.width, record)
}

/// Extract all sprites of a container in parallel.
///
/// Returns one result per sprite, in sprite order; a failing record does not
/// affect the others.
pub fn extract_sprites(spr: &SprFile, texture_pixels: &[Vec<Color>]) -> Vec<Result<SpriteImage>> {
    spr.sprites
        .par_iter()
        .enumerate()
        .map(|(index, record)| extract_record(spr, texture_pixels, index, record))
        .collect()
}

/// File stem for sprite `index`, zero-padded to the digit count of `count`.
///
/// ```
/// assert_eq!(sprkit::sprite::sprite_file_stem(7, 120), "Sprite007");
/// ```
#[must_use]
pub fn sprite_file_stem(index: usize, count: usize) -> String {
    let digits = count.to_string().len();
    format!("Sprite{index:0digits$}")
}

/// File stem for a texture: its stored name, or `texture{index}` if empty.
///
/// Path separators and characters that are invalid in file names are
/// replaced with `_`.
#[must_use]
pub fn texture_file_stem(texture: &Texture, index: usize) -> String {
    let name = texture.name.trim();
    if name.is_empty() {
        return format!("texture{index}");
    }
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Texture stems made unique, so no two textures share an output file.
///
/// Comparison ignores case, and each stem also reserves `{stem}_bounds`.
/// A taken stem gets `_{index}` appended, then `_{index}_{n}` until free.
fn unique_texture_stems(spr: &SprFile) -> Vec<String> {
    let mut taken = HashSet::new();
    spr.textures
        .iter()
        .enumerate()
        .map(|(index, texture)| {
            let base = texture_file_stem(texture, index);
            let mut stem = base.clone();
            let mut attempt = 0usize;
            while !stem_is_free(&taken, &stem) {
                attempt += 1;
                stem = if attempt == 1 {
                    format!("{base}_{index}")
                } else {
                    format!("{base}_{index}_{attempt}")
                };
            }
            taken.insert(stem.to_lowercase());
            taken.insert(format!("{stem}_bounds").to_lowercase());
            stem
        })
        .collect()
}

fn stem_is_free(taken: &HashSet<String>, stem: &str) -> bool {
    !taken.contains(&stem.to_lowercase())
        && !taken.contains(&format!("{stem}_bounds").to_lowercase())
}

/// Write every sprite of a container into `dest`
///
/// Each sprite becomes `Sprite{index}.png`; dummy records become an empty
/// `Sprite{index}.dummy` marker. Sprites that cannot be extracted are logged,
/// counted as failed, and also get a marker if
/// [`ExtractionOptions::invalid_as_dummy`] is set.
///
/// # Errors
/// Fails if `dest` cannot be created or a texture palette is corrupt.
/// Per-sprite failures are reported in the returned [`ExtractionResult`].
pub fn extract_to_dir<F>(
    spr: &SprFile,
    dest: &Path,
    options: &ExtractionOptions,
    progress: F,
) -> Result<ExtractionResult>
where
    F: Fn(&SpriteProgress) + Send + Sync,
{
    std::fs::create_dir_all(dest)?;

    progress(&SpriteProgress::new(
        SpritePhase::ExpandingTextures,
        0,
        spr.texture_count(),
    ));
    let texture_pixels = expand_textures(spr)?;

    let total = spr.sprite_count();
    let processed = AtomicUsize::new(0);

    let outcomes: Vec<ItemOutcome> = spr
        .sprites
        .par_iter()
        .enumerate()
        .map(|(index, record)| {
            let stem = sprite_file_stem(index, total);
            let outcome = write_sprite(spr, &texture_pixels, index, record, dest, &stem, options);

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&SpriteProgress::with_file(
                SpritePhase::ExtractingSprites,
                current,
                total,
                stem,
            ));
            outcome
        })
        .collect();

    let result = tally(outcomes);
    tracing::info!(
        "Extracted {} sprites to {} ({} dummies, {} failed)",
        result.written,
        dest.display(),
        result.dummies,
        result.failed
    );
    progress(&SpriteProgress::new(SpritePhase::Complete, total, total));
    Ok(result)
}

/// Write every texture of a container and a copy with sprite bounds drawn
///
/// Each texture becomes `{name}.png` and `{name}_bounds.png`, where `name`
/// comes from [`texture_file_stem`].
///
/// # Errors
/// Fails if `dest` cannot be created. Per-texture failures are reported in the
/// returned [`ExtractionResult`].
pub fn export_bounds_to_dir<F>(spr: &SprFile, dest: &Path, progress: F) -> Result<ExtractionResult>
where
    F: Fn(&SpriteProgress) + Send + Sync,
{
    std::fs::create_dir_all(dest)?;

    let stems = unique_texture_stems(spr);
    let total = spr.texture_count();
    let processed = AtomicUsize::new(0);

    let outcomes: Vec<Vec<ItemOutcome>> = spr
        .textures
        .par_iter()
        .zip(stems.par_iter())
        .enumerate()
        .map(|(index, (texture, stem))| {
            let outcome = match write_texture_bounds(spr, index, texture, dest, stem) {
                Ok(()) => vec![ItemOutcome::Written, ItemOutcome::Written],
                Err(e) => {
                    tracing::warn!("Failed to export texture {stem}: {e}");
                    vec![ItemOutcome::Failed(format!("{stem}: {e}"))]
                }
            };

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&SpriteProgress::with_file(
                SpritePhase::DrawingBounds,
                current,
                total,
                stem.clone(),
            ));
            outcome
        })
        .collect();

    let result = tally(outcomes.into_iter().flatten());
    tracing::info!(
        "Exported {} texture images to {} ({} failed)",
        result.written,
        dest.display(),
        result.failed
    );
    progress(&SpriteProgress::new(SpritePhase::Complete, total, total));
    Ok(result)
}

/// Read one SPR file and write its sprites (or bounds, per `options`) to `dest`
///
/// # Errors
/// Fails if the file cannot be read or parsed, or if output cannot be written.
pub fn extract_file<F>(
    source: &Path,
    dest: &Path,
    options: &ExtractionOptions,
    progress: F,
) -> Result<ExtractionResult>
where
    F: Fn(&SpriteProgress) + Send + Sync,
{
    progress(&SpriteProgress::with_file(
        SpritePhase::ReadingContainer,
        0,
        1,
        source.to_string_lossy(),
    ));
    let spr = read_spr_with(source, &options.read_options())?;
    tracing::debug!(
        "Read {}: {} textures, {} sprites",
        source.display(),
        spr.texture_count(),
        spr.sprite_count()
    );

    if options.bounds {
        export_bounds_to_dir(&spr, dest, progress)
    } else {
        extract_to_dir(&spr, dest, options, progress)
    }
}

/// Find all .spr files in a directory recursively
///
/// # Returns
/// A sorted list of paths to .spr files found in the directory tree.
pub fn find_spr_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut spr_files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file() && has_spr_extension(e.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    spr_files.sort();
    spr_files
}

/// Containers ship as `.spr` in any case (`.SPR` on the original discs).
fn has_spr_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("spr"))
}

/// Batch extract SPR files in parallel
///
/// Each container is extracted into a directory named after the file (without
/// extension), preserving the source directory structure under `dest_base`.
///
/// # Arguments
/// * `spr_files` - List of SPR files to extract
/// * `source_base` - Base directory of the source (for calculating relative paths)
/// * `dest_base` - Destination directory for extracted files
/// * `options` - Extraction options applied to every file
/// * `progress` - Callback for progress updates
pub fn batch_extract<F>(
    spr_files: &[PathBuf],
    source_base: &Path,
    dest_base: &Path,
    options: &ExtractionOptions,
    progress: F,
) -> BatchSprResult
where
    F: Fn(&SpriteProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = spr_files.len();

    let results: Vec<String> = spr_files
        .par_iter()
        .map(|spr_path| {
            let relative_path = spr_path
                .strip_prefix(source_base)
                .unwrap_or(spr_path.as_path());
            let display_path = relative_path.to_string_lossy();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&SpriteProgress::with_file(
                SpritePhase::ProcessingFiles,
                current,
                total,
                display_path.to_string(),
            ));

            let relative_parent = relative_path.parent().unwrap_or(Path::new(""));
            let stem = spr_path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            let spr_dest = dest_base.join(relative_parent).join(&stem);

            match extract_file(spr_path, &spr_dest, options, |_| {}) {
                Ok(result) if result.is_success() => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Extracted: {display_path} ({} images)", result.written)
                }
                Ok(result) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    format!(
                        "Partially extracted {display_path}: {} of {} items failed",
                        result.failed,
                        result.total()
                    )
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    BatchSprResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}

enum ItemOutcome {
    Written,
    Dummy,
    Failed(String),
}

fn tally(outcomes: impl IntoIterator<Item = ItemOutcome>) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Written => result.written += 1,
            ItemOutcome::Dummy => result.dummies += 1,
            ItemOutcome::Failed(message) => {
                result.failed += 1;
                result.errors.push(message);
            }
        }
    }
    result
}

fn write_sprite(
    spr: &SprFile,
    texture_pixels: &[Vec<Color>],
    index: usize,
    record: &SpriteRecord,
    dest: &Path,
    stem: &str,
    options: &ExtractionOptions,
) -> ItemOutcome {
    let written = extract_record(spr, texture_pixels, index, record)
        .and_then(SpriteImage::into_image)
        .and_then(|image| match image {
            Some(image) => save_png(&image, &dest.join(format!("{stem}.png"))).map(|()| true),
            None => write_dummy(dest, stem).map(|()| false),
        });

    match written {
        Ok(true) => ItemOutcome::Written,
        Ok(false) => ItemOutcome::Dummy,
        Err(e) => {
            tracing::warn!("Failed to extract sprite {index}: {e}");
            if options.invalid_as_dummy {
                if let Err(marker_err) = write_dummy(dest, stem) {
                    tracing::warn!("Failed to write dummy marker for sprite {index}: {marker_err}");
                }
            }
            ItemOutcome::Failed(format!("{stem}: {e}"))
        }
    }
}

fn write_texture_bounds(
    spr: &SprFile,
    index: usize,
    texture: &Texture,
    dest: &Path,
    stem: &str,
) -> Result<()> {
    let image = texture.to_image()?;
    let annotated = annotate_bounds(&image, spr.sprites_for_texture(index).map(|(_, r)| r));

    save_png(&image, &dest.join(format!("{stem}.png")))?;
    save_png(&annotated, &dest.join(format!("{stem}_bounds.png")))
}

fn write_dummy(dest: &Path, stem: &str) -> Result<()> {
    File::create(dest.join(format!("{stem}.dummy")))?;
    Ok(())
}

/// Encode an image as PNG at `path`.
///
/// # Errors
/// Fails if the file cannot be created or encoding fails.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    image
        .write_with_encoder(PngEncoder::new(writer))
        .map_err(|e| Error::PngEncodeFailed {
            message: e.to_string(),
        })
}
