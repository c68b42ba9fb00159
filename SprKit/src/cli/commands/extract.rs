//! CLI command for sprite extraction

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{LOOKING_GLASS, PICTURE, print_done, print_step, simple_bar};
use crate::formats::spr::read_spr_with;
use crate::sprite::{ExtractionOptions, ExtractionResult, SpritePhase, extract_to_dir};

/// Extract all sprites of `source` into `dest`
pub fn execute(
    source: &Path,
    dest: &Path,
    options: &ExtractionOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", source.display()));
    }
    let spr = read_spr_with(source, &options.read_options())
        .with_context(|| format!("Failed to read {}", source.display()))?;

    if !quiet {
        print_step(
            2,
            2,
            PICTURE,
            &format!("Extracting {} sprites...", spr.sprite_count()),
        );
    }
    let pb = (!quiet).then(|| simple_bar(spr.sprite_count() as u64, "Extracting"));

    let result = extract_to_dir(&spr, dest, options, |progress| {
        if let Some(pb) = &pb {
            if progress.phase == SpritePhase::ExtractingSprites {
                pb.set_position(progress.current as u64);
            }
        }
    })
    .with_context(|| format!("Failed to extract to {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    print_result("Extraction", &result, dest);
    if !quiet {
        print_done(start.elapsed());
    }

    Ok(())
}

/// Print an [`ExtractionResult`] summary and its failures
pub(crate) fn print_result(label: &str, result: &ExtractionResult, dest: &Path) {
    println!();
    println!("{label} complete: {}", dest.display());
    println!("  Written: {}", result.written);
    if result.dummies > 0 {
        println!("  Dummies: {}", result.dummies);
    }
    println!("  Failed: {}", result.failed);

    if !result.errors.is_empty() {
        println!();
        println!("Failures:");
        for msg in &result.errors {
            println!("  {msg}");
        }
    }
}
