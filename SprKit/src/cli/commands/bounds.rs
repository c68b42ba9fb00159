//! CLI command for texture bounds export

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use super::extract::print_result;
use crate::cli::progress::{LOOKING_GLASS, PENCIL, print_done, print_step, simple_bar};
use crate::formats::spr::read_spr_with;
use crate::sprite::{ExtractionOptions, SpritePhase, export_bounds_to_dir};

/// Write each texture of `source` and its bounds overlay into `dest`
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
            PENCIL,
            &format!("Drawing bounds on {} textures...", spr.texture_count()),
        );
    }
    let pb = (!quiet).then(|| simple_bar(spr.texture_count() as u64, "Drawing"));

    let result = export_bounds_to_dir(&spr, dest, |progress| {
        if let Some(pb) = &pb {
            if progress.phase == SpritePhase::DrawingBounds {
                pb.set_position(progress.current as u64);
            }
        }
    })
    .with_context(|| format!("Failed to export to {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    print_result("Bounds export", &result, dest);
    if !quiet {
        print_done(start.elapsed());
    }

    Ok(())
}
