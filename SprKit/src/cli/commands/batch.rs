//! CLI command for batch SPR extraction

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::cli::progress::{TRUCK, batch_bar_style, print_done, print_step};
use crate::sprite::{ExtractionOptions, batch_extract, find_spr_files};

/// Extract every SPR file found under `source` into `dest`
pub fn execute(source: &Path, dest: &Path, options: &ExtractionOptions) -> anyhow::Result<()> {
    let start = Instant::now();
    let files = find_spr_files(source);

    if files.is_empty() {
        println!("No SPR files found in: {}", source.display());
        return Ok(());
    }

    print_step(
        1,
        1,
        TRUCK,
        &format!("Found {} SPR files to extract", files.len()),
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(batch_bar_style());

    let result = batch_extract(&files, source, dest, options, |progress| {
        pb.set_position(progress.current as u64);
        if let Some(ref name) = progress.current_file {
            pb.set_message(name.clone());
        }
    });

    pb.finish_and_clear();

    println!();
    println!("Extraction complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| !m.starts_with("Extracted")) {
            println!("  {msg}");
        }
    }

    print_done(start.elapsed());
    Ok(())
}
