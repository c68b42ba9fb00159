//! Command execution implementations

use super::{Commands, batch, bounds, extract, info, resolve_destination, translation_mode};
use crate::sprite::ExtractionOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                source,
                destination,
                apply_translation,
                invalid_as_dummy,
                quiet,
            } => {
                let options = ExtractionOptions::new()
                    .with_translation(translation_mode(*apply_translation))
                    .with_invalid_as_dummy(*invalid_as_dummy);
                let dest = resolve_destination(source, destination.as_deref());
                extract::execute(source, &dest, &options, *quiet)
            }
            Commands::Bounds {
                source,
                destination,
                apply_translation,
                quiet,
            } => {
                let options = ExtractionOptions::new()
                    .with_translation(translation_mode(*apply_translation))
                    .with_bounds(true);
                let dest = resolve_destination(source, destination.as_deref());
                bounds::execute(source, &dest, &options, *quiet)
            }
            Commands::Info {
                source,
                apply_translation,
                json,
            } => info::execute(source, translation_mode(*apply_translation), *json),
            Commands::Batch {
                source,
                destination,
                bounds,
                apply_translation,
            } => {
                let options = ExtractionOptions::new()
                    .with_translation(translation_mode(*apply_translation))
                    .with_bounds(*bounds);
                batch::execute(source, destination, &options)
            }
        }
    }
}
