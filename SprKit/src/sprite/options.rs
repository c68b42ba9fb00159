//! Options for writing sprites to disk

use crate::formats::spr::{SprReadOptions, TranslationMode};

/// Options for sprite extraction.
///
/// # Example
///
/// ```no_run
/// use sprkit::formats::spr::TranslationMode;
/// use sprkit::sprite::ExtractionOptions;
///
/// let options = ExtractionOptions::new()
///     .with_translation(TranslationMode::Apply)
///     .with_invalid_as_dummy(true);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionOptions {
    /// How descriptor translations affect sprite rectangles
    pub translation: TranslationMode,

    /// Write a `.dummy` marker for sprites that cannot be extracted
    /// instead of only reporting them.
    /// Default: false
    pub invalid_as_dummy: bool,

    /// Write textures and bounds overlays instead of individual sprites
    /// (used by batch extraction).
    /// Default: false
    pub bounds: bool,
}

impl ExtractionOptions {
    /// Create options with the stored rectangles used as-is.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_translation(mut self, translation: TranslationMode) -> Self {
        self.translation = translation;
        self
    }

    #[must_use]
    pub fn with_invalid_as_dummy(mut self, invalid_as_dummy: bool) -> Self {
        self.invalid_as_dummy = invalid_as_dummy;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: bool) -> Self {
        self.bounds = bounds;
        self
    }

    /// Container read options matching these extraction options.
    #[must_use]
    pub fn read_options(&self) -> SprReadOptions {
        SprReadOptions::new().with_translation(self.translation)
    }
}
