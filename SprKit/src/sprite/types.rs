//! Progress and result types for sprite extraction

/// Progress information during sprite extraction
#[derive(Debug, Clone)]
pub struct SpriteProgress {
    /// Current operation phase
    pub phase: SpritePhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl SpriteProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: SpritePhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file/item name
    #[must_use]
    pub fn with_file(
        phase: SpritePhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a sprite extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpritePhase {
    /// Parsing the container and its textures
    ReadingContainer,
    /// Expanding indexed textures to direct color
    ExpandingTextures,
    /// Cutting and writing individual sprites
    ExtractingSprites,
    /// Writing textures and their bounds overlays
    DrawingBounds,
    /// Processing whole containers in a batch
    ProcessingFiles,
    /// Operation complete
    Complete,
}

impl SpritePhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingContainer => "Reading container",
            Self::ExpandingTextures => "Expanding textures",
            Self::ExtractingSprites => "Extracting sprites",
            Self::DrawingBounds => "Drawing bounds",
            Self::ProcessingFiles => "Processing files",
            Self::Complete => "Complete",
        }
    }
}

/// Outcome of writing one container's sprites or textures to a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// PNG images written
    pub written: usize,
    /// Empty `.dummy` markers written
    pub dummies: usize,
    /// Items that could not be extracted or written
    pub failed: usize,
    /// One message per failed item
    pub errors: Vec<String>,
}

impl ExtractionResult {
    /// Returns true if nothing failed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total items handled, successful or not
    #[must_use]
    pub fn total(&self) -> usize {
        self.written + self.dummies + self.failed
    }
}

/// Result of a batch extraction over many containers
#[derive(Debug, Clone)]
pub struct BatchSprResult {
    /// Number of containers fully extracted
    pub success_count: usize,
    /// Number of containers that failed or had failed items
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}
