//! Error types for `SprKit`

use thiserror::Error;

/// The error type for `SprKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected end of data while reading a fixed-width field.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// A seek targeted a position outside the byte source.
    #[error("seek to {position} is outside the data (length {len})")]
    SeekOutOfBounds {
        /// The requested absolute position.
        position: u64,
        /// The length of the byte source.
        len: u64,
    },

    // ==================== SPR Container Errors ====================
    /// The data is not a valid SPR container (missing SPR0 magic).
    #[error("invalid SPR magic: expected 0x{expected:08X}, found 0x{found:08X}")]
    InvalidSprMagic {
        /// The constant the header must carry.
        expected: u32,
        /// The value found in the header.
        found: u32,
    },

    // ==================== TMX Texture Errors ====================
    /// The embedded texture is not a TMX texture (missing TMX0 tag).
    #[error("invalid TMX magic: expected TMX0, found {0:?}")]
    InvalidTmxMagic([u8; 4]),

    /// The TMX pixel format is not supported.
    #[error("unsupported TMX pixel format: 0x{0:02X}")]
    UnsupportedPixelFormat(u8),

    /// The texture header is structurally invalid.
    #[error("invalid texture: {message}")]
    InvalidTexture {
        /// Description of what is invalid.
        message: String,
    },

    /// A palette index points past the end of the palette.
    #[error("palette index {index} out of bounds (palette has {palette_len} colors)")]
    PaletteIndexOutOfBounds {
        /// The offending index value.
        index: u8,
        /// Number of colors in the palette.
        palette_len: usize,
    },

    // ==================== Sprite Extraction Errors ====================
    /// A sprite record references a texture that does not exist.
    #[error("sprite {sprite} references texture {texture_index}, but only {texture_count} exist")]
    TextureIndexOutOfRange {
        /// The sprite's index in the container.
        sprite: usize,
        /// The texture index stored in the record.
        texture_index: i32,
        /// Number of textures in the container.
        texture_count: usize,
    },

    /// A sprite rectangle reaches outside its texture's pixel buffer.
    #[error("sprite rectangle ({x}, {y}) {width}x{height} reads outside a {len}-pixel texture")]
    SpriteOutOfBounds {
        /// Left edge of the rectangle.
        x: i32,
        /// Top edge of the rectangle.
        y: i32,
        /// Rectangle width.
        width: i32,
        /// Rectangle height.
        height: i32,
        /// Number of pixels in the texture buffer.
        len: usize,
    },

    // ==================== Image Output Errors ====================
    /// Failed to create an image buffer from pixel data.
    #[error("failed to create image buffer")]
    ImageBufferFailed,

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },
}

/// A specialized Result type for `SprKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
