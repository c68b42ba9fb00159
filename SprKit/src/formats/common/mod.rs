//! Common types and utilities shared across the SPR and TMX formats

mod reader;

pub use reader::SprReader;

/// An 8-bit-per-channel RGBA color, in R, G, B, A order.
pub type Color = image::Rgba<u8>;
