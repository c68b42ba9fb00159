//! TMX (Atlus PS2 texture) format module
//!
//! TMX is the texture record embedded in SPR containers: a 64-byte header,
//! optional CLUTs, then raw GS pixel storage for the base level and mipmaps.

mod reader;

pub use reader::{TMX_HEADER_SIZE, TMX_MAGIC, TmxDecoder, TmxHeader, parse_tmx_bytes};
