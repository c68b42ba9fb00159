//! Position-addressable little-endian reader over an in-memory buffer
//!
//! Both the SPR tables and the embedded TMX records are located by absolute
//! offsets, so decoding is a sequence of "remember position, jump, decode,
//! jump back". [`SprReader`] keeps that a pure function of buffer + position.

use std::io::{Cursor, ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// Cursor over a fixed byte buffer.
///
/// Not meant to be shared: a decode borrows it mutably from start to end.
#[derive(Debug, Clone)]
pub struct SprReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> SprReader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// The whole underlying buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }

    /// Length of the underlying buffer in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.data().len() as u64
    }

    /// Whether the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Current absolute position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Bytes left between the current position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    /// Move to an absolute position. The end of the buffer is a valid target.
    pub fn seek(&mut self, position: u64) -> Result<()> {
        let len = self.len();
        if position > len {
            return Err(Error::SeekOutOfBounds { position, len });
        }
        self.cursor.set_position(position);
        Ok(())
    }

    /// Move forward by `count` bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let target = self
            .position()
            .checked_add(count)
            .ok_or(Error::SeekOutOfBounds {
                position: u64::MAX,
                len: self.len(),
            })?;
        self.seek(target)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(map_eof)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.cursor.read_u16::<LittleEndian>().map_err(map_eof)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor.read_u32::<LittleEndian>().map_err(map_eof)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.cursor.read_i32::<LittleEndian>().map_err(map_eof)
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.cursor.read_exact(&mut buf).map_err(map_eof)?;
        Ok(buf)
    }

    /// Borrow the next `count` bytes and advance past them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if (count as u64) > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        let data = self.data();
        let start = self.position() as usize;
        self.cursor.set_position((start + count) as u64);
        Ok(&data[start..start + count])
    }
}

fn map_eof(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(err)
    }
}
