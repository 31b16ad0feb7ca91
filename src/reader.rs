// hmp-terrain/src/reader.rs
//! Bounds-checked cursor over an in-memory file buffer.
//!
//! HMP files are small enough to be handed to the parser as a single
//! fully-loaded byte slice. All field access goes through [`SliceReader`],
//! which decodes each value with an explicit little-endian read and fails
//! with [`HmpError::Truncated`] before any out-of-bounds access. The parser
//! never overlays structs onto the raw buffer.

use crate::error::{HmpError, HmpResult};

/// Read cursor over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position in bytes from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check that `count` more bytes can be read without moving the cursor
    pub fn require(&self, count: usize) -> HmpResult<()> {
        if count > self.remaining() {
            return Err(HmpError::Truncated {
                offset: self.pos,
                needed: count,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Move the cursor to an absolute offset
    pub fn seek(&mut self, pos: usize) -> HmpResult<()> {
        if pos > self.data.len() {
            return Err(HmpError::Truncated {
                offset: pos,
                needed: 0,
                remaining: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Advance the cursor by `count` bytes without reading them
    pub fn skip(&mut self, count: usize) -> HmpResult<()> {
        self.require(count)?;
        self.pos += count;
        Ok(())
    }

    /// Read `count` raw bytes
    pub fn read_bytes(&mut self, count: usize) -> HmpResult<&'a [u8]> {
        self.require(count)?;
        let out = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(out)
    }

    /// Read one unsigned byte
    pub fn read_u8(&mut self) -> HmpResult<u8> {
        self.require(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read one signed byte
    pub fn read_i8(&mut self) -> HmpResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a little-endian u16
    pub fn read_u16(&mut self) -> HmpResult<u16> {
        self.require(2)?;
        let v = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self) -> HmpResult<u32> {
        self.require(4)?;
        let v = u32::from_le_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> HmpResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a little-endian f32
    pub fn read_f32(&mut self) -> HmpResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}
