//! Big-endian fixed-width integer decoding over a borrowed byte slice.
//!
//! The original source walks raw pointers (`unsigned char *`) through the
//! mapped file and trusts every offset. A direct port of that would mean
//! `unsafe` pointer arithmetic with no bounds checking at all. Instead this
//! keeps a plain `&[u8]` and a cursor position, and every read is checked
//! against the slice length before it happens — corruption turns into
//! `EngineError::Corruption`, not a segfault or a silently wrong read.

use crate::error::{EngineError, Result};

/// Decodes an unsigned big-endian integer of `width` bytes (1..=8) from the
/// front of `bytes`.
///
/// Mirrors `make_ull_from_n_bytes()` in the original source.
pub fn read_be_uint(bytes: &[u8], width: usize) -> Result<u64> {
    if width == 0 || width > 8 {
        return Err(EngineError::InternalInvariant(format!(
            "unsupported integer width {width}"
        )));
    }
    if bytes.len() < width {
        return Err(EngineError::Corruption(format!(
            "need {width} bytes to decode an integer, only {} available",
            bytes.len()
        )));
    }
    let mut value: u64 = 0;
    for &b in &bytes[..width] {
        value = (value << 8) | b as u64;
    }
    Ok(value)
}

/// A bounds-checked read cursor over a borrowed byte slice.
///
/// Every method either advances `pos` and returns a value, or leaves `pos`
/// untouched and returns `Err(EngineError::Corruption(_))`. It never panics
/// and never reads past the end of `data`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a big-endian unsigned integer of `width` bytes and advances the
    /// cursor by `width`.
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        let end = self.pos.checked_add(width).ok_or_else(|| {
            EngineError::Corruption("cursor offset overflow".to_string())
        })?;
        if end > self.data.len() {
            return Err(EngineError::Corruption(format!(
                "read of {width} bytes at offset {} exceeds region of length {}",
                self.pos,
                self.data.len()
            )));
        }
        let value = read_be_uint(&self.data[self.pos..end], width)?;
        self.pos = end;
        Ok(value)
    }

    /// Reads a big-endian unsigned integer of `width` bytes at `self.pos`
    /// without advancing, then advances the cursor by `stride` instead of
    /// `width`. Used to reproduce the docid-stride quirk exactly (see
    /// `BinaryLayout::docid_stride`).
    pub fn read_uint_strided(&mut self, width: usize, stride: usize) -> Result<u64> {
        let end = self.pos.checked_add(width).ok_or_else(|| {
            EngineError::Corruption("cursor offset overflow".to_string())
        })?;
        if end > self.data.len() {
            return Err(EngineError::Corruption(format!(
                "read of {width} bytes at offset {} exceeds region of length {}",
                self.pos,
                self.data.len()
            )));
        }
        let value = read_be_uint(&self.data[self.pos..end], width)?;
        self.pos = self.pos.checked_add(stride).ok_or_else(|| {
            EngineError::Corruption("cursor offset overflow".to_string())
        })?;
        Ok(value)
    }

    /// Borrows the next `len` bytes without advancing the cursor.
    pub fn peek_slice(&self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            EngineError::Corruption("cursor offset overflow".to_string())
        })?;
        if end > self.data.len() {
            return Err(EngineError::Corruption(format!(
                "slice of {len} bytes at offset {} exceeds region of length {}",
                self.pos,
                self.data.len()
            )));
        }
        Ok(&self.data[self.pos..end])
    }
}
