// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Little-endian reader/writer for the UA binary encoding.
//!
//! The encoding has no alignment: every value follows the previous one
//! directly. Lengths are `Int32` with `-1` meaning null.

use super::{CodecError, CodecResult};
use crate::config::DecodingLimits;

/// Generate write methods for primitive types.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate read methods for primitive types.
///
/// Each generated method checks bounds (returns `CodecError::UnexpectedEof`
/// with the current offset), converts from little-endian and advances.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> CodecResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Growable output buffer.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_u16, u16);
    impl_write_le!(write_i16, i16);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_f32, f32);
    impl_write_le!(write_f64, f64);

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write an `Int32` length prefix. `None` encodes the null marker.
    pub fn write_length(&mut self, len: Option<usize>) -> CodecResult<()> {
        match len {
            None => self.write_i32(-1),
            Some(len) => {
                let len = i32::try_from(len).map_err(|_| CodecError::LimitExceeded {
                    what: "encoded length",
                    actual: len,
                    limit: i32::MAX as usize,
                })?;
                self.write_i32(len);
            }
        }
        Ok(())
    }

    /// Write a length-prefixed byte block, `None` as null.
    pub fn write_byte_block(&mut self, data: Option<&[u8]>) -> CodecResult<()> {
        self.write_length(data.map(<[u8]>::len))?;
        if let Some(data) = data {
            self.write_bytes(data);
        }
        Ok(())
    }
}

/// Which limit a length prefix is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    String,
    ByteString,
    Array,
}

impl LengthKind {
    fn what(self) -> &'static str {
        match self {
            LengthKind::String => "string length",
            LengthKind::ByteString => "byte string length",
            LengthKind::Array => "array length",
        }
    }

    fn limit(self, limits: &DecodingLimits) -> usize {
        match self {
            LengthKind::String => limits.max_string_length,
            LengthKind::ByteString => limits.max_byte_string_length,
            LengthKind::Array => limits.max_array_length,
        }
    }
}

/// Bounds-checked reader over a borrowed buffer.
pub struct BinaryReader<'a> {
    buffer: &'a [u8],
    offset: usize,
    limits: DecodingLimits,
    depth: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_limits(buffer, DecodingLimits::default())
    }

    pub fn with_limits(buffer: &'a [u8], limits: DecodingLimits) -> Self {
        Self {
            buffer,
            offset: 0,
            limits,
            depth: 0,
        }
    }

    pub fn limits(&self) -> &DecodingLimits {
        &self.limits
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_i16, i16, 2);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i64, i64, 8);
    impl_read_le!(read_f32, f32, 4);
    impl_read_le!(read_f64, f64, 8);

    /// Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                offset: self.offset,
                needed: len,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Everything not yet consumed; advances to the end.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = self.offset.min(self.buffer.len());
        self.offset = self.buffer.len();
        &self.buffer[start..]
    }

    /// Read an `Int32` length prefix. `-1` yields `None`; other negative
    /// values are invalid.
    pub fn read_length(&mut self, kind: LengthKind) -> CodecResult<Option<usize>> {
        let offset = self.offset;
        let raw = self.read_i32()?;
        if raw == -1 {
            return Ok(None);
        }
        let len = usize::try_from(raw).map_err(|_| {
            CodecError::InvalidData(format!("negative {} {raw} at offset {offset}", kind.what()))
        })?;
        let limit = kind.limit(&self.limits);
        if len > limit {
            log::debug!("[codec] {} {len} at offset {offset} exceeds {limit}", kind.what());
            return Err(CodecError::LimitExceeded {
                what: kind.what(),
                actual: len,
                limit,
            });
        }
        Ok(Some(len))
    }

    /// Read a length-prefixed byte block.
    pub fn read_byte_block(&mut self, kind: LengthKind) -> CodecResult<Option<&'a [u8]>> {
        match self.read_length(kind)? {
            None => Ok(None),
            Some(len) => self.read_bytes(len).map(Some),
        }
    }

    /// Run `f` one nesting level deeper, failing once the depth limit is hit.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CodecResult<T>) -> CodecResult<T> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(CodecError::DepthExceeded {
                limit: self.limits.max_nesting_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
