// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire codecs.
//!
//! # Binary
//!
//! Little-endian, unaligned, `Int32` length prefixes (`-1` = null).
//! [`BinaryEncodable`] is implemented by every built-in type, the derive
//! macros, and the generic containers (`Vec<T>`, `Option<Vec<T>>`,
//! `Option<String>`, `Box<T>`).
//!
//! # XML
//!
//! [`XmlEncodable`] writes/reads element content. Raw extension object
//! bodies are kept as verbatim source text.
//!
//! # Messages
//!
//! [`message`] frames a structure with its binary encoding id and dispatches
//! decoding through a [`TypeRegistry`](crate::TypeRegistry).

mod binary;
mod error;
pub mod message;
mod primitives;
mod xml;

pub use binary::{BinaryReader, BinaryWriter, LengthKind};
pub use error::{CodecError, CodecResult};
pub use xml::{
    decode_xml, encode_xml, encode_xml_named, XmlDecoder, XmlEncodable, XmlWriter,
    UA_TYPES_NAMESPACE, XSI_NAMESPACE,
};

pub(crate) use primitives::read_string;

/// Element handle passed to [`XmlEncodable::decode_xml`].
pub use roxmltree::Node as XmlNode;

use crate::config::DecodingLimits;

/// A value with a UA binary representation.
pub trait BinaryEncodable: Sized {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()>;
    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self>;
}

/// Encode `value` into a fresh buffer.
pub fn encode_binary<T: BinaryEncodable>(value: &T) -> CodecResult<Vec<u8>> {
    let mut writer = BinaryWriter::new();
    value.encode(&mut writer)?;
    Ok(writer.into_inner())
}

/// Decode a `T` from the start of `bytes` under `limits`.
///
/// Trailing bytes are left unread; use [`BinaryReader`] directly to check.
pub fn decode_binary<T: BinaryEncodable>(bytes: &[u8], limits: &DecodingLimits) -> CodecResult<T> {
    if bytes.len() > limits.max_message_size {
        return Err(CodecError::LimitExceeded {
            what: "message size",
            actual: bytes.len(),
            limit: limits.max_message_size,
        });
    }
    let mut reader = BinaryReader::with_limits(bytes, *limits);
    T::decode(&mut reader)
}
