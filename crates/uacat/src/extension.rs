// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extension objects: structures of any type, possibly not yet understood.
//!
//! Decoders produce [`ExtensionObject::Binary`] or [`ExtensionObject::Xml`]
//! holding the body exactly as received. [`resolve`](ExtensionObject::resolve)
//! asks a [`TypeRegistry`] for the type and returns a new
//! [`ExtensionObject::Decoded`] value; unknown types come back unchanged, so
//! a relay can forward bodies it cannot read byte-for-byte.
//!
//! Equality compares the body *as held*: a `Binary` body and a `Decoded`
//! body of the same logical value are not equal until both are resolved.

use std::fmt;
use std::hash::{Hash, Hasher};

use roxmltree::Node;
use thiserror::Error;

use crate::codec::{
    read_string, BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult,
    LengthKind, XmlDecoder, XmlEncodable, XmlWriter,
};
use crate::config::DecodingLimits;
use crate::identity::Identity;
use crate::registry::{StructureDescriptor, TypeRegistry};
use crate::structure::{hash_into, Structural, Structure, StructureType};
use crate::types::{ByteString, NodeId};

const NO_BODY: u8 = 0x00;
const BINARY_BODY: u8 = 0x01;
const XML_BODY: u8 = 0x02;

#[derive(Debug, Clone)]
pub enum ExtensionObject {
    /// No body. A null `type_id` is the null extension object.
    Empty { type_id: NodeId },
    /// Binary body, kept verbatim.
    Binary { type_id: NodeId, body: Vec<u8> },
    /// Source text of the XML body element, kept verbatim apart from the
    /// namespace declarations it inherited, which are copied onto it.
    Xml { type_id: NodeId, body: String },
    Decoded(Box<dyn Structure>),
}

impl Default for ExtensionObject {
    fn default() -> Self {
        Self::null()
    }
}

/// Which raw form a malformed body arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    Binary,
    Xml,
}

impl fmt::Display for BodyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyEncoding::Binary => "binary",
            BodyEncoding::Xml => "XML",
        })
    }
}

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The type is known but its body does not decode.
    #[error("malformed {encoding} body of {type_name} ({type_id}): {source}")]
    MalformedBody {
        type_id: NodeId,
        type_name: &'static str,
        encoding: BodyEncoding,
        #[source]
        source: CodecError,
    },
}

impl ExtensionObject {
    pub const fn null() -> Self {
        ExtensionObject::Empty {
            type_id: NodeId::NULL,
        }
    }

    pub fn from_structure<T: StructureType>(value: T) -> Self {
        ExtensionObject::Decoded(Box::new(value))
    }

    pub fn from_boxed(value: Box<dyn Structure>) -> Self {
        ExtensionObject::Decoded(value)
    }

    /// Id carried on the wire; the binary encoding id for decoded bodies.
    pub fn type_id(&self) -> &NodeId {
        match self {
            ExtensionObject::Empty { type_id }
            | ExtensionObject::Binary { type_id, .. }
            | ExtensionObject::Xml { type_id, .. } => type_id,
            ExtensionObject::Decoded(value) => &value.identity().binary_id,
        }
    }

    /// Identity of a decoded body; raw bodies have none until resolved.
    pub fn identity(&self) -> Option<&'static Identity> {
        match self {
            ExtensionObject::Decoded(value) => Some(value.identity()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ExtensionObject::Empty { type_id } if type_id.is_null())
    }

    pub fn is_raw(&self) -> bool {
        matches!(
            self,
            ExtensionObject::Binary { .. } | ExtensionObject::Xml { .. }
        )
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, ExtensionObject::Decoded(_))
    }

    pub fn as_structure(&self) -> Option<&dyn Structure> {
        match self {
            ExtensionObject::Decoded(value) => Some(&**value),
            _ => None,
        }
    }

    pub fn downcast_ref<T: StructureType>(&self) -> Option<&T> {
        self.as_structure()?.downcast_ref::<T>()
    }

    /// Decode a raw body through `registry`.
    ///
    /// Decoded and empty values are returned unchanged, as are raw bodies
    /// whose type id the registry does not know. Only a known type with an
    /// undecodable body is an error.
    pub fn resolve(&self, registry: &TypeRegistry) -> Result<ExtensionObject, ExtensionError> {
        let type_id = match self {
            ExtensionObject::Binary { type_id, .. } | ExtensionObject::Xml { type_id, .. } => {
                type_id
            }
            _ => return Ok(self.clone()),
        };
        let Some(descriptor) = registry.resolve(type_id) else {
            log::trace!("[extension] no type for {}, body left opaque", type_id);
            return Ok(self.clone());
        };
        self.decode_with(descriptor, registry.limits())
            .map(ExtensionObject::Decoded)
    }

    /// [`resolve`](Self::resolve), then take the body as a `T`. `None` when
    /// the body is unknown to the registry or is another type.
    pub fn resolve_as<T: StructureType>(
        &self,
        registry: &TypeRegistry,
    ) -> Result<Option<T>, ExtensionError> {
        if let Some(value) = self.downcast_ref::<T>() {
            return Ok(Some(value.clone()));
        }
        Ok(match self.resolve(registry)? {
            ExtensionObject::Decoded(value) => value.downcast::<T>(),
            _ => None,
        })
    }

    /// Decode as `T` without a registry, when the caller already knows the
    /// expected type. `None` when the type id is not one of `T`'s ids.
    pub fn decode_as<T: StructureType>(
        &self,
        limits: &DecodingLimits,
    ) -> Result<Option<T>, ExtensionError> {
        if let ExtensionObject::Decoded(value) = self {
            return Ok(value.downcast_ref::<T>().cloned());
        }
        if !self.is_raw() || !T::type_identity().contains(self.type_id()) {
            return Ok(None);
        }
        let descriptor = StructureDescriptor::of::<T>();
        let value = self.decode_with(&descriptor, limits)?;
        Ok(value.downcast::<T>())
    }

    fn decode_with(
        &self,
        descriptor: &StructureDescriptor,
        limits: &DecodingLimits,
    ) -> Result<Box<dyn Structure>, ExtensionError> {
        let (type_id, encoding, result) = match self {
            ExtensionObject::Binary { type_id, body } => (
                type_id,
                BodyEncoding::Binary,
                descriptor.decode_binary_body(body, limits),
            ),
            ExtensionObject::Xml { type_id, body } => (
                type_id,
                BodyEncoding::Xml,
                descriptor.decode_xml_body(body, limits),
            ),
            ExtensionObject::Empty { type_id } => (
                type_id,
                BodyEncoding::Binary,
                Ok((descriptor.construct)()),
            ),
            ExtensionObject::Decoded(value) => return Ok(value.clone()),
        };
        result.map_err(|source| {
            log::warn!(
                "[extension] malformed {} body for {} ({}): {}",
                encoding,
                descriptor.type_name,
                type_id,
                source
            );
            ExtensionError::MalformedBody {
                type_id: type_id.clone(),
                type_name: descriptor.type_name,
                encoding,
                source,
            }
        })
    }
}

impl<T: StructureType> From<T> for ExtensionObject {
    fn from(value: T) -> Self {
        Self::from_structure(value)
    }
}

impl Structural for ExtensionObject {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExtensionObject::Empty { type_id: a }, ExtensionObject::Empty { type_id: b }) => {
                a == b
            }
            (
                ExtensionObject::Binary { type_id: a, body: x },
                ExtensionObject::Binary { type_id: b, body: y },
            ) => a == b && x == y,
            (
                ExtensionObject::Xml { type_id: a, body: x },
                ExtensionObject::Xml { type_id: b, body: y },
            ) => a == b && x == y,
            (ExtensionObject::Decoded(a), ExtensionObject::Decoded(b)) => a.eq_dyn(&**b),
            _ => false,
        }
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        match self {
            ExtensionObject::Empty { type_id } => {
                state.write_u8(0);
                hash_into(type_id, state);
            }
            ExtensionObject::Binary { type_id, body } => {
                state.write_u8(1);
                hash_into(type_id, state);
                hash_into(body, state);
            }
            ExtensionObject::Xml { type_id, body } => {
                state.write_u8(2);
                hash_into(type_id, state);
                hash_into(body, state);
            }
            ExtensionObject::Decoded(value) => {
                state.write_u8(3);
                value.hash_dyn(state);
            }
        }
    }
}

impl PartialEq for ExtensionObject {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for ExtensionObject {}

impl Hash for ExtensionObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

impl BinaryEncodable for ExtensionObject {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        match self {
            ExtensionObject::Empty { type_id } => {
                type_id.encode(writer)?;
                writer.write_u8(NO_BODY);
                Ok(())
            }
            ExtensionObject::Binary { type_id, body } => {
                type_id.encode(writer)?;
                writer.write_u8(BINARY_BODY);
                writer.write_byte_block(Some(body.as_slice()))
            }
            ExtensionObject::Xml { type_id, body } => {
                type_id.encode(writer)?;
                writer.write_u8(XML_BODY);
                writer.write_byte_block(Some(body.as_bytes()))
            }
            ExtensionObject::Decoded(value) => {
                value.identity().binary_id.encode(writer)?;
                writer.write_u8(BINARY_BODY);
                let mut body = BinaryWriter::new();
                Structure::encode_binary(&**value, &mut body)?;
                writer.write_byte_block(Some(body.as_bytes()))
            }
        }
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.nested(|reader| {
            let type_id = NodeId::decode(reader)?;
            let offset = reader.offset();
            match reader.read_u8()? {
                NO_BODY => Ok(ExtensionObject::Empty { type_id }),
                BINARY_BODY => {
                    let body = reader
                        .read_byte_block(LengthKind::ByteString)?
                        .ok_or_else(|| null_body(offset))?
                        .to_vec();
                    Ok(ExtensionObject::Binary { type_id, body })
                }
                XML_BODY => {
                    let body = read_string(reader)?.ok_or_else(|| null_body(offset))?;
                    Ok(ExtensionObject::Xml { type_id, body })
                }
                other => Err(CodecError::InvalidData(format!(
                    "extension object encoding 0x{other:02X} at offset {offset}"
                ))),
            }
        })
    }
}

/// A body marker promises a body; a null length after it cannot be
/// written back, so it is refused.
fn null_body(offset: usize) -> CodecError {
    CodecError::InvalidData(format!(
        "extension object body marked present at offset {offset} has a null length"
    ))
}

impl XmlEncodable for ExtensionObject {
    const XML_TYPE_NAME: &'static str = "ExtensionObject";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        match self {
            ExtensionObject::Empty { type_id } => writer.field("TypeId", type_id),
            ExtensionObject::Binary { type_id, body } => {
                writer.element("TypeId", type_id)?;
                writer.start("Body");
                writer.element("ByteString", &ByteString::from(body.as_slice()))?;
                writer.end("Body");
                Ok(())
            }
            ExtensionObject::Xml { type_id, body } => {
                writer.element("TypeId", type_id)?;
                writer.start("Body");
                writer.raw(body);
                writer.end("Body");
                Ok(())
            }
            ExtensionObject::Decoded(value) => {
                writer.element("TypeId", &value.identity().xml_id)?;
                writer.start("Body");
                writer.start(value.type_name());
                Structure::encode_xml(&**value, writer)?;
                writer.end(value.type_name());
                writer.end("Body");
                Ok(())
            }
        }
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.nested(|decoder| {
            let type_id: NodeId = decoder.field(node, "TypeId")?;
            let Some(content) = XmlDecoder::child(node, "Body").and_then(XmlDecoder::first_element)
            else {
                return Ok(ExtensionObject::Empty { type_id });
            };
            if content.tag_name().name() == "ByteString" {
                let body: ByteString = decoder.value(content)?;
                return Ok(ExtensionObject::Binary {
                    type_id,
                    body: body.into_inner().unwrap_or_default(),
                });
            }
            let body = XmlDecoder::detached_source_text(content);
            if body.len() > decoder.limits().max_message_size {
                return Err(CodecError::LimitExceeded {
                    what: "XML body size",
                    actual: body.len(),
                    limit: decoder.limits().max_message_size,
                });
            }
            Ok(ExtensionObject::Xml { type_id, body })
        })
    }

    fn xml_is_null(&self) -> bool {
        self.is_null()
    }
}
