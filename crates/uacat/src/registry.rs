// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec registry: encoding id -> structure descriptor.
//!
//! Populate a [`TypeRegistryBuilder`] once at startup, then freeze it with
//! [`build`](TypeRegistryBuilder::build). The resulting [`TypeRegistry`] has
//! no interior mutability, so one `Arc<TypeRegistry>` serves any number of
//! concurrent readers without locks.
//!
//! All three ids of every [`Identity`] live in one map. Registering a type
//! whose ids collide with an existing entry fails and leaves the builder
//! unchanged.

use std::collections::HashMap;
use std::fmt;

use roxmltree::Node;
use thiserror::Error;

use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::config::DecodingLimits;
use crate::identity::{IdRole, Identity};
use crate::structure::{Structure, StructureType};
use crate::types::NodeId;

pub type ConstructFn = fn() -> Box<dyn Structure>;
pub type DecodeBinaryFn = fn(&mut BinaryReader<'_>) -> CodecResult<Box<dyn Structure>>;
pub type DecodeXmlFn = fn(Node<'_, '_>, &mut XmlDecoder) -> CodecResult<Box<dyn Structure>>;
pub type EncodeBinaryFn = fn(&dyn Structure, &mut BinaryWriter) -> CodecResult<()>;
pub type EncodeXmlFn = fn(&dyn Structure, &mut XmlWriter) -> CodecResult<()>;

/// Everything the registry knows about one structure type.
#[derive(Clone, Copy)]
pub struct StructureDescriptor {
    pub identity: &'static Identity,
    pub type_name: &'static str,
    /// Default instance.
    pub construct: ConstructFn,
    pub decode_binary: DecodeBinaryFn,
    pub decode_xml: DecodeXmlFn,
    pub encode_binary: EncodeBinaryFn,
    pub encode_xml: EncodeXmlFn,
}

impl StructureDescriptor {
    /// Descriptor backed by `T`'s own codecs.
    pub fn of<T: StructureType>() -> Self {
        Self {
            identity: T::type_identity(),
            type_name: T::TYPE_NAME,
            construct: construct::<T>,
            decode_binary: decode_binary::<T>,
            decode_xml: decode_xml::<T>,
            encode_binary: encode_binary::<T>,
            encode_xml: encode_xml::<T>,
        }
    }

    /// Decode a binary body. Bytes after the structure are ignored.
    pub fn decode_binary_body(
        &self,
        body: &[u8],
        limits: &DecodingLimits,
    ) -> CodecResult<Box<dyn Structure>> {
        let mut reader = BinaryReader::with_limits(body, *limits);
        let value = (self.decode_binary)(&mut reader)?;
        if !reader.is_eof() {
            log::trace!(
                "[registry] {} body has {} trailing bytes",
                self.type_name,
                reader.remaining()
            );
        }
        Ok(value)
    }

    /// Decode an XML body: the source text of the element holding the fields.
    pub fn decode_xml_body(
        &self,
        body: &str,
        limits: &DecodingLimits,
    ) -> CodecResult<Box<dyn Structure>> {
        if body.len() > limits.max_message_size {
            return Err(CodecError::LimitExceeded {
                what: "XML body size",
                actual: body.len(),
                limit: limits.max_message_size,
            });
        }
        let document = roxmltree::Document::parse(body)?;
        let mut decoder = XmlDecoder::new(*limits);
        (self.decode_xml)(document.root_element(), &mut decoder)
    }
}

impl fmt::Debug for StructureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureDescriptor")
            .field("type_name", &self.type_name)
            .field("identity", self.identity)
            .finish_non_exhaustive()
    }
}

fn construct<T: StructureType>() -> Box<dyn Structure> {
    Box::new(T::default())
}

fn decode_binary<T: StructureType>(reader: &mut BinaryReader<'_>) -> CodecResult<Box<dyn Structure>> {
    let value = <T as BinaryEncodable>::decode(reader)?;
    Ok(Box::new(value))
}

fn decode_xml<T: StructureType>(
    node: Node<'_, '_>,
    decoder: &mut XmlDecoder,
) -> CodecResult<Box<dyn Structure>> {
    let value = <T as XmlEncodable>::decode_xml(node, decoder)?;
    Ok(Box::new(value))
}

fn downcast<T: StructureType>(value: &dyn Structure) -> CodecResult<&T> {
    value.downcast_ref::<T>().ok_or(CodecError::TypeMismatch {
        expected: T::TYPE_NAME,
        found: value.type_name(),
    })
}

fn encode_binary<T: StructureType>(value: &dyn Structure, writer: &mut BinaryWriter) -> CodecResult<()> {
    BinaryEncodable::encode(downcast::<T>(value)?, writer)
}

fn encode_xml<T: StructureType>(value: &dyn Structure, writer: &mut XmlWriter) -> CodecResult<()> {
    XmlEncodable::encode_xml(downcast::<T>(value)?, writer)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{role} id {id} of {incoming} is already registered to {existing}")]
    DuplicateRegistration {
        id: NodeId,
        role: IdRole,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("{type_name} has repeated ids in {identity}")]
    IndistinctIdentity {
        type_name: &'static str,
        identity: Identity,
    },

    #[error("{type_name} has a null {role} id")]
    NullId { type_name: &'static str, role: IdRole },
}

/// Mutable population phase of a [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    by_id: HashMap<NodeId, (usize, IdRole)>,
    descriptors: Vec<StructureDescriptor>,
    limits: DecodingLimits,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits used when the registry decodes extension object bodies.
    pub fn with_limits(mut self, limits: DecodingLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn register<T: StructureType>(&mut self) -> Result<&mut Self, RegistryError> {
        self.register_descriptor(StructureDescriptor::of::<T>())
    }

    /// Add a descriptor. All checks run before anything is inserted.
    pub fn register_descriptor(
        &mut self,
        descriptor: StructureDescriptor,
    ) -> Result<&mut Self, RegistryError> {
        let identity = descriptor.identity;
        for (role, id) in identity.ids() {
            if id.is_null() {
                return Err(RegistryError::NullId {
                    type_name: descriptor.type_name,
                    role,
                });
            }
        }
        if !identity.is_distinct() {
            return Err(RegistryError::IndistinctIdentity {
                type_name: descriptor.type_name,
                identity: identity.clone(),
            });
        }
        for (role, id) in identity.ids() {
            if let Some(&(index, _)) = self.by_id.get(id) {
                let existing = self.descriptors[index].type_name;
                log::error!(
                    "[registry] {} id {} of {} already belongs to {}",
                    role,
                    id,
                    descriptor.type_name,
                    existing
                );
                return Err(RegistryError::DuplicateRegistration {
                    id: id.clone(),
                    role,
                    existing,
                    incoming: descriptor.type_name,
                });
            }
        }

        let index = self.descriptors.len();
        for (role, id) in identity.ids() {
            self.by_id.insert(id.clone(), (index, role));
        }
        self.descriptors.push(descriptor);
        log::debug!(
            "[registry] registered {} {}",
            descriptor.type_name,
            identity
        );
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Freeze into a read-only registry.
    pub fn build(self) -> TypeRegistry {
        log::info!(
            "[registry] frozen with {} structure types",
            self.descriptors.len()
        );
        TypeRegistry {
            by_id: self.by_id,
            descriptors: self.descriptors,
            limits: self.limits,
        }
    }
}

/// Frozen id -> descriptor table.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    by_id: HashMap<NodeId, (usize, IdRole)>,
    descriptors: Vec<StructureDescriptor>,
    limits: DecodingLimits,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Builder pre-populated with the bundled catalog.
    pub fn with_catalog() -> Result<TypeRegistryBuilder, RegistryError> {
        let mut builder = TypeRegistryBuilder::new();
        crate::catalog::register_all(&mut builder)?;
        Ok(builder)
    }

    /// Descriptor owning `id` in any role; `None` for unknown types.
    pub fn resolve(&self, id: &NodeId) -> Option<&StructureDescriptor> {
        self.resolve_role(id).map(|(descriptor, _)| descriptor)
    }

    pub fn resolve_role(&self, id: &NodeId) -> Option<(&StructureDescriptor, IdRole)> {
        self.by_id
            .get(id)
            .map(|&(index, role)| (&self.descriptors[index], role))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &StructureDescriptor> {
        self.descriptors.iter()
    }

    pub fn limits(&self) -> &DecodingLimits {
        &self.limits
    }
}
