// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message framing: a binary encoding id followed by the structure body.
//!
//! This is the dispatch step of a transport: read the leading id, look the
//! type up in a [`TypeRegistry`], decode. Unknown ids are not an error; the
//! body is handed back untouched.

use super::{BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult};
use crate::extension::ExtensionObject;
use crate::identity::IdRole;
use crate::registry::TypeRegistry;
use crate::structure::Structure;
use crate::types::NodeId;

/// Outcome of [`decode_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    Known(Box<dyn Structure>),
    /// Type id not in the registry; `body` is everything after the id.
    Unknown { type_id: NodeId, body: Vec<u8> },
}

impl DecodedMessage {
    pub fn type_id(&self) -> &NodeId {
        match self {
            DecodedMessage::Known(value) => &value.identity().binary_id,
            DecodedMessage::Unknown { type_id, .. } => type_id,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, DecodedMessage::Known(_))
    }

    /// Wrap as an extension object, raw or decoded.
    pub fn into_extension_object(self) -> ExtensionObject {
        match self {
            DecodedMessage::Known(value) => ExtensionObject::from_boxed(value),
            DecodedMessage::Unknown { type_id, body } => ExtensionObject::Binary { type_id, body },
        }
    }
}

/// Write the binary encoding id of `message` and then its body.
pub fn encode_message(message: &dyn Structure) -> CodecResult<Vec<u8>> {
    let mut writer = BinaryWriter::new();
    message.identity().binary_id.encode(&mut writer)?;
    message.encode_binary(&mut writer)?;
    Ok(writer.into_inner())
}

/// Read a framed message and decode it through `registry`.
///
/// Only binary encoding ids dispatch; a leading abstract or XML id is
/// invalid framing. Bytes after the body are ignored.
pub fn decode_message(bytes: &[u8], registry: &TypeRegistry) -> CodecResult<DecodedMessage> {
    let limits = registry.limits();
    if bytes.len() > limits.max_message_size {
        return Err(CodecError::LimitExceeded {
            what: "message size",
            actual: bytes.len(),
            limit: limits.max_message_size,
        });
    }
    let mut reader = BinaryReader::with_limits(bytes, *limits);
    let type_id = NodeId::decode(&mut reader)?;
    match registry.resolve_role(&type_id) {
        Some((descriptor, IdRole::Binary)) => {
            let value = (descriptor.decode_binary)(&mut reader)?;
            if !reader.is_eof() {
                log::debug!(
                    "[message] {} followed by {} unread bytes",
                    descriptor.type_name,
                    reader.remaining()
                );
            }
            Ok(DecodedMessage::Known(value))
        }
        Some((descriptor, role)) => Err(CodecError::InvalidData(format!(
            "message framed with the {role} id {type_id} of {}",
            descriptor.type_name
        ))),
        None => {
            log::trace!("[message] unknown type id {}", type_id);
            Ok(DecodedMessage::Unknown {
                type_id,
                body: reader.read_remaining().to_vec(),
            })
        }
    }
}
