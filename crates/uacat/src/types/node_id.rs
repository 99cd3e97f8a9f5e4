// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node identifiers.
//!
//! Text form follows the UA convention: `i=2253`, `ns=2;s=Pump.Speed`,
//! `ns=1;g=72962B91-FA75-4AE6-8D28-B404DC7DAF63`, `b=AAEC`. Expanded ids add
//! `svr=<index>;` and `nsu=<uri>;` prefixes.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use roxmltree::Node;

use super::{ByteString, Guid};
use crate::codec::{
    read_string, BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

// Encoding byte values for the binary NodeId forms.
const ENCODING_TWO_BYTE: u8 = 0x00;
const ENCODING_FOUR_BYTE: u8 = 0x01;
const ENCODING_NUMERIC: u8 = 0x02;
const ENCODING_STRING: u8 = 0x03;
const ENCODING_GUID: u8 = 0x04;
const ENCODING_OPAQUE: u8 = 0x05;
const ENCODING_MASK: u8 = 0x3F;
const FLAG_NAMESPACE_URI: u8 = 0x80;
const FLAG_SERVER_INDEX: u8 = 0x40;

/// Local part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(Cow<'static, str>),
    Guid(Guid),
    Opaque(ByteString),
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Identifier::Numeric(value)
    }
}

impl From<&'static str> for Identifier {
    fn from(value: &'static str) -> Self {
        Identifier::String(Cow::Borrowed(value))
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::String(Cow::Owned(value))
    }
}

impl From<Guid> for Identifier {
    fn from(value: Guid) -> Self {
        Identifier::Guid(value)
    }
}

impl From<ByteString> for Identifier {
    fn from(value: ByteString) -> Self {
        Identifier::Opaque(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(value) => write!(f, "i={value}"),
            Identifier::String(value) => write!(f, "s={value}"),
            Identifier::Guid(value) => write!(f, "g={value}"),
            Identifier::Opaque(value) => write!(f, "b={}", value.to_base64()),
        }
    }
}

/// Namespace-qualified node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// `ns=0;i=0`
    pub const NULL: NodeId = NodeId::numeric(0, 0);

    pub const fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    pub const fn string(namespace: u16, value: &'static str) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(Cow::Borrowed(value)),
        }
    }

    pub fn new(namespace: u16, identifier: impl Into<Identifier>) -> Self {
        Self {
            namespace,
            identifier: identifier.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        match &self.identifier {
            Identifier::Numeric(value) => self.namespace == 0 && *value == 0,
            Identifier::String(value) => self.namespace == 0 && value.is_empty(),
            Identifier::Guid(value) => self.namespace == 0 && value.is_null(),
            Identifier::Opaque(value) => self.namespace == 0 && value.is_null_or_empty(),
        }
    }

    pub fn as_numeric(&self) -> Option<u32> {
        match self.identifier {
            Identifier::Numeric(value) => Some(value),
            _ => None,
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self::numeric(0, value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        write!(f, "{}", self.identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeIdError(String);

impl fmt::Display for ParseNodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node id {:?}", self.0)
    }
}

impl std::error::Error for ParseNodeIdError {}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNodeIdError(s.to_string());
        let (namespace, rest) = match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, rest) = rest.split_once(';').ok_or_else(err)?;
                (ns.parse::<u16>().map_err(|_| err())?, rest)
            }
            None => (0, s),
        };
        let (kind, value) = rest.split_once('=').ok_or_else(err)?;
        let identifier = match kind {
            "i" => Identifier::Numeric(value.parse().map_err(|_| err())?),
            "s" => Identifier::String(Cow::Owned(value.to_string())),
            "g" => Identifier::Guid(value.parse().map_err(|_| err())?),
            "b" => Identifier::Opaque(ByteString::from_base64(value).map_err(|_| err())?),
            _ => return Err(err()),
        };
        Ok(Self {
            namespace,
            identifier,
        })
    }
}

impl_structural_eq_hash!(NodeId);

/// Write the NodeId body with `flags` OR-ed into the encoding byte.
fn encode_node_id(node_id: &NodeId, flags: u8, writer: &mut BinaryWriter) -> CodecResult<()> {
    let ns = node_id.namespace;
    match &node_id.identifier {
        Identifier::Numeric(value) if ns == 0 && *value <= 0xFF => {
            writer.write_u8(ENCODING_TWO_BYTE | flags);
            writer.write_u8(*value as u8);
        }
        Identifier::Numeric(value) if ns <= 0xFF && *value <= 0xFFFF => {
            writer.write_u8(ENCODING_FOUR_BYTE | flags);
            writer.write_u8(ns as u8);
            writer.write_u16(*value as u16);
        }
        Identifier::Numeric(value) => {
            writer.write_u8(ENCODING_NUMERIC | flags);
            writer.write_u16(ns);
            writer.write_u32(*value);
        }
        Identifier::String(value) => {
            writer.write_u8(ENCODING_STRING | flags);
            writer.write_u16(ns);
            writer.write_byte_block(Some(value.as_bytes()))?;
        }
        Identifier::Guid(value) => {
            writer.write_u8(ENCODING_GUID | flags);
            writer.write_u16(ns);
            value.encode(writer)?;
        }
        Identifier::Opaque(value) => {
            writer.write_u8(ENCODING_OPAQUE | flags);
            writer.write_u16(ns);
            value.encode(writer)?;
        }
    }
    Ok(())
}

/// Read a NodeId body, returning it with the flag bits of the encoding byte.
fn decode_node_id(reader: &mut BinaryReader<'_>) -> CodecResult<(NodeId, u8)> {
    let encoding = reader.read_u8()?;
    let flags = encoding & !ENCODING_MASK;
    let node_id = match encoding & ENCODING_MASK {
        ENCODING_TWO_BYTE => NodeId::numeric(0, u32::from(reader.read_u8()?)),
        ENCODING_FOUR_BYTE => {
            let ns = reader.read_u8()?;
            NodeId::numeric(u16::from(ns), u32::from(reader.read_u16()?))
        }
        ENCODING_NUMERIC => {
            let ns = reader.read_u16()?;
            NodeId::numeric(ns, reader.read_u32()?)
        }
        ENCODING_STRING => {
            let ns = reader.read_u16()?;
            NodeId::new(ns, read_string(reader)?.unwrap_or_default())
        }
        ENCODING_GUID => {
            let ns = reader.read_u16()?;
            NodeId::new(ns, Guid::decode(reader)?)
        }
        ENCODING_OPAQUE => {
            let ns = reader.read_u16()?;
            NodeId::new(ns, ByteString::decode(reader)?)
        }
        other => {
            return Err(CodecError::InvalidData(format!(
                "unknown NodeId encoding 0x{other:02X}"
            )))
        }
    };
    Ok((node_id, flags))
}

impl BinaryEncodable for NodeId {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        encode_node_id(self, 0, writer)
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let offset = reader.offset();
        let (node_id, flags) = decode_node_id(reader)?;
        if flags != 0 {
            return Err(CodecError::InvalidData(format!(
                "expanded NodeId flags 0x{flags:02X} at offset {offset} where a NodeId was expected"
            )));
        }
        Ok(node_id)
    }
}

impl XmlEncodable for NodeId {
    const XML_TYPE_NAME: &'static str = "NodeId";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text_element("Identifier", &self.to_string());
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        match XmlDecoder::child(node, "Identifier") {
            None => Ok(Self::NULL),
            Some(identifier) => XmlDecoder::text(identifier)
                .parse()
                .map_err(|e: ParseNodeIdError| CodecError::InvalidData(e.to_string())),
        }
    }
}

/// A [`NodeId`] that may name its namespace by URI and live on another
/// server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: Option<String>,
    pub server_index: u32,
}

impl ExpandedNodeId {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }

    pub fn is_local(&self) -> bool {
        self.server_index == 0
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self::new(node_id)
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace_uri {
            Some(uri) => write!(f, "nsu={uri};{}", self.node_id.identifier),
            None => write!(f, "{}", self.node_id),
        }
    }
}

impl FromStr for ExpandedNodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNodeIdError(s.to_string());
        let mut rest = s;
        let mut server_index = 0;
        if let Some(tail) = rest.strip_prefix("svr=") {
            let (index, tail) = tail.split_once(';').ok_or_else(err)?;
            server_index = index.parse().map_err(|_| err())?;
            rest = tail;
        }
        let mut namespace_uri = None;
        if let Some(tail) = rest.strip_prefix("nsu=") {
            // The URI may itself contain ';', so split at the last one.
            let (uri, tail) = tail.rsplit_once(';').ok_or_else(err)?;
            namespace_uri = Some(uri.to_string());
            rest = tail;
        }
        Ok(Self {
            node_id: rest.parse()?,
            namespace_uri,
            server_index,
        })
    }
}

impl_structural_eq_hash!(ExpandedNodeId);

impl BinaryEncodable for ExpandedNodeId {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        let mut flags = 0;
        if self.namespace_uri.is_some() {
            flags |= FLAG_NAMESPACE_URI;
        }
        if self.server_index != 0 {
            flags |= FLAG_SERVER_INDEX;
        }
        encode_node_id(&self.node_id, flags, writer)?;
        if let Some(uri) = &self.namespace_uri {
            writer.write_byte_block(Some(uri.as_bytes()))?;
        }
        if self.server_index != 0 {
            writer.write_u32(self.server_index);
        }
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let (node_id, flags) = decode_node_id(reader)?;
        let namespace_uri = if flags & FLAG_NAMESPACE_URI != 0 {
            read_string(reader)?
        } else {
            None
        };
        let server_index = if flags & FLAG_SERVER_INDEX != 0 {
            reader.read_u32()?
        } else {
            0
        };
        Ok(Self {
            node_id,
            namespace_uri,
            server_index,
        })
    }
}

impl XmlEncodable for ExpandedNodeId {
    const XML_TYPE_NAME: &'static str = "ExpandedNodeId";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text_element("Identifier", &self.to_string());
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        match XmlDecoder::child(node, "Identifier") {
            None => Ok(Self::default()),
            Some(identifier) => XmlDecoder::text(identifier)
                .parse()
                .map_err(|e: ParseNodeIdError| CodecError::InvalidData(e.to_string())),
        }
    }
}
