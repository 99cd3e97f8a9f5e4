// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::hash::{Hash, Hasher};

use roxmltree::Node;

use super::{DateTime, StatusCode};
use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecResult, XmlDecoder, XmlEncodable, XmlWriter,
};
use crate::structure::Structural;
use crate::variant::Variant;

const VALUE: u8 = 0x01;
const STATUS: u8 = 0x02;
const SOURCE_TIMESTAMP: u8 = 0x04;
const SERVER_TIMESTAMP: u8 = 0x08;
const SOURCE_PICOSECONDS: u8 = 0x10;
const SERVER_PICOSECONDS: u8 = 0x20;

/// A value with its quality and timestamps. An empty [`Variant`] means the
/// value is absent.
#[derive(Debug, Clone, Default)]
pub struct DataValue {
    pub value: Variant,
    pub status: Option<StatusCode>,
    pub source_timestamp: Option<DateTime>,
    pub source_picoseconds: Option<u16>,
    pub server_timestamp: Option<DateTime>,
    pub server_picoseconds: Option<u16>,
}

impl DataValue {
    pub fn new(value: impl Into<Variant>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Status of the value; absent means Good.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::GOOD)
    }

    fn encoding_mask(&self) -> u8 {
        let mut mask = 0;
        if !self.value.is_empty() {
            mask |= VALUE;
        }
        if self.status.is_some() {
            mask |= STATUS;
        }
        if self.source_timestamp.is_some() {
            mask |= SOURCE_TIMESTAMP;
        }
        if self.server_timestamp.is_some() {
            mask |= SERVER_TIMESTAMP;
        }
        if self.source_picoseconds.is_some() {
            mask |= SOURCE_PICOSECONDS;
        }
        if self.server_picoseconds.is_some() {
            mask |= SERVER_PICOSECONDS;
        }
        mask
    }
}

impl Structural for DataValue {
    fn structural_eq(&self, other: &Self) -> bool {
        self.value.structural_eq(&other.value)
            && self.status == other.status
            && self.source_timestamp == other.source_timestamp
            && self.source_picoseconds == other.source_picoseconds
            && self.server_timestamp == other.server_timestamp
            && self.server_picoseconds == other.server_picoseconds
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        self.value.structural_hash(state);
        self.status.structural_hash(state);
        self.source_timestamp.structural_hash(state);
        self.source_picoseconds.structural_hash(state);
        self.server_timestamp.structural_hash(state);
        self.server_picoseconds.structural_hash(state);
    }
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for DataValue {}

impl Hash for DataValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

impl BinaryEncodable for DataValue {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_u8(self.encoding_mask());
        if !self.value.is_empty() {
            self.value.encode(writer)?;
        }
        if let Some(status) = &self.status {
            status.encode(writer)?;
        }
        if let Some(ts) = &self.source_timestamp {
            ts.encode(writer)?;
        }
        if let Some(pico) = self.source_picoseconds {
            writer.write_u16(pico);
        }
        if let Some(ts) = &self.server_timestamp {
            ts.encode(writer)?;
        }
        if let Some(pico) = self.server_picoseconds {
            writer.write_u16(pico);
        }
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.nested(|reader| {
            let mask = reader.read_u8()?;
            let mut out = DataValue::default();
            if mask & VALUE != 0 {
                out.value = Variant::decode(reader)?;
            }
            if mask & STATUS != 0 {
                out.status = Some(StatusCode::decode(reader)?);
            }
            if mask & SOURCE_TIMESTAMP != 0 {
                out.source_timestamp = Some(DateTime::decode(reader)?);
            }
            if mask & SOURCE_PICOSECONDS != 0 {
                out.source_picoseconds = Some(reader.read_u16()?);
            }
            if mask & SERVER_TIMESTAMP != 0 {
                out.server_timestamp = Some(DateTime::decode(reader)?);
            }
            if mask & SERVER_PICOSECONDS != 0 {
                out.server_picoseconds = Some(reader.read_u16()?);
            }
            Ok(out)
        })
    }
}

impl XmlEncodable for DataValue {
    const XML_TYPE_NAME: &'static str = "DataValue";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.field("Value", &self.value)?;
        writer.field("StatusCode", &self.status)?;
        writer.field("SourceTimestamp", &self.source_timestamp)?;
        writer.field("SourcePicoseconds", &self.source_picoseconds)?;
        writer.field("ServerTimestamp", &self.server_timestamp)?;
        writer.field("ServerPicoseconds", &self.server_picoseconds)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.nested(|decoder| {
            Ok(Self {
                value: decoder.field(node, "Value")?,
                status: decoder.field(node, "StatusCode")?,
                source_timestamp: decoder.field(node, "SourceTimestamp")?,
                source_picoseconds: decoder.field(node, "SourcePicoseconds")?,
                server_timestamp: decoder.field(node, "ServerTimestamp")?,
                server_picoseconds: decoder.field(node, "ServerPicoseconds")?,
            })
        })
    }
}
