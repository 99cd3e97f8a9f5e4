// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use roxmltree::Node;

use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecResult, XmlDecoder, XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

/// 32-bit operation result. The top two bits carry the severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);
    pub const UNCERTAIN: StatusCode = StatusCode(0x4000_0000);
    pub const BAD: StatusCode = StatusCode(0x8000_0000);
    pub const BAD_UNEXPECTED_ERROR: StatusCode = StatusCode(0x8001_0000);
    pub const BAD_DECODING_ERROR: StatusCode = StatusCode(0x8007_0000);
    pub const BAD_ENCODING_LIMITS_EXCEEDED: StatusCode = StatusCode(0x8008_0000);
    pub const BAD_DATA_TYPE_ID_UNKNOWN: StatusCode = StatusCode(0x8011_0000);
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    pub const BAD_TYPE_MISMATCH: StatusCode = StatusCode(0x8074_0000);

    const SEVERITY_MASK: u32 = 0xC000_0000;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_good(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0
    }

    pub const fn is_uncertain(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0x4000_0000
    }

    pub const fn is_bad(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<u32> for StatusCode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl_structural_eq_hash!(StatusCode);

impl BinaryEncodable for StatusCode {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_u32(self.0);
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.read_u32().map(Self)
    }
}

impl XmlEncodable for StatusCode {
    const XML_TYPE_NAME: &'static str = "StatusCode";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text_element("Code", &self.0.to_string());
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.field::<u32>(node, "Code").map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bits() {
        assert!(StatusCode::GOOD.is_good());
        assert!(StatusCode::UNCERTAIN.is_uncertain());
        assert!(StatusCode::BAD_DECODING_ERROR.is_bad());
        assert!(!StatusCode::BAD_DECODING_ERROR.is_good());
        assert_eq!(StatusCode::BAD_TYPE_MISMATCH.to_string(), "0x80740000");
    }
}
