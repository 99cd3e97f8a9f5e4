// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;
use std::str::FromStr;

use roxmltree::Node;

use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

/// 16-byte GUID with the mixed-endian UA layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const NULL: Guid = Guid {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGuidError(String);

impl fmt::Display for ParseGuidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GUID {:?}", self.0)
    }
}

impl std::error::Error for ParseGuidError {}

impl FromStr for Guid {
    type Err = ParseGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGuidError(s.to_string());
        let trimmed = s.trim().trim_start_matches('{').trim_end_matches('}');
        let parts: Vec<&str> = trimmed.split('-').collect();
        let [p1, p2, p3, p4, p5] = parts.as_slice() else {
            return Err(err());
        };
        if p1.len() != 8 || p2.len() != 4 || p3.len() != 4 || p4.len() != 4 || p5.len() != 12 {
            return Err(err());
        }
        let data1 = u32::from_str_radix(p1, 16).map_err(|_| err())?;
        let data2 = u16::from_str_radix(p2, 16).map_err(|_| err())?;
        let data3 = u16::from_str_radix(p3, 16).map_err(|_| err())?;
        let tail = format!("{p4}{p5}");
        let mut data4 = [0u8; 8];
        for (i, byte) in data4.iter_mut().enumerate() {
            let pair = tail.get(i * 2..i * 2 + 2).ok_or_else(err)?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| err())?;
        }
        Ok(Self::new(data1, data2, data3, data4))
    }
}

impl_structural_eq_hash!(Guid);

impl BinaryEncodable for Guid {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_u32(self.data1);
        writer.write_u16(self.data2);
        writer.write_u16(self.data3);
        writer.write_bytes(&self.data4);
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let data1 = reader.read_u32()?;
        let data2 = reader.read_u16()?;
        let data3 = reader.read_u16()?;
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(reader.read_bytes(8)?);
        Ok(Self::new(data1, data2, data3, data4))
    }
}

impl XmlEncodable for Guid {
    const XML_TYPE_NAME: &'static str = "Guid";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text_element("String", &self.to_string());
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        let Some(text) = XmlDecoder::child(node, "String") else {
            return Ok(Self::NULL);
        };
        XmlDecoder::text(text)
            .parse()
            .map_err(|e: ParseGuidError| CodecError::InvalidData(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_binary;

    const SAMPLE: Guid = Guid::new(
        0x7296_2B91,
        0xFA75,
        0x4AE6,
        [0x8D, 0x28, 0xB4, 0x04, 0xDC, 0x7D, 0xAF, 0x63],
    );

    #[test]
    fn text_form_roundtrip() {
        let text = SAMPLE.to_string();
        assert_eq!(text, "72962B91-FA75-4AE6-8D28-B404DC7DAF63");
        assert_eq!(text.parse::<Guid>().unwrap(), SAMPLE);
        assert_eq!(
            "{72962b91-fa75-4ae6-8d28-b404dc7daf63}".parse::<Guid>().unwrap(),
            SAMPLE
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert!("72962B91-FA75-4AE6-8D28".parse::<Guid>().is_err());
        assert!("Z2962B91-FA75-4AE6-8D28-B404DC7DAF63".parse::<Guid>().is_err());
    }

    #[test]
    fn binary_layout_is_mixed_endian() {
        let bytes = encode_binary(&SAMPLE).unwrap();
        assert_eq!(
            bytes,
            [
                0x91, 0x2B, 0x96, 0x72, 0x75, 0xFA, 0xE6, 0x4A, 0x8D, 0x28, 0xB4, 0x04, 0xDC, 0x7D,
                0xAF, 0x63
            ]
        );
    }
}
