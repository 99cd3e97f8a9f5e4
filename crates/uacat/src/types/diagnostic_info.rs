// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use roxmltree::Node;

use super::StatusCode;
use crate::codec::{
    read_string, BinaryEncodable, BinaryReader, BinaryWriter, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

const SYMBOLIC_ID: u8 = 0x01;
const NAMESPACE_URI: u8 = 0x02;
const LOCALIZED_TEXT: u8 = 0x04;
const LOCALE: u8 = 0x08;
const ADDITIONAL_INFO: u8 = 0x10;
const INNER_STATUS_CODE: u8 = 0x20;
const INNER_DIAGNOSTIC_INFO: u8 = 0x40;

/// Vendor diagnostics attached to a result. The integer fields index into
/// the response's string table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub locale: Option<i32>,
    pub localized_text: Option<i32>,
    pub additional_info: Option<String>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    pub fn is_empty(&self) -> bool {
        self.encoding_mask() == 0
    }

    fn encoding_mask(&self) -> u8 {
        let mut mask = 0;
        if self.symbolic_id.is_some() {
            mask |= SYMBOLIC_ID;
        }
        if self.namespace_uri.is_some() {
            mask |= NAMESPACE_URI;
        }
        if self.localized_text.is_some() {
            mask |= LOCALIZED_TEXT;
        }
        if self.locale.is_some() {
            mask |= LOCALE;
        }
        if self.additional_info.is_some() {
            mask |= ADDITIONAL_INFO;
        }
        if self.inner_status_code.is_some() {
            mask |= INNER_STATUS_CODE;
        }
        if self.inner_diagnostic_info.is_some() {
            mask |= INNER_DIAGNOSTIC_INFO;
        }
        mask
    }
}

impl_structural_eq_hash!(DiagnosticInfo);

impl BinaryEncodable for DiagnosticInfo {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_u8(self.encoding_mask());
        if let Some(value) = self.symbolic_id {
            writer.write_i32(value);
        }
        if let Some(value) = self.namespace_uri {
            writer.write_i32(value);
        }
        if let Some(value) = self.locale {
            writer.write_i32(value);
        }
        if let Some(value) = self.localized_text {
            writer.write_i32(value);
        }
        if let Some(value) = &self.additional_info {
            value.encode(writer)?;
        }
        if let Some(value) = &self.inner_status_code {
            value.encode(writer)?;
        }
        if let Some(value) = &self.inner_diagnostic_info {
            value.encode(writer)?;
        }
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.nested(|reader| {
            let mask = reader.read_u8()?;
            let mut out = DiagnosticInfo::default();
            if mask & SYMBOLIC_ID != 0 {
                out.symbolic_id = Some(reader.read_i32()?);
            }
            if mask & NAMESPACE_URI != 0 {
                out.namespace_uri = Some(reader.read_i32()?);
            }
            if mask & LOCALE != 0 {
                out.locale = Some(reader.read_i32()?);
            }
            if mask & LOCALIZED_TEXT != 0 {
                out.localized_text = Some(reader.read_i32()?);
            }
            if mask & ADDITIONAL_INFO != 0 {
                out.additional_info = Some(read_string(reader)?.unwrap_or_default());
            }
            if mask & INNER_STATUS_CODE != 0 {
                out.inner_status_code = Some(StatusCode::decode(reader)?);
            }
            if mask & INNER_DIAGNOSTIC_INFO != 0 {
                out.inner_diagnostic_info = Some(Box::new(DiagnosticInfo::decode(reader)?));
            }
            Ok(out)
        })
    }
}

impl XmlEncodable for DiagnosticInfo {
    const XML_TYPE_NAME: &'static str = "DiagnosticInfo";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.field("SymbolicId", &self.symbolic_id)?;
        writer.field("NamespaceUri", &self.namespace_uri)?;
        writer.field("Locale", &self.locale)?;
        writer.field("LocalizedText", &self.localized_text)?;
        writer.field("AdditionalInfo", &self.additional_info)?;
        writer.field("InnerStatusCode", &self.inner_status_code)?;
        writer.field("InnerDiagnosticInfo", &self.inner_diagnostic_info)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.nested(|decoder| {
            Ok(Self {
                symbolic_id: decoder.field(node, "SymbolicId")?,
                namespace_uri: decoder.field(node, "NamespaceUri")?,
                locale: decoder.field(node, "Locale")?,
                localized_text: decoder.field(node, "LocalizedText")?,
                additional_info: decoder.field(node, "AdditionalInfo")?,
                inner_status_code: decoder.field(node, "InnerStatusCode")?,
                inner_diagnostic_info: decoder.field(node, "InnerDiagnosticInfo")?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_binary, encode_binary, CodecError};
    use crate::config::DecodingLimits;

    #[test]
    fn locale_precedes_localized_text_on_the_wire() {
        let info = DiagnosticInfo {
            locale: Some(7),
            localized_text: Some(9),
            ..DiagnosticInfo::default()
        };
        let bytes = encode_binary(&info).unwrap();
        assert_eq!(bytes[0], LOCALE | LOCALIZED_TEXT);
        assert_eq!(&bytes[1..5], &7i32.to_le_bytes());
        assert_eq!(&bytes[5..9], &9i32.to_le_bytes());
        let decoded: DiagnosticInfo = decode_binary(&bytes, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn deep_inner_chain_hits_depth_limit() {
        let mut info = DiagnosticInfo::default();
        for _ in 0..10 {
            info = DiagnosticInfo {
                inner_diagnostic_info: Some(Box::new(info)),
                ..DiagnosticInfo::default()
            };
        }
        let bytes = encode_binary(&info).unwrap();
        let limits = DecodingLimits {
            max_nesting_depth: 5,
            ..DecodingLimits::default()
        };
        let err = decode_binary::<DiagnosticInfo>(&bytes, &limits).unwrap_err();
        assert!(matches!(err, CodecError::DepthExceeded { limit: 5 }));
        assert!(decode_binary::<DiagnosticInfo>(&bytes, &DecodingLimits::default()).is_ok());
    }
}
