// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use roxmltree::Node;

use crate::codec::{
    read_string, BinaryEncodable, BinaryReader, BinaryWriter, CodecResult, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

const LOCALE_PRESENT: u8 = 0x01;
const TEXT_PRESENT: u8 = 0x02;

/// Name qualified by a namespace index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

impl_structural_eq_hash!(QualifiedName);

impl BinaryEncodable for QualifiedName {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_u16(self.namespace_index);
        self.name.encode(writer)
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            namespace_index: reader.read_u16()?,
            name: String::decode(reader)?,
        })
    }
}

impl XmlEncodable for QualifiedName {
    const XML_TYPE_NAME: &'static str = "QualifiedName";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.field("NamespaceIndex", &self.namespace_index)?;
        writer.field("Name", &self.name)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        Ok(Self {
            namespace_index: decoder.field(node, "NamespaceIndex")?,
            name: decoder.field(node, "Name")?,
        })
    }
}

/// Human-readable text with an optional locale. Either part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub locale: Option<String>,
    pub text: Option<String>,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: Some(text.into()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: Some(text.into()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.locale.is_none() && self.text.is_none()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().unwrap_or(""))
    }
}

impl_structural_eq_hash!(LocalizedText);

impl BinaryEncodable for LocalizedText {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        let mut mask = 0;
        if self.locale.is_some() {
            mask |= LOCALE_PRESENT;
        }
        if self.text.is_some() {
            mask |= TEXT_PRESENT;
        }
        writer.write_u8(mask);
        if let Some(locale) = &self.locale {
            locale.encode(writer)?;
        }
        if let Some(text) = &self.text {
            text.encode(writer)?;
        }
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let mask = reader.read_u8()?;
        let locale = if mask & LOCALE_PRESENT != 0 {
            Some(read_string(reader)?.unwrap_or_default())
        } else {
            None
        };
        let text = if mask & TEXT_PRESENT != 0 {
            Some(read_string(reader)?.unwrap_or_default())
        } else {
            None
        };
        Ok(Self { locale, text })
    }
}

impl XmlEncodable for LocalizedText {
    const XML_TYPE_NAME: &'static str = "LocalizedText";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.field("Locale", &self.locale)?;
        writer.field("Text", &self.text)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        Ok(Self {
            locale: decoder.field(node, "Locale")?,
            text: decoder.field(node, "Text")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_binary, decode_xml, encode_binary, encode_xml};
    use crate::config::DecodingLimits;

    #[test]
    fn localized_text_mask_tracks_presence() {
        assert_eq!(encode_binary(&LocalizedText::default()).unwrap(), [0x00]);
        let text_only = LocalizedText::text("Pump");
        let bytes = encode_binary(&text_only).unwrap();
        assert_eq!(bytes[0], TEXT_PRESENT);
        let decoded: LocalizedText = decode_binary(&bytes, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, text_only);
    }

    #[test]
    fn qualified_name_xml() {
        let name = QualifiedName::new(2, "Default Binary");
        let xml = encode_xml(&name).unwrap();
        assert!(xml.contains("<NamespaceIndex>2</NamespaceIndex><Name>Default Binary</Name>"));
        let decoded: QualifiedName = decode_xml(&xml, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, name);
        assert_eq!(decoded.to_string(), "2:Default Binary");
    }
}
