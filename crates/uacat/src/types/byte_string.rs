// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use roxmltree::Node;

use crate::codec::{
    read_string, BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, LengthKind,
    XmlDecoder, XmlEncodable, XmlWriter,
};
use crate::structure::impl_structural_eq_hash;

/// Nullable octet sequence. `ByteString::null()` and an empty byte string
/// are distinct values.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString(Option<Vec<u8>>);

impl ByteString {
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_null_or_empty(&self) -> bool {
        self.0.as_ref().map_or(true, Vec::is_empty)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> Option<Vec<u8>> {
        self.0
    }

    pub fn to_base64(&self) -> String {
        self.0.as_deref().map(|b| STANDARD.encode(b)).unwrap_or_default()
    }

    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD.decode(compact).map(|bytes| Self(Some(bytes)))
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("ByteString(null)"),
            Some(bytes) => write!(f, "ByteString({} bytes)", bytes.len()),
        }
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Some(bytes))
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(Some(bytes.to_vec()))
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(bytes: &[u8; N]) -> Self {
        Self(Some(bytes.to_vec()))
    }
}

impl From<Option<Vec<u8>>> for ByteString {
    fn from(bytes: Option<Vec<u8>>) -> Self {
        Self(bytes)
    }
}

impl_structural_eq_hash!(ByteString);

impl BinaryEncodable for ByteString {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_byte_block(self.as_bytes())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Ok(Self(
            reader
                .read_byte_block(LengthKind::ByteString)?
                .map(<[u8]>::to_vec),
        ))
    }
}

impl XmlEncodable for ByteString {
    const XML_TYPE_NAME: &'static str = "ByteString";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text(&self.to_base64());
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        let value = Self::from_base64(node.text().unwrap_or(""))
            .map_err(|e| CodecError::InvalidData(format!("invalid base64: {e}")))?;
        if value.len() > decoder.limits().max_byte_string_length {
            return Err(CodecError::LimitExceeded {
                what: "byte string length",
                actual: value.len(),
                limit: decoder.limits().max_byte_string_length,
            });
        }
        Ok(value)
    }

    fn xml_is_null(&self) -> bool {
        self.is_null()
    }
}

/// XML fragment carried as text. Binary form is a UTF-8 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XmlElement(Option<String>);

impl XmlElement {
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn new(markup: impl Into<String>) -> Self {
        Self(Some(markup.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl_structural_eq_hash!(XmlElement);

impl BinaryEncodable for XmlElement {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_byte_block(self.0.as_deref().map(str::as_bytes))
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        read_string(reader).map(Self)
    }
}

/// The markup is written verbatim and read back as the exact source text of
/// the element's children.
impl XmlEncodable for XmlElement {
    const XML_TYPE_NAME: &'static str = "XmlElement";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        if let Some(markup) = &self.0 {
            writer.raw(markup);
        }
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        Ok(Self::new(XmlDecoder::inner_source_text(node)))
    }

    fn xml_is_null(&self) -> bool {
        self.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_binary, decode_xml, encode_binary, encode_xml};
    use crate::config::DecodingLimits;

    #[test]
    fn null_and_empty_survive_binary() {
        let limits = DecodingLimits::default();
        for value in [ByteString::null(), ByteString::from(Vec::new()), ByteString::from(b"abc")] {
            let bytes = encode_binary(&value).unwrap();
            assert_eq!(decode_binary::<ByteString>(&bytes, &limits).unwrap(), value);
        }
    }

    #[test]
    fn base64_in_xml() {
        let value = ByteString::from(b"\x00\x01binary");
        let xml = encode_xml(&value).unwrap();
        assert!(xml.contains("AAFiaW5hcnk="));
        let decoded: ByteString = decode_xml(&xml, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn xml_element_keeps_markup() {
        let value = XmlElement::new("<Note lang=\"en\">hi</Note>");
        let xml = encode_xml(&value).unwrap();
        let decoded: XmlElement = decode_xml(&xml, &DecodingLimits::default()).unwrap();
        assert_eq!(decoded, value);
    }
}
