// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary and XML codecs for numbers, booleans, strings and containers.

use roxmltree::Node;

use super::binary::LengthKind;
use super::{BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult};
use super::{XmlDecoder, XmlEncodable, XmlWriter};

macro_rules! impl_number {
    ($type:ty, $xml:literal, $write:ident, $read:ident) => {
        impl BinaryEncodable for $type {
            fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
                writer.$write(*self);
                Ok(())
            }

            fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
                reader.$read()
            }
        }

        impl XmlEncodable for $type {
            const XML_TYPE_NAME: &'static str = $xml;

            fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
                writer.text(&self.to_string());
                Ok(())
            }

            fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
                XmlDecoder::parse_text(node, $xml)
            }
        }
    };
}

impl_number!(i8, "SByte", write_i8, read_i8);
impl_number!(u8, "Byte", write_u8, read_u8);
impl_number!(i16, "Int16", write_i16, read_i16);
impl_number!(u16, "UInt16", write_u16, read_u16);
impl_number!(i32, "Int32", write_i32, read_i32);
impl_number!(u32, "UInt32", write_u32, read_u32);
impl_number!(i64, "Int64", write_i64, read_i64);
impl_number!(u64, "UInt64", write_u64, read_u64);

macro_rules! impl_float {
    ($type:ty, $xml:literal, $write:ident, $read:ident) => {
        impl BinaryEncodable for $type {
            fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
                writer.$write(*self);
                Ok(())
            }

            fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
                reader.$read()
            }
        }

        impl XmlEncodable for $type {
            const XML_TYPE_NAME: &'static str = $xml;

            fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
                if self.is_nan() {
                    writer.text("NaN");
                } else if self.is_infinite() {
                    writer.text(if self.is_sign_positive() { "INF" } else { "-INF" });
                } else {
                    writer.text(&self.to_string());
                }
                Ok(())
            }

            fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
                XmlDecoder::parse_text(node, $xml)
            }
        }
    };
}

impl_float!(f32, "Float", write_f32, read_f32);
impl_float!(f64, "Double", write_f64, read_f64);

impl BinaryEncodable for bool {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_bool(*self);
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.read_bool()
    }
}

impl XmlEncodable for bool {
    const XML_TYPE_NAME: &'static str = "Boolean";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text(if *self { "true" } else { "false" });
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, _decoder: &mut XmlDecoder) -> CodecResult<Self> {
        match XmlDecoder::text(node) {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(CodecError::InvalidData(format!("invalid Boolean {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

pub(crate) fn read_string(reader: &mut BinaryReader<'_>) -> CodecResult<Option<String>> {
    let offset = reader.offset();
    match reader.read_byte_block(LengthKind::String)? {
        None => Ok(None),
        Some(bytes) => std::str::from_utf8(bytes)
            .map(|s| Some(s.to_owned()))
            .map_err(|_| CodecError::InvalidUtf8 { offset }),
    }
}

/// A non-null string; a null string on the wire decodes as empty.
impl BinaryEncodable for String {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_byte_block(Some(self.as_bytes()))
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Ok(read_string(reader)?.unwrap_or_default())
    }
}

/// A nullable string: `None` is the `-1` length marker.
impl BinaryEncodable for Option<String> {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_byte_block(self.as_deref().map(str::as_bytes))
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        read_string(reader)
    }
}

impl XmlEncodable for String {
    const XML_TYPE_NAME: &'static str = "String";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.text(self);
        Ok(())
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        let text: String = node
            .children()
            .filter(Node::is_text)
            .filter_map(|child| child.text())
            .collect();
        if text.len() > decoder.limits().max_string_length {
            return Err(CodecError::LimitExceeded {
                what: "string length",
                actual: text.len(),
                limit: decoder.limits().max_string_length,
            });
        }
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// A non-null array; a null array on the wire decodes as empty.
impl<T: BinaryEncodable> BinaryEncodable for Vec<T> {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        writer.write_length(Some(self.len()))?;
        for element in self {
            element.encode(writer)?;
        }
        Ok(())
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        Ok(Option::<Vec<T>>::decode(reader)?.unwrap_or_default())
    }
}

/// A nullable array: `None` and `Some(vec![])` stay distinct.
impl<T: BinaryEncodable> BinaryEncodable for Option<Vec<T>> {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        match self {
            None => writer.write_length(None),
            Some(elements) => elements.encode(writer),
        }
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let Some(len) = reader.read_length(LengthKind::Array)? else {
            return Ok(None);
        };
        // Never trust the prefix for the allocation size.
        let mut elements = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            elements.push(T::decode(reader)?);
        }
        Ok(Some(elements))
    }
}

impl<T: BinaryEncodable> BinaryEncodable for Box<T> {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        (**self).encode(writer)
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        T::decode(reader).map(Box::new)
    }
}

impl<T: XmlEncodable + Default> XmlEncodable for Vec<T> {
    const XML_TYPE_NAME: &'static str = "ListOf";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        writer.list(self)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.list(node)
    }
}

impl<T: XmlEncodable> XmlEncodable for Option<T> {
    const XML_TYPE_NAME: &'static str = T::XML_TYPE_NAME;

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        match self {
            Some(value) => value.encode_xml(writer),
            None => Ok(()),
        }
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        T::decode_xml(node, decoder).map(Some)
    }

    fn xml_is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: XmlEncodable> XmlEncodable for Box<T> {
    const XML_TYPE_NAME: &'static str = T::XML_TYPE_NAME;

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        (**self).encode_xml(writer)
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        T::decode_xml(node, decoder).map(Box::new)
    }

    fn xml_is_null(&self) -> bool {
        (**self).xml_is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_binary, decode_xml, encode_binary, encode_xml_named};
    use crate::config::DecodingLimits;

    #[test]
    fn null_string_and_empty_string_are_distinct() {
        let null: Option<String> = None;
        let empty: Option<String> = Some(String::new());
        assert_eq!(encode_binary(&null).unwrap(), (-1i32).to_le_bytes());
        assert_eq!(encode_binary(&empty).unwrap(), 0i32.to_le_bytes());

        let limits = DecodingLimits::default();
        let bytes = encode_binary(&empty).unwrap();
        assert_eq!(decode_binary::<Option<String>>(&bytes, &limits).unwrap(), empty);
        let bytes = encode_binary(&null).unwrap();
        assert_eq!(decode_binary::<Option<String>>(&bytes, &limits).unwrap(), null);
        assert_eq!(decode_binary::<String>(&bytes, &limits).unwrap(), "");
    }

    #[test]
    fn null_array_and_empty_array_are_distinct() {
        let limits = DecodingLimits::default();
        let null: Option<Vec<u32>> = None;
        let empty: Option<Vec<u32>> = Some(Vec::new());
        let full: Option<Vec<u32>> = Some(vec![1, 2, 3]);
        for value in [null, empty, full] {
            let bytes = encode_binary(&value).unwrap();
            assert_eq!(decode_binary::<Option<Vec<u32>>>(&bytes, &limits).unwrap(), value);
        }
    }

    #[test]
    fn invalid_utf8_is_reported_with_offset() {
        let mut bytes = 2i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0xC3, 0x28]);
        let err = decode_binary::<String>(&bytes, &DecodingLimits::default()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8 { offset: 0 }));
    }

    #[test]
    fn float_special_values_in_xml() {
        let limits = DecodingLimits::default();
        let xml = encode_xml_named(&f64::INFINITY, "Double").unwrap();
        assert!(xml.contains(">INF<"));
        assert_eq!(decode_xml::<f64>(&xml, &limits).unwrap(), f64::INFINITY);

        let xml = encode_xml_named(&f32::NAN, "Float").unwrap();
        assert!(decode_xml::<f32>(&xml, &limits).unwrap().is_nan());
    }

    #[test]
    fn xml_list_of_strings() {
        let limits = DecodingLimits::default();
        let value = vec!["a".to_string(), String::new(), "c&d".to_string()];
        let xml = encode_xml_named(&value, "ListOfString").unwrap();
        assert!(xml.contains("<String>c&amp;d</String>"));
        assert_eq!(decode_xml::<Vec<String>>(&xml, &limits).unwrap(), value);
    }

    #[test]
    fn xml_string_spans_comments_and_cdata() {
        let limits = DecodingLimits::default();
        let xml = "<String>left<!-- note --> and <![CDATA[<right>]]></String>";
        assert_eq!(decode_xml::<String>(xml, &limits).unwrap(), "left and <right>");
    }
}
