// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant wire forms.
//!
//! Binary: a mask byte (bits 0-5 type id, `0x80` array, `0x40` dimensions)
//! followed by the value, the elements, and the `Int32` dimensions.
//!
//! XML: the enclosing element holds `<Int32>5</Int32>`, `<ListOfInt32>..`
//! or `<Matrix><Dimensions>..</Dimensions><Elements><ListOfInt32>..`
//! `</ListOfInt32></Elements></Matrix>`. An empty variant has no content.

use roxmltree::Node;

use super::{ArrayValue, Scalar, Variant, VariantError};
use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecError, CodecResult, LengthKind, XmlDecoder,
    XmlEncodable, XmlWriter,
};
use crate::types::BuiltinType;

const TYPE_MASK: u8 = 0x3F;
const DIMENSIONS_FLAG: u8 = 0x40;
const ARRAY_FLAG: u8 = 0x80;

const LIST_PREFIX: &str = "ListOf";

impl BinaryEncodable for Variant {
    fn encode(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        match self {
            Variant::Empty => {
                writer.write_u8(0);
                Ok(())
            }
            Variant::Scalar(value) => {
                self.validate()?;
                writer.write_u8(value.type_tag().id());
                value.encode_value(writer)
            }
            Variant::Array(array) => {
                let mut mask = array.type_tag().id() | ARRAY_FLAG;
                if array.is_matrix() {
                    mask |= DIMENSIONS_FLAG;
                }
                writer.write_u8(mask);
                writer.write_length(Some(array.len()))?;
                for element in array.elements() {
                    element.encode_value(writer)?;
                }
                if let Some(dimensions) = array.dimensions() {
                    writer.write_length(Some(dimensions.len()))?;
                    for &dim in dimensions {
                        let dim = i32::try_from(dim).map_err(|_| {
                            CodecError::InvalidData(format!("dimension {dim} exceeds Int32"))
                        })?;
                        writer.write_i32(dim);
                    }
                }
                Ok(())
            }
        }
    }

    fn decode(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        reader.nested(|reader| {
            let mask = reader.read_u8()?;
            let type_id = mask & TYPE_MASK;
            if type_id == 0 {
                return Ok(Variant::Empty);
            }
            let tag =
                BuiltinType::from_id(type_id).ok_or(CodecError::UnknownBuiltinType(type_id))?;

            if mask & ARRAY_FLAG == 0 {
                if tag == BuiltinType::Variant {
                    return Err(VariantError::NestedScalarVariant.into());
                }
                return Scalar::decode_value(tag, reader).map(Variant::Scalar);
            }

            // A variant array has no null state; a null length reads as empty.
            let len = reader.read_length(LengthKind::Array)?.unwrap_or(0);
            let mut elements = Vec::with_capacity(len.min(reader.remaining()));
            for _ in 0..len {
                elements.push(Scalar::decode_value(tag, reader)?);
            }

            if mask & DIMENSIONS_FLAG == 0 {
                return Ok(Variant::Array(ArrayValue::from_homogeneous(tag, elements)));
            }
            let dimensions = read_dimensions(reader)?;
            // A single dimension is just the array length.
            if dimensions.len() == 1 && dimensions[0] as usize == elements.len() {
                return Ok(Variant::Array(ArrayValue::from_homogeneous(tag, elements)));
            }
            Ok(Variant::Array(ArrayValue::matrix(tag, elements, dimensions)?))
        })
    }
}

fn read_dimensions(reader: &mut BinaryReader<'_>) -> CodecResult<Vec<u32>> {
    let count = reader.read_length(LengthKind::Array)?.unwrap_or(0);
    let mut dimensions = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        let offset = reader.offset();
        let dim = reader.read_i32()?;
        let dim = u32::try_from(dim).map_err(|_| {
            CodecError::InvalidData(format!("negative matrix dimension {dim} at offset {offset}"))
        })?;
        dimensions.push(dim);
    }
    Ok(dimensions)
}

impl XmlEncodable for Variant {
    const XML_TYPE_NAME: &'static str = "Variant";

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        match self {
            Variant::Empty => Ok(()),
            Variant::Scalar(value) => {
                self.validate()?;
                let name = value.type_tag().xml_name();
                writer.start(name);
                value.encode_xml_content(writer)?;
                writer.end(name);
                Ok(())
            }
            Variant::Array(array) => match array.dimensions() {
                None => write_list(writer, array),
                Some(dimensions) => {
                    writer.start("Matrix");
                    writer.start("Dimensions");
                    for dim in dimensions {
                        writer.text_element("Int32", &dim.to_string());
                    }
                    writer.end("Dimensions");
                    writer.start("Elements");
                    write_list(writer, array)?;
                    writer.end("Elements");
                    writer.end("Matrix");
                    Ok(())
                }
            },
        }
    }

    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self> {
        decoder.nested(|decoder| {
            let Some(content) = XmlDecoder::first_element(node) else {
                return Ok(Variant::Empty);
            };
            let name = content.tag_name().name();
            if name == "Matrix" {
                return decode_matrix(content, decoder);
            }
            if let Some(type_name) = name.strip_prefix(LIST_PREFIX) {
                let (tag, elements) = decode_list(content, type_name, decoder)?;
                return Ok(Variant::Array(ArrayValue::from_homogeneous(tag, elements)));
            }
            let tag = BuiltinType::from_xml_name(name)
                .ok_or_else(|| CodecError::UnknownXmlType(name.to_string()))?;
            if tag == BuiltinType::Variant {
                return Err(VariantError::NestedScalarVariant.into());
            }
            Scalar::decode_xml_element(tag, content, decoder).map(Variant::Scalar)
        })
    }
}

fn write_list(writer: &mut XmlWriter, array: &ArrayValue) -> CodecResult<()> {
    let element_name = array.type_tag().xml_name();
    let list_name = format!("{LIST_PREFIX}{element_name}");
    writer.start(&list_name);
    for element in array.elements() {
        if element.xml_is_null() {
            writer.nil(element_name);
        } else {
            writer.start(element_name);
            element.encode_xml_content(writer)?;
            writer.end(element_name);
        }
    }
    writer.end(&list_name);
    Ok(())
}

fn decode_list(
    list: Node<'_, '_>,
    type_name: &str,
    decoder: &mut XmlDecoder,
) -> CodecResult<(BuiltinType, Vec<Scalar>)> {
    let tag = BuiltinType::from_xml_name(type_name)
        .ok_or_else(|| CodecError::UnknownXmlType(format!("{LIST_PREFIX}{type_name}")))?;
    let count = XmlDecoder::elements(list).count();
    let limit = decoder.limits().max_array_length;
    if count > limit {
        return Err(CodecError::LimitExceeded {
            what: "array length",
            actual: count,
            limit,
        });
    }
    let mut elements = Vec::with_capacity(count);
    for element in XmlDecoder::elements(list) {
        let found = element.tag_name().name();
        if found != type_name {
            return Err(CodecError::InvalidData(format!(
                "<{found}> inside <{LIST_PREFIX}{type_name}>"
            )));
        }
        elements.push(Scalar::decode_xml_element(tag, element, decoder)?);
    }
    Ok((tag, elements))
}

fn decode_matrix(matrix: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Variant> {
    let mut dimensions = Vec::new();
    if let Some(dims) = XmlDecoder::child(matrix, "Dimensions") {
        for dim in XmlDecoder::elements(dims) {
            dimensions.push(XmlDecoder::parse_text::<u32>(dim, "matrix dimension")?);
        }
    }
    let elements = XmlDecoder::child(matrix, "Elements")
        .ok_or_else(|| CodecError::MissingElement("Elements".to_string()))?;
    let list = XmlDecoder::first_element(elements)
        .ok_or_else(|| CodecError::MissingElement("ListOf element in Matrix".to_string()))?;
    let list_name = list.tag_name().name();
    let type_name = list_name
        .strip_prefix(LIST_PREFIX)
        .ok_or_else(|| CodecError::UnknownXmlType(list_name.to_string()))?;
    let (tag, elements) = decode_list(list, type_name, decoder)?;
    Ok(Variant::Array(ArrayValue::matrix(tag, elements, dimensions)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_binary, decode_xml, encode_binary, encode_xml_named};
    use crate::config::DecodingLimits;
    use crate::types::ByteString;

    fn limits() -> DecodingLimits {
        DecodingLimits::default()
    }

    #[test]
    fn scalar_binary_layout() {
        let bytes = encode_binary(&Variant::from(5i32)).unwrap();
        assert_eq!(bytes, [6, 5, 0, 0, 0]);
        assert_eq!(encode_binary(&Variant::Empty).unwrap(), [0]);
    }

    #[test]
    fn matrix_binary_roundtrip() {
        let elements = (0..6).map(|i| Scalar::Double(f64::from(i))).collect();
        let matrix = Variant::matrix(BuiltinType::Double, elements, vec![2, 3]).unwrap();
        let bytes = encode_binary(&matrix).unwrap();
        assert_eq!(bytes[0], BuiltinType::Double.id() | ARRAY_FLAG | DIMENSIONS_FLAG);
        assert_eq!(decode_binary::<Variant>(&bytes, &limits()).unwrap(), matrix);
    }

    #[test]
    fn null_array_length_reads_as_empty_array() {
        let mut writer = BinaryWriter::new();
        writer.write_u8(BuiltinType::Int32.id() | ARRAY_FLAG);
        writer.write_i32(-1);
        let value: Variant = decode_binary(writer.as_bytes(), &limits()).unwrap();
        assert_eq!(value, Variant::from(Vec::<i32>::new()));
        assert_eq!(value.len(), 0);
        assert_eq!(value.type_tag(), Some(BuiltinType::Int32));

        let mut empty = vec![BuiltinType::Int32.id() | ARRAY_FLAG];
        empty.extend_from_slice(&0i32.to_le_bytes());
        assert_eq!(encode_binary(&value).unwrap(), empty);
    }

    #[test]
    fn malformed_matrix_surfaces_as_shape_mismatch() {
        let mut writer = BinaryWriter::new();
        writer.write_u8(BuiltinType::Int32.id() | ARRAY_FLAG | DIMENSIONS_FLAG);
        writer.write_i32(5);
        for i in 0..5 {
            writer.write_i32(i);
        }
        writer.write_i32(2);
        writer.write_i32(2);
        writer.write_i32(3);
        let err = decode_binary::<Variant>(writer.as_bytes(), &limits()).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Variant(VariantError::ShapeMismatch { actual: 5, .. })
        ));
    }

    #[test]
    fn negative_dimension_is_invalid() {
        let mut writer = BinaryWriter::new();
        writer.write_u8(BuiltinType::Int32.id() | ARRAY_FLAG | DIMENSIONS_FLAG);
        writer.write_i32(0);
        writer.write_i32(1);
        writer.write_i32(-1);
        let err = decode_binary::<Variant>(writer.as_bytes(), &limits()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidData(_)));
    }

    #[test]
    fn scalar_variant_tag_is_rejected() {
        let err = decode_binary::<Variant>(&[BuiltinType::Variant.id(), 0], &limits()).unwrap_err();
        assert!(matches!(err, CodecError::Variant(VariantError::NestedScalarVariant)));

        let nested = Variant::Scalar(Scalar::Variant(Box::new(Variant::from(1u8))));
        assert!(encode_binary(&nested).is_err());
    }

    #[test]
    fn unknown_type_id_is_reported() {
        let err = decode_binary::<Variant>(&[30], &limits()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownBuiltinType(30)));
    }

    #[test]
    fn xml_forms() {
        let scalar = Variant::from(5i32);
        let xml = encode_xml_named(&scalar, "Value").unwrap();
        assert!(xml.ends_with("><Int32>5</Int32></Value>"));
        assert_eq!(decode_xml::<Variant>(&xml, &limits()).unwrap(), scalar);

        let list = Variant::from(vec![ByteString::from(b"ab"), ByteString::null()]);
        let xml = encode_xml_named(&list, "Value").unwrap();
        assert!(xml.contains("<ListOfByteString><ByteString>YWI=</ByteString><ByteString xsi:nil"));
        assert_eq!(decode_xml::<Variant>(&xml, &limits()).unwrap(), list);

        let elements = (1..=4).map(Scalar::Int32).collect();
        let matrix = Variant::matrix(BuiltinType::Int32, elements, vec![2, 2]).unwrap();
        let xml = encode_xml_named(&matrix, "Value").unwrap();
        assert!(xml.contains(
            "<Matrix><Dimensions><Int32>2</Int32><Int32>2</Int32></Dimensions><Elements><ListOfInt32>"
        ));
        assert_eq!(decode_xml::<Variant>(&xml, &limits()).unwrap(), matrix);

        let xml = encode_xml_named(&Variant::Empty, "Value").unwrap();
        assert_eq!(decode_xml::<Variant>(&xml, &limits()).unwrap(), Variant::Empty);
    }

    #[test]
    fn xml_array_of_variants() {
        let value = Variant::from(vec![Variant::from(1i32), Variant::from("x")]);
        let xml = encode_xml_named(&value, "Value").unwrap();
        assert!(xml.contains("<ListOfVariant><Variant><Int32>1</Int32></Variant>"));
        assert_eq!(decode_xml::<Variant>(&xml, &limits()).unwrap(), value);
    }

    #[test]
    fn deep_nesting_hits_depth_limit() {
        let mut value = Variant::from(1i32);
        for _ in 0..10 {
            value = Variant::from(vec![value]);
        }
        let bytes = encode_binary(&value).unwrap();
        let shallow = DecodingLimits {
            max_nesting_depth: 4,
            ..DecodingLimits::default()
        };
        assert!(matches!(
            decode_binary::<Variant>(&bytes, &shallow),
            Err(CodecError::DepthExceeded { limit: 4 })
        ));
        assert_eq!(decode_binary::<Variant>(&bytes, &limits()).unwrap(), value);
    }
}
