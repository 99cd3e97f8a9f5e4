// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One value of one built-in type.

use std::hash::{Hash, Hasher};

use roxmltree::Node;

use super::Variant;
use crate::codec::{
    BinaryEncodable, BinaryReader, BinaryWriter, CodecResult, XmlDecoder, XmlEncodable, XmlWriter,
};
use crate::extension::ExtensionObject;
use crate::structure::Structural;
use crate::types::{
    BuiltinType, ByteString, DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, Guid,
    LocalizedText, NodeId, QualifiedName, StatusCode, XmlElement,
};

macro_rules! scalar_types {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A single built-in value. The case is the value's type tag.
        #[derive(Debug, Clone)]
        pub enum Scalar {
            $($variant($ty),)*
        }

        impl Scalar {
            pub fn type_tag(&self) -> BuiltinType {
                match self {
                    $(Scalar::$variant(_) => BuiltinType::$variant,)*
                }
            }

            /// Write the value without a type mask.
            pub(crate) fn encode_value(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
                match self {
                    $(Scalar::$variant(value) => value.encode(writer),)*
                }
            }

            /// Read a value of type `tag`.
            pub(crate) fn decode_value(
                tag: BuiltinType,
                reader: &mut BinaryReader<'_>,
            ) -> CodecResult<Self> {
                match tag {
                    $(BuiltinType::$variant => <$ty>::decode(reader).map(Scalar::$variant),)*
                }
            }

            /// Write the element content without the `<TypeName>` wrapper.
            pub(crate) fn encode_xml_content(&self, writer: &mut XmlWriter) -> CodecResult<()> {
                match self {
                    $(Scalar::$variant(value) => value.encode_xml(writer),)*
                }
            }

            /// Read a value of type `tag` from an element; `xsi:nil` gives the
            /// type's default.
            pub(crate) fn decode_xml_element(
                tag: BuiltinType,
                node: Node<'_, '_>,
                decoder: &mut XmlDecoder,
            ) -> CodecResult<Self> {
                match tag {
                    $(BuiltinType::$variant => decoder.value::<$ty>(node).map(Scalar::$variant),)*
                }
            }

            pub(crate) fn xml_is_null(&self) -> bool {
                match self {
                    $(Scalar::$variant(value) => value.xml_is_null(),)*
                }
            }
        }

        impl Structural for Scalar {
            fn structural_eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Scalar::$variant(a), Scalar::$variant(b)) => a.structural_eq(b),)*
                    _ => false,
                }
            }

            fn structural_hash(&self, state: &mut dyn Hasher) {
                state.write_u8(self.type_tag().id());
                match self {
                    $(Scalar::$variant(value) => value.structural_hash(state),)*
                }
            }
        }
    };
}

scalar_types! {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime),
    Guid(Guid),
    ByteString(ByteString),
    XmlElement(XmlElement),
    NodeId(NodeId),
    ExpandedNodeId(Box<ExpandedNodeId>),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(Box<LocalizedText>),
    ExtensionObject(ExtensionObject),
    DataValue(Box<DataValue>),
    Variant(Box<Variant>),
    DiagnosticInfo(Box<DiagnosticInfo>),
}

impl Scalar {
    /// Zero value of `tag`, used for null array elements.
    pub fn default_for(tag: BuiltinType) -> Self {
        match tag {
            BuiltinType::Boolean => Scalar::Boolean(false),
            BuiltinType::SByte => Scalar::SByte(0),
            BuiltinType::Byte => Scalar::Byte(0),
            BuiltinType::Int16 => Scalar::Int16(0),
            BuiltinType::UInt16 => Scalar::UInt16(0),
            BuiltinType::Int32 => Scalar::Int32(0),
            BuiltinType::UInt32 => Scalar::UInt32(0),
            BuiltinType::Int64 => Scalar::Int64(0),
            BuiltinType::UInt64 => Scalar::UInt64(0),
            BuiltinType::Float => Scalar::Float(0.0),
            BuiltinType::Double => Scalar::Double(0.0),
            BuiltinType::String => Scalar::String(String::new()),
            BuiltinType::DateTime => Scalar::DateTime(DateTime::default()),
            BuiltinType::Guid => Scalar::Guid(Guid::NULL),
            BuiltinType::ByteString => Scalar::ByteString(ByteString::null()),
            BuiltinType::XmlElement => Scalar::XmlElement(XmlElement::null()),
            BuiltinType::NodeId => Scalar::NodeId(NodeId::NULL),
            BuiltinType::ExpandedNodeId => Scalar::ExpandedNodeId(Box::default()),
            BuiltinType::StatusCode => Scalar::StatusCode(StatusCode::GOOD),
            BuiltinType::QualifiedName => Scalar::QualifiedName(QualifiedName::default()),
            BuiltinType::LocalizedText => Scalar::LocalizedText(Box::default()),
            BuiltinType::ExtensionObject => Scalar::ExtensionObject(ExtensionObject::default()),
            BuiltinType::DataValue => Scalar::DataValue(Box::default()),
            BuiltinType::Variant => Scalar::Variant(Box::default()),
            BuiltinType::DiagnosticInfo => Scalar::DiagnosticInfo(Box::default()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.type_tag().is_numeric()
    }

    /// Numeric value widened to `f64`; `None` for non-numeric types.
    pub fn to_f64(&self) -> Option<f64> {
        Some(match self {
            Scalar::SByte(v) => f64::from(*v),
            Scalar::Byte(v) => f64::from(*v),
            Scalar::Int16(v) => f64::from(*v),
            Scalar::UInt16(v) => f64::from(*v),
            Scalar::Int32(v) => f64::from(*v),
            Scalar::UInt32(v) => f64::from(*v),
            Scalar::Int64(v) => *v as f64,
            Scalar::UInt64(v) => *v as f64,
            Scalar::Float(v) => f64::from(*v),
            Scalar::Double(v) => *v,
            _ => return None,
        })
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryReader;

    #[test]
    fn default_for_matches_tag() {
        for tag in BuiltinType::ALL {
            assert_eq!(Scalar::default_for(tag).type_tag(), tag);
        }
    }

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Scalar::Double(f64::NAN), Scalar::Double(f64::NAN));
        assert_ne!(Scalar::Double(0.0), Scalar::Double(-0.0));
        assert_ne!(Scalar::Int32(1), Scalar::UInt32(1));
    }

    #[test]
    fn value_roundtrip_without_mask() {
        let value = Scalar::QualifiedName(QualifiedName::new(2, "Speed"));
        let mut writer = BinaryWriter::new();
        value.encode_value(&mut writer).unwrap();
        let bytes = writer.into_inner();
        let mut reader = BinaryReader::new(&bytes);
        let decoded = Scalar::decode_value(BuiltinType::QualifiedName, &mut reader).unwrap();
        assert_eq!(decoded, value);
        assert!(reader.is_eof());
    }

    #[test]
    fn numeric_widening() {
        assert_eq!(Scalar::Int16(-3).to_f64(), Some(-3.0));
        assert_eq!(Scalar::String("3".into()).to_f64(), None);
        assert!(Scalar::Byte(1).is_numeric());
    }
}
