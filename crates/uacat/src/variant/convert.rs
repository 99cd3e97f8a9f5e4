// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversions into variants and typed accessors out of them.

use super::{ArrayValue, Scalar, Variant};
use crate::extension::ExtensionObject;
use crate::structure::StructureType;
use crate::types::{
    BuiltinType, ByteString, DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, Guid,
    LocalizedText, NodeId, QualifiedName, StatusCode, XmlElement,
};

macro_rules! impl_from_scalar {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::Scalar(Scalar::from(value))
                }
            }

            impl From<Vec<$ty>> for Variant {
                fn from(values: Vec<$ty>) -> Self {
                    Variant::Array(ArrayValue::from_homogeneous(
                        BuiltinType::$variant,
                        values.into_iter().map(Scalar::from).collect(),
                    ))
                }
            }
        )*
    };
}

impl_from_scalar! {
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
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
    DataValue(DataValue),
    DiagnosticInfo(DiagnosticInfo),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_owned())
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::Scalar(Scalar::from(value))
    }
}

/// An array of variants; the only way a variant nests inside another.
impl From<Vec<Variant>> for Variant {
    fn from(values: Vec<Variant>) -> Self {
        Variant::Array(ArrayValue::from_homogeneous(
            BuiltinType::Variant,
            values
                .into_iter()
                .map(|value| Scalar::Variant(Box::new(value)))
                .collect(),
        ))
    }
}

impl From<ArrayValue> for Variant {
    fn from(array: ArrayValue) -> Self {
        Variant::Array(array)
    }
}

impl Variant {
    /// Scalar extension object holding `value`.
    pub fn from_structure<T: StructureType>(value: T) -> Self {
        Variant::from(ExtensionObject::from_structure(value))
    }

    pub fn as_scalar_value(&self) -> Option<&Scalar> {
        match self {
            Variant::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array_value(&self) -> Option<&ArrayValue> {
        match self {
            Variant::Array(array) => Some(array),
            _ => None,
        }
    }
}

macro_rules! copy_accessors {
    ($($name:ident => $variant:ident($ty:ty)),* $(,)?) => {
        impl Variant {
            $(
                pub fn $name(&self) -> Option<$ty> {
                    match self {
                        Variant::Scalar(Scalar::$variant(value)) => Some(*value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

copy_accessors! {
    as_bool => Boolean(bool),
    as_i8 => SByte(i8),
    as_u8 => Byte(u8),
    as_i16 => Int16(i16),
    as_u16 => UInt16(u16),
    as_i32 => Int32(i32),
    as_u32 => UInt32(u32),
    as_i64 => Int64(i64),
    as_u64 => UInt64(u64),
    as_f32 => Float(f32),
    as_f64 => Double(f64),
    as_date_time => DateTime(DateTime),
    as_guid => Guid(Guid),
    as_status_code => StatusCode(StatusCode),
}

macro_rules! ref_accessors {
    ($($name:ident => $variant:ident($ty:ty)),* $(,)?) => {
        impl Variant {
            $(
                pub fn $name(&self) -> Option<&$ty> {
                    match self {
                        Variant::Scalar(Scalar::$variant(value)) => Some(value),
                        _ => None,
                    }
                }
            )*
        }
    };
}

ref_accessors! {
    as_str => String(str),
    as_byte_string => ByteString(ByteString),
    as_xml_element => XmlElement(XmlElement),
    as_node_id => NodeId(NodeId),
    as_expanded_node_id => ExpandedNodeId(ExpandedNodeId),
    as_qualified_name => QualifiedName(QualifiedName),
    as_localized_text => LocalizedText(LocalizedText),
    as_extension_object => ExtensionObject(ExtensionObject),
    as_data_value => DataValue(DataValue),
    as_diagnostic_info => DiagnosticInfo(DiagnosticInfo),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        assert_eq!(Variant::from(3u16).as_u16(), Some(3));
        assert_eq!(Variant::from(3u16).as_i32(), None);
        assert_eq!(Variant::from("abc").as_str(), Some("abc"));
        assert_eq!(
            Variant::from(NodeId::numeric(0, 85)).as_node_id(),
            Some(&NodeId::numeric(0, 85))
        );
        let text = LocalizedText::new("en", "Pump");
        assert_eq!(Variant::from(text.clone()).as_localized_text(), Some(&text));
        assert_eq!(Variant::Empty.as_bool(), None);
    }

    #[test]
    fn vectors_become_arrays() {
        let array = Variant::from(vec![1.0f32, 2.0]);
        let value = array.as_array_value().unwrap();
        assert_eq!(value.type_tag(), BuiltinType::Float);
        assert_eq!(value.elements(), &[Scalar::Float(1.0), Scalar::Float(2.0)]);

        let empty = Variant::from(Vec::<String>::new());
        assert_eq!(empty.type_tag(), Some(BuiltinType::String));
        assert_eq!(empty.len(), 0);
    }
}
