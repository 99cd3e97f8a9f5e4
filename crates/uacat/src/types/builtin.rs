// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

/// The closed set of built-in wire types a [`Variant`](crate::Variant) can
/// carry. Discriminants are the wire type ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BuiltinType {
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 25] = [
        BuiltinType::Boolean,
        BuiltinType::SByte,
        BuiltinType::Byte,
        BuiltinType::Int16,
        BuiltinType::UInt16,
        BuiltinType::Int32,
        BuiltinType::UInt32,
        BuiltinType::Int64,
        BuiltinType::UInt64,
        BuiltinType::Float,
        BuiltinType::Double,
        BuiltinType::String,
        BuiltinType::DateTime,
        BuiltinType::Guid,
        BuiltinType::ByteString,
        BuiltinType::XmlElement,
        BuiltinType::NodeId,
        BuiltinType::ExpandedNodeId,
        BuiltinType::StatusCode,
        BuiltinType::QualifiedName,
        BuiltinType::LocalizedText,
        BuiltinType::ExtensionObject,
        BuiltinType::DataValue,
        BuiltinType::Variant,
        BuiltinType::DiagnosticInfo,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    /// Element name in the XML encoding.
    pub const fn xml_name(self) -> &'static str {
        match self {
            BuiltinType::Boolean => "Boolean",
            BuiltinType::SByte => "SByte",
            BuiltinType::Byte => "Byte",
            BuiltinType::Int16 => "Int16",
            BuiltinType::UInt16 => "UInt16",
            BuiltinType::Int32 => "Int32",
            BuiltinType::UInt32 => "UInt32",
            BuiltinType::Int64 => "Int64",
            BuiltinType::UInt64 => "UInt64",
            BuiltinType::Float => "Float",
            BuiltinType::Double => "Double",
            BuiltinType::String => "String",
            BuiltinType::DateTime => "DateTime",
            BuiltinType::Guid => "Guid",
            BuiltinType::ByteString => "ByteString",
            BuiltinType::XmlElement => "XmlElement",
            BuiltinType::NodeId => "NodeId",
            BuiltinType::ExpandedNodeId => "ExpandedNodeId",
            BuiltinType::StatusCode => "StatusCode",
            BuiltinType::QualifiedName => "QualifiedName",
            BuiltinType::LocalizedText => "LocalizedText",
            BuiltinType::ExtensionObject => "ExtensionObject",
            BuiltinType::DataValue => "DataValue",
            BuiltinType::Variant => "Variant",
            BuiltinType::DiagnosticInfo => "DiagnosticInfo",
        }
    }

    pub fn from_xml_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.xml_name() == name)
    }

    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            BuiltinType::SByte
                | BuiltinType::Byte
                | BuiltinType::Int16
                | BuiltinType::UInt16
                | BuiltinType::Int32
                | BuiltinType::UInt32
                | BuiltinType::Int64
                | BuiltinType::UInt64
                | BuiltinType::Float
                | BuiltinType::Double
        )
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}
