// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordinal and flag enumerations.

use crate::Enumeration;

/// Class of a node in the address space. Values are powers of two so masks
/// of classes can be built, but the type itself is a plain enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum NodeClass {
    #[default]
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum MessageSecurityMode {
    #[default]
    Invalid = 0,
    None = 1,
    Sign = 2,
    SignAndEncrypt = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum BrowseDirection {
    #[default]
    Forward = 0,
    Inverse = 1,
    Both = 2,
    Invalid = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum TimestampsToReturn {
    #[default]
    Source = 0,
    Server = 1,
    Both = 2,
    Neither = 3,
    Invalid = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum UserTokenType {
    #[default]
    Anonymous = 0,
    UserName = 1,
    Certificate = 2,
    IssuedToken = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
pub enum AxisScaleEnumeration {
    #[default]
    Linear = 0,
    Log = 1,
    Ln = 2,
}

/// Access rights of a variable, carried on the wire as a `Byte` mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[ua(bitmask)]
pub enum AccessLevelType {
    #[default]
    None = 0,
    CurrentRead = 1,
    CurrentWrite = 2,
    HistoryRead = 4,
    HistoryWrite = 8,
    SemanticChange = 16,
    StatusWrite = 32,
    TimestampWrite = 64,
    #[ua(composite)]
    ReadWrite = 3,
    #[ua(composite)]
    HistoryReadWrite = 12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[ua(bitmask)]
pub enum EventNotifierType {
    #[default]
    None = 0,
    SubscribeToEvents = 1,
    HistoryRead = 4,
    HistoryWrite = 8,
}

/// Parts of a trust list, as used by `TrustListDataType::specified_lists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[ua(bitmask)]
pub enum TrustListMasks {
    #[default]
    None = 0,
    TrustedCertificates = 1,
    TrustedCrls = 2,
    IssuerCertificates = 4,
    IssuerCrls = 8,
    #[ua(composite)]
    All = 15,
}
