// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use thiserror::Error;

use crate::variant::VariantError;

/// Errors raised while encoding or decoding wire values.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unexpected end of buffer at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("{what} of {actual} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("nesting depth exceeds limit {limit}")]
    DepthExceeded { limit: usize },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown value {value} for enumeration {type_name}")]
    UnknownEnumValue { type_name: &'static str, value: i32 },

    #[error("unknown built-in type id {0}")]
    UnknownBuiltinType(u8),

    #[error("unknown XML type element <{0}>")]
    UnknownXmlType(String),

    #[error("XML syntax error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("missing XML element <{0}>")]
    MissingElement(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Variant(#[from] VariantError),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
