// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use thiserror::Error;

use crate::types::BuiltinType;

/// A variant whose shape or element types are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("matrix dimensions {dimensions:?} do not match {actual} elements")]
    ShapeMismatch { dimensions: Vec<u32>, actual: usize },

    #[error("element {index} is {found}, array holds {expected}")]
    ElementTypeMismatch {
        expected: BuiltinType,
        found: BuiltinType,
        index: usize,
    },

    #[error("a scalar variant cannot directly contain another variant")]
    NestedScalarVariant,

    #[error("variant holds {len} elements, not a single scalar")]
    NotScalar { len: usize },

    #[error("variant is empty")]
    Empty,
}
