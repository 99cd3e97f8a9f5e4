// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged dynamic values.
//!
//! A [`Variant`] is empty, a single [`Scalar`] of one of the 25 built-in
//! types, or an [`ArrayValue`] whose elements share a type tag and which may
//! carry matrix dimensions. Rank changes are explicit:
//! [`as_array`](Variant::as_array) and [`as_scalar`](Variant::as_scalar) fail
//! instead of truncating or padding.
//!
//! A variant never directly holds a scalar variant; arrays of variants are
//! fine. [`Variant::scalar`] rejects the nested form and so do both codecs.

mod array;
mod codec;
mod convert;
mod error;
mod scalar;

pub use array::ArrayValue;
pub use error::VariantError;
pub use scalar::Scalar;

use std::hash::{Hash, Hasher};

use crate::extension::ExtensionError;
use crate::registry::TypeRegistry;
use crate::structure::Structural;
use crate::types::BuiltinType;

/// Shape of a non-empty variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rank {
    Scalar,
    Array,
    Matrix(Vec<u32>),
}

#[derive(Debug, Clone, Default)]
pub enum Variant {
    #[default]
    Empty,
    Scalar(Scalar),
    Array(ArrayValue),
}

impl Variant {
    /// Checked scalar constructor.
    pub fn scalar(value: Scalar) -> Result<Self, VariantError> {
        if matches!(value, Scalar::Variant(_)) {
            return Err(VariantError::NestedScalarVariant);
        }
        Ok(Variant::Scalar(value))
    }

    pub fn array(type_tag: BuiltinType, elements: Vec<Scalar>) -> Result<Self, VariantError> {
        ArrayValue::new(type_tag, elements).map(Variant::Array)
    }

    pub fn matrix(
        type_tag: BuiltinType,
        elements: Vec<Scalar>,
        dimensions: Vec<u32>,
    ) -> Result<Self, VariantError> {
        ArrayValue::matrix(type_tag, elements, dimensions).map(Variant::Array)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// Tag of the value or of the array elements; `None` when empty.
    pub fn type_tag(&self) -> Option<BuiltinType> {
        match self {
            Variant::Empty => None,
            Variant::Scalar(value) => Some(value.type_tag()),
            Variant::Array(array) => Some(array.type_tag()),
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Variant::Empty => None,
            Variant::Scalar(_) => Some(Rank::Scalar),
            Variant::Array(array) => Some(match array.dimensions() {
                Some(dims) => Rank::Matrix(dims.to_vec()),
                None => Rank::Array,
            }),
        }
    }

    /// Matrix dimensions; `None` for everything but a matrix.
    pub fn dimensions(&self) -> Option<&[u32]> {
        match self {
            Variant::Array(array) => array.dimensions(),
            _ => None,
        }
    }

    /// Number of values carried: 0, 1, or the element count.
    pub fn len(&self) -> usize {
        match self {
            Variant::Empty => 0,
            Variant::Scalar(_) => 1,
            Variant::Array(array) => array.len(),
        }
    }

    /// Check the invariants a hand-built variant may have skipped.
    pub fn validate(&self) -> Result<(), VariantError> {
        match self {
            Variant::Scalar(Scalar::Variant(_)) => Err(VariantError::NestedScalarVariant),
            _ => Ok(()),
        }
    }

    /// The value as an array, shaped by `dimensions` (`None` gives a flat
    /// array). A scalar becomes a one-element array. The element count never
    /// changes, so a shape with a different product is a `ShapeMismatch`.
    pub fn as_array(&self, dimensions: Option<&[u32]>) -> Result<Variant, VariantError> {
        let flat = match self {
            Variant::Empty => return Err(VariantError::Empty),
            Variant::Scalar(value) => {
                ArrayValue::from_homogeneous(value.type_tag(), vec![value.clone()])
            }
            Variant::Array(array) => array.clone(),
        };
        flat.reshape(dimensions).map(Variant::Array)
    }

    /// The single value carried. A one-element array of variants yields the
    /// inner variant.
    pub fn as_scalar(&self) -> Result<Variant, VariantError> {
        match self {
            Variant::Scalar(_) => Ok(self.clone()),
            Variant::Array(array) if array.len() == 1 => match &array.elements()[0] {
                Scalar::Variant(inner) => Ok((**inner).clone()),
                value => Ok(Variant::Scalar(value.clone())),
            },
            _ => Err(VariantError::NotScalar { len: self.len() }),
        }
    }

    /// Resolve every extension object reachable from this value: scalars,
    /// array elements, nested variants and data values. Unknown types stay
    /// raw.
    pub fn resolve(&self, registry: &TypeRegistry) -> Result<Variant, ExtensionError> {
        let mut out = self.clone();
        out.resolve_in_place(registry)?;
        Ok(out)
    }

    fn resolve_in_place(&mut self, registry: &TypeRegistry) -> Result<(), ExtensionError> {
        match self {
            Variant::Empty => Ok(()),
            Variant::Scalar(value) => resolve_scalar(value, registry),
            Variant::Array(array) => array
                .elements_mut()
                .iter_mut()
                .try_for_each(|value| resolve_scalar(value, registry)),
        }
    }
}

fn resolve_scalar(value: &mut Scalar, registry: &TypeRegistry) -> Result<(), ExtensionError> {
    match value {
        Scalar::ExtensionObject(object) if object.is_raw() => {
            *object = object.resolve(registry)?;
            Ok(())
        }
        Scalar::Variant(inner) => inner.resolve_in_place(registry),
        Scalar::DataValue(data_value) => data_value.value.resolve_in_place(registry),
        _ => Ok(()),
    }
}

impl Structural for Variant {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Variant::Empty, Variant::Empty) => true,
            (Variant::Scalar(a), Variant::Scalar(b)) => a.structural_eq(b),
            (Variant::Array(a), Variant::Array(b)) => a.structural_eq(b),
            _ => false,
        }
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        match self {
            Variant::Empty => state.write_u8(0),
            Variant::Scalar(value) => {
                state.write_u8(1);
                value.structural_hash(state);
            }
            Variant::Array(array) => {
                state.write_u8(2);
                array.structural_hash(state);
            }
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for Variant {}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}
