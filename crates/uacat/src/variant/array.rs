// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::hash::{Hash, Hasher};

use super::{Scalar, VariantError};
use crate::structure::Structural;
use crate::types::BuiltinType;

/// Homogeneous elements, optionally shaped as a matrix.
///
/// Elements are stored flat in row-major order. Fields are private so every
/// value went through [`new`](Self::new) or [`matrix`](Self::matrix).
#[derive(Debug, Clone)]
pub struct ArrayValue {
    type_tag: BuiltinType,
    elements: Vec<Scalar>,
    dimensions: Option<Vec<u32>>,
}

impl ArrayValue {
    /// One-dimensional array. Every element must be a `type_tag` value.
    pub fn new(type_tag: BuiltinType, elements: Vec<Scalar>) -> Result<Self, VariantError> {
        check_elements(type_tag, &elements)?;
        Ok(Self {
            type_tag,
            elements,
            dimensions: None,
        })
    }

    /// Multi-dimensional array; the product of `dimensions` must equal the
    /// element count.
    pub fn matrix(
        type_tag: BuiltinType,
        elements: Vec<Scalar>,
        dimensions: Vec<u32>,
    ) -> Result<Self, VariantError> {
        check_elements(type_tag, &elements)?;
        check_shape(&dimensions, elements.len())?;
        Ok(Self {
            type_tag,
            elements,
            dimensions: Some(dimensions),
        })
    }

    /// Elements already known to carry `type_tag`.
    pub(crate) fn from_homogeneous(type_tag: BuiltinType, elements: Vec<Scalar>) -> Self {
        debug_assert!(elements.iter().all(|e| e.type_tag() == type_tag));
        Self {
            type_tag,
            elements,
            dimensions: None,
        }
    }

    pub fn type_tag(&self) -> BuiltinType {
        self.type_tag
    }

    pub fn elements(&self) -> &[Scalar] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Scalar> {
        self.elements
    }

    /// Declared matrix dimensions; `None` for a one-dimensional array.
    pub fn dimensions(&self) -> Option<&[u32]> {
        self.dimensions.as_deref()
    }

    pub fn is_matrix(&self) -> bool {
        self.dimensions.is_some()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Same elements, reshaped. `None` flattens to one dimension.
    pub fn reshape(&self, dimensions: Option<&[u32]>) -> Result<Self, VariantError> {
        if let Some(dims) = dimensions {
            check_shape(dims, self.elements.len())?;
        }
        Ok(Self {
            type_tag: self.type_tag,
            elements: self.elements.clone(),
            dimensions: dimensions.map(<[u32]>::to_vec),
        })
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Scalar] {
        &mut self.elements
    }
}

fn check_elements(type_tag: BuiltinType, elements: &[Scalar]) -> Result<(), VariantError> {
    match elements
        .iter()
        .enumerate()
        .find(|(_, element)| element.type_tag() != type_tag)
    {
        Some((index, element)) => Err(VariantError::ElementTypeMismatch {
            expected: type_tag,
            found: element.type_tag(),
            index,
        }),
        None => Ok(()),
    }
}

fn check_shape(dimensions: &[u32], actual: usize) -> Result<(), VariantError> {
    let expected = dimensions
        .iter()
        .try_fold(1u64, |product, &dim| product.checked_mul(u64::from(dim)));
    if expected == Some(actual as u64) {
        Ok(())
    } else {
        Err(VariantError::ShapeMismatch {
            dimensions: dimensions.to_vec(),
            actual,
        })
    }
}

impl Structural for ArrayValue {
    fn structural_eq(&self, other: &Self) -> bool {
        self.type_tag == other.type_tag
            && self.dimensions == other.dimensions
            && self.elements.structural_eq(&other.elements)
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        state.write_u8(self.type_tag.id());
        self.dimensions.structural_hash(state);
        self.elements.structural_hash(state);
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for ArrayValue {}

impl Hash for ArrayValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.structural_hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(n: i32) -> Vec<Scalar> {
        (0..n).map(Scalar::Int32).collect()
    }

    #[test]
    fn matrix_product_must_match() {
        assert!(ArrayValue::matrix(BuiltinType::Int32, ints(6), vec![2, 3]).is_ok());
        assert_eq!(
            ArrayValue::matrix(BuiltinType::Int32, ints(5), vec![2, 3]).unwrap_err(),
            VariantError::ShapeMismatch {
                dimensions: vec![2, 3],
                actual: 5
            }
        );
        assert!(ArrayValue::matrix(BuiltinType::Int32, Vec::new(), vec![0, 4]).is_ok());
    }

    #[test]
    fn overflowing_dimensions_are_a_mismatch() {
        let err = ArrayValue::matrix(BuiltinType::Int32, ints(1), vec![u32::MAX, u32::MAX, 4])
            .unwrap_err();
        assert!(matches!(err, VariantError::ShapeMismatch { actual: 1, .. }));
    }

    #[test]
    fn mixed_elements_are_rejected() {
        let err = ArrayValue::new(
            BuiltinType::Int32,
            vec![Scalar::Int32(1), Scalar::Double(2.0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            VariantError::ElementTypeMismatch {
                expected: BuiltinType::Int32,
                found: BuiltinType::Double,
                index: 1
            }
        );
    }

    #[test]
    fn reshape_keeps_elements() {
        let array = ArrayValue::new(BuiltinType::Int32, ints(6)).unwrap();
        let matrix = array.reshape(Some(&[3, 2])).unwrap();
        assert_eq!(matrix.dimensions(), Some(&[3, 2][..]));
        assert_eq!(matrix.elements(), array.elements());
        assert!(array.reshape(Some(&[4, 2])).is_err());
        assert_eq!(matrix.reshape(None).unwrap(), array);
    }
}
