// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The contract every catalog structure satisfies.
//!
//! - [`Structural`]: field-level deep equality and a hash consistent with it.
//!   Floats compare by bit pattern, so `s.clone() == s` holds even when a
//!   field is NaN (and `0.0` differs from `-0.0`).
//! - [`StructureType`]: the static side (name, [`Identity`], codecs), written
//!   by `#[derive(Structure)]`.
//! - [`Structure`]: the object-safe side used by registries, extension
//!   objects and message dispatch. Blanket-implemented for every
//!   `StructureType`.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec::{BinaryEncodable, BinaryWriter, CodecResult, XmlEncodable, XmlWriter};
use crate::identity::Identity;

/// Deep structural equality plus a consistent hash.
pub trait Structural {
    fn structural_eq(&self, other: &Self) -> bool;
    fn structural_hash(&self, state: &mut dyn Hasher);
}

/// Feed any `Hash` value into a dynamic hasher.
pub fn hash_into<T: Hash + ?Sized>(value: &T, mut state: &mut dyn Hasher) {
    value.hash(&mut state);
}

macro_rules! impl_structural_eq_hash {
    ($($type:ty),* $(,)?) => {
        $(
            impl $crate::structure::Structural for $type {
                fn structural_eq(&self, other: &Self) -> bool {
                    self == other
                }

                fn structural_hash(&self, state: &mut dyn ::std::hash::Hasher) {
                    $crate::structure::hash_into(self, state);
                }
            }
        )*
    };
}
pub(crate) use impl_structural_eq_hash;

impl_structural_eq_hash!(bool, i8, u8, i16, u16, i32, u32, i64, u64, String, str);

impl Structural for f32 {
    fn structural_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        state.write_u32(self.to_bits());
    }
}

impl Structural for f64 {
    fn structural_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        state.write_u64(self.to_bits());
    }
}

impl<T: Structural> Structural for Option<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.structural_eq(b),
            _ => false,
        }
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        match self {
            None => state.write_u8(0),
            Some(value) => {
                state.write_u8(1);
                value.structural_hash(state);
            }
        }
    }
}

impl<T: Structural> Structural for [T] {
    fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.structural_eq(b))
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        state.write_usize(self.len());
        for element in self {
            element.structural_hash(state);
        }
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        self.as_slice().structural_eq(other.as_slice())
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        self.as_slice().structural_hash(state);
    }
}

impl<T: Structural + ?Sized> Structural for Box<T> {
    fn structural_eq(&self, other: &Self) -> bool {
        (**self).structural_eq(&**other)
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        (**self).structural_hash(state);
    }
}

/// Static side of a catalog structure.
pub trait StructureType:
    BinaryEncodable + XmlEncodable + Structural + Clone + Default + fmt::Debug + Send + Sync + 'static
{
    /// Browse name of the data type, e.g. `"Range"`.
    const TYPE_NAME: &'static str;

    fn type_identity() -> &'static Identity;
}

/// Object-safe view of any catalog structure.
pub trait Structure: fmt::Debug + Send + Sync + 'static {
    fn identity(&self) -> &'static Identity;
    fn type_name(&self) -> &'static str;
    fn encode_binary(&self, writer: &mut BinaryWriter) -> CodecResult<()>;
    /// Write the element content (fields) of this structure.
    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()>;
    fn clone_boxed(&self) -> Box<dyn Structure>;
    /// Same concrete type and structurally equal.
    fn eq_dyn(&self, other: &dyn Structure) -> bool;
    fn hash_dyn(&self, state: &mut dyn Hasher);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: StructureType> Structure for T {
    fn identity(&self) -> &'static Identity {
        T::type_identity()
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn encode_binary(&self, writer: &mut BinaryWriter) -> CodecResult<()> {
        BinaryEncodable::encode(self, writer)
    }

    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()> {
        XmlEncodable::encode_xml(self, writer)
    }

    fn clone_boxed(&self) -> Box<dyn Structure> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn Structure) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self.structural_eq(other))
    }

    fn hash_dyn(&self, state: &mut dyn Hasher) {
        hash_into(&T::type_identity().abstract_id, state);
        self.structural_hash(state);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Structure {
    pub fn is<T: StructureType>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: StructureType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: StructureType>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Unbox into the concrete type. The value is dropped on mismatch, so
    /// check [`is`](Self::is) first when it must survive.
    pub fn downcast<T: StructureType>(self: Box<Self>) -> Option<T> {
        self.into_any().downcast::<T>().ok().map(|value| *value)
    }
}

impl Clone for Box<dyn Structure> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl PartialEq for dyn Structure {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

impl Eq for dyn Structure {}

impl Hash for dyn Structure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_dyn(state);
    }
}

impl Structural for dyn Structure {
    fn structural_eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }

    fn structural_hash(&self, state: &mut dyn Hasher) {
        self.hash_dyn(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Structural + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.structural_hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn nan_equals_itself_bitwise() {
        assert!(f64::NAN.structural_eq(&f64::NAN));
        assert!(!0.0f64.structural_eq(&-0.0));
        assert_eq!(hash_of(&f64::NAN), hash_of(&f64::NAN));
    }

    #[test]
    fn absent_and_empty_differ() {
        let absent: Option<Vec<u32>> = None;
        let empty: Option<Vec<u32>> = Some(Vec::new());
        assert!(absent.structural_eq(&None));
        assert!(!absent.structural_eq(&empty));
        assert_ne!(hash_of(&absent), hash_of(&empty));
    }

    #[test]
    fn array_hash_depends_on_order() {
        let forward = vec![1u32, 2, 3];
        let backward = vec![3u32, 2, 1];
        assert!(!forward.structural_eq(&backward));
        assert_ne!(hash_of(&forward), hash_of(&backward));
        assert_eq!(hash_of(&forward), hash_of(&forward.clone()));
    }
}
