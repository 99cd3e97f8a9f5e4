// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordinal and explicit-value enumerations.
//!
//! Every catalog enumeration is a fieldless Rust enum deriving
//! [`Enumeration`](uacat_codegen::Enumeration). Its constants are described by
//! a static [`EnumValue`] table in declaration order.
//!
//! Flag enumerations additionally implement [`Bitmask`]. Decomposition only
//! reports *primitive* constants: a constant marked `#[ua(composite)]` (the
//! union of other flags) and a zero-valued "none" constant never appear in
//! [`Bitmask::get_set`]. With `A = 1`, `B = 2` and composite `AB = 3`,
//! `get_set(3)` is `[A, B]`.

use std::fmt;
use std::hash::Hash;

use crate::codec::{CodecError, CodecResult};

/// One declared constant of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub name: &'static str,
    /// Declaration position.
    pub ordinal: u32,
    /// Wire value; equals the discriminant, not necessarily the ordinal.
    pub value: i32,
    /// Declared as the union of other flags.
    pub composite: bool,
}

impl EnumValue {
    /// A single flag that takes part in mask decomposition.
    pub const fn is_primitive(&self) -> bool {
        !self.composite && self.value != 0
    }
}

/// A fixed set of named constants.
pub trait Enumeration: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    /// Descriptors in declaration order.
    fn entries() -> &'static [EnumValue];

    /// Constants in declaration order, parallel to [`entries`](Self::entries).
    fn variants() -> &'static [Self];

    fn ordinal(self) -> u32;

    fn entry(self) -> &'static EnumValue {
        &Self::entries()[self.ordinal() as usize]
    }

    fn name(self) -> &'static str {
        self.entry().name
    }

    fn value(self) -> i32 {
        self.entry().value
    }

    /// Constant with the given wire value; `None` for values this build does
    /// not know (newer peers may send them).
    fn value_of(value: i32) -> Option<Self> {
        Self::entries()
            .iter()
            .position(|entry| entry.value == value)
            .map(|index| Self::variants()[index])
    }

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::variants().get(ordinal as usize).copied()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::entries()
            .iter()
            .position(|entry| entry.name == name)
            .map(|index| Self::variants()[index])
    }
}

/// Flag enumeration composed into and decomposed from `u32` masks.
pub trait Bitmask: Enumeration {
    /// Bitwise OR of the values of `flags`.
    fn get_mask(flags: &[Self]) -> u32 {
        flags.iter().fold(0, |mask, flag| mask | flag.value() as u32)
    }

    /// Primitive constants whose bits are all set in `mask`, in declaration
    /// order. Composites and zero-valued constants are never reported.
    fn get_set(mask: u32) -> Vec<Self> {
        Self::variants()
            .iter()
            .zip(Self::entries())
            .filter(|(_, entry)| {
                let bits = entry.value as u32;
                entry.is_primitive() && mask & bits == bits
            })
            .map(|(flag, _)| *flag)
            .collect()
    }

    /// Primitive constants in declaration order.
    fn primitives() -> Vec<Self> {
        Self::variants()
            .iter()
            .zip(Self::entries())
            .filter(|(_, entry)| entry.is_primitive())
            .map(|(flag, _)| *flag)
            .collect()
    }

    /// Union of every primitive flag.
    fn all_mask() -> u32 {
        Self::entries()
            .iter()
            .filter(|entry| entry.is_primitive())
            .fold(0, |mask, entry| mask | entry.value as u32)
    }

    /// Bits of `mask` that no primitive flag covers.
    fn unknown_bits(mask: u32) -> u32 {
        mask & !Self::all_mask()
    }

    fn contains(mask: u32, flag: Self) -> bool {
        let bits = flag.value() as u32;
        mask & bits == bits
    }
}

/// Constant for a decoded wire value; unknown values are an error.
pub fn from_wire_value<E: Enumeration>(value: i32) -> CodecResult<E> {
    E::value_of(value).ok_or(CodecError::UnknownEnumValue {
        type_name: E::TYPE_NAME,
        value,
    })
}

/// `Name_Value`, the XML symbol of a constant.
pub fn xml_symbol<E: Enumeration>(value: E) -> String {
    format!("{}_{}", value.name(), value.value())
}

/// Parse an XML enumeration symbol. The value part decides; a bare name or a
/// bare number is accepted as well.
pub fn parse_xml_symbol<E: Enumeration>(text: &str) -> CodecResult<E> {
    let text = text.trim();
    if let Some((_, value)) = text.rsplit_once('_') {
        if let Ok(value) = value.parse::<i32>() {
            return from_wire_value(value);
        }
    }
    if let Ok(value) = text.parse::<i32>() {
        return from_wire_value(value);
    }
    E::from_name(text).ok_or_else(|| {
        CodecError::InvalidData(format!("{text:?} is not a {} constant", E::TYPE_NAME))
    })
}
