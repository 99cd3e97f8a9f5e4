// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Enumeration model: ordinals vs wire values, and bitmask composition /
// decomposition with composite and zero constants.

use uacat::catalog::{EventNotifierType, NodeClass, TimestampsToReturn};
use uacat::codec::{decode_binary, decode_xml, encode_binary, encode_xml, CodecError};
use uacat::{Bitmask, DecodingLimits, EnumValue, Enumeration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enumeration)]
#[ua(bitmask)]
enum Pair {
    A = 1,
    B = 2,
    #[ua(composite)]
    AB = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enumeration)]
#[ua(bitmask)]
enum Sparse {
    Nothing = 0,
    Low = 0x01,
    High = -0x8000_0000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[ua(name = "Valve")]
enum ValveState {
    #[default]
    Closed = 0,
    Open = 10,
    Fault = -1,
}

#[test]
fn composite_never_appears_in_decomposition() {
    assert_eq!(Pair::get_set(3), vec![Pair::A, Pair::B]);
    assert_eq!(Pair::get_set(2), vec![Pair::B]);
    assert_eq!(Pair::get_set(0), Vec::<Pair>::new());
    assert_eq!(Pair::get_mask(&[Pair::AB]), 3);
    assert_eq!(Pair::get_mask(&[]), 0);
    assert_eq!(Pair::primitives(), vec![Pair::A, Pair::B]);
}

#[test]
fn zero_constant_is_not_a_flag() {
    assert_eq!(Sparse::get_set(0), Vec::<Sparse>::new());
    assert_eq!(Sparse::get_set(u32::MAX), vec![Sparse::Low, Sparse::High]);
    assert_eq!(Sparse::all_mask(), 0x8000_0001);
    assert_eq!(Sparse::unknown_bits(u32::MAX), 0x7FFF_FFFE);
    // every mask contains the empty flag
    assert!(Sparse::contains(0, Sparse::Nothing));
}

#[test]
fn decompose_then_compose_keeps_known_bits() {
    for mask in [0u32, 1, 4, 5, 8, 9, 13, 0xFF, 0xFFFF_FFFF] {
        let flags = EventNotifierType::get_set(mask);
        assert_eq!(
            EventNotifierType::get_mask(&flags),
            mask & EventNotifierType::all_mask(),
            "mask {mask:#x}"
        );
    }
}

#[test]
fn entries_describe_declaration() {
    let entries: &[EnumValue] = ValveState::entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].name, "Fault");
    assert_eq!(entries[2].ordinal, 2);
    assert_eq!(entries[2].value, -1);
    assert!(!entries[2].composite);
    assert_eq!(ValveState::TYPE_NAME, "Valve");
    assert_eq!(ValveState::Open.ordinal(), 1);
    assert_eq!(ValveState::Open.value(), 10);
    assert_eq!(ValveState::from_ordinal(1), Some(ValveState::Open));
    assert_eq!(ValveState::from_name("Fault"), Some(ValveState::Fault));
    assert_eq!(ValveState::value_of(1), None);
}

#[test]
fn enumeration_wire_value_is_the_declared_value() {
    let bytes = encode_binary(&ValveState::Open).unwrap();
    assert_eq!(bytes, 10i32.to_le_bytes());
    let back: ValveState = decode_binary(&(-1i32).to_le_bytes(), &DecodingLimits::default()).unwrap();
    assert_eq!(back, ValveState::Fault);

    let err = decode_binary::<ValveState>(&1i32.to_le_bytes(), &DecodingLimits::default());
    assert!(matches!(err, Err(CodecError::UnknownEnumValue { .. })));
}

#[test]
fn enumeration_xml_accepts_symbol_name_or_number() {
    let xml = encode_xml(&NodeClass::Variable).unwrap();
    assert!(xml.contains(">Variable_2<"));

    let limits = DecodingLimits::default();
    for text in ["Both_2", "2", "Both"] {
        let xml = format!("<TimestampsToReturn>{text}</TimestampsToReturn>");
        let value: TimestampsToReturn = decode_xml(&xml, &limits).unwrap();
        assert_eq!(value, TimestampsToReturn::Both, "{text}");
    }
    let bad = decode_xml::<TimestampsToReturn>("<T>Sideways</T>", &limits);
    assert!(bad.is_err());
}
