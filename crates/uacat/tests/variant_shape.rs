// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Variant shape rules: scalar/array/matrix rank, homogeneous elements,
// dimension products, and the as_array / as_scalar conversions.

#![allow(clippy::float_cmp)]

use uacat::codec::{decode_binary, encode_binary, BinaryWriter, CodecError};
use uacat::{
    ArrayValue, BuiltinType, DecodingLimits, Rank, Scalar, StatusCode, Variant, VariantError,
};

fn ints(values: &[i32]) -> Vec<Scalar> {
    values.iter().copied().map(Scalar::Int32).collect()
}

#[test]
fn rank_follows_the_shape() {
    assert_eq!(Variant::Empty.rank(), None);
    assert_eq!(Variant::from(5i32).rank(), Some(Rank::Scalar));
    assert_eq!(Variant::from(vec![1i32, 2]).rank(), Some(Rank::Array));
    let matrix = Variant::matrix(BuiltinType::Int32, ints(&[1, 2, 3, 4, 5, 6]), vec![2, 3]).unwrap();
    assert_eq!(matrix.rank(), Some(Rank::Matrix(vec![2, 3])));
    assert_eq!(matrix.dimensions(), Some(&[2u32, 3][..]));
    assert_eq!(matrix.len(), 6);
    assert_eq!(matrix.type_tag(), Some(BuiltinType::Int32));
}

#[test]
fn mixed_elements_are_rejected() {
    let err = Variant::array(
        BuiltinType::Int32,
        vec![Scalar::Int32(1), Scalar::Double(2.0), Scalar::Int32(3)],
    )
    .unwrap_err();
    assert_eq!(
        err,
        VariantError::ElementTypeMismatch {
            expected: BuiltinType::Int32,
            found: BuiltinType::Double,
            index: 1,
        }
    );
}

#[test]
fn dimension_product_must_match() {
    let err = Variant::matrix(BuiltinType::Int32, ints(&[1, 2, 3, 4, 5]), vec![2, 3]).unwrap_err();
    assert_eq!(
        err,
        VariantError::ShapeMismatch {
            dimensions: vec![2, 3],
            actual: 5,
        }
    );
    // a zero dimension means no elements
    let empty = Variant::matrix(BuiltinType::Int32, Vec::new(), vec![0, 4]).unwrap();
    assert_eq!(empty.len(), 0);
}

#[test]
fn huge_dimensions_do_not_overflow() {
    let err = Variant::matrix(
        BuiltinType::Byte,
        vec![Scalar::Byte(0)],
        vec![u32::MAX, u32::MAX, u32::MAX],
    )
    .unwrap_err();
    assert!(matches!(err, VariantError::ShapeMismatch { .. }));
}

#[test]
fn scalar_cannot_hold_a_variant() {
    let inner = Box::new(Variant::from(1i32));
    assert_eq!(
        Variant::scalar(Scalar::Variant(inner.clone())).unwrap_err(),
        VariantError::NestedScalarVariant
    );
    // but an array of variants is fine, and may be heterogeneous
    let array = Variant::from(vec![Variant::from(1i32), Variant::from("two"), Variant::Empty]);
    assert_eq!(array.type_tag(), Some(BuiltinType::Variant));
    assert_eq!(array.len(), 3);
}

#[test]
fn as_array_reshapes_without_changing_elements() {
    let flat = Variant::from(vec![1i32, 2, 3, 4, 5, 6]);
    let matrix = flat.as_array(Some(&[3, 2])).unwrap();
    assert_eq!(matrix.rank(), Some(Rank::Matrix(vec![3, 2])));
    assert_eq!(matrix.as_array(None).unwrap(), flat);

    assert!(matches!(
        flat.as_array(Some(&[4, 2])),
        Err(VariantError::ShapeMismatch { .. })
    ));

    let one = Variant::from(StatusCode::BAD).as_array(None).unwrap();
    assert_eq!(one.rank(), Some(Rank::Array));
    assert_eq!(one.len(), 1);

    assert_eq!(Variant::Empty.as_array(None), Err(VariantError::Empty));
}

#[test]
fn as_scalar_unwraps_single_elements() {
    assert_eq!(
        Variant::from(vec![7.5f64]).as_scalar().unwrap(),
        Variant::from(7.5f64)
    );
    let wrapped = Variant::from(vec![Variant::from("inner")]);
    assert_eq!(wrapped.as_scalar().unwrap(), Variant::from("inner"));

    assert_eq!(
        Variant::from(vec![1u8, 2]).as_scalar(),
        Err(VariantError::NotScalar { len: 2 })
    );
    assert_eq!(
        Variant::Empty.as_scalar(),
        Err(VariantError::NotScalar { len: 0 })
    );
}

#[test]
fn typed_accessors() {
    let value = Variant::from(42u16);
    assert_eq!(value.as_u16(), Some(42));
    assert_eq!(value.as_i32(), None);
    assert_eq!(Variant::from("pump").as_str(), Some("pump"));
    assert_eq!(Variant::from(vec![1i32]).as_i32(), None);
}

#[test]
fn matrix_round_trips_through_binary() {
    let matrix = Variant::matrix(
        BuiltinType::String,
        ["a", "b", "c", "d"]
            .into_iter()
            .map(|s| Scalar::String(s.to_string()))
            .collect(),
        vec![2, 2],
    )
    .unwrap();
    let bytes = encode_binary(&matrix).unwrap();
    assert_eq!(bytes[0], 0xC0 | BuiltinType::String.id());
    let back: Variant = decode_binary(&bytes, &DecodingLimits::default()).unwrap();
    assert_eq!(back, matrix);
}

#[test]
fn wire_matrix_with_wrong_product_fails_to_decode() {
    let mut writer = BinaryWriter::new();
    writer.write_u8(0xC0 | BuiltinType::Int32.id());
    writer.write_i32(3);
    for v in [1, 2, 3] {
        writer.write_i32(v);
    }
    writer.write_i32(2);
    writer.write_i32(2);
    writer.write_i32(2);
    let err = decode_binary::<Variant>(writer.as_bytes(), &DecodingLimits::default()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Variant(VariantError::ShapeMismatch { actual: 3, .. })
    ));
}

#[test]
fn array_length_limit_applies() {
    let limits = DecodingLimits {
        max_array_length: 4,
        ..DecodingLimits::default()
    };
    let bytes = encode_binary(&Variant::from(vec![0u32; 5])).unwrap();
    assert!(decode_binary::<Variant>(&bytes, &limits).is_err());
}

#[test]
fn array_value_accessors() {
    let array = ArrayValue::new(BuiltinType::Boolean, vec![Scalar::Boolean(true)]).unwrap();
    assert!(!array.is_matrix());
    assert_eq!(array.elements(), &[Scalar::Boolean(true)]);
    let reshaped = array.reshape(Some(&[1, 1])).unwrap();
    assert!(reshaped.is_matrix());
    assert_eq!(reshaped.into_elements(), vec![Scalar::Boolean(true)]);
}
