// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Structure contract: identity, deep equality, hashing and both codecs for
// derived structures.

#![allow(clippy::float_cmp)]

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use uacat::catalog::{Argument, EUInformation, Range};
use uacat::codec::{decode_binary, decode_xml, encode_binary, encode_xml};
use uacat::{DecodingLimits, LocalizedText, NodeId, Structure, StructureType, Variant};

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "ns=3;i=100", binary = "ns=3;i=101", xml = "ns=3;i=102")]
struct Sample {
    name: Option<String>,
    reading: f64,
    tags: Option<Vec<String>>,
    unit: EUInformation,
    value: Variant,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(
    name = "SampleAlias",
    id = "ns=3;s=Alias",
    binary = "ns=3;s=Alias.Binary",
    xml = "ns=3;s=Alias.Xml"
)]
struct Aliased {
    name: Option<String>,
    reading: f64,
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn sample() -> Sample {
    Sample {
        name: Some("inlet".into()),
        reading: 21.5,
        tags: Some(vec!["a".into(), "b".into()]),
        unit: EUInformation {
            unit_id: 4408652,
            display_name: LocalizedText::new("en", "°C"),
            ..Default::default()
        },
        value: Variant::from(vec![1i32, 2, 3]),
    }
}

#[test]
fn identity_is_static_and_distinct() {
    let identity = Sample::type_identity();
    assert_eq!(identity.abstract_id, NodeId::numeric(3, 100));
    assert_eq!(identity.binary_id, NodeId::numeric(3, 101));
    assert_eq!(identity.xml_id, NodeId::numeric(3, 102));
    assert!(identity.is_distinct());
    assert!(std::ptr::eq(identity, Sample::type_identity()));
    assert_eq!(Sample::TYPE_NAME, "Sample");

    let alias = Aliased::type_identity();
    assert_eq!(alias.binary_id, NodeId::string(3, "Alias.Binary"));
    assert_eq!(Aliased::TYPE_NAME, "SampleAlias");
}

#[test]
fn clone_is_equal_even_with_nan() {
    let mut value = sample();
    value.reading = f64::NAN;
    let copy = value.clone();
    assert_eq!(copy, value);
    assert_eq!(hash_of(&copy), hash_of(&value));
}

#[test]
fn mutating_a_clone_leaves_the_original() {
    let original = sample();
    let mut copy = original.clone();
    copy.tags.as_mut().unwrap().push("c".into());
    copy.unit.display_name = LocalizedText::text("K");
    copy.value = Variant::from(vec![9i32]);
    assert_eq!(original.tags.as_ref().unwrap().len(), 2);
    assert_eq!(original.unit.display_name, LocalizedText::new("en", "°C"));
    assert_eq!(original, sample());
    assert_ne!(copy, original);
}

#[test]
fn every_field_takes_part_in_equality() {
    let base = sample();

    let mut other = base.clone();
    other.tags = None;
    assert_ne!(other, base);

    let mut other = base.clone();
    other.tags = Some(Vec::new());
    assert_ne!(other, base, "empty list differs from a null one");

    let mut other = base.clone();
    other.unit.unit_id += 1;
    assert_ne!(other, base);

    let mut other = base.clone();
    other.reading = -0.0;
    let mut zero = base.clone();
    zero.reading = 0.0;
    assert_ne!(other, zero);
}

#[test]
fn equal_values_collapse_in_hash_set() {
    let set: HashSet<Range> = [Range::new(0.0, 1.0), Range::new(0.0, 1.0), Range::new(0.0, 2.0)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn dyn_equality_requires_same_type() {
    let a: Box<dyn Structure> = Box::new(Sample {
        name: Some("x".into()),
        reading: 1.0,
        ..Default::default()
    });
    let b: Box<dyn Structure> = Box::new(Aliased {
        name: Some("x".into()),
        reading: 1.0,
    });
    assert!(*a != *b);
    assert!(*a == *a.clone());
    assert_eq!(a.type_name(), "Sample");
    assert!(a.is::<Sample>());
    assert!(b.downcast_ref::<Sample>().is_none());
}

#[test]
fn binary_fields_in_declaration_order() {
    let range = Range::new(1.0, 2.0);
    let bytes = encode_binary(&range).unwrap();
    let mut expected = 1.0f64.to_le_bytes().to_vec();
    expected.extend_from_slice(&2.0f64.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn both_codecs_round_trip() {
    let value = sample();
    let limits = DecodingLimits::default();

    let bytes = encode_binary(&value).unwrap();
    let back: Sample = decode_binary(&bytes, &limits).unwrap();
    assert_eq!(back, value);

    let xml = encode_xml(&value).unwrap();
    let back: Sample = decode_xml(&xml, &limits).unwrap();
    assert_eq!(back, value);
}

#[test]
fn missing_xml_fields_take_defaults() {
    let xml = r#"<Argument xmlns="http://opcfoundation.org/UA/2008/02/Types.xsd">
        <Name>speed</Name>
        <ValueRank>-1</ValueRank>
    </Argument>"#;
    let argument: Argument = decode_xml(xml, &DecodingLimits::default()).unwrap();
    assert_eq!(argument.name.as_deref(), Some("speed"));
    assert_eq!(argument.value_rank, -1);
    assert!(argument.data_type.is_null());
    assert_eq!(argument.array_dimensions, None);
}

#[test]
fn truncated_binary_body_fails() {
    let bytes = encode_binary(&sample()).unwrap();
    let err = decode_binary::<Sample>(&bytes[..bytes.len() - 3], &DecodingLimits::default());
    assert!(err.is_err());
}
