// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Property tests: decoders never panic on arbitrary input, structural
// equality is reflexive through clones, and mask decomposition is lossless
// for known bits.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use uacat::catalog::{AccessLevelType, EUInformation, Range, ReadRequest, TrustListMasks};
use uacat::codec::message::decode_message;
use uacat::codec::{decode_binary, decode_xml, encode_binary};
use uacat::{
    Bitmask, BuiltinType, DecodingLimits, ExtensionObject, LocalizedText, Scalar, TypeRegistry,
    Variant,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn variant_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_binary::<Variant>(&bytes, &DecodingLimits::default());
    }

    #[test]
    fn extension_object_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_binary::<ExtensionObject>(&bytes, &DecodingLimits::default());
    }

    #[test]
    fn message_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let registry = TypeRegistry::with_catalog().unwrap().build();
        let _ = decode_message(&bytes, &registry);
        let _ = decode_binary::<ReadRequest>(&bytes, registry.limits());
    }

    #[test]
    fn xml_variant_decode_never_panics(text in "\\PC{0,200}") {
        let xml = format!("<Variant>{text}</Variant>");
        let _ = decode_xml::<Variant>(&xml, &DecodingLimits::default());
    }

    #[test]
    fn clone_equals_original(low in any::<f64>(), high in any::<f64>()) {
        let range = Range::new(low, high);
        let copy = range.clone();
        prop_assert_eq!(&copy, &range);
        prop_assert_eq!(hash_of(&copy), hash_of(&range));
    }

    #[test]
    fn structure_binary_round_trip(
        uri in proptest::option::of("[a-z:/.]{0,40}"),
        unit_id in any::<i32>(),
        text in "\\PC{0,40}",
    ) {
        let value = EUInformation {
            namespace_uri: uri,
            unit_id,
            display_name: LocalizedText::text(text),
            description: LocalizedText::default(),
        };
        let bytes = encode_binary(&value).unwrap();
        let back: EUInformation = decode_binary(&bytes, &DecodingLimits::default()).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn mask_decomposition_keeps_known_bits(mask in any::<u32>()) {
        let flags = AccessLevelType::get_set(mask);
        prop_assert_eq!(AccessLevelType::get_mask(&flags), mask & AccessLevelType::all_mask());
        prop_assert!(flags.iter().all(|flag| AccessLevelType::contains(mask, *flag)));

        let lists = TrustListMasks::get_set(mask);
        prop_assert!(lists.len() <= 4);
        prop_assert!(!lists.contains(&TrustListMasks::All));
    }

    #[test]
    fn matrix_requires_matching_product(
        rows in 0u32..6,
        cols in 0u32..6,
        extra in 0usize..3,
    ) {
        let count = (rows * cols) as usize + extra;
        let elements: Vec<Scalar> = (0..count as i32).map(Scalar::Int32).collect();
        let result = Variant::matrix(BuiltinType::Int32, elements, vec![rows, cols]);
        prop_assert_eq!(result.is_ok(), extra == 0);
        if let Ok(matrix) = result {
            let flat = matrix.as_array(None).unwrap();
            prop_assert_eq!(flat.len(), count);
            prop_assert_eq!(flat.as_array(Some(&[rows, cols])).unwrap(), matrix);
        }
    }
}
