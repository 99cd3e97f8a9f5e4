// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Benchmark
//!
//! Measures the hot paths of a transport's data layer:
//! - registry lookup by encoding id (hit and miss)
//! - message dispatch of a ReadRequest through the registry
//! - binary and XML encoding of a ReadResponse carrying variants
//! - resolution of an array of raw extension objects

#![allow(clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uacat::catalog::{
    EUInformation, Range, ReadRequest, ReadResponse, ReadValueId, RequestHeader, ResponseHeader,
    TimestampsToReturn,
};
use uacat::codec::message::{decode_message, encode_message};
use uacat::codec::{decode_binary, encode_binary, encode_xml};
use uacat::{DataValue, ExtensionObject, LocalizedText, NodeId, StatusCode, TypeRegistry, Variant};

fn read_request(nodes: u32) -> ReadRequest {
    ReadRequest {
        request_header: RequestHeader::new(NodeId::numeric(1, 42), 1),
        max_age: 0.0,
        timestamps_to_return: TimestampsToReturn::Both,
        nodes_to_read: Some(
            (0..nodes)
                .map(|i| ReadValueId {
                    node_id: NodeId::numeric(2, 1000 + i),
                    attribute_id: 13,
                    ..Default::default()
                })
                .collect(),
        ),
    }
}

fn read_response(values: usize) -> ReadResponse {
    ReadResponse {
        response_header: ResponseHeader::for_request(
            &RequestHeader::new(NodeId::numeric(1, 42), 1),
            StatusCode::GOOD,
        ),
        results: Some(
            (0..values)
                .map(|i| DataValue::new(Variant::from(vec![i as f64; 8])))
                .collect(),
        ),
        diagnostic_infos: None,
    }
}

fn bench_registry_lookup(c: &mut Criterion) {
    let registry = TypeRegistry::with_catalog().unwrap().build();
    let hit = NodeId::numeric(0, 631);
    let miss = NodeId::numeric(3, 631);

    let mut group = c.benchmark_group("registry_lookup");
    group.bench_function("hit", |b| b.iter(|| registry.resolve(black_box(&hit))));
    group.bench_function("miss", |b| b.iter(|| registry.resolve(black_box(&miss))));
    group.finish();
}

fn bench_message_dispatch(c: &mut Criterion) {
    let registry = TypeRegistry::with_catalog().unwrap().build();
    let mut group = c.benchmark_group("message_dispatch");
    for nodes in [1u32, 16, 256] {
        let bytes = encode_message(&read_request(nodes)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &bytes, |b, bytes| {
            b.iter(|| decode_message(black_box(bytes), &registry).unwrap());
        });
    }
    group.finish();
}

fn bench_response_encoding(c: &mut Criterion) {
    let response = read_response(64);
    let bytes = encode_binary(&response).unwrap();
    let limits = uacat::DecodingLimits::default();

    let mut group = c.benchmark_group("read_response_64");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("binary_encode", |b| {
        b.iter(|| encode_binary(black_box(&response)).unwrap());
    });
    group.bench_function("binary_decode", |b| {
        b.iter(|| decode_binary::<ReadResponse>(black_box(&bytes), &limits).unwrap());
    });
    group.bench_function("xml_encode", |b| {
        b.iter(|| encode_xml(black_box(&response)).unwrap());
    });
    group.finish();
}

fn bench_extension_resolution(c: &mut Criterion) {
    let registry = TypeRegistry::with_catalog().unwrap().build();
    let objects: Vec<ExtensionObject> = (0..100)
        .map(|i| {
            if i % 2 == 0 {
                ExtensionObject::from(Range::new(0.0, f64::from(i)))
            } else {
                ExtensionObject::from(EUInformation {
                    unit_id: i,
                    display_name: LocalizedText::text("m"),
                    ..Default::default()
                })
            }
        })
        .collect();
    let bytes = encode_binary(&Variant::from(objects)).unwrap();
    let raw: Variant = decode_binary(&bytes, registry.limits()).unwrap();

    c.bench_function("resolve_100_extension_objects", |b| {
        b.iter(|| black_box(&raw).resolve(&registry).unwrap());
    });
}

criterion_group!(
    benches,
    bench_registry_lookup,
    bench_message_dispatch,
    bench_response_encoding,
    bench_extension_resolution
);
criterion_main!(benches);
