// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! A sample of the standard namespace-0 data types.
//!
//! Every structure here carries its real encoding ids, so values produced
//! by other stacks decode into them. [`register_all`] adds all of them to a
//! registry builder; [`TypeRegistry::with_catalog`](crate::TypeRegistry::with_catalog)
//! is the usual entry point.

pub mod common;
pub mod enumerations;
pub mod security;
pub mod services;

pub use common::{Argument, AxisInformation, EUInformation, Range};
pub use enumerations::{
    AccessLevelType, AxisScaleEnumeration, BrowseDirection, EventNotifierType,
    MessageSecurityMode, NodeClass, TimestampsToReturn, TrustListMasks, UserTokenType,
};
pub use security::{
    AnonymousIdentityToken, SignatureData, SignedSoftwareCertificate, TrustListDataType,
    UserIdentityToken, UserNameIdentityToken, X509IdentityToken,
};
pub use services::{
    ActivateSessionRequest, CallMethodRequest, ReadRequest, ReadResponse, ReadValueId,
    RequestHeader, ResponseHeader, ServiceFault,
};

use crate::registry::{RegistryError, StructureDescriptor, TypeRegistryBuilder};

/// Descriptors of every catalog structure.
pub fn descriptors() -> Vec<StructureDescriptor> {
    vec![
        StructureDescriptor::of::<Range>(),
        StructureDescriptor::of::<EUInformation>(),
        StructureDescriptor::of::<Argument>(),
        StructureDescriptor::of::<AxisInformation>(),
        StructureDescriptor::of::<SignedSoftwareCertificate>(),
        StructureDescriptor::of::<SignatureData>(),
        StructureDescriptor::of::<TrustListDataType>(),
        StructureDescriptor::of::<AnonymousIdentityToken>(),
        StructureDescriptor::of::<UserNameIdentityToken>(),
        StructureDescriptor::of::<X509IdentityToken>(),
        StructureDescriptor::of::<RequestHeader>(),
        StructureDescriptor::of::<ResponseHeader>(),
        StructureDescriptor::of::<ServiceFault>(),
        StructureDescriptor::of::<ReadValueId>(),
        StructureDescriptor::of::<ReadRequest>(),
        StructureDescriptor::of::<ReadResponse>(),
        StructureDescriptor::of::<CallMethodRequest>(),
        StructureDescriptor::of::<ActivateSessionRequest>(),
    ]
}

/// Register every catalog structure with `builder`.
///
/// Fails if `builder` already holds a type claiming one of the catalog ids.
pub fn register_all(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    for descriptor in descriptors() {
        builder.register_descriptor(descriptor)?;
    }
    log::debug!("[registry] catalog registered ({} structures)", builder.len());
    Ok(())
}
