// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uacat - OPC UA type identity, registry and polymorphic values
//!
//! The data layer under an OPC UA style transport: how structures are named
//! on the wire, how a decoder maps an encoding id back to a concrete type,
//! and how values of unknown or dynamic type travel without being lost.
//!
//! ## Quick Start
//!
//! ```rust
//! use uacat::codec::encode_binary;
//! use uacat::{ExtensionObject, NodeId, Structure, TypeRegistry};
//!
//! #[derive(Debug, Clone, Default, Structure)]
//! #[ua(id = "ns=2;i=5001", binary = "ns=2;i=5002", xml = "ns=2;i=5003")]
//! struct PumpStatus {
//!     running: bool,
//!     speed: f64,
//! }
//!
//! # fn main() -> uacat::Result<()> {
//! let mut builder = TypeRegistry::builder();
//! builder.register::<PumpStatus>()?;
//! let registry = builder.build();
//!
//! // A body as it arrives from the wire.
//! let status = PumpStatus { running: true, speed: 1450.0 };
//! let raw = ExtensionObject::Binary {
//!     type_id: NodeId::numeric(2, 5002),
//!     body: encode_binary(&status)?,
//! };
//!
//! let resolved = raw.resolve(&registry)?;
//! assert_eq!(resolved.downcast_ref::<PumpStatus>(), Some(&status));
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Identity`] | Abstract, binary-encoding and XML-encoding ids of a structure |
//! | [`Structure`] | Object-safe contract every catalog structure implements |
//! | [`TypeRegistry`] | Frozen encoding id -> descriptor table |
//! | [`ExtensionObject`] | Structure of any type, raw until resolved |
//! | [`Variant`] | Scalar, array or matrix of one built-in type |
//! | [`Enumeration`] / [`Bitmask`] | Ordinal and flag enumerations |
//!
//! ## Modules Overview
//!
//! - [`codec`] - binary and XML codecs, message framing
//! - [`types`] - the built-in wire types
//! - [`catalog`] - a sample of standard catalog types
//! - [`config`] - decoding limits, YAML loading

// Lets `#[derive(Structure)]` output (which names `::uacat`) expand inside
// this crate too.
extern crate self as uacat;

pub mod catalog;
pub mod codec;
pub mod config;
pub mod enumeration;
mod error;
pub mod extension;
pub mod identity;
pub mod registry;
pub mod structure;
pub mod types;
pub mod variant;

pub use config::{CodecConfig, ConfigError, DecodingLimits};
pub use enumeration::{Bitmask, EnumValue, Enumeration};
pub use error::{Error, Result};
pub use extension::{BodyEncoding, ExtensionError, ExtensionObject};
pub use identity::{IdRole, Identity};
pub use registry::{RegistryError, StructureDescriptor, TypeRegistry, TypeRegistryBuilder};
pub use structure::{Structural, Structure, StructureType};
pub use types::{
    BuiltinType, ByteString, DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, Guid,
    Identifier, LocalizedText, NodeId, QualifiedName, StatusCode, XmlElement,
};
pub use variant::{ArrayValue, Rank, Scalar, Variant, VariantError};

// Derive macros share their trait's name.
pub use uacat_codegen::{Encodable, Enumeration, Structure};
