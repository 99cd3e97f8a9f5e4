// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in wire types.
//!
//! Each type carries its binary and XML codec and implements
//! [`Structural`](crate::Structural), so structures can hold them directly.

mod builtin;
mod byte_string;
mod data_value;
mod date_time;
mod diagnostic_info;
mod guid;
mod node_id;
mod status_code;
mod text;

pub use builtin::BuiltinType;
pub use byte_string::{ByteString, XmlElement};
pub use data_value::DataValue;
pub use date_time::DateTime;
pub use diagnostic_info::DiagnosticInfo;
pub use guid::{Guid, ParseGuidError};
pub use node_id::{ExpandedNodeId, Identifier, NodeId, ParseNodeIdError};
pub use status_code::StatusCode;
pub use text::{LocalizedText, QualifiedName};
