// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service request and response messages.
//!
//! These are the structures [`codec::message`](crate::codec::message) frames:
//! a binary encoding id followed by the body.

use super::enumerations::TimestampsToReturn;
use super::security::{SignatureData, SignedSoftwareCertificate};
use crate::extension::ExtensionObject;
use crate::types::{DataValue, DateTime, DiagnosticInfo, NodeId, QualifiedName, StatusCode};
use crate::variant::Variant;
use crate::Structure;

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=389", binary = "i=391", xml = "i=390")]
pub struct RequestHeader {
    pub authentication_token: NodeId,
    pub timestamp: DateTime,
    pub request_handle: u32,
    pub return_diagnostics: u32,
    pub audit_entry_id: Option<String>,
    /// Milliseconds; 0 means no timeout.
    pub timeout_hint: u32,
    pub additional_header: ExtensionObject,
}

impl RequestHeader {
    pub fn new(authentication_token: NodeId, request_handle: u32) -> Self {
        Self {
            authentication_token,
            timestamp: DateTime::now(),
            request_handle,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=392", binary = "i=394", xml = "i=393")]
pub struct ResponseHeader {
    pub timestamp: DateTime,
    pub request_handle: u32,
    pub service_result: StatusCode,
    pub service_diagnostics: DiagnosticInfo,
    pub string_table: Option<Vec<String>>,
    pub additional_header: ExtensionObject,
}

impl ResponseHeader {
    /// Header answering `request` with `service_result`.
    pub fn for_request(request: &RequestHeader, service_result: StatusCode) -> Self {
        Self {
            timestamp: DateTime::now(),
            request_handle: request.request_handle,
            service_result,
            ..Self::default()
        }
    }
}

/// Response to any request that failed as a whole.
#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=395", binary = "i=397", xml = "i=396")]
pub struct ServiceFault {
    pub response_header: ResponseHeader,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=626", binary = "i=628", xml = "i=627")]
pub struct ReadValueId {
    pub node_id: NodeId,
    pub attribute_id: u32,
    pub index_range: Option<String>,
    pub data_encoding: QualifiedName,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=629", binary = "i=631", xml = "i=630")]
pub struct ReadRequest {
    pub request_header: RequestHeader,
    pub max_age: f64,
    pub timestamps_to_return: TimestampsToReturn,
    pub nodes_to_read: Option<Vec<ReadValueId>>,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=632", binary = "i=634", xml = "i=633")]
pub struct ReadResponse {
    pub response_header: ResponseHeader,
    pub results: Option<Vec<DataValue>>,
    pub diagnostic_infos: Option<Vec<DiagnosticInfo>>,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=704", binary = "i=706", xml = "i=705")]
pub struct CallMethodRequest {
    pub object_id: NodeId,
    pub method_id: NodeId,
    pub input_arguments: Option<Vec<Variant>>,
}

/// Session activation. `user_identity_token` holds one of the identity
/// token structures, usually still raw when the message is first decoded.
#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=465", binary = "i=467", xml = "i=466")]
pub struct ActivateSessionRequest {
    pub request_header: RequestHeader,
    pub client_signature: SignatureData,
    pub client_software_certificates: Option<Vec<SignedSoftwareCertificate>>,
    pub locale_ids: Option<Vec<String>>,
    pub user_identity_token: ExtensionObject,
    pub user_token_signature: SignatureData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::security::{UserIdentityToken, UserNameIdentityToken};
    use crate::codec::message::{decode_message, encode_message, DecodedMessage};
    use crate::codec::{decode_xml, encode_xml};
    use crate::types::ByteString;
    use crate::{DecodingLimits, TypeRegistry};

    fn catalog() -> TypeRegistry {
        TypeRegistry::with_catalog().unwrap().build()
    }

    fn read_request() -> ReadRequest {
        ReadRequest {
            request_header: RequestHeader {
                authentication_token: NodeId::numeric(1, 42),
                timestamp: DateTime::from_ticks(133_000_000_000_000_000),
                request_handle: 7,
                timeout_hint: 10_000,
                ..Default::default()
            },
            max_age: 500.0,
            timestamps_to_return: TimestampsToReturn::Both,
            nodes_to_read: Some(vec![ReadValueId {
                node_id: NodeId::string(2, "Pump.Speed"),
                attribute_id: 13,
                ..Default::default()
            }]),
        }
    }

    #[test]
    fn read_request_through_message_framing() {
        let request = read_request();
        let bytes = encode_message(&request).unwrap();
        let decoded = decode_message(&bytes, &catalog()).unwrap();
        assert_eq!(decoded.type_id(), &NodeId::numeric(0, 631));
        let DecodedMessage::Known(value) = decoded else {
            panic!("ReadRequest should be known")
        };
        assert_eq!(value.downcast_ref::<ReadRequest>(), Some(&request));
    }

    #[test]
    fn read_response_carries_values() {
        let response = ReadResponse {
            response_header: ResponseHeader::for_request(
                &read_request().request_header,
                StatusCode::GOOD,
            ),
            results: Some(vec![DataValue::new(1450.0f64), DataValue::default()]),
            diagnostic_infos: None,
        };
        assert_eq!(response.response_header.request_handle, 7);
        let xml = encode_xml(&response).unwrap();
        let back: ReadResponse = decode_xml(&xml, &DecodingLimits::default()).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn identity_token_resolves_from_raw() {
        let token = UserNameIdentityToken {
            token: UserIdentityToken {
                policy_id: Some("user".into()),
            },
            user_name: Some("operator".into()),
            password: ByteString::from(b"pw"),
            encryption_algorithm: None,
        };
        let request = ActivateSessionRequest {
            user_identity_token: ExtensionObject::from_structure(token.clone()),
            ..Default::default()
        };
        let registry = catalog();
        let bytes = encode_message(&request).unwrap();

        let DecodedMessage::Known(value) = decode_message(&bytes, &registry).unwrap() else {
            panic!("ActivateSessionRequest should be known")
        };
        let decoded = value.downcast_ref::<ActivateSessionRequest>().unwrap();
        // nested bodies stay raw until asked for
        assert!(decoded.user_identity_token.is_raw());
        let resolved = decoded.user_identity_token.resolve(&registry).unwrap();
        assert_eq!(resolved.downcast_ref::<UserNameIdentityToken>(), Some(&token));
    }

    #[test]
    fn service_fault_is_registered() {
        let registry = catalog();
        let descriptor = registry.resolve(&NodeId::numeric(0, 397)).unwrap();
        assert_eq!(descriptor.type_name, "ServiceFault");
    }
}
