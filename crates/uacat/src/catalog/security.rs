// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Certificates, signatures and user identity tokens.

use super::enumerations::TrustListMasks;
use crate::enumeration::Bitmask;
use crate::types::ByteString;
use crate::{Encodable, Structure};

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=344", binary = "i=346", xml = "i=345")]
pub struct SignedSoftwareCertificate {
    pub certificate_data: ByteString,
    pub signature: ByteString,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=456", binary = "i=458", xml = "i=457")]
pub struct SignatureData {
    pub algorithm: Option<String>,
    pub signature: ByteString,
}

/// Certificates and revocation lists held by a trust list. Each list may
/// be null, which is distinct from empty.
#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=12554", binary = "i=12680", xml = "i=12676")]
pub struct TrustListDataType {
    /// [`TrustListMasks`] bits naming the lists that are present.
    pub specified_lists: u32,
    pub trusted_certificates: Option<Vec<ByteString>>,
    pub trusted_crls: Option<Vec<ByteString>>,
    pub issuer_certificates: Option<Vec<ByteString>>,
    pub issuer_crls: Option<Vec<ByteString>>,
}

impl TrustListDataType {
    pub fn specified(&self) -> Vec<TrustListMasks> {
        TrustListMasks::get_set(self.specified_lists)
    }
}

/// Fields shared by every user identity token. Has no encoding ids of its
/// own; concrete tokens embed it with `#[ua(flatten)]`.
#[derive(Debug, Clone, Default, Encodable)]
pub struct UserIdentityToken {
    pub policy_id: Option<String>,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=319", binary = "i=321", xml = "i=320")]
pub struct AnonymousIdentityToken {
    #[ua(flatten)]
    pub token: UserIdentityToken,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=322", binary = "i=324", xml = "i=323")]
pub struct UserNameIdentityToken {
    #[ua(flatten)]
    pub token: UserIdentityToken,
    pub user_name: Option<String>,
    /// Encrypted with the server certificate unless `encryption_algorithm`
    /// is null.
    pub password: ByteString,
    pub encryption_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=325", binary = "i=327", xml = "i=326")]
pub struct X509IdentityToken {
    #[ua(flatten)]
    pub token: UserIdentityToken,
    pub certificate_data: ByteString,
}
