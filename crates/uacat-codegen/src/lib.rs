// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Derive macros for `uacat` catalog types.
//!
//! - `#[derive(Structure)]`: a registrable structure with an identity.
//! - `#[derive(Encodable)]`: the same codecs without an identity, for base
//!   payloads embedded with `#[ua(flatten)]`.
//! - `#[derive(Enumeration)]`: ordinal or bitmask enumerations.

extern crate proc_macro;

mod attrs;
mod enumeration;
mod structure;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// `#[derive(Structure)]`: generates `StructureType`, `Structural`,
/// `PartialEq`/`Eq`/`Hash`, and both codecs.
///
/// Fields are encoded in declaration order. In XML each field is a child
/// element named in PascalCase unless renamed.
///
/// Example:
/// ```ignore
/// use uacat::Structure;
///
/// #[derive(Debug, Clone, Default, Structure)]
/// #[ua(name = "Range", id = "i=884", binary = "i=886", xml = "i=885")]
/// pub struct Range {
///     pub low: f64,
///     pub high: f64,
/// }
/// ```
///
/// Container attributes: `name`, `id`, `binary`, `xml` (node id text,
/// numeric or string identifiers). Field attributes: `rename = "EURange"`,
/// `flatten`.
#[proc_macro_derive(Structure, attributes(ua))]
pub fn derive_structure(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    structure::expand(&input, true)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[derive(Encodable)]`: like `Structure` but without an identity. Used
/// for payloads that only ever appear embedded in another structure.
#[proc_macro_derive(Encodable, attributes(ua))]
pub fn derive_encodable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    structure::expand(&input, false)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[derive(Enumeration)]` on a fieldless enum.
///
/// Discriminants are the wire values. Plain enumerations also get an `Int32`
/// binary codec and a `Name_Value` XML codec. `#[ua(bitmask)]` implements
/// `Bitmask`; variants marked `#[ua(composite)]` are left out of mask
/// decomposition.
///
/// Example:
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
/// #[ua(bitmask)]
/// pub enum TrustListMasks {
///     #[default]
///     None = 0,
///     TrustedCertificates = 1,
///     TrustedCrls = 2,
///     #[ua(composite)]
///     Trusted = 3,
/// }
/// ```
#[proc_macro_derive(Enumeration, attributes(ua))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enumeration::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
