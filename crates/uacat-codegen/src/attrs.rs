// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `#[ua(...)]` attribute parsing.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitStr};

#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<LitStr>,
    pub id: Option<LitStr>,
    pub binary: Option<LitStr>,
    pub xml: Option<LitStr>,
    pub bitmask: bool,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("ua")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("id") {
                    out.id = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("binary") {
                    out.binary = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("xml") {
                    out.xml = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("bitmask") {
                    out.bitmask = true;
                } else {
                    return Err(meta.error("unsupported ua attribute"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct FieldAttrs {
    pub rename: Option<LitStr>,
    pub flatten: bool,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("ua")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("flatten") {
                    out.flatten = true;
                } else {
                    return Err(meta.error("unsupported ua field attribute"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct VariantAttrs {
    pub composite: bool,
}

impl VariantAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("ua")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("composite") {
                    out.composite = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported ua variant attribute"))
                }
            })?;
        }
        Ok(out)
    }
}

/// A node id parsed from attribute text.
#[derive(PartialEq, Eq)]
pub enum NodeIdLit {
    Numeric(u16, u32),
    String(u16, String),
}

impl NodeIdLit {
    /// Accepts `i=884`, `ns=2;i=5001`, `ns=2;s=Pump`.
    pub fn parse(lit: &LitStr) -> syn::Result<Self> {
        let text = lit.value();
        let err = |msg: &str| syn::Error::new_spanned(lit, format!("invalid node id {text:?}: {msg}"));
        let (namespace, rest) = match text.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, rest) = rest
                    .split_once(';')
                    .ok_or_else(|| err("expected ';' after namespace"))?;
                let ns = ns.parse::<u16>().map_err(|_| err("namespace is not a u16"))?;
                (ns, rest)
            }
            None => (0, text.as_str()),
        };
        if let Some(value) = rest.strip_prefix("i=") {
            let value = value.parse::<u32>().map_err(|_| err("identifier is not a u32"))?;
            Ok(NodeIdLit::Numeric(namespace, value))
        } else if let Some(value) = rest.strip_prefix("s=") {
            Ok(NodeIdLit::String(namespace, value.to_string()))
        } else {
            Err(err("only numeric (i=) and string (s=) identifiers are supported"))
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        match self {
            NodeIdLit::Numeric(ns, value) => quote! { ::uacat::NodeId::numeric(#ns, #value) },
            NodeIdLit::String(ns, value) => quote! { ::uacat::NodeId::string(#ns, #value) },
        }
    }
}

/// `engineering_units` -> `EngineeringUnits`
pub fn pascal_case(ident: &str) -> String {
    ident
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_conversion() {
        assert_eq!(pascal_case("low"), "Low");
        assert_eq!(pascal_case("namespace_uri"), "NamespaceUri");
        assert_eq!(pascal_case("r#type"), "Type");
        assert_eq!(pascal_case("axis_steps"), "AxisSteps");
    }

    #[test]
    fn node_id_literals() {
        let lit = |s: &str| LitStr::new(s, proc_macro2::Span::call_site());
        assert!(matches!(NodeIdLit::parse(&lit("i=884")), Ok(NodeIdLit::Numeric(0, 884))));
        assert!(matches!(
            NodeIdLit::parse(&lit("ns=2;s=Pump")),
            Ok(NodeIdLit::String(2, ref s)) if s == "Pump"
        ));
        assert!(NodeIdLit::parse(&lit("ns=1;g=72962B91-FA75-4AE6-8D28-B404DC7DAF63")).is_err());
        assert!(NodeIdLit::parse(&lit("ns=70000;i=1")).is_err());
    }
}
