// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attrs::{pascal_case, ContainerAttrs, FieldAttrs, NodeIdLit};

struct FieldInfo {
    ident: syn::Ident,
    xml_name: String,
    flatten: bool,
}

pub fn expand(input: &DeriveInput, with_identity: bool) -> syn::Result<TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic structures are not supported",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "use `struct Name {}` for a structure without fields",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(input, "Only named fields are supported"))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let attrs = ContainerAttrs::parse(&input.attrs)?;
    if attrs.bitmask {
        return Err(syn::Error::new_spanned(
            input,
            "`bitmask` only applies to enumerations",
        ));
    }
    let type_name = attrs
        .name
        .as_ref()
        .map_or_else(|| name.to_string(), syn::LitStr::value);

    let mut infos = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let field_attrs = FieldAttrs::parse(&field.attrs)?;
        if field_attrs.flatten && field_attrs.rename.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "a flattened field has no element name to rename",
            ));
        }
        let xml_name = field_attrs
            .rename
            .as_ref()
            .map_or_else(|| pascal_case(&ident.to_string()), syn::LitStr::value);
        infos.push(FieldInfo {
            ident,
            xml_name,
            flatten: field_attrs.flatten,
        });
    }

    let eq_terms = infos.iter().map(|f| {
        let ident = &f.ident;
        quote! { && ::uacat::Structural::structural_eq(&self.#ident, &other.#ident) }
    });
    let hash_terms = infos.iter().map(|f| {
        let ident = &f.ident;
        quote! { ::uacat::Structural::structural_hash(&self.#ident, state); }
    });
    let encode_binary = infos.iter().map(|f| {
        let ident = &f.ident;
        quote! { ::uacat::codec::BinaryEncodable::encode(&self.#ident, writer)?; }
    });
    let decode_binary = infos.iter().map(|f| {
        let ident = &f.ident;
        quote! { #ident: ::uacat::codec::BinaryEncodable::decode(reader)?, }
    });
    let encode_xml = infos.iter().map(|f| {
        let ident = &f.ident;
        let xml_name = &f.xml_name;
        if f.flatten {
            quote! { ::uacat::codec::XmlEncodable::encode_xml(&self.#ident, writer)?; }
        } else {
            quote! { writer.field(#xml_name, &self.#ident)?; }
        }
    });
    let decode_xml = infos.iter().map(|f| {
        let ident = &f.ident;
        let xml_name = &f.xml_name;
        if f.flatten {
            quote! { #ident: ::uacat::codec::XmlEncodable::decode_xml(node, decoder)?, }
        } else {
            quote! { #ident: decoder.field(node, #xml_name)?, }
        }
    });

    let structure_type = if with_identity {
        identity_impl(input, &attrs, &type_name)?
    } else {
        if attrs.id.is_some() || attrs.binary.is_some() || attrs.xml.is_some() {
            return Err(syn::Error::new_spanned(
                input,
                "ids are only meaningful on #[derive(Structure)]",
            ));
        }
        TokenStream::new()
    };

    Ok(quote! {
        impl ::uacat::Structural for #name {
            #[allow(unused_variables)]
            fn structural_eq(&self, other: &Self) -> bool {
                true #(#eq_terms)*
            }

            #[allow(unused_variables)]
            fn structural_hash(&self, state: &mut dyn ::core::hash::Hasher) {
                #(#hash_terms)*
            }
        }

        impl ::core::cmp::PartialEq for #name {
            fn eq(&self, other: &Self) -> bool {
                ::uacat::Structural::structural_eq(self, other)
            }
        }

        impl ::core::cmp::Eq for #name {}

        impl ::core::hash::Hash for #name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::uacat::Structural::structural_hash(self, state);
            }
        }

        impl ::uacat::codec::BinaryEncodable for #name {
            #[allow(unused_variables)]
            fn encode(
                &self,
                writer: &mut ::uacat::codec::BinaryWriter,
            ) -> ::uacat::codec::CodecResult<()> {
                #(#encode_binary)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn decode(
                reader: &mut ::uacat::codec::BinaryReader<'_>,
            ) -> ::uacat::codec::CodecResult<Self> {
                reader.nested(|reader| {
                    ::core::result::Result::Ok(Self {
                        #(#decode_binary)*
                    })
                })
            }
        }

        impl ::uacat::codec::XmlEncodable for #name {
            const XML_TYPE_NAME: &'static str = #type_name;

            #[allow(unused_variables)]
            fn encode_xml(
                &self,
                writer: &mut ::uacat::codec::XmlWriter,
            ) -> ::uacat::codec::CodecResult<()> {
                #(#encode_xml)*
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn decode_xml(
                node: ::uacat::codec::XmlNode<'_, '_>,
                decoder: &mut ::uacat::codec::XmlDecoder,
            ) -> ::uacat::codec::CodecResult<Self> {
                decoder.nested(|decoder| {
                    ::core::result::Result::Ok(Self {
                        #(#decode_xml)*
                    })
                })
            }
        }

        #structure_type
    })
}

fn require<'a>(
    input: &DeriveInput,
    lit: &'a Option<syn::LitStr>,
    key: &str,
) -> syn::Result<&'a syn::LitStr> {
    lit.as_ref().ok_or_else(|| {
        syn::Error::new_spanned(
            input,
            format!("missing #[ua({key} = \"...\")] on a Structure"),
        )
    })
}

fn identity_impl(
    input: &DeriveInput,
    attrs: &ContainerAttrs,
    type_name: &str,
) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let id_lit = require(input, &attrs.id, "id")?;
    let binary_lit = require(input, &attrs.binary, "binary")?;
    let xml_lit = require(input, &attrs.xml, "xml")?;

    let abstract_id = NodeIdLit::parse(id_lit)?;
    let binary_id = NodeIdLit::parse(binary_lit)?;
    let xml_id = NodeIdLit::parse(xml_lit)?;
    if abstract_id == binary_id || abstract_id == xml_id || binary_id == xml_id {
        return Err(syn::Error::new_spanned(
            input,
            "the id, binary and xml node ids must all differ",
        ));
    }

    let abstract_id = abstract_id.to_tokens();
    let binary_id = binary_id.to_tokens();
    let xml_id = xml_id.to_tokens();

    Ok(quote! {
        impl ::uacat::StructureType for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn type_identity() -> &'static ::uacat::Identity {
                static IDENTITY: ::uacat::Identity =
                    ::uacat::Identity::new(#abstract_id, #binary_id, #xml_id);
                &IDENTITY
            }
        }
    })
}
