// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attrs::{ContainerAttrs, VariantAttrs};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic enumerations are not supported",
        ));
    }
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(input, "Only enums are supported"));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "an enumeration needs at least one constant",
        ));
    }

    let attrs = ContainerAttrs::parse(&input.attrs)?;
    if attrs.id.is_some() || attrs.binary.is_some() || attrs.xml.is_some() {
        return Err(syn::Error::new_spanned(
            input,
            "enumerations carry no encoding ids",
        ));
    }
    let type_name = attrs
        .name
        .as_ref()
        .map_or_else(|| name.to_string(), syn::LitStr::value);

    let mut entries = Vec::new();
    let mut variants = Vec::new();
    let mut ordinal_arms = Vec::new();
    for (ordinal, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "enumeration constants cannot carry data",
            ));
        }
        let variant_attrs = VariantAttrs::parse(&variant.attrs)?;
        if variant_attrs.composite && !attrs.bitmask {
            return Err(syn::Error::new_spanned(
                variant,
                "`composite` requires #[ua(bitmask)] on the enum",
            ));
        }
        let ident = &variant.ident;
        let constant = ident.to_string();
        let ordinal = u32::try_from(ordinal)
            .map_err(|_| syn::Error::new_spanned(variant, "too many constants"))?;
        let composite = variant_attrs.composite;

        entries.push(quote! {
            ::uacat::EnumValue {
                name: #constant,
                ordinal: #ordinal,
                value: #name::#ident as i32,
                composite: #composite,
            }
        });
        variants.push(quote! { #name::#ident });
        ordinal_arms.push(quote! { #name::#ident => #ordinal, });
    }

    let codecs = if attrs.bitmask {
        quote! {
            impl ::uacat::Bitmask for #name {}
        }
    } else {
        quote! {
            impl ::uacat::codec::BinaryEncodable for #name {
                fn encode(
                    &self,
                    writer: &mut ::uacat::codec::BinaryWriter,
                ) -> ::uacat::codec::CodecResult<()> {
                    writer.write_i32(::uacat::Enumeration::value(*self));
                    ::core::result::Result::Ok(())
                }

                fn decode(
                    reader: &mut ::uacat::codec::BinaryReader<'_>,
                ) -> ::uacat::codec::CodecResult<Self> {
                    ::uacat::enumeration::from_wire_value(reader.read_i32()?)
                }
            }

            impl ::uacat::codec::XmlEncodable for #name {
                const XML_TYPE_NAME: &'static str = #type_name;

                fn encode_xml(
                    &self,
                    writer: &mut ::uacat::codec::XmlWriter,
                ) -> ::uacat::codec::CodecResult<()> {
                    writer.text(&::uacat::enumeration::xml_symbol(*self));
                    ::core::result::Result::Ok(())
                }

                fn decode_xml(
                    node: ::uacat::codec::XmlNode<'_, '_>,
                    _decoder: &mut ::uacat::codec::XmlDecoder,
                ) -> ::uacat::codec::CodecResult<Self> {
                    ::uacat::enumeration::parse_xml_symbol(
                        ::uacat::codec::XmlDecoder::text(node),
                    )
                }
            }
        }
    };

    Ok(quote! {
        impl ::uacat::Enumeration for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn entries() -> &'static [::uacat::EnumValue] {
                const ENTRIES: &[::uacat::EnumValue] = &[#(#entries),*];
                ENTRIES
            }

            fn variants() -> &'static [Self] {
                const VARIANTS: &[#name] = &[#(#variants),*];
                VARIANTS
            }

            fn ordinal(self) -> u32 {
                match self {
                    #(#ordinal_arms)*
                }
            }
        }

        impl ::uacat::Structural for #name {
            fn structural_eq(&self, other: &Self) -> bool {
                self == other
            }

            fn structural_hash(&self, state: &mut dyn ::core::hash::Hasher) {
                ::uacat::structure::hash_into(self, state);
            }
        }

        #codecs
    })
}
