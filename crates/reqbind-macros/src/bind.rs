//! `Bind` derive implementation.
//!
//! This module contains the core logic for expanding `#[derive(Bind)]`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{DeriveInput, Ident};

use crate::parse::{BindField, BindStruct, FieldTy};

/// Expands the `#[derive(Bind)]` macro.
///
/// The generated impl returns a `const` table with one `FieldDescriptor` per
/// field that is not skipped, in declaration order.
pub fn expand_bind(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let parsed = BindStruct::parse(input)?;

    let name = &parsed.name;
    let descriptors = parsed
        .fields
        .iter()
        .map(|field| generate_descriptor(name, field));

    Ok(quote! {
        impl ::reqbind::Bind for #name {
            fn descriptors() -> &'static [::reqbind::FieldDescriptor<Self>] {
                const FIELDS: &[::reqbind::FieldDescriptor<#name>] = &[
                    #(#descriptors),*
                ];
                FIELDS
            }
        }
    })
}

fn generate_descriptor(record: &Ident, field: &BindField) -> TokenStream {
    let ident = &field.ident;
    let ident_str = ident.to_string();
    let tags = field.attrs.tags.iter().map(|(key, value)| quote! { (#key, #value) });

    let (field_type, slot) = match &field.ty {
        FieldTy::Scalar(kind) => {
            let kind = Ident::new(kind.variant(), Span::call_site());
            (
                quote! { ::reqbind::FieldType::Scalar(::reqbind::Kind::#kind) },
                quote! { ::reqbind::Slot::#kind(&mut record.#ident) },
            )
        }
        FieldTy::Sequence(kind) => {
            let list = Ident::new(kind.list_slot(), Span::call_site());
            let kind = Ident::new(kind.variant(), Span::call_site());
            (
                quote! { ::reqbind::FieldType::Sequence(::reqbind::Kind::#kind) },
                quote! { ::reqbind::Slot::#list(&mut record.#ident) },
            )
        }
        FieldTy::Unsupported(type_name) => (
            quote! { ::reqbind::FieldType::Unsupported(#type_name) },
            quote! {
                let _ = record;
                ::reqbind::Slot::Unsupported(#type_name)
            },
        ),
    };

    quote! {
        ::reqbind::FieldDescriptor::new(#ident_str, &[#(#tags),*], #field_type, {
            fn slot(record: &mut #record) -> ::reqbind::Slot<'_> {
                #slot
            }
            slot
        })
    }
}
