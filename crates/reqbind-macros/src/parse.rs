//! Parsing utilities for the `Bind` derive.
//!
//! This module reads the `#[bind(...)]` field attributes and classifies each
//! field's declared type.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Data, DeriveInput, Expr, ExprLit, Fields, GenericArgument, Ident, Lit, Meta, PathArguments,
    Token, Type,
};

/// Parsed `#[bind(...)]` attributes of one field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Explicit external names as `(tag key, name)` pairs, in written order.
    pub tags: Vec<(String, String)>,
    /// Whether the field is left out of binding entirely.
    pub skip: bool,
}

impl Parse for FieldAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in meta_list {
            match meta {
                Meta::NameValue(nv) => {
                    let key = nv
                        .path
                        .get_ident()
                        .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                        .to_string();

                    let value = match &nv.value {
                        Expr::Lit(ExprLit {
                            lit: Lit::Str(s), ..
                        }) => s.value(),
                        _ => {
                            return Err(syn::Error::new(
                                nv.value.span(),
                                "expected string literal",
                            ))
                        }
                    };

                    if attrs.tags.iter().any(|(k, _)| *k == key) {
                        return Err(syn::Error::new(
                            nv.path.span(),
                            format!("duplicate tag key: {key}"),
                        ));
                    }
                    attrs.tags.push((key, value));
                }
                Meta::Path(path) if path.is_ident("skip") => attrs.skip = true,
                _ => {
                    return Err(syn::Error::new(
                        meta.span(),
                        "expected `key = \"name\"` or `skip`",
                    ))
                }
            }
        }

        Ok(attrs)
    }
}

/// Value kinds a field can hold, mirroring `reqbind_core::Kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemKind {
    Text,
    Integer,
    Boolean,
    Float,
    File,
}

impl ElemKind {
    /// Classifies a scalar element type by its last path segment.
    fn of_scalar(ty: &Type) -> Option<Self> {
        match last_segment(ty)?.ident.to_string().as_str() {
            "String" => Some(Self::Text),
            "i64" => Some(Self::Integer),
            "bool" => Some(Self::Boolean),
            "f64" => Some(Self::Float),
            _ => None,
        }
    }

    /// Returns the `Kind` variant name, which is also the scalar `Slot` variant.
    pub fn variant(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Float => "Float",
            Self::File => "File",
        }
    }

    /// Returns the `Slot` variant for a sequence field of this kind.
    pub fn list_slot(self) -> &'static str {
        match self {
            Self::Text => "TextList",
            Self::Integer => "IntegerList",
            Self::Boolean => "BooleanList",
            Self::Float => "FloatList",
            Self::File => "FileList",
        }
    }
}

/// Declared type of a field, mirroring `reqbind_core::FieldType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTy {
    Scalar(ElemKind),
    Sequence(ElemKind),
    /// Carries the type as written, for error messages.
    Unsupported(String),
}

impl FieldTy {
    /// Classifies a field type.
    ///
    /// `Option<FilePart>` is the only supported `Option`; `Vec<_>` of any
    /// scalar kind or of `FilePart` is a sequence.
    pub fn classify(ty: &Type) -> Self {
        if let Some(kind) = ElemKind::of_scalar(ty) {
            return Self::Scalar(kind);
        }
        if let Some(inner) = generic_arg(ty, "Option") {
            if is_file_part(inner) {
                return Self::Scalar(ElemKind::File);
            }
        }
        if let Some(inner) = generic_arg(ty, "Vec") {
            if is_file_part(inner) {
                return Self::Sequence(ElemKind::File);
            }
            if let Some(kind) = ElemKind::of_scalar(inner) {
                return Self::Sequence(kind);
            }
        }
        Self::Unsupported(type_name(ty))
    }
}

/// A parsed struct field.
#[derive(Debug)]
pub struct BindField {
    /// The field identifier.
    pub ident: Ident,
    /// The parsed attributes.
    pub attrs: FieldAttrs,
    /// The classified type.
    pub ty: FieldTy,
}

/// Parsed derive input.
#[derive(Debug)]
pub struct BindStruct {
    /// The struct name.
    pub name: Ident,
    /// The bindable fields, in declaration order. Skipped fields are absent.
    pub fields: Vec<BindField>,
}

impl BindStruct {
    /// Parses a `DeriveInput` into a `BindStruct`.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "Bind cannot be derived for generic types",
            ));
        }

        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new(
                input.ident.span(),
                "Bind can only be derived for structs",
            ));
        };
        let Fields::Named(named) = data.fields else {
            return Err(syn::Error::new(
                input.ident.span(),
                "Bind can only be derived for structs with named fields",
            ));
        };

        let mut fields = Vec::new();
        for field in named.named {
            let mut attrs = FieldAttrs::default();
            for attr in field.attrs.iter().filter(|a| a.path().is_ident("bind")) {
                let parsed: FieldAttrs = attr.parse_args()?;
                attrs.tags.extend(parsed.tags);
                attrs.skip |= parsed.skip;
            }
            if attrs.skip {
                continue;
            }

            let Some(ident) = field.ident else {
                continue;
            };
            fields.push(BindField {
                ty: FieldTy::classify(&field.ty),
                ident,
                attrs,
            });
        }

        Ok(Self {
            name: input.ident,
            fields,
        })
    }
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

/// Returns `T` for a type written as `wrapper<T>`.
fn generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let segment = last_segment(ty)?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn is_file_part(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|s| s.ident == "FilePart" && s.arguments.is_none())
}

fn type_name(ty: &Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}
