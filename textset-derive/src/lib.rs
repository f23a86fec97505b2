//! # Textset Derive Macros
//!
//! This crate provides the procedural macro for `textset`. It resolves the
//! `#[textset(...)]` attribute on each field into a static descriptor table
//! and implements the `TextsetObject` trait.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, UnOp};

/// Derives `textset::TextsetObject`.
///
/// Supported field attribute keys, all inside `#[textset(...)]`:
///
/// - `ignore`: exclude the field from serialization entirely
/// - `name = "..."`: override the effective name (default: the field name)
/// - `priority = N`: write order, higher first (default 0; negatives allowed)
/// - `optional`: elide the field to a comment line while it equals the
///   type's default
/// - `newline`: precede the field with a blank line
#[proc_macro_derive(TextsetObject, attributes(textset))]
pub fn derive_textset_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let data_struct = match input.data {
        Data::Struct(ds) => ds,
        _ => {
            return syn::Error::new(name.span(), "TextsetObject only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let fields = match data_struct.fields {
        Fields::Named(named) => named.named,
        _ => {
            return syn::Error::new(
                name.span(),
                "TextsetObject requires a struct with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut entries = Vec::new();

    for field in fields {
        let meta = match parse_attributes(&field.attrs) {
            Ok(meta) => meta,
            Err(e) => return e.to_compile_error().into(),
        };
        if meta.ignore {
            continue;
        }

        // The ident always exists for named fields.
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let effective = meta.name.unwrap_or_else(|| ident.to_string());
        entries.push(FieldEntry {
            ident,
            ty: field.ty,
            effective,
            priority: meta.priority,
            optional: meta.optional,
            newline: meta.newline,
        });
    }

    let descriptors = entries.iter().map(|f| {
        let name = &f.effective;
        let priority = f.priority;
        let optional = f.optional;
        let newline = f.newline;
        quote! {
            textset::FieldDescriptor {
                name: #name,
                priority: #priority,
                optional: #optional,
                newline: #newline,
            }
        }
    });

    let encode_arms = entries.iter().enumerate().map(|(i, f)| {
        let ident = &f.ident;
        quote! { #i => textset::TextScalar::encode_token(&self.#ident), }
    });

    let decode_arms = entries.iter().enumerate().map(|(i, f)| {
        let ident = &f.ident;
        let ty = &f.ty;
        quote! {
            #i => {
                self.#ident = <#ty as textset::TextScalar>::decode_token(token)?;
                Ok(())
            }
        }
    });

    // Only optional fields are compared against the default instance; the
    // rest are never elided and report false.
    let default_arms = entries.iter().enumerate().filter(|(_, f)| f.optional).map(
        |(i, f)| {
            let ident = &f.ident;
            quote! { #i => self.#ident == defaults.#ident, }
        },
    );

    let expanded = quote! {
        impl textset::TextsetObject for #name {
            fn descriptors() -> &'static [textset::FieldDescriptor] {
                const DESCRIPTORS: &[textset::FieldDescriptor] = &[ #(#descriptors),* ];
                DESCRIPTORS
            }

            fn encode_field(&self, index: usize) -> String {
                match index {
                    #(#encode_arms)*
                    _ => String::new(),
                }
            }

            fn decode_field(&mut self, index: usize, token: &str) -> textset::Result<()> {
                match index {
                    #(#decode_arms)*
                    _ => Err(textset::TextsetError::Schema(
                        format!("no serialized field at index {}", index),
                    )),
                }
            }

            fn field_is_default(&self, index: usize, defaults: &Self) -> bool {
                match index {
                    #(#default_arms)*
                    _ => false,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

// --- Internal Data Structures ---

struct FieldEntry {
    ident: syn::Ident,
    ty: syn::Type,
    effective: String,
    priority: i32,
    optional: bool,
    newline: bool,
}

#[derive(Default)]
struct FieldMeta {
    ignore: bool,
    name: Option<String>,
    priority: i32,
    optional: bool,
    newline: bool,
}

/// Parses the `#[textset(...)]` attributes attached to one field.
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<FieldMeta> {
    let mut meta = FieldMeta::default();

    for attr in attrs {
        if attr.path().is_ident("textset") {
            attr.parse_nested_meta(|nested| {
                if nested.path.is_ident("ignore") {
                    meta.ignore = true;
                    return Ok(());
                }

                if nested.path.is_ident("optional") {
                    meta.optional = true;
                    return Ok(());
                }

                if nested.path.is_ident("newline") {
                    meta.newline = true;
                    return Ok(());
                }

                if nested.path.is_ident("name") {
                    let value = nested.value()?;
                    let s: LitStr = value.parse()?;
                    meta.name = Some(s.value());
                    return Ok(());
                }

                if nested.path.is_ident("priority") {
                    let value = nested.value()?;
                    let expr: Expr = value.parse()?;
                    meta.priority = parse_priority(&expr)
                        .ok_or_else(|| nested.error("priority must be an integer literal"))?;
                    return Ok(());
                }

                Err(nested.error(
                    "Unknown textset attribute key. Supported: ignore, name, priority, optional, newline",
                ))
            })?;
        }
    }
    Ok(meta)
}

/// Extracts an `i32` from a possibly negated integer literal expression.
fn parse_priority(expr: &Expr) -> Option<i32> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int.base10_parse::<i32>().ok(),
            _ => None,
        },
        Expr::Unary(unary) => match (&unary.op, unary.expr.as_ref()) {
            (UnOp::Neg(_), Expr::Lit(lit)) => match &lit.lit {
                Lit::Int(int) => int.base10_parse::<i32>().ok().map(|v| -v),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}
