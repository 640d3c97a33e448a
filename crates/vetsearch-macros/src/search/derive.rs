//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! This macro generates an implementation of the `Searchable` trait and a
//! constant listing the search fields the struct exposes.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_search_attrs, SearchField};

/// Main implementation of the Searchable derive macro.
pub fn searchable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Searchable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Searchable can only be derived for structs",
            ))
        }
    };

    let mut mapped: Vec<SearchField> = Vec::new();
    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_variants: Vec<TokenStream> = Vec::new();
    let mut type_checks: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let search_attrs = parse_search_attrs(&field.attrs)?;

        if search_attrs.skip {
            continue;
        }

        // Unannotated fields are not exposed
        let search_field = match search_attrs.field {
            Some(f) => f,
            None => continue,
        };

        if mapped.contains(&search_field) {
            return Err(Error::new(
                search_attrs.span,
                format!(
                    "search field '{}' is mapped more than once",
                    search_field.variant()
                ),
            ));
        }
        mapped.push(search_field);

        let variant = format_ident!("{}", search_field.variant());
        let assert_fn = format_ident!("assert_{}", search_field.name());

        // Spanned on the field type so a mismatch points at it
        type_checks.push(quote_spanned! {field.ty.span()=>
            ::vetsearch::__private::#assert_fn(&self.#field_name);
        });

        field_variants.push(quote! {
            ::vetsearch::Field::#variant,
        });

        field_matches.push(quote! {
            ::vetsearch::Field::#variant => ::vetsearch::ToValue::to_value(&self.#field_name),
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Search fields exposed by this record.
            pub const SEARCH_FIELDS: &'static [::vetsearch::Field] = &[
                #(#field_variants)*
            ];

            #[doc(hidden)]
            #[allow(dead_code)]
            fn __assert_search_field_types(&self) {
                #(#type_checks)*
            }
        }

        impl #impl_generics ::vetsearch::Searchable for #struct_name #ty_generics #where_clause {
            #[allow(unreachable_patterns)]
            fn search_value(&self, field: ::vetsearch::Field) -> ::vetsearch::Value {
                match field {
                    #(#field_matches)*
                    _ => ::vetsearch::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}
