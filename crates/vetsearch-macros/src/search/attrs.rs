//! Attribute parsing for the Searchable derive macro.
//!
//! This module provides parsers for the `#[search(...)]` field attributes
//! used by the `Searchable` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// A search field a struct field can be mapped to.
///
/// Mirrors `vetsearch::Field`; the variant name is emitted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Customer,
    Employee,
    Pet,
    Service,
    Status,
    Clinic,
    ScheduledAt,
}

impl SearchField {
    /// Parse a search field from its name or an accepted alias.
    pub fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "id" => Ok(SearchField::Id),
            "customer" | "owner" => Ok(SearchField::Customer),
            "employee" | "vet" | "veterinarian" => Ok(SearchField::Employee),
            "pet" => Ok(SearchField::Pet),
            "service" => Ok(SearchField::Service),
            "status" => Ok(SearchField::Status),
            "clinic" => Ok(SearchField::Clinic),
            "scheduled_at" | "date" => Ok(SearchField::ScheduledAt),
            other => Err(Error::new(
                span,
                format!(
                    "unknown search field: '{}'. Expected one of: id, customer, employee, pet, service, status, clinic, scheduled_at",
                    other
                ),
            )),
        }
    }

    /// Snake-case name, used for the `vetsearch::__private::assert_*` type
    /// check emitted per mapped field.
    pub fn name(self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Customer => "customer",
            SearchField::Employee => "employee",
            SearchField::Pet => "pet",
            SearchField::Service => "service",
            SearchField::Status => "status",
            SearchField::Clinic => "clinic",
            SearchField::ScheduledAt => "scheduled_at",
        }
    }

    /// The `vetsearch::Field` variant name.
    pub fn variant(self) -> &'static str {
        match self {
            SearchField::Id => "Id",
            SearchField::Customer => "Customer",
            SearchField::Employee => "Employee",
            SearchField::Pet => "Pet",
            SearchField::Service => "Service",
            SearchField::Status => "Status",
            SearchField::Clinic => "Clinic",
            SearchField::ScheduledAt => "ScheduledAt",
        }
    }
}

/// Field-level attributes from `#[search(...)]`.
#[derive(Debug, Clone)]
pub struct SearchAttr {
    /// The search field this struct field is exposed as.
    pub field: Option<SearchField>,
    /// Exclude this struct field from searches.
    pub skip: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for SearchAttr {
    fn default() -> Self {
        SearchAttr {
            field: None,
            skip: false,
            span: Span::call_site(),
        }
    }
}

impl Parse for SearchAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = SearchAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Field name: search(customer), search(skip), etc.
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if let Some(ident) = p.get_ident() {
                        set_field(&mut attr, &ident.to_string(), ident.span())?;
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected a search field name or skip",
                        ));
                    }
                }

                // field = "customer"
                Meta::NameValue(nv) => {
                    if !nv.path.is_ident("field") {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: field",
                        ));
                    }
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        set_field(&mut attr, &s.value(), s.span())?;
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "field must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown search attribute. Expected: a field name, skip, or field = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.field.is_some() {
            return Err(Error::new(
                attr.span,
                "a field cannot be both skipped and mapped",
            ));
        }

        Ok(attr)
    }
}

fn set_field(attr: &mut SearchAttr, name: &str, span: Span) -> Result<()> {
    if attr.field.is_some() {
        return Err(Error::new(span, "only one search field may be given"));
    }
    attr.field = Some(SearchField::from_name(name, span)?);
    attr.span = span;
    Ok(())
}

/// Extract `#[search(...)]` attributes from a field's attributes.
pub fn parse_search_attrs(attrs: &[Attribute]) -> Result<SearchAttr> {
    for attr in attrs {
        if attr.path().is_ident("search") {
            return attr.parse_args::<SearchAttr>();
        }
    }
    Ok(SearchAttr::default())
}
