//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! This module maps `#[search(...)]` field annotations to the search fields
//! of the vetsearch crate and generates the record accessor.

mod attrs;
mod derive;

pub use derive::searchable_derive_impl;
