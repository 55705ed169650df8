//! Paths of the `sf_shape` items referenced by generated code.
//!
//! The crate path itself is resolved from the manifest of the invoking
//! crate, see [`sf_shape`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `sf_shape` crate.
///
/// 1. For crates that depend on `sf_shape`, `::sf_shape` is returned.
/// 2. For crates that depend on `sf_core`, `::sf_core::shape` is returned.
/// 3. Otherwise `::sf_shape` is returned, which may be incorrect.
///
/// Reading the manifest is relatively costly, so the path is resolved once
/// per derive and passed around.
pub(crate) fn sf_shape() -> syn::Path {
    sf_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("sf_shape"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod value;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use value::*;

#[inline(always)]
pub(crate) fn macro_utils_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::__macro_exports::macro_utils
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::impls::GenericTypeInfoCell
    }
}
