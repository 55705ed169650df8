use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn value_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::value::Value
    }
}

#[inline(always)]
pub(crate) fn property_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::value::Property
    }
}

#[inline(always)]
pub(crate) fn from_enum_text_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::value::from_enum_text
    }
}

#[inline(always)]
pub(crate) fn invariant_format_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::text::InvariantFormat
    }
}
