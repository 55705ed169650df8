use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ShapeDerive;

/// Provided for `#[derive(Shape)]`.
pub(crate) fn match_shape_impls(ast: DeriveInput) -> TokenStream {
    let shape_derive = match ShapeDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let shape_impls: proc_macro2::TokenStream = match &shape_derive {
        ShapeDerive::Struct(info) => crate::impls::impl_struct(info),
        ShapeDerive::Enum(info) => crate::impls::impl_enum(info),
    };

    TokenStream::from(quote! {
        const _: () = {
            #shape_impls
        };
    })
}
