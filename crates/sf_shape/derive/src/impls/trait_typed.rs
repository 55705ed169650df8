use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ShapeMeta;

/// Generate implementation code for `Typed`.
///
/// `type_info_tokens` is an expression building the `TypeInfo`.
pub(crate) fn impl_trait_typed(meta: &ShapeMeta, type_info_tokens: TokenStream) -> TokenStream {
    let sf_shape_path = meta.sf_shape_path();
    let typed_ = crate::path::typed_(sf_shape_path);
    let type_info_ = crate::path::type_info_(sf_shape_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(sf_shape_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(sf_shape_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
