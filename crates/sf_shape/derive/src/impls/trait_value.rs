use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ShapeMeta;

/// Methods overriding the defaults of `Value`, and the body of
/// `Property::from_value` if the default is not enough.
#[derive(Default)]
pub(crate) struct ValueOverrides {
    pub value_eq: Option<TokenStream>,
    pub invariant_text: Option<TokenStream>,
    pub from_value: Option<TokenStream>,
}

/// Generate implementation code for `Value` and `Property`.
pub(crate) fn impl_trait_value(meta: &ShapeMeta, overrides: ValueOverrides) -> TokenStream {
    let sf_shape_path = meta.sf_shape_path();
    let macro_utils_ = crate::path::macro_utils_(sf_shape_path);
    let value_ = crate::path::value_(sf_shape_path);
    let property_ = crate::path::property_(sf_shape_path);
    let typed_ = crate::path::typed_(sf_shape_path);
    let type_info_ = crate::path::type_info_(sf_shape_path);

    let attrs = meta.attrs();

    let value_eq = overrides.value_eq.or_else(|| {
        attrs.partial_eq.map(|_| {
            quote! {
                #macro_utils_::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
                )
            }
        })
    });
    let value_eq = value_eq.map(|body| {
        quote! {
            fn value_eq(&self, other: &dyn #value_) -> #macro_utils_::Option<bool> {
                #body
            }
        }
    });

    let invariant_text = overrides.invariant_text.or_else(|| {
        attrs.format.map(|_| {
            let invariant_format_ = crate::path::invariant_format_(sf_shape_path);
            quote! {
                #macro_utils_::Some(#invariant_format_::invariant_format(self))
            }
        })
    });
    let invariant_text = invariant_text.map(|body| {
        quote! {
            fn invariant_text(&self) -> #macro_utils_::Option<#macro_utils_::String> {
                #body
            }
        }
    });

    let from_value = overrides.from_value.map(|body| {
        quote! {
            fn from_value(value: #macro_utils_::Option<&dyn #value_>) -> #macro_utils_::Option<Self> {
                #body
            }
        }
    });

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #value_ for #ident #ty_generics #where_clause {
            #[inline]
            fn value_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn clone_value(&self) -> #macro_utils_::Box<dyn #value_> {
                #macro_utils_::Box::new(::core::clone::Clone::clone(self))
            }

            #value_eq

            #invariant_text
        }

        impl #impl_generics #property_ for #ident #ty_generics #where_clause {
            #from_value
        }
    }
}
