use proc_macro2::TokenStream;
use quote::quote;

use super::ValueOverrides;
use crate::derive_data::ShapeEnum;

/// Implement `Typed`, `Value` and `Property` for unit-only enums.
///
/// The variant name is the canonical text of a variant, and a text value
/// converts into the variant of that name.
pub(crate) fn impl_enum(info: &ShapeEnum) -> TokenStream {
    let meta = info.meta();
    let sf_shape_path = meta.sf_shape_path();
    let macro_utils_ = crate::path::macro_utils_(sf_shape_path);
    let value_ = crate::path::value_(sf_shape_path);
    let type_info_ = crate::path::type_info_(sf_shape_path);
    let type_kind_ = crate::path::type_kind_(sf_shape_path);
    let enum_info_ = crate::path::enum_info_(sf_shape_path);
    let from_enum_text_ = crate::path::from_enum_text_(sf_shape_path);

    let variants = info.variants();
    let names: Vec<String> = variants.iter().map(|variant| variant.name()).collect();
    let idents: Vec<_> = variants.iter().map(|variant| variant.ident).collect();
    let positions = 0..variants.len();
    // Non-empty, checked by `ShapeEnum::new`.
    let zero = &idents[0];

    let type_info_tokens = quote! {
        #type_info_::new::<Self>(#type_kind_::Enum(#enum_info_::new(
            &[#(#names),*],
            |__index| match __index {
                #(#positions => #macro_utils_::Some(
                    #macro_utils_::Box::new(Self::#idents) as #macro_utils_::Box<dyn #value_>
                ),)*
                _ => #macro_utils_::None,
            },
        )))
        .with_zero(|| #macro_utils_::Box::new(Self::#zero) as #macro_utils_::Box<dyn #value_>)
    };

    let overrides = ValueOverrides {
        value_eq: meta.attrs().partial_eq.is_none().then(|| {
            quote! {
                #macro_utils_::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| {
                            ::core::mem::discriminant(self) == ::core::mem::discriminant(other)
                        })
                )
            }
        }),
        invariant_text: meta.attrs().format.is_none().then(|| {
            quote! {
                let __name: &str = match self {
                    #(Self::#idents => #names,)*
                };
                #macro_utils_::Some(#macro_utils_::String::from(__name))
            }
        }),
        from_value: Some(quote! {
            #from_enum_text_::<Self>(value)
        }),
    };

    let typed_impl = crate::impls::impl_trait_typed(meta, type_info_tokens);
    let value_impl = crate::impls::impl_trait_value(meta, overrides);

    quote! {
        #typed_impl

        #value_impl
    }
}
