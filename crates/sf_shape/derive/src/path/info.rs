use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn type_kind_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::TypeKind
    }
}

#[inline(always)]
pub(crate) fn struct_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn enum_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn member_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn access_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::Access
    }
}

#[inline(always)]
pub(crate) fn constructor_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::ConstructorInfo
    }
}

#[inline(always)]
pub(crate) fn param_info_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::ParamInfo
    }
}

#[inline(always)]
pub(crate) fn ancestor_(sf_shape_path: &syn::Path) -> TokenStream {
    quote! {
        #sf_shape_path::info::Ancestor
    }
}
