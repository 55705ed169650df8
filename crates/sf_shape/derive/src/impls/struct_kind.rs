use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConstructorDef, Exposure, SetterAccess, ShapeField, ShapeStruct};

/// Implement `Typed`, `Value` and `Property` for structs.
pub(crate) fn impl_struct(info: &ShapeStruct) -> TokenStream {
    let meta = info.meta();
    let sf_shape_path = meta.sf_shape_path();
    let macro_utils_ = crate::path::macro_utils_(sf_shape_path);
    let value_ = crate::path::value_(sf_shape_path);
    let type_info_ = crate::path::type_info_(sf_shape_path);
    let type_kind_ = crate::path::type_kind_(sf_shape_path);
    let struct_info_ = crate::path::struct_info_(sf_shape_path);
    let ancestor_ = crate::path::ancestor_(sf_shape_path);

    let members = info
        .members()
        .map(|(field, exposure)| member_tokens(info, field, exposure));

    let constructors = meta
        .attrs()
        .constructors
        .iter()
        .map(|ctor| constructor_tokens(info, ctor));

    let make_self = if info.is_unit() {
        Some(quote!(Self))
    } else {
        meta.attrs()
            .default
            .map(|_| quote!(<Self as ::core::default::Default>::default()))
    };
    let (with_activator, with_zero) = match make_self {
        Some(make_self) => (
            quote! {
                .with_activator(|| #macro_utils_::Box::new(#make_self) as #macro_utils_::Box<dyn #value_>)
            },
            quote! {
                .with_zero(|| #macro_utils_::Box::new(#make_self) as #macro_utils_::Box<dyn #value_>)
            },
        ),
        None => (crate::utils::empty(), crate::utils::empty()),
    };

    let with_ancestor = meta.attrs().extends.as_ref().map(|base| {
        quote! {
            .with_ancestor(#ancestor_::new::<Self, #base>())
        }
    });

    let type_info_tokens = quote! {
        #type_info_::new::<Self>(#type_kind_::Struct(
            #struct_info_::new(#macro_utils_::vec![#(#members),*])
                .with_constructors(#macro_utils_::vec![#(#constructors),*])
                #with_activator
        ))
        #with_zero
        #with_ancestor
    };

    let typed_impl = crate::impls::impl_trait_typed(meta, type_info_tokens);
    let value_impl = crate::impls::impl_trait_value(meta, Default::default());

    quote! {
        #typed_impl

        #value_impl
    }
}

/// Builds the `MemberInfo` of a field, with its bound accessors.
///
/// ```ignore
/// MemberInfo::field::<u32>("id", true, false)
///     .with_getter(|value| /* clone the field */)
///     .with_setter(|value, incoming| /* convert and assign */)
/// ```
fn member_tokens(info: &ShapeStruct, field: &ShapeField, exposure: Exposure) -> TokenStream {
    let sf_shape_path = info.meta().sf_shape_path();
    let macro_utils_ = crate::path::macro_utils_(sf_shape_path);
    let value_ = crate::path::value_(sf_shape_path);
    let property_ = crate::path::property_(sf_shape_path);
    let member_info_ = crate::path::member_info_(sf_shape_path);
    let access_ = crate::path::access_(sf_shape_path);

    let ident = field.ident();
    let ty = field.ty();
    let name = field.name();

    let getter = quote! {
        .with_getter(|__value| {
            __value.downcast_ref::<Self>().map(|__this| {
                #macro_utils_::Box::new(::core::clone::Clone::clone(&__this.#ident))
                    as #macro_utils_::Box<dyn #value_>
            })
        })
    };
    let setter = quote! {
        .with_setter(|__value, __incoming| {
            match (
                __value.downcast_mut::<Self>(),
                <#ty as #property_>::from_value(__incoming),
            ) {
                (#macro_utils_::Some(__this), #macro_utils_::Some(__incoming)) => {
                    __this.#ident = __incoming;
                    true
                }
                _ => false,
            }
        })
    };

    match exposure {
        Exposure::Field { read_only } => {
            let setter = (!read_only).then_some(setter);
            quote! {
                #member_info_::field::<#ty>(#name, true, #read_only)
                    #getter
                    #setter
            }
        }
        Exposure::Property { setter: access } => {
            let setter_access = match access {
                Some(SetterAccess::Public) => quote!(#access_::Public),
                Some(SetterAccess::NonPublic) => quote!(#access_::NonPublic),
                None => quote!(#access_::None),
            };
            let setter = access.map(|_| setter);
            quote! {
                #member_info_::property::<#ty>(#name, #access_::Public, #setter_access)
                    #getter
                    #setter
            }
        }
        // Filtered out by `ShapeStruct::members`.
        Exposure::Hidden => crate::utils::empty(),
    }
}

/// Builds the `ConstructorInfo` of a declared constructor.
///
/// ```ignore
/// ConstructorInfo::new(
///     vec![ParamInfo::new::<String>("code", 0).with_default(|| /* .. */)],
///     |mut args| Ok(Box::new(Self::new(args.take::<String>(0)?)) as Box<dyn Value>),
/// )
/// ```
fn constructor_tokens(info: &ShapeStruct, ctor: &ConstructorDef) -> TokenStream {
    let sf_shape_path = info.meta().sf_shape_path();
    let macro_utils_ = crate::path::macro_utils_(sf_shape_path);
    let value_ = crate::path::value_(sf_shape_path);
    let constructor_info_ = crate::path::constructor_info_(sf_shape_path);
    let param_info_ = crate::path::param_info_(sf_shape_path);

    let params = ctor.params.iter().enumerate().map(|(position, param)| {
        let ty = &param.ty;
        let name = param.name.to_string();
        let with_default = param.default.as_ref().map(|default| {
            quote! {
                .with_default(|| {
                    let __default: #ty = #default;
                    #macro_utils_::Box::new(__default) as #macro_utils_::Box<dyn #value_>
                })
            }
        });
        quote! {
            #param_info_::new::<#ty>(#name, #position) #with_default
        }
    });

    let fn_name = &ctor.name;
    let args_ident = if ctor.params.is_empty() {
        quote!(_args)
    } else {
        quote!(mut __args)
    };
    let args = ctor.params.iter().enumerate().map(|(position, param)| {
        let ty = &param.ty;
        quote!(__args.take::<#ty>(#position)?)
    });

    quote! {
        #constructor_info_::new(
            #macro_utils_::vec![#(#params),*],
            |#args_ident| {
                #macro_utils_::Ok(
                    #macro_utils_::Box::new(Self::#fn_name(#(#args),*))
                        as #macro_utils_::Box<dyn #value_>
                )
            },
        )
    }
}
