use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Information shared by every kind of shaped type.
pub(crate) struct ShapeMeta<'a> {
    sf_shape_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Types that must implement `Property` for the impls to hold.
    active_types: Vec<Type>,
}

impl<'a> ShapeMeta<'a> {
    pub(crate) fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            sf_shape_path: crate::path::sf_shape(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
        }
    }

    pub(super) fn set_active_types(&mut self, active_types: Vec<Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub(crate) fn sf_shape_path(&self) -> &Path {
        &self.sf_shape_path
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    /// Whether the impls need a `GenericTypeInfoCell`.
    pub(crate) fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Splits the generics for an impl block.
    ///
    /// The where clause keeps the declared predicates. Generic types are
    /// further bound to `'static + Send + Sync`, and every active type to
    /// `Property`.
    pub(crate) fn split_generics(&self) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut generic_where_clause = quote! { where };

        if self.impl_with_generic() {
            generic_where_clause.extend(quote! {
                Self: 'static + ::core::marker::Send + ::core::marker::Sync,
            });
        }

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        if self.impl_with_generic() {
            let property_ = crate::path::property_(&self.sf_shape_path);
            let types = self.active_types.iter();
            generic_where_clause.extend(quote! { #(#types: #property_,)* });
        }

        (impl_generics, ty_generics, generic_where_clause)
    }
}
