use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Fields, Ident, Token, Variant};

use super::{ShapeMeta, VariantAttributes};

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    pub attrs: VariantAttributes,
}

impl EnumVariant<'_> {
    pub(crate) fn name(&self) -> String {
        match &self.attrs.rename {
            Some(name) => name.value(),
            None => self.ident.unraw().to_string(),
        }
    }
}

/// An enum whose variants are all units.
pub(crate) struct ShapeEnum<'a> {
    meta: ShapeMeta<'a>,
    variants: Vec<EnumVariant<'a>>,
}

impl<'a> ShapeEnum<'a> {
    pub(crate) fn new(
        meta: ShapeMeta<'a>,
        span_source: &'a Ident,
        variants: &'a Punctuated<Variant, Token![,]>,
    ) -> syn::Result<Self> {
        meta.attrs().validate_for_enum()?;

        if variants.is_empty() {
            return Err(syn::Error::new(
                span_source.span(),
                "enums need at least one variant",
            ));
        }

        let variants = variants
            .iter()
            .map(|variant| {
                if !matches!(variant.fields, Fields::Unit) {
                    return Err(syn::Error::new_spanned(
                        variant,
                        "only unit variants can be shaped",
                    ));
                }
                Ok(EnumVariant {
                    ident: &variant.ident,
                    attrs: VariantAttributes::parse_attrs(&variant.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        for (index, variant) in variants.iter().enumerate() {
            let name = variant.name();
            if variants[..index]
                .iter()
                .any(|prev| prev.name().eq_ignore_ascii_case(&name))
            {
                return Err(syn::Error::new(
                    variant.ident.span(),
                    "variant names must differ ignoring case",
                ));
            }
        }

        Ok(Self { meta, variants })
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ShapeMeta<'a> {
        &self.meta
    }

    #[inline]
    pub(crate) fn variants(&self) -> &[EnumVariant<'a>] {
        &self.variants
    }
}
