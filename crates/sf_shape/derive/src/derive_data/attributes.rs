use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path, parenthesized};

use super::ConstructorDef;
use crate::SHAPE_ATTRIBUTE_NAME;

/// Records the span of a flag, rejecting repeats.
fn set_flag(flag: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate flag"));
    }
    *flag = Some(meta.path.require_ident()?.span());
    Ok(())
}

fn parse_rename(rename: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if rename.is_some() {
        return Err(meta.error("duplicate `rename`"));
    }
    let name: LitStr = meta.value()?.parse()?;
    if name.value().is_empty() {
        return Err(syn::Error::new(name.span(), "`rename` cannot be empty"));
    }
    *rename = Some(name);
    Ok(())
}

/// Calls `parse` for every item of every `#[shape(...)]` attribute.
fn for_each_meta(
    attrs: &[Attribute],
    mut parse: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(SHAPE_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut parse)?;
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container attributes, e.g. `#[shape(default, extends = Base)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub partial_eq: Option<Span>,
    pub format: Option<Span>,
    pub extends: Option<Path>,
    pub constructors: Vec<ConstructorDef>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_meta(attrs, |meta| this.parse_meta(meta))?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            set_flag(&mut self.default, &meta)
        } else if meta.path.is_ident("partial_eq") {
            set_flag(&mut self.partial_eq, &meta)
        } else if meta.path.is_ident("format") {
            set_flag(&mut self.format, &meta)
        } else if meta.path.is_ident("extends") {
            if self.extends.is_some() {
                return Err(meta.error("duplicate `extends`"));
            }
            self.extends = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("constructor") {
            let content;
            parenthesized!(content in meta.input);
            self.constructors.push(content.parse()?);
            Ok(())
        } else {
            Err(meta.error(
                "expected one of `default`, `partial_eq`, `format`, `extends` or `constructor`",
            ))
        }
    }

    /// Rejects the attributes that only apply to structs.
    pub(crate) fn validate_for_enum(&self) -> syn::Result<()> {
        if let Some(path) = &self.extends {
            return Err(syn::Error::new_spanned(path, "enums cannot declare `extends`"));
        }
        if let Some(ctor) = self.constructors.first() {
            return Err(syn::Error::new(
                ctor.name.span(),
                "enums cannot declare constructors",
            ));
        }
        if let Some(span) = self.default {
            return Err(syn::Error::new(
                span,
                "the zero value of an enum is its first variant",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field attributes, e.g. `#[shape(get, set, rename = "Name")]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub read_only: Option<Span>,
    pub get: Option<Span>,
    pub set: Option<Span>,
    pub private_set: Option<Span>,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_meta(attrs, |meta| this.parse_meta(meta))?;
        this.validity()?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("skip") {
            set_flag(&mut self.skip, &meta)
        } else if meta.path.is_ident("read_only") {
            set_flag(&mut self.read_only, &meta)
        } else if meta.path.is_ident("get") {
            set_flag(&mut self.get, &meta)
        } else if meta.path.is_ident("set") {
            set_flag(&mut self.set, &meta)
        } else if meta.path.is_ident("private_set") {
            set_flag(&mut self.private_set, &meta)
        } else if meta.path.is_ident("rename") {
            parse_rename(&mut self.rename, &meta)
        } else {
            Err(meta.error(
                "expected one of `skip`, `read_only`, `get`, `set`, `private_set` or `rename`",
            ))
        }
    }

    fn validity(&self) -> syn::Result<()> {
        if let (Some(_), Some(span)) = (self.set, self.private_set) {
            return Err(syn::Error::new(
                span,
                "`set` and `private_set` are mutually exclusive",
            ));
        }
        if self.get.is_none()
            && let Some(span) = self.set.or(self.private_set)
        {
            return Err(syn::Error::new(span, "setters require `get`"));
        }
        if let (Some(_), Some(span)) = (self.get, self.read_only) {
            return Err(syn::Error::new(
                span,
                "`read_only` applies to fields; omit `set` instead",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Enum variant attributes, e.g. `#[shape(rename = "URGENT")]`.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_meta(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&mut this.rename, &meta)
            } else {
                Err(meta.error("expected `rename`"))
            }
        })?;
        Ok(this)
    }
}
