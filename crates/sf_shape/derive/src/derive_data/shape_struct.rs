use syn::ext::IdentExt;
use syn::{Field, Fields, Ident, Type, Visibility};

use super::{FieldAttributes, ShapeMeta};

/// How a field appears in the type information.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exposure {
    /// Not a member.
    Hidden,
    /// A public field.
    Field { read_only: bool },
    /// A property with a public getter.
    Property { setter: Option<SetterAccess> },
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetterAccess {
    Public,
    NonPublic,
}

/// A named field with its parsed attributes.
pub(crate) struct ShapeField<'a> {
    pub data: &'a Field,
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
}

impl ShapeField<'_> {
    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub(crate) fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The member name, taken from `rename` or the field identifier.
    pub(crate) fn name(&self) -> String {
        match &self.attrs.rename {
            Some(name) => name.value(),
            None => self.ident().unraw().to_string(),
        }
    }

    pub(crate) fn exposure(&self) -> Exposure {
        let attrs = &self.attrs;
        if attrs.skip.is_some() {
            return Exposure::Hidden;
        }
        if attrs.get.is_some() {
            let setter = match (attrs.set, attrs.private_set) {
                (Some(_), _) => Some(SetterAccess::Public),
                (None, Some(_)) => Some(SetterAccess::NonPublic),
                (None, None) => None,
            };
            return Exposure::Property { setter };
        }
        if matches!(self.data.vis, Visibility::Public(_)) {
            return Exposure::Field {
                read_only: attrs.read_only.is_some(),
            };
        }
        Exposure::Hidden
    }
}

/// A struct with named fields, or a unit struct.
pub(crate) struct ShapeStruct<'a> {
    meta: ShapeMeta<'a>,
    fields: Vec<ShapeField<'a>>,
    is_unit: bool,
}

impl<'a> ShapeStruct<'a> {
    pub(crate) fn new(mut meta: ShapeMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let is_unit = match fields {
            Fields::Named(_) => false,
            Fields::Unit => true,
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "tuple structs have no named members to shape",
                ));
            }
        };

        let fields = fields
            .iter()
            .map(|data| {
                let Some(ident) = &data.ident else {
                    return Err(syn::Error::new_spanned(data, "expected a named field"));
                };
                let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
                if attrs.read_only.is_some() && !matches!(data.vis, Visibility::Public(_)) {
                    return Err(syn::Error::new_spanned(
                        data,
                        "`read_only` requires a `pub` field",
                    ));
                }
                Ok(ShapeField { data, ident, attrs })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        if let Some(span) = meta.attrs().default
            && is_unit
        {
            return Err(syn::Error::new(span, "unit structs are always default"));
        }

        let mut active_types: Vec<Type> = fields
            .iter()
            .filter(|field| field.exposure() != Exposure::Hidden)
            .map(|field| field.ty().clone())
            .collect();
        for ctor in &meta.attrs().constructors {
            active_types.extend(ctor.params.iter().map(|param| param.ty.clone()));
        }
        meta.set_active_types(active_types);

        Ok(Self {
            meta,
            fields,
            is_unit,
        })
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ShapeMeta<'a> {
        &self.meta
    }

    /// The fields that are members, in declaration order.
    pub(crate) fn members(&self) -> impl Iterator<Item = (&ShapeField<'a>, Exposure)> {
        self.fields
            .iter()
            .map(|field| (field, field.exposure()))
            .filter(|(_, exposure)| *exposure != Exposure::Hidden)
    }

    #[inline]
    pub(crate) fn is_unit(&self) -> bool {
        self.is_unit
    }
}
