use syn::{Data, DeriveInput};

use super::{ShapeEnum, ShapeMeta, ShapeStruct, TypeAttributes};

/// The derive input, classified by kind.
pub(crate) enum ShapeDerive<'a> {
    Struct(ShapeStruct<'a>),
    Enum(ShapeEnum<'a>),
}

impl<'a> ShapeDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = ShapeMeta::new(attrs, &input.ident, &input.generics);

        match &input.data {
            Data::Struct(data) => Ok(Self::Struct(ShapeStruct::new(meta, &data.fields)?)),
            Data::Enum(data) => Ok(Self::Enum(ShapeEnum::new(
                meta,
                &input.ident,
                &data.variants,
            )?)),
            Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "unions cannot be shaped",
            )),
        }
    }
}
