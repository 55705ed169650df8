//! Parsed forms of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod constructor;
mod shape_derive;
mod shape_enum;
mod shape_meta;
mod shape_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};
pub(crate) use constructor::ConstructorDef;
pub(crate) use shape_derive::ShapeDerive;
pub(crate) use shape_enum::ShapeEnum;
pub(crate) use shape_meta::ShapeMeta;
pub(crate) use shape_struct::{Exposure, SetterAccess, ShapeField, ShapeStruct};
