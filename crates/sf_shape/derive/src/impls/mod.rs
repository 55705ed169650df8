// -----------------------------------------------------------------------------
// Modules

mod match_shape;

mod enum_kind;
mod struct_kind;

mod trait_typed;
mod trait_value;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_shape::match_shape_impls;

use enum_kind::impl_enum;
use struct_kind::impl_struct;
use trait_typed::impl_trait_typed;
use trait_value::{ValueOverrides, impl_trait_value};
