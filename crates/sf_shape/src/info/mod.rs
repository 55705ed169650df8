//! Static type information published by shaped types.
//!
//! ## Menu
//!
//! - [`Typed`]: A trait giving access to a type's `&'static TypeInfo`.
//! - [`TypeInfo`]: Type identity, paths, [`TypeKind`], zero value and [`Ancestor`].
//! - [`TypeKind`]: The structural kind of a type:
//!     - [`StructInfo`]: members in declaration order, constructors and an activator.
//!     - [`EnumInfo`]: unit variant names.
//!     - `Nullable`: an optional wrapper around another type (`Option<T>`).
//!     - [`SequenceInfo`]: an array or single-parameter collection, see [`SequenceShape`].
//!     - `Opaque`: everything else, including all primitives.
//! - [`MemberInfo`]: A field or accessor property, with bound getter and setter.
//! - [`ConstructorInfo`]: A constructor with its ordered [`ParamInfo`]s.
//! - [`PropertyType`]: The closed primitive classification.

// -----------------------------------------------------------------------------
// Modules

mod constructor_info;
mod enum_info;
mod member_info;
mod property_type;
mod sequence_info;
mod struct_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use constructor_info::{Arguments, ConstructorInfo, ParamInfo};
pub use enum_info::EnumInfo;
pub use member_info::{Access, Getter, MemberInfo, MemberKind, Setter};
pub use property_type::PropertyType;
pub use sequence_info::{SequenceInfo, SequenceShape};
pub use struct_info::StructInfo;
pub use type_info::{Ancestor, TypeInfo, TypeKind, Typed};
