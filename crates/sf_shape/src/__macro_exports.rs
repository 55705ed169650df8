//! Items referenced by code generated from `#[derive(Shape)]`.

/// Std items named with absolute paths, so generated code does not depend on
/// the prelude of the invoking crate.
pub mod macro_utils {
    pub use ::std::boxed::Box;
    pub use ::std::option::Option::{self, None, Some};
    pub use ::std::result::Result::{self, Ok};
    pub use ::std::string::String;
    pub use ::std::vec;
    pub use ::std::vec::Vec;
}
