#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `sf_shape`, including inside its own tests.
extern crate self as sf_shape;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod describe;
pub mod formatter;
pub mod impls;
pub mod info;
pub mod serde;
pub mod text;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::ShapeError;
pub use sf_shape_derive as derive;
