//! Decomposition of values into named property elements, and reconstruction
//! of values from them.
//!
//! - [`PropertyElement`]: one decomposed property, with its typed value and
//!   canonical text.
//! - [`PropertyFormatter`]: `to_properties`, `from_properties`, `copy`, and
//!   the text-map driver built on them.
//!
//! Reconstruction matches elements to the target type by name, ignoring
//! case. Elements unknown to the target are ignored and target properties
//! without an element keep their default, so a type may gain or lose
//! properties without breaking readers or writers of older data.

// -----------------------------------------------------------------------------
// Modules

mod element;
mod property_formatter;

// -----------------------------------------------------------------------------
// Exports

pub use element::PropertyElement;
pub use property_formatter::{Activator, PropertyFormatter, copy};

pub(crate) use property_formatter::PropertyText;
