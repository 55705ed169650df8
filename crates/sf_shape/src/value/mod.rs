//! The runtime value model.
//!
//! - [`Value`]: An object-safe view of any shaped value.
//! - [`Property`]: A [`Value`] with static type information that can be
//!   built from another value.
//! - [`unwrap_nullable`] and [`into_nullable`]: null normalization helpers.

// -----------------------------------------------------------------------------
// Modules

mod property;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use property::{Property, from_enum_text};
pub use value::{Value, into_nullable, unwrap_nullable};
