//! Bridges property decomposition to `serde` data formats.
//!
//! - [`PropertiesSerializer`]: serializes any shaped value as a map of
//!   property name to canonical text. Null properties serialize as none,
//!   sequence properties as sequences of item texts.
//! - [`TextMapSeed`]: deserializes such a map into a value through
//!   [`PropertyFormatter::from_text_map`]. Scalar values of the input are
//!   accepted in place of text, so `{"page": 2}` reads like `{"page": "2"}`.
//!
//! No wire format is defined here; any `serde` format works.
//!
//! [`PropertyFormatter::from_text_map`]: crate::formatter::PropertyFormatter::from_text_map

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::TextMapSeed;
pub use ser::PropertiesSerializer;
