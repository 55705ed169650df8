//! Canonical, locale-independent text for values.
//!
//! - [`InvariantFormat`] / [`InvariantParse`]: the invariant text contract.
//!   Every classified primitive implements both, and shaped types may opt
//!   into formatting with `#[shape(format)]`.
//! - [`TextConverter`] / [`TextConverterRegistry`]: pluggable converters
//!   for types without a primitive classification.
//!
//! Canonical formats of the classified types:
//!
//! | Kind | Format |
//! |---|---|
//! | integers, `Decimal` | invariant decimal digits |
//! | `Single`, `Double` | shortest round-trip digits, `NaN`, `Infinity`, `-Infinity` |
//! | `Boolean` | `true` / `false` |
//! | `DateTime` | `YYYY-MM-DDTHH:MM:SS.fffffff`, with `Z` for UTC values |
//! | `DateTimeOffset` | `YYYY-MM-DDTHH:MM:SS.fffffff±HH:MM` |
//! | `TimeSpan` | `[-][d.]hh:mm:ss[.fffffff]` |

// -----------------------------------------------------------------------------
// Modules

mod converter;
mod invariant;
mod items;
mod parse;
mod temporal;

// -----------------------------------------------------------------------------
// Exports

pub use converter::{TextConverter, TextConverterRegistry};
pub use invariant::{InvariantFormat, InvariantParse};

pub(crate) use items::{join_items, split_items};
pub(crate) use parse::primitive_parser;

/// Separator between the item texts of a sequence.
///
/// Separators and `\` inside an item are escaped with `\`.
pub const ITEM_SEPARATOR: char = ',';
