//! Built-in implementations and the static cells used to implement [`Typed`].
//!
//! ## Implemented Menu
//!
//! - primitives: `bool` `char` `u8` `i8` `u16` `i16` `u32` `i32` `u64` `i64` `f32` `f64` `String`
//! - temporal: `chrono::NaiveDateTime`, `chrono::DateTime<Utc>`, `chrono::DateTime<FixedOffset>`,
//!   `core::time::Duration`, `chrono::TimeDelta`
//! - `rust_decimal::Decimal`
//! - `Option<T>` as the nullable wrapper
//! - sequences: `[T; N]`, `Box<[T]>`, `Arc<[T]>`, `VecDeque<T>`, `Vec<T>`
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod option;
mod primitives;
mod sequences;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
