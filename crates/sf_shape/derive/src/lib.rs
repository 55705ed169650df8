//! See [`Shape`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SHAPE_ATTRIBUTE_NAME: &str = "shape";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Shape Derivation
///
/// `#[derive(Shape)]` implements `Typed`, `Value` and `Property`, publishing
/// the static description the shape engine discovers properties from.
///
/// Supported inputs:
///
/// - structs with named fields, and unit structs;
/// - enums whose variants are all units.
///
/// Tuple structs, enums with data and unions are rejected.
///
/// The type must implement `Clone` and `Debug`, and be `Send + Sync + 'static`.
///
/// ## Members
///
/// Only public members are discovered:
///
/// - a `pub` field is a public field, writable unless marked `read_only`;
/// - a field marked `get` is a property with a public getter, whatever its
///   visibility. `set` adds a public setter, `private_set` a non-public one.
///
/// Other fields are invisible. `skip` hides a field explicitly, and
/// `rename = "Name"` changes the member name.
///
/// ```rust, ignore
/// #[derive(Shape, Clone, Debug, Default)]
/// #[shape(default)]
/// struct Order {
///     pub id: u64,
///     #[shape(read_only)]
///     pub created: NaiveDateTime,
///     #[shape(get, set, rename = "Note")]
///     note: Option<String>,
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Constructors
///
/// A type without public mutators is immutable and is rebuilt through its
/// public constructor with the most parameters. Constructors are declared
/// with `constructor(fn_name(param: Type [= default], ...))`, naming an
/// associated function that returns `Self`:
///
/// ```rust, ignore
/// #[derive(Shape, Clone, Debug)]
/// #[shape(constructor(new(amount: Decimal, currency: String = "USD".to_string())))]
/// struct Money {
///     #[shape(get)]
///     amount: Decimal,
///     #[shape(get)]
///     currency: String,
/// }
///
/// impl Money {
///     fn new(amount: Decimal, currency: String) -> Self { /* ... */ }
/// }
/// ```
///
/// Parameters bind to the public readable member of the same name, ignoring
/// case, so their values can be read back.
///
/// ## Type Flags
///
/// - `default`: the type implements `Default`; it provides the zero value
///   and the zero-argument activator.
/// - `partial_eq`: the type implements `PartialEq`; used for value equality.
/// - `format`: the type implements `InvariantFormat`; used for its canonical
///   text.
/// - `extends = Base`: `Base` is the ancestor of the type. Requires
///   `AsRef<Base>` and `From<Base>`.
///
/// ## Enums
///
/// Variants are named by their identifier, or by `rename = "Name"`. The
/// first variant is the zero value and the fallback for unknown names.
///
/// ```rust, ignore
/// #[derive(Shape, Clone, Copy, Debug)]
/// enum Priority {
///     Normal,
///     #[shape(rename = "URGENT")]
///     Urgent,
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_shape_impls(ast)
}
