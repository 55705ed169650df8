//! Property discovery and the process-wide descriptor cache.
//!
//! - [`PropertyDescriptor`]: one discovered property with bound accessors.
//! - [`TypeDescriptor`]: the ordered, named property set of a type, plus
//!   the constructor used to rebuild it.
//! - [`describe`] / [`describe_of`]: memoized discovery.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod descriptor;
mod discovery;
mod type_descriptor;

// -----------------------------------------------------------------------------
// Exports

pub use cache::{describe, describe_of};
pub use descriptor::PropertyDescriptor;
pub use type_descriptor::TypeDescriptor;
