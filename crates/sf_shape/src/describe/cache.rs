use std::sync::{PoisonError, RwLock};

use log::trace;
use sf_utils::TypeIdMap;

use crate::describe::TypeDescriptor;
use crate::describe::discovery::discover;
use crate::info::{TypeInfo, Typed};

// Insert-only: published descriptors are leaked and never replaced.
static DESCRIPTORS: RwLock<TypeIdMap<&'static TypeDescriptor>> = RwLock::new(TypeIdMap::new());

/// Returns the descriptor of a type, discovering it on first access.
///
/// Concurrent first calls may each run discovery; exactly one result is
/// published and returned to every caller.
///
/// # Examples
///
/// ```
/// use sf_shape::derive::Shape;
/// use sf_shape::describe::describe_of;
///
/// #[derive(Shape, Clone, Debug)]
/// struct Pair {
///     pub left: i32,
///     pub right: Option<String>,
/// }
///
/// let descriptor = describe_of::<Pair>();
/// assert_eq!(descriptor.len(), 2);
/// assert_eq!(descriptor.property("RIGHT").unwrap().ordinal(), 1);
/// assert!(core::ptr::eq(descriptor, describe_of::<Pair>()));
/// ```
pub fn describe(info: &'static TypeInfo) -> &'static TypeDescriptor {
    let cached = DESCRIPTORS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&info.type_id())
        .copied();
    if let Some(descriptor) = cached {
        return descriptor;
    }

    let descriptor = discover(info);

    *DESCRIPTORS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert(info.type_id(), || {
            trace!("publishing descriptor of `{}`", info.type_path());
            Box::leak(Box::new(descriptor))
        })
}

/// Returns the descriptor of `T`.
#[inline]
pub fn describe_of<T: Typed>() -> &'static TypeDescriptor {
    describe(T::type_info())
}
