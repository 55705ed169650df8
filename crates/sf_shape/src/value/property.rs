use crate::info::Typed;
use crate::value::{Value, unwrap_nullable};

/// A [`Value`] that can be built from another value.
///
/// Every member, constructor parameter and sequence item type is a
/// `Property`. The default [`from_value`](Property::from_value) accepts
/// the exact type, looking through nullable wrappers.
pub trait Property: Value + Typed + Clone {
    /// Converts an incoming value into `Self`.
    ///
    /// Returns `None` if the value is null or cannot be converted.
    fn from_value(value: Option<&dyn Value>) -> Option<Self> {
        unwrap_nullable(value)?.downcast_ref::<Self>().cloned()
    }
}

/// Converts a value into the enum `T`, accepting a variant name as text.
///
/// Unknown names give the zero (first) variant.
pub fn from_enum_text<T: Property>(value: Option<&dyn Value>) -> Option<T> {
    let value = unwrap_nullable(value)?;
    if let Some(variant) = value.downcast_ref::<T>() {
        return Some(variant.clone());
    }
    let text = value.downcast_ref::<String>()?;
    T::type_info().as_enum()?.parse(text)?.take::<T>().ok()
}
