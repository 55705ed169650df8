use core::any::Any;
use core::fmt::Debug;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Value

/// An object-safe view of a shaped value.
///
/// Implemented by [`#[derive(Shape)]`](crate::derive::Shape) and for the
/// built-in types.
pub trait Value: Any + Send + Sync + Debug {
    /// Returns the type information of the concrete type.
    fn value_info(&self) -> &'static TypeInfo;

    fn clone_value(&self) -> Box<dyn Value>;

    /// Compares with another value, if the type supports equality.
    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        let _ = other;
        None
    }

    /// Formats the value without depending on any locale.
    ///
    /// `None` means the type has no such representation.
    fn invariant_text(&self) -> Option<String> {
        None
    }

    /// The fallback textual form of the value.
    fn display_text(&self) -> String {
        format!("{self:?}")
    }

    /// For nullable wrappers, returns the wrapped value if present.
    ///
    /// Returns `None` for everything else.
    fn as_option(&self) -> Option<Option<&dyn Value>> {
        None
    }

    /// For sequences, returns the items in order.
    fn items(&self) -> Option<Vec<&dyn Value>> {
        None
    }
}

impl dyn Value {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Takes the value out as `T`, or returns it unchanged on type mismatch.
    pub fn take<T: Any>(self: Box<dyn Value>) -> Result<T, Box<dyn Value>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            // Checked above.
            Err(_) => unreachable!("value changed type while being taken"),
        }
    }
}

impl Clone for Box<dyn Value> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

// -----------------------------------------------------------------------------
// Nullable helpers

/// Looks through nullable wrappers.
///
/// Returns `None` for a null input and for an empty optional at any depth.
///
/// ```
/// use sf_shape::value::{Value, unwrap_nullable};
///
/// let value: Option<Option<i32>> = Some(Some(3));
/// let inner = unwrap_nullable(Some(&value)).unwrap();
/// assert_eq!(inner.downcast_ref::<i32>(), Some(&3));
///
/// let empty: Option<i32> = None;
/// assert!(unwrap_nullable(Some(&empty)).is_none());
/// ```
pub fn unwrap_nullable(value: Option<&dyn Value>) -> Option<&dyn Value> {
    let mut value = value?;
    while let Some(inner) = value.as_option() {
        value = inner?;
    }
    Some(value)
}

/// Owned counterpart of [`unwrap_nullable`].
pub fn into_nullable(value: Box<dyn Value>) -> Option<Box<dyn Value>> {
    if value.as_option().is_none() {
        return Some(value);
    }
    unwrap_nullable(Some(&*value)).map(|inner| inner.clone_value())
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn take_checks_the_type() {
        let value: Box<dyn Value> = Box::new("text".to_string());
        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "text");

        let nested: Box<dyn Value> = Box::new(Some(4_u16));
        assert_eq!(nested.take::<Option<u16>>().unwrap(), Some(4));
    }
}
