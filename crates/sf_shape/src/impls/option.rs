use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::value::{Property, Value};

impl<T: Property> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::new::<Self>(TypeKind::Nullable(T::type_info))
                .with_zero(|| Box::new(None::<T>) as Box<dyn Value>)
        })
    }
}

impl<T: Property> Value for Option<T> {
    #[inline]
    fn value_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        match (self, other.downcast_ref::<Self>()?) {
            (Some(a), Some(b)) => a.value_eq(b),
            (None, None) => Some(true),
            _ => Some(false),
        }
    }

    fn invariant_text(&self) -> Option<String> {
        self.as_ref().and_then(Value::invariant_text)
    }

    fn display_text(&self) -> String {
        self.as_ref().map(Value::display_text).unwrap_or_default()
    }

    fn as_option(&self) -> Option<Option<&dyn Value>> {
        Some(self.as_ref().map(|value| value as &dyn Value))
    }
}

impl<T: Property> Property for Option<T> {
    /// A null value converts into `None`, anything else is converted into `T`.
    fn from_value(value: Option<&dyn Value>) -> Option<Self> {
        let Some(value) = value else {
            return Some(None);
        };
        if let Some(exact) = value.downcast_ref::<Self>() {
            return Some(exact.clone());
        }
        match value.as_option() {
            Some(inner) => Self::from_value(inner),
            None => T::from_value(Some(value)).map(Some),
        }
    }
}
