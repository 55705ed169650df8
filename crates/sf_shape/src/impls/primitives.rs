use core::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::text::InvariantFormat;
use crate::value::{Property, Value};

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<Self>(TypeKind::Opaque)
                        .with_zero(|| Box::new(<$ty as Default>::default()) as Box<dyn Value>)
                })
            }
        }

        impl Value for $ty {
            #[inline]
            fn value_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn clone_value(&self) -> Box<dyn Value> {
                Box::new(Clone::clone(self))
            }

            fn value_eq(&self, other: &dyn Value) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
            }

            fn invariant_text(&self) -> Option<String> {
                Some(InvariantFormat::invariant_format(self))
            }

            fn display_text(&self) -> String {
                InvariantFormat::invariant_format(self)
            }
        }

        impl Property for $ty {}
    )*};
}

impl_primitive!(
    bool, char, String,
    u8, i8, u16, i16, u32, i32, u64, i64,
    f32, f64, Decimal,
    NaiveDateTime, DateTime<Utc>, DateTime<FixedOffset>,
    Duration, TimeDelta,
);

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use crate::info::Typed;
    use crate::value::{Property, Value};

    #[test]
    fn zero_values() {
        let zero = i32::type_info().zero_value().unwrap();
        assert_eq!(zero.downcast_ref::<i32>(), Some(&0));

        let zero = String::type_info().zero_value().unwrap();
        assert_eq!(zero.downcast_ref::<String>().map(String::as_str), Some(""));

        let zero = NaiveDateTime::type_info().zero_value().unwrap();
        assert_eq!(zero.invariant_text().as_deref(), Some("1970-01-01T00:00:00.0000000"));
    }

    #[test]
    fn equality_requires_same_type() {
        let a: &dyn Value = &5_i64;
        assert_eq!(a.value_eq(&5_i64), Some(true));
        assert_eq!(a.value_eq(&6_i64), Some(false));
        assert_eq!(a.value_eq(&5_i32), Some(false));
    }

    #[test]
    fn from_value_looks_through_nullable() {
        assert_eq!(i64::from_value(Some(&Some(7_i64))), Some(7));
        assert_eq!(i64::from_value(Some(&None::<i64>)), None);
        assert_eq!(i64::from_value(Some(&7_i32)), None);
        assert_eq!(i64::from_value(None), None);
    }
}
