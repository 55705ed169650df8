use core::fmt;
use core::time::Duration;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use sf_utils::TypeIdMap;

use crate::info::{TypeInfo, TypeKind, Typed};

// -----------------------------------------------------------------------------
// PropertyType

/// The closed set of primitive kinds a property can be classified as.
///
/// Variants from [`Byte`](Self::Byte) to [`Decimal`](Self::Decimal) are
/// ordered, and that range is what [`is_number`](Self::is_number) tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PropertyType {
    #[default]
    Unknown,
    String,
    Boolean,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Byte,
    SByte,
    Char,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
}

static CLASSIFICATION: LazyLock<TypeIdMap<PropertyType>> = LazyLock::new(|| {
    let mut table = TypeIdMap::with_capacity(20);
    table.insert_type::<String>(PropertyType::String);
    table.insert_type::<bool>(PropertyType::Boolean);
    table.insert_type::<NaiveDateTime>(PropertyType::DateTime);
    table.insert_type::<DateTime<Utc>>(PropertyType::DateTime);
    table.insert_type::<DateTime<FixedOffset>>(PropertyType::DateTimeOffset);
    table.insert_type::<Duration>(PropertyType::TimeSpan);
    table.insert_type::<TimeDelta>(PropertyType::TimeSpan);
    table.insert_type::<u8>(PropertyType::Byte);
    table.insert_type::<i8>(PropertyType::SByte);
    table.insert_type::<char>(PropertyType::Char);
    table.insert_type::<i16>(PropertyType::Int16);
    table.insert_type::<u16>(PropertyType::UInt16);
    table.insert_type::<i32>(PropertyType::Int32);
    table.insert_type::<u32>(PropertyType::UInt32);
    table.insert_type::<i64>(PropertyType::Int64);
    table.insert_type::<u64>(PropertyType::UInt64);
    table.insert_type::<f32>(PropertyType::Single);
    table.insert_type::<f64>(PropertyType::Double);
    table.insert_type::<Decimal>(PropertyType::Decimal);
    table
});

impl PropertyType {
    /// Classifies a type, looking through nullable wrappers first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sf_shape::info::{PropertyType, Typed};
    ///
    /// assert_eq!(PropertyType::classify(i64::type_info()), PropertyType::Int64);
    /// assert_eq!(PropertyType::classify(<Option<Option<bool>>>::type_info()), PropertyType::Boolean);
    /// assert_eq!(PropertyType::classify(<Vec<i64>>::type_info()), PropertyType::Unknown);
    /// ```
    pub fn classify(info: &TypeInfo) -> Self {
        let mut info = info;
        while let TypeKind::Nullable(inner) = info.kind() {
            info = inner();
        }
        CLASSIFICATION
            .get(&info.type_id())
            .copied()
            .unwrap_or_default()
    }

    /// Classifies `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::classify(T::type_info())
    }

    /// Returns `true` for the numeric kinds, `Byte` through `Decimal`.
    #[inline]
    pub fn is_number(self) -> bool {
        self >= Self::Byte && self <= Self::Decimal
    }

    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
