use core::any::TypeId;
use core::time::Duration;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use sf_utils::TypeIdMap;

use crate::text::InvariantParse;
use crate::value::Value;

type ParseFn = fn(&str) -> Option<Box<dyn Value>>;

fn parse_boxed<T: InvariantParse + Value>(text: &str) -> Option<Box<dyn Value>> {
    T::invariant_parse(text).map(|value| Box::new(value) as Box<dyn Value>)
}

static PARSERS: LazyLock<TypeIdMap<ParseFn>> = LazyLock::new(|| {
    let mut table = TypeIdMap::<ParseFn>::with_capacity(20);
    table.insert_type::<String>(parse_boxed::<String>);
    table.insert_type::<bool>(parse_boxed::<bool>);
    table.insert_type::<char>(parse_boxed::<char>);
    table.insert_type::<u8>(parse_boxed::<u8>);
    table.insert_type::<i8>(parse_boxed::<i8>);
    table.insert_type::<u16>(parse_boxed::<u16>);
    table.insert_type::<i16>(parse_boxed::<i16>);
    table.insert_type::<u32>(parse_boxed::<u32>);
    table.insert_type::<i32>(parse_boxed::<i32>);
    table.insert_type::<u64>(parse_boxed::<u64>);
    table.insert_type::<i64>(parse_boxed::<i64>);
    table.insert_type::<f32>(parse_boxed::<f32>);
    table.insert_type::<f64>(parse_boxed::<f64>);
    table.insert_type::<Decimal>(parse_boxed::<Decimal>);
    table.insert_type::<NaiveDateTime>(parse_boxed::<NaiveDateTime>);
    table.insert_type::<DateTime<Utc>>(parse_boxed::<DateTime<Utc>>);
    table.insert_type::<DateTime<FixedOffset>>(parse_boxed::<DateTime<FixedOffset>>);
    table.insert_type::<Duration>(parse_boxed::<Duration>);
    table.insert_type::<TimeDelta>(parse_boxed::<TimeDelta>);
    table
});

/// Returns the invariant parser of a classified primitive type.
#[inline]
pub(crate) fn primitive_parser(type_id: TypeId) -> Option<ParseFn> {
    PARSERS.get(&type_id).copied()
}
