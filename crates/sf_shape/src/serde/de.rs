use core::fmt::{self, Formatter};
use core::marker::PhantomData;

use serde_core::Deserializer;
use serde_core::de::{DeserializeSeed, Error, MapAccess, SeqAccess, Unexpected, Visitor};

use crate::formatter::{PropertyFormatter, PropertyText};
use crate::text::InvariantFormat;
use crate::value::Property;

// -----------------------------------------------------------------------------
// TextMapSeed

/// Deserializes a map of property name to text into a `T`.
///
/// Each text is parsed into the type of the matching property of `T`.
/// Sequence properties also accept a sequence of item texts.
/// Unknown names are ignored and absent properties keep their default.
///
/// # Examples
///
/// ```
/// # use serde_core::de::DeserializeSeed;
/// use sf_shape::derive::Shape;
/// use sf_shape::formatter::PropertyFormatter;
/// use sf_shape::serde::TextMapSeed;
///
/// #[derive(Shape, Clone, Debug, Default, PartialEq)]
/// #[shape(default)]
/// struct Query {
///     pub page: u32,
///     pub sort: Option<String>,
/// }
///
/// let formatter = PropertyFormatter::new();
/// let input = r#"{ "Page": 3, "sort": "name", "debug": true }"#;
///
/// let mut data = serde_json::Deserializer::from_str(input);
/// let query = TextMapSeed::<Query>::new(&formatter).deserialize(&mut data).unwrap();
/// assert_eq!(query, Query { page: 3, sort: Some("name".to_string()) });
/// ```
pub struct TextMapSeed<'a, T> {
    formatter: &'a PropertyFormatter,
    marker: PhantomData<fn() -> T>,
}

impl<'a, T: Property> TextMapSeed<'a, T> {
    #[inline]
    pub fn new(formatter: &'a PropertyFormatter) -> Self {
        Self {
            formatter,
            marker: PhantomData,
        }
    }
}

impl<'de, T: Property> DeserializeSeed<'de> for TextMapSeed<'_, T> {
    type Value = T;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
        deserializer.deserialize_map(TextMapVisitor::<T> {
            formatter: self.formatter,
            marker: PhantomData,
        })
    }
}

// -----------------------------------------------------------------------------
// TextMapVisitor

struct TextMapVisitor<'a, T> {
    formatter: &'a PropertyFormatter,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Property> Visitor<'de> for TextMapVisitor<'_, T> {
    type Value = T;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "a map of property texts for `{}`", T::type_info().type_path())
    }

    fn visit_map<V>(self, mut map: V) -> Result<T, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut pairs: Vec<(String, PropertyText)> =
            Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(name) = map.next_key::<String>()? {
            let text = map.next_value_seed(TextSeed)?;
            pairs.push((name, text));
        }

        let value = self
            .formatter
            .from_property_texts(T::type_info(), pairs)
            .map_err(V::Error::custom)?;

        value.take::<T>().map_err(|value| {
            V::Error::custom(format_args!(
                "expected `{}`, found `{}`",
                T::type_info().type_path(),
                value.value_info().type_path(),
            ))
        })
    }
}

// -----------------------------------------------------------------------------
// TextSeed

/// Reads one scalar as text, or a sequence of scalars as item texts.
/// Null reads as `None`.
#[derive(Clone, Copy)]
struct TextSeed;

impl<'de> DeserializeSeed<'de> for TextSeed {
    type Value = PropertyText;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TextSeed {
    type Value = PropertyText;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a text, number, boolean, null or a sequence of those")
    }

    fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.invariant_format())))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.invariant_format())))
    }

    fn visit_i128<E: Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.to_string())))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.invariant_format())))
    }

    fn visit_u128<E: Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.to_string())))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.invariant_format())))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v.to_string())))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(Some(v)))
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(None))
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(PropertyText::Text(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element_seed(TextSeed)? {
            match item {
                PropertyText::Text(text) => items.push(text),
                // Nested sequences travel as joined item texts.
                PropertyText::Items(_) => {
                    return Err(A::Error::invalid_type(Unexpected::Seq, &self));
                }
            }
        }
        Ok(PropertyText::Items(items))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_core::de::DeserializeSeed;

    use super::TextMapSeed;
    use crate::derive::Shape;
    use crate::formatter::{PropertyFormatter, PropertyText};
    use crate::serde::PropertiesSerializer;

    #[derive(Shape, Clone, Copy, Debug, Default, PartialEq)]
    enum Level {
        #[default]
        Low,
        High,
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default)]
    struct Settings {
        pub name: String,
        pub retries: u8,
        pub ratio: f32,
        pub enabled: bool,
        pub level: Level,
        pub hosts: Vec<String>,
        pub timeout: Option<chrono::TimeDelta>,
    }

    fn settings() -> Settings {
        Settings {
            name: "primary".to_string(),
            retries: 3,
            ratio: 0.5,
            enabled: true,
            level: Level::High,
            hosts: vec!["a.example".to_string(), "b.example".to_string()],
            timeout: chrono::TimeDelta::new(90, 0),
        }
    }

    #[test]
    fn json_round_trip() {
        let formatter = PropertyFormatter::new();
        let value = settings();

        let json = serde_json::to_string(&PropertiesSerializer::new(&formatter, &value)).unwrap();
        assert_eq!(
            json,
            r#"{"name":"primary","retries":"3","ratio":"0.5","enabled":"true","level":"High","hosts":["a.example","b.example"],"timeout":"00:01:30"}"#
        );

        let mut data = serde_json::Deserializer::from_str(&json);
        let parsed = TextMapSeed::<Settings>::new(&formatter)
            .deserialize(&mut data)
            .unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn json_scalars_and_nulls() {
        let formatter = PropertyFormatter::new();
        let input = r#"{"ratio": 0.25, "retries": [1]}"#;

        let mut data = serde_json::Deserializer::from_str(input);
        let result = TextMapSeed::<Settings>::new(&formatter).deserialize(&mut data);
        // Only sequence properties take item lists.
        assert!(result.is_err());

        let mut data = serde_json::Deserializer::from_str(r#"{"hosts": [["a"]]}"#);
        assert!(TextMapSeed::<Settings>::new(&formatter).deserialize(&mut data).is_err());

        let input = r#"{"RETRIES": 7, "ratio": 0.25, "enabled": true, "timeout": null, "level": "nope"}"#;
        let mut data = serde_json::Deserializer::from_str(input);
        let parsed = TextMapSeed::<Settings>::new(&formatter)
            .deserialize(&mut data)
            .unwrap();
        assert_eq!(
            parsed,
            Settings {
                retries: 7,
                ratio: 0.25,
                enabled: true,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn json_invalid_text() {
        let formatter = PropertyFormatter::new();
        let mut data = serde_json::Deserializer::from_str(r#"{"retries": "many"}"#);
        let error = TextMapSeed::<Settings>::new(&formatter)
            .deserialize(&mut data)
            .unwrap_err();
        assert!(error.to_string().contains("many"));
    }

    #[test]
    fn ron_input() {
        let formatter = PropertyFormatter::new();
        let input = r#"{
            "name": "backup",
            "retries": 2,
            "level": "high",
            "hosts": "c.example",
            "timeout": Some("1.00:00:00"),
        }"#;

        let parsed = ron::Options::default()
            .from_str_seed(input, TextMapSeed::<Settings>::new(&formatter))
            .unwrap();
        assert_eq!(
            parsed,
            Settings {
                name: "backup".to_string(),
                retries: 2,
                level: Level::High,
                hosts: vec!["c.example".to_string()],
                timeout: chrono::TimeDelta::new(86_400, 0),
                ..Settings::default()
            }
        );
    }

    #[test]
    fn sequence_items_keep_separators() {
        let formatter = PropertyFormatter::new();
        let cases = [
            (vec![String::new()], r#"[""]"#),
            (vec!["a,b".to_string()], r#"["a,b"]"#),
            (vec!["c\\d".to_string(), String::new()], r#"["c\\d",""]"#),
            (Vec::new(), "[]"),
        ];

        for (hosts, expected) in cases {
            let value = Settings {
                hosts,
                ..Settings::default()
            };
            let json = serde_json::to_string(&PropertiesSerializer::new(&formatter, &value)).unwrap();
            assert!(json.contains(&format!(r#""hosts":{expected}"#)), "{json}");

            let mut data = serde_json::Deserializer::from_str(&json);
            let parsed = TextMapSeed::<Settings>::new(&formatter)
                .deserialize(&mut data)
                .unwrap();
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn skip_defaults() {
        let formatter = PropertyFormatter::new();
        let value = Settings {
            retries: 1,
            ..Settings::default()
        };
        let serializer = PropertiesSerializer::new(&formatter, &value).skip_defaults(true);
        assert_eq!(serde_json::to_string(&serializer).unwrap(), r#"{"retries":"1"}"#);

        // `[""]` and `[]` share a text but not a default.
        let value = Settings {
            hosts: vec![String::new()],
            ..Settings::default()
        };
        let serializer = PropertiesSerializer::new(&formatter, &value).skip_defaults(true);
        assert_eq!(serde_json::to_string(&serializer).unwrap(), r#"{"hosts":[""]}"#);
    }
}
