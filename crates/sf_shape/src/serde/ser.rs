use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::formatter::PropertyFormatter;
use crate::value::{Value, unwrap_nullable};

/// Serializes a shaped value as a map of property name to canonical text.
///
/// Sequence properties serialize as sequences of item texts, so items keep
/// empty texts and separators.
///
/// # Examples
///
/// ```
/// use sf_shape::derive::Shape;
/// use sf_shape::formatter::PropertyFormatter;
/// use sf_shape::serde::PropertiesSerializer;
///
/// #[derive(Shape, Clone, Debug, Default)]
/// #[shape(default)]
/// struct Query {
///     pub page: u32,
///     pub sort: Option<String>,
///     pub tags: Vec<String>,
/// }
///
/// let formatter = PropertyFormatter::new();
/// let query = Query { page: 2, sort: None, tags: vec!["a".into(), "b".into()] };
///
/// let json = serde_json::to_string(&PropertiesSerializer::new(&formatter, &query)).unwrap();
/// assert_eq!(json, r#"{"page":"2","sort":null,"tags":["a","b"]}"#);
///
/// let zero = Query::default();
/// let serializer = PropertiesSerializer::new(&formatter, &zero).skip_defaults(true);
/// assert_eq!(serde_json::to_string(&serializer).unwrap(), "{}");
/// ```
pub struct PropertiesSerializer<'a> {
    formatter: &'a PropertyFormatter,
    value: &'a dyn Value,
    skip_defaults: bool,
}

impl<'a> PropertiesSerializer<'a> {
    #[inline]
    pub fn new(formatter: &'a PropertyFormatter, value: &'a dyn Value) -> Self {
        Self {
            formatter,
            value,
            skip_defaults: false,
        }
    }

    /// Leaves out null properties and properties holding their default.
    #[inline]
    pub fn skip_defaults(mut self, skip_defaults: bool) -> Self {
        self.skip_defaults = skip_defaults;
        self
    }
}

impl Serialize for PropertiesSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries = Vec::new();
        for element in self.formatter.to_properties(self.value) {
            let entry = self.entry(element.value(), element.text().map(str::to_string));
            if self.skip_defaults {
                if element.text().is_none() {
                    continue;
                }
                let default = element.descriptor().default_value();
                let text = self.formatter.canonical_text(default.as_deref());
                if self.entry(default.as_deref(), text) == entry {
                    continue;
                }
            }
            entries.push((element.name(), entry));
        }

        let mut state = serializer.serialize_map(Some(entries.len()))?;
        for (name, entry) in &entries {
            state.serialize_entry(name, entry)?;
        }
        state.end()
    }
}

impl PropertiesSerializer<'_> {
    fn entry(&self, value: Option<&dyn Value>, text: Option<String>) -> Entry {
        match unwrap_nullable(value).and_then(|value| value.items()) {
            Some(items) => Entry::Items(
                items
                    .into_iter()
                    .map(|item| self.formatter.canonical_text(Some(item)))
                    .collect(),
            ),
            None => Entry::Text(text),
        }
    }
}

/// One serialized property. Sequences become serde sequences of item texts.
#[derive(PartialEq)]
enum Entry {
    Text(Option<String>),
    Items(Vec<Option<String>>),
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Text(text) => text.serialize(serializer),
            Entry::Items(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
        }
    }
}
