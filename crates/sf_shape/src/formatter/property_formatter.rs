use core::fmt;
use std::sync::Arc;

use log::{debug, warn};
use sf_utils::eq_no_case;

use crate::ShapeError;
use crate::describe::{PropertyDescriptor, TypeDescriptor, describe};
use crate::formatter::PropertyElement;
use crate::info::{Arguments, ConstructorInfo, StructInfo, TypeInfo, TypeKind};
use crate::text::{TextConverterRegistry, join_items, primitive_parser, split_items};
use crate::value::{Property, Value, unwrap_nullable};

/// A custom activation strategy.
///
/// Returns a fresh instance of the given type, or `None` to fall back to
/// the built-in strategies.
pub type Activator = dyn Fn(&'static TypeInfo) -> Option<Box<dyn Value>> + Send + Sync;

// -----------------------------------------------------------------------------
// PropertyFormatter

/// Decomposes values into [`PropertyElement`]s and rebuilds values from them.
///
/// The formatter is cheap to clone and holds no per-type state: property
/// sets come from the process-wide [`describe`] cache.
///
/// # Canonical text
///
/// Every element carries a locale-independent text for its value:
///
/// 1. a null value has no text;
/// 2. a sequence joins the texts of its items with `,`, escaping `,` and
///    `\` inside them with `\`;
/// 3. classified primitives and types with an invariant format use it;
/// 4. a registered [`TextConverter`](crate::text::TextConverter) for the
///    type or one of its ancestors is used next;
/// 5. otherwise the default textual form of the value.
///
/// # Reconstruction
///
/// An instance is obtained, in order, from the custom [`Activator`], the
/// constructor of an immutable type, or the zero-argument activator of the
/// type. Constructor arguments are taken from the elements by name and fall
/// back to the parameter defaults. Every other writable element is then set
/// on the matching target property.
///
/// # Example
///
/// ```
/// use sf_shape::derive::Shape;
/// use sf_shape::formatter::PropertyFormatter;
///
/// #[derive(Shape, Clone, Debug, Default, PartialEq)]
/// #[shape(default)]
/// struct Version1 {
///     pub id: u32,
///     pub name: String,
/// }
///
/// #[derive(Shape, Clone, Debug, Default, PartialEq)]
/// #[shape(default)]
/// struct Version2 {
///     pub id: u32,
///     pub name: String,
///     pub retries: Option<u8>,
/// }
///
/// let formatter = PropertyFormatter::new();
/// let old = Version1 { id: 7, name: "seven".to_string() };
///
/// let elements = formatter.to_properties(&old);
/// let new: Version2 = formatter.from_properties_as(&elements).unwrap();
/// assert_eq!(new, Version2 { id: 7, name: "seven".to_string(), retries: None });
/// ```
#[derive(Clone, Default)]
pub struct PropertyFormatter {
    converters: Option<Arc<TextConverterRegistry>>,
    activator: Option<Arc<Activator>>,
}

impl PropertyFormatter {
    /// A formatter without converters or custom activation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `converters` for types without a primitive classification.
    pub fn with_converters(self, converters: TextConverterRegistry) -> Self {
        self.with_shared_converters(Arc::new(converters))
    }

    /// Shares a converter registry with other formatters.
    pub fn with_shared_converters(mut self, converters: Arc<TextConverterRegistry>) -> Self {
        self.converters = Some(converters);
        self
    }

    /// Uses `activator` before the built-in activation strategies.
    pub fn with_activator<F>(mut self, activator: F) -> Self
    where
        F: Fn(&'static TypeInfo) -> Option<Box<dyn Value>> + Send + Sync + 'static,
    {
        self.activator = Some(Arc::new(activator));
        self
    }

    #[inline]
    pub fn converters(&self) -> Option<&TextConverterRegistry> {
        self.converters.as_deref()
    }

    // -------------------------------------------------------------------------
    // Lookups

    /// See [`describe`].
    #[inline]
    pub fn describe(&self, info: &'static TypeInfo) -> &'static TypeDescriptor {
        describe(info)
    }

    /// The properties of a type in ordinal order.
    #[inline]
    pub fn properties_by_ordinal(&self, info: &'static TypeInfo) -> &'static [PropertyDescriptor] {
        describe(info).properties()
    }

    /// The property of a type named `name`, ignoring case.
    #[inline]
    pub fn properties_by_name(
        &self,
        info: &'static TypeInfo,
        name: &str,
    ) -> Option<&'static PropertyDescriptor> {
        describe(info).property(name)
    }

    // -------------------------------------------------------------------------
    // Decomposition

    fn decompose(&self, descriptor: &'static TypeDescriptor, value: &dyn Value) -> Vec<PropertyElement> {
        descriptor
            .properties()
            .iter()
            .map(|property| {
                let value = property.get(value);
                let text = self.canonical_text(value.as_deref());
                PropertyElement::new(property, value, text)
            })
            .collect()
    }

    /// Decomposes `value` into elements ordered by ordinal.
    pub fn to_properties(&self, value: &dyn Value) -> Vec<PropertyElement> {
        self.decompose(describe(value.value_info()), value)
    }

    /// Decomposes `value` with the property set of `info`.
    ///
    /// `info` is the type of the value or one of its ancestors.
    ///
    /// # Errors
    ///
    /// [`ShapeError::MismatchedType`] if the value cannot be viewed as `info`.
    pub fn to_properties_of(
        &self,
        info: &'static TypeInfo,
        value: &dyn Value,
    ) -> Result<Vec<PropertyElement>, ShapeError> {
        let view = view_as(value, info).ok_or(ShapeError::MismatchedType {
            expected: info.type_path(),
            actual: value.value_info().type_path(),
        })?;
        Ok(self.decompose(describe(info), view))
    }

    // -------------------------------------------------------------------------
    // Reconstruction

    fn construct(
        &self,
        info: &'static TypeInfo,
        constructor: &ConstructorInfo,
        elements: &[PropertyElement],
    ) -> Result<Box<dyn Value>, ShapeError> {
        let mut args = Arguments::new(info.type_path());
        for param in constructor.params() {
            let supplied = elements
                .iter()
                .find(|element| eq_no_case(element.name(), param.name()));
            let value = match supplied {
                Some(element) if param.accepts(element.value()) => {
                    element.value().map(|value| value.clone_value())
                }
                Some(element) => {
                    warn!(
                        "argument `{}` of `{}` cannot take {:?}, using its default",
                        param.name(),
                        info.type_path(),
                        element.value(),
                    );
                    param.default_value()
                }
                None => param.default_value(),
            };
            args.push(param.name(), value);
        }
        constructor.invoke(args)
    }

    fn activate(
        &self,
        descriptor: &'static TypeDescriptor,
        elements: &[PropertyElement],
    ) -> Result<Box<dyn Value>, ShapeError> {
        let info = descriptor.type_info();

        if let Some(instance) = self.activator.as_ref().and_then(|activate| activate(info)) {
            if instance.value_info().type_id() != info.type_id() {
                return Err(ShapeError::MismatchedType {
                    expected: info.type_path(),
                    actual: instance.value_info().type_path(),
                });
            }
            return Ok(instance);
        }

        if let Some(constructor) = descriptor.constructor() {
            return self.construct(info, constructor, elements);
        }

        match info.as_struct().and_then(StructInfo::activator) {
            Some(activate) => Ok(activate()),
            None => Err(ShapeError::Construction {
                type_path: info.type_path(),
            }),
        }
    }

    /// Reconstructs an instance of `info` from `elements`.
    ///
    /// Elements may stem from any type: they are matched by name, ignoring
    /// case. Read-only elements only feed constructor arguments. Unknown
    /// elements are ignored and values that cannot be converted into the
    /// target property are skipped.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Construction`] if no instance can be obtained, and any
    /// error of the constructor invoked.
    pub fn from_properties(
        &self,
        info: &'static TypeInfo,
        elements: &[PropertyElement],
    ) -> Result<Box<dyn Value>, ShapeError> {
        let descriptor = describe(info);
        let mut instance = self.activate(descriptor, elements)?;

        for element in elements {
            if element.descriptor().is_read_only() {
                continue;
            }
            let Some(target) = descriptor.property(element.name()) else {
                debug!(
                    "ignoring `{}`, `{}` has no such property",
                    element.name(),
                    info.type_path(),
                );
                continue;
            };
            if target.is_read_only() {
                debug!(
                    "ignoring `{}`, the property of `{}` is read-only",
                    element.name(),
                    info.type_path(),
                );
                continue;
            }
            if !target.set(&mut *instance, element.value()) {
                warn!(
                    "cannot set `{}` of `{}` to {:?}, skipped",
                    target.name(),
                    info.type_path(),
                    element.value(),
                );
            }
        }

        Ok(instance)
    }

    /// Typed form of [`from_properties`](Self::from_properties).
    pub fn from_properties_as<T: Property>(&self, elements: &[PropertyElement]) -> Result<T, ShapeError> {
        take_as::<T>(self.from_properties(T::type_info(), elements)?)
    }

    /// Copies a value by decomposing and reconstructing it.
    pub fn copy_value(&self, value: &dyn Value) -> Result<Box<dyn Value>, ShapeError> {
        self.from_properties(value.value_info(), &self.to_properties(value))
    }

    /// Typed form of [`copy_value`](Self::copy_value).
    pub fn copy<T: Property>(&self, value: &T) -> Result<T, ShapeError> {
        take_as::<T>(self.copy_value(value)?)
    }

    // -------------------------------------------------------------------------
    // Text

    /// The canonical text of a value; `None` for null.
    pub fn canonical_text(&self, value: Option<&dyn Value>) -> Option<String> {
        let value = unwrap_nullable(value)?;

        if let Some(items) = value.items() {
            return Some(join_items(
                items
                    .into_iter()
                    .map(|item| self.canonical_text(Some(item)).unwrap_or_default()),
            ));
        }

        if let Some(text) = value.invariant_text() {
            return Some(text);
        }

        if let Some(text) = self.converters().and_then(|c| c.to_text(value)) {
            return Some(text);
        }

        Some(value.display_text())
    }

    /// Parses text into a value of `info`.
    ///
    /// Absent text, and empty text for nullable types, parse to null.
    /// Other empty text parses to the zero value of the type, unless the
    /// type is `String` or has a registered converter. Nullable types parse
    /// as their inner type, sequences split on unescaped `,`, and enums fall
    /// back to their zero variant for unknown names.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::InvalidText`] if the text is malformed for the type.
    /// - [`ShapeError::UnsupportedType`] if the type has no text conversion.
    pub fn parse_text(
        &self,
        info: &'static TypeInfo,
        text: Option<&str>,
    ) -> Result<Option<Box<dyn Value>>, ShapeError> {
        let Some(text) = text else {
            return Ok(None);
        };

        let invalid = || ShapeError::InvalidText {
            text: text.to_string(),
            type_path: info.type_path(),
        };

        match info.kind() {
            TypeKind::Nullable(inner) => {
                if text.is_empty() {
                    return Ok(None);
                }
                return self.parse_text(inner(), Some(text));
            }
            TypeKind::Sequence(sequence) => {
                let items = if text.is_empty() {
                    Vec::new()
                } else {
                    split_items(text)
                        .iter()
                        .map(|part| self.parse_text(sequence.item(), Some(part.as_str())))
                        .collect::<Result<Vec<_>, _>>()?
                };
                return sequence.from_items(items).map(Some).ok_or_else(invalid);
            }
            _ => {}
        }

        if text.is_empty()
            && !info.is::<String>()
            && !self.converters().is_some_and(|c| c.can_convert(info))
        {
            return Ok(info.zero_value());
        }

        if let Some(parse) = primitive_parser(info.type_id()) {
            return parse(text).map(Some).ok_or_else(invalid);
        }

        if let Some(shape) = info.as_enum() {
            return shape.parse(text).map(Some).ok_or_else(invalid);
        }

        if let Some(value) = self
            .converters()
            .map(|converters| converters.from_text(info, text))
            .transpose()?
            .flatten()
        {
            return Ok(Some(value));
        }

        Err(ShapeError::UnsupportedType {
            type_path: info.type_path(),
        })
    }

    /// Parses separate item texts into a sequence of `info`.
    ///
    /// Unlike [`parse_text`](Self::parse_text) the items need no escaping,
    /// so empty items and items containing `,` are kept.
    pub(crate) fn parse_items(
        &self,
        info: &'static TypeInfo,
        items: &[Option<String>],
    ) -> Result<Option<Box<dyn Value>>, ShapeError> {
        let invalid = || ShapeError::InvalidText {
            text: join_items(items.iter().map(|item| item.as_deref().unwrap_or_default())),
            type_path: info.type_path(),
        };

        match info.kind() {
            TypeKind::Nullable(inner) => self.parse_items(inner(), items),
            TypeKind::Sequence(sequence) => {
                let values = items
                    .iter()
                    .map(|item| self.parse_text(sequence.item(), item.as_deref()))
                    .collect::<Result<Vec<_>, _>>()?;
                sequence.from_items(values).map(Some).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }

    pub(crate) fn from_property_texts<N, I>(
        &self,
        info: &'static TypeInfo,
        pairs: I,
    ) -> Result<Box<dyn Value>, ShapeError>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, PropertyText)>,
    {
        let descriptor = describe(info);
        let mut elements = Vec::new();
        for (name, text) in pairs {
            let name = name.as_ref();
            let Some(property) = descriptor.property(name) else {
                debug!("ignoring `{name}`, `{}` has no such property", info.type_path());
                continue;
            };
            let (value, text) = match text {
                PropertyText::Text(text) => {
                    (self.parse_text(property.member_type(), text.as_deref())?, text)
                }
                PropertyText::Items(items) => (
                    self.parse_items(property.member_type(), &items)?,
                    Some(join_items(
                        items.iter().map(|item| item.as_deref().unwrap_or_default()),
                    )),
                ),
            };
            elements.push(PropertyElement::new(property, value, text));
        }
        self.from_properties(info, &elements)
    }

    /// Reconstructs an instance of `info` from `(name, text)` pairs.
    ///
    /// Each text is parsed into the type of the matching property of `info`.
    /// Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Any error of [`parse_text`](Self::parse_text) or
    /// [`from_properties`](Self::from_properties).
    ///
    /// # Example
    ///
    /// ```
    /// use sf_shape::derive::Shape;
    /// use sf_shape::formatter::PropertyFormatter;
    ///
    /// #[derive(Shape, Clone, Debug, Default, PartialEq)]
    /// #[shape(default)]
    /// struct Query {
    ///     pub page: u32,
    ///     pub tags: Vec<String>,
    /// }
    ///
    /// let formatter = PropertyFormatter::new();
    /// let query: Query = formatter
    ///     .from_text_map_as([("Page", "3"), ("tags", "new,hot"), ("sort", "asc")])
    ///     .unwrap();
    /// assert_eq!(query, Query { page: 3, tags: vec!["new".into(), "hot".into()] });
    /// ```
    pub fn from_text_map<K, V, I>(&self, info: &'static TypeInfo, pairs: I) -> Result<Box<dyn Value>, ShapeError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.from_property_texts(
            info,
            pairs
                .into_iter()
                .map(|(name, text)| (name, PropertyText::Text(Some(text.as_ref().to_string())))),
        )
    }

    /// Typed form of [`from_text_map`](Self::from_text_map).
    pub fn from_text_map_as<T, K, V, I>(&self, pairs: I) -> Result<T, ShapeError>
    where
        T: Property,
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        take_as::<T>(self.from_text_map(T::type_info(), pairs)?)
    }

    /// The `(name, canonical text)` pairs of a value, in ordinal order.
    ///
    /// Null properties are left out. With `skip_defaults`, so are properties
    /// whose text equals the text of their default value.
    pub fn to_text_map(&self, value: &dyn Value, skip_defaults: bool) -> Vec<(&'static str, String)> {
        describe(value.value_info())
            .properties()
            .iter()
            .filter_map(|property| {
                let text = self.canonical_text(property.get(value).as_deref())?;
                if skip_defaults
                    && self.canonical_text(property.default_value().as_deref()).as_ref() == Some(&text)
                {
                    return None;
                }
                Some((property.name(), text))
            })
            .collect()
    }
}

impl fmt::Debug for PropertyFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyFormatter")
            .field("converters", &self.converters)
            .field("activator", &self.activator.is_some())
            .finish()
    }
}

/// The incoming text of one property.
pub(crate) enum PropertyText {
    /// A single text, sequences joined with `,`. `None` is null.
    Text(Option<String>),
    /// Separate item texts of a sequence.
    Items(Vec<Option<String>>),
}

/// Copies a value with a default [`PropertyFormatter`].
#[inline]
pub fn copy<T: Property>(value: &T) -> Result<T, ShapeError> {
    PropertyFormatter::new().copy(value)
}

/// Walks the ancestors of `value` until it has the type `info`.
fn view_as<'a>(value: &'a dyn Value, info: &'static TypeInfo) -> Option<&'a dyn Value> {
    let mut current = value;
    loop {
        let current_info = current.value_info();
        if current_info.type_id() == info.type_id() {
            return Some(current);
        }
        current = current_info.ancestor()?.upcast(current)?;
    }
}

fn take_as<T: Property>(value: Box<dyn Value>) -> Result<T, ShapeError> {
    value.take::<T>().map_err(|value| ShapeError::MismatchedType {
        expected: T::type_info().type_path(),
        actual: value.value_info().type_path(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};
    use rust_decimal::Decimal;

    use super::{PropertyFormatter, copy};
    use crate::ShapeError;
    use crate::derive::Shape;
    use crate::info::Typed;
    use crate::text::{TextConverter, TextConverterRegistry};
    use crate::value::Value;

    #[derive(Shape, Clone, Copy, Debug, Default, PartialEq)]
    enum Kind {
        #[default]
        Plain,
        Fancy,
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default, partial_eq)]
    struct Sample {
        pub id: i32,
        pub name: String,
        pub price: Decimal,
        pub ratio: f64,
        pub flag: bool,
        pub letter: char,
        pub when: NaiveDateTime,
        pub at: DateTime<Utc>,
        pub offset: Option<DateTime<FixedOffset>>,
        pub span: TimeDelta,
        pub wait: Duration,
        pub tags: Vec<String>,
        pub scores: Option<Vec<u16>>,
        pub note: Option<String>,
        pub kind: Kind,
    }

    fn sample() -> Sample {
        Sample {
            id: -42,
            name: "widget".to_string(),
            price: Decimal::new(1999, 2),
            ratio: 0.1,
            flag: true,
            letter: 'λ',
            when: NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_nano_opt(13, 5, 9, 123_456_700)
                .unwrap(),
            at: DateTime::<Utc>::from_timestamp(1_700_000_000, 5_000_000).unwrap(),
            offset: Some(DateTime::parse_from_rfc3339("2024-05-01T08:30:00+02:00").unwrap()),
            span: TimeDelta::new(-93_784, 0).unwrap(),
            wait: Duration::from_millis(1500),
            tags: vec!["a".to_string(), "b".to_string()],
            scores: Some(vec![1, 2, 3]),
            note: None,
            kind: Kind::Fancy,
        }
    }

    fn text_of(formatter: &PropertyFormatter, value: &dyn Value, name: &str) -> Option<String> {
        formatter
            .to_properties(value)
            .into_iter()
            .find(|element| element.name() == name)
            .and_then(|element| element.text().map(str::to_string))
    }

    #[test]
    fn round_trip_identity() {
        let value = sample();
        assert_eq!(copy(&value).unwrap(), value);
        assert_eq!(copy(&Sample::default()).unwrap(), Sample::default());

        let boxed = PropertyFormatter::new().copy_value(&value).unwrap();
        assert_eq!(boxed.value_eq(&value), Some(true));
    }

    #[test]
    fn elements_follow_ordinals() {
        let formatter = PropertyFormatter::new();
        let elements = formatter.to_properties(&sample());
        assert_eq!(elements.len(), 15);
        for (index, element) in elements.iter().enumerate() {
            assert_eq!(element.ordinal(), index);
        }
        assert_eq!(elements[0].name(), "id");
        assert_eq!(elements[0].value().and_then(|v| v.downcast_ref::<i32>()), Some(&-42));

        // The bound value of a sequence is the whole collection.
        let tags = &elements[11];
        assert!(tags.descriptor().is_array());
        assert_eq!(
            tags.value().and_then(|v| v.downcast_ref::<Vec<String>>()).map(Vec::len),
            Some(2),
        );

        // An empty optional decomposes to null.
        let note = &elements[13];
        assert!(note.value().is_none());
        assert!(note.text().is_none());
    }

    #[test]
    fn canonical_texts() {
        let formatter = PropertyFormatter::new();
        let value = sample();
        let text = |name| text_of(&formatter, &value, name);

        assert_eq!(text("id").as_deref(), Some("-42"));
        assert_eq!(text("price").as_deref(), Some("19.99"));
        assert_eq!(text("ratio").as_deref(), Some("0.1"));
        assert_eq!(text("flag").as_deref(), Some("true"));
        assert_eq!(text("letter").as_deref(), Some("λ"));
        assert_eq!(text("when").as_deref(), Some("2024-02-29T13:05:09.1234567"));
        assert_eq!(text("at").as_deref(), Some("2023-11-14T22:13:20.0050000Z"));
        assert_eq!(text("offset").as_deref(), Some("2024-05-01T08:30:00.0000000+02:00"));
        assert_eq!(text("span").as_deref(), Some("-1.02:03:04"));
        assert_eq!(text("wait").as_deref(), Some("00:00:01.5000000"));
        assert_eq!(text("tags").as_deref(), Some("a,b"));
        assert_eq!(text("scores").as_deref(), Some("1,2,3"));
        assert_eq!(text("kind").as_deref(), Some("Fancy"));
    }

    #[test]
    fn default_text_is_fixed() {
        let formatter = PropertyFormatter::new();
        let epoch = NaiveDateTime::default();
        let first = formatter.canonical_text(Some(&epoch));
        assert_eq!(first.as_deref(), Some("1970-01-01T00:00:00.0000000"));
        assert_eq!(formatter.canonical_text(Some(&epoch)), first);
        assert_eq!(
            formatter.canonical_text(Some(&DateTime::<Utc>::default())).as_deref(),
            Some("1970-01-01T00:00:00.0000000Z"),
        );
    }

    #[test]
    fn text_map_round_trip() {
        let formatter = PropertyFormatter::new();
        let value = sample();
        let pairs = formatter.to_text_map(&value, false);
        assert!(pairs.iter().all(|(name, _)| *name != "note"));

        let parsed: Sample = formatter.from_text_map_as(pairs).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn text_map_suppresses_defaults() {
        let formatter = PropertyFormatter::new();
        assert!(formatter.to_text_map(&Sample::default(), true).is_empty());

        let value = Sample {
            id: 5,
            ..Sample::default()
        };
        assert_eq!(formatter.to_text_map(&value, true), [("id", "5".to_string())]);
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default)]
    struct Small {
        pub id: i32,
        pub name: String,
    }

    #[test]
    fn empty_texts_read_as_zero() {
        let formatter = PropertyFormatter::new();
        let parsed: Small = formatter
            .from_text_map_as([("id", ""), ("name", "x")])
            .unwrap();
        assert_eq!(
            parsed,
            Small {
                id: 0,
                name: "x".to_string(),
            }
        );

        let parsed: Sample = formatter
            .from_text_map_as([("kind", ""), ("when", ""), ("flag", ""), ("note", ""), ("name", "")])
            .unwrap();
        assert_eq!(parsed, Sample::default());
    }

    #[test]
    fn sequence_items_are_escaped() {
        let formatter = PropertyFormatter::new();
        let value = Sample {
            tags: vec!["a,b".to_string(), "c\\d".to_string(), String::new()],
            ..Sample::default()
        };
        assert_eq!(text_of(&formatter, &value, "tags").as_deref(), Some(r"a\,b,c\\d,"));

        let parsed: Sample = formatter
            .from_text_map_as(formatter.to_text_map(&value, false))
            .unwrap();
        assert_eq!(parsed.tags, value.tags);

        let nested = vec![vec!["x,y".to_string()], vec!["z".to_string(), String::new()]];
        let text = formatter.canonical_text(Some(&nested)).unwrap();
        let parsed = formatter
            .parse_text(<Vec<Vec<String>>>::type_info(), Some(&text))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.downcast_ref::<Vec<Vec<String>>>(), Some(&nested));
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default)]
    struct Large {
        pub id: i32,
        pub name: String,
        pub extra: u64,
    }

    #[test]
    fn schema_growth_and_shrink() {
        let formatter = PropertyFormatter::new();

        let small = Small {
            id: 3,
            name: "three".to_string(),
        };
        let grown: Large = formatter.from_properties_as(&formatter.to_properties(&small)).unwrap();
        assert_eq!(
            grown,
            Large {
                id: 3,
                name: "three".to_string(),
                extra: 0,
            }
        );

        let large = Large {
            id: 4,
            name: "four".to_string(),
            extra: 99,
        };
        let shrunk: Small = formatter.from_properties_as(&formatter.to_properties(&large)).unwrap();
        assert_eq!(
            shrunk,
            Small {
                id: 4,
                name: "four".to_string(),
            }
        );
    }

    #[derive(Shape, Clone, Debug, Default)]
    #[shape(default)]
    struct Source {
        #[shape(rename = "Comparison")]
        pub comparison: i32,
        pub kind: String,
        pub count: i32,
        pub maybe: Option<i32>,
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default)]
    struct Target {
        pub comparison: i32,
        pub kind: Kind,
        pub count: Option<i32>,
        pub maybe: i32,
    }

    #[test]
    fn names_match_ignoring_case() {
        let formatter = PropertyFormatter::new();
        let source = Source {
            comparison: 12,
            ..Source::default()
        };
        let elements = formatter.to_properties(&source);
        assert_eq!(elements[0].name(), "Comparison");

        let target: Target = formatter.from_properties_as(&elements).unwrap();
        assert_eq!(target.comparison, 12);
    }

    #[test]
    fn enums_from_text_fall_back_to_zero() {
        let formatter = PropertyFormatter::new();
        let convert = |kind: &str| {
            let source = Source {
                kind: kind.to_string(),
                ..Source::default()
            };
            formatter
                .from_properties_as::<Target>(&formatter.to_properties(&source))
                .unwrap()
                .kind
        };
        assert_eq!(convert("fancy"), Kind::Fancy);
        assert_eq!(convert(" Fancy "), Kind::Fancy);
        assert_eq!(convert("Gorgeous"), Kind::Plain);

        let parsed = formatter.parse_text(Kind::type_info(), Some("nope")).unwrap();
        assert_eq!(parsed.and_then(|v| v.take::<Kind>().ok()), Some(Kind::Plain));
    }

    #[test]
    fn nullability_changes() {
        let formatter = PropertyFormatter::new();
        let source = Source {
            count: 5,
            maybe: None,
            ..Source::default()
        };
        let target: Target = formatter.from_properties_as(&formatter.to_properties(&source)).unwrap();
        assert_eq!(target.count, Some(5));
        // A null cannot be set on a non-nullable property and is skipped.
        assert_eq!(target.maybe, 0);

        let source = Source {
            maybe: Some(8),
            ..Source::default()
        };
        let target: Target = formatter.from_properties_as(&formatter.to_properties(&source)).unwrap();
        assert_eq!(target.maybe, 8);
    }

    #[derive(Shape, Clone, Debug, PartialEq)]
    #[shape(partial_eq, constructor(new(amount: Decimal, currency: String = "USD".to_string())))]
    struct Money {
        #[shape(get)]
        amount: Decimal,
        #[shape(get)]
        currency: String,
    }

    impl Money {
        fn new(amount: Decimal, currency: String) -> Self {
            Self { amount, currency }
        }
    }

    #[test]
    fn immutable_types_use_their_constructor() {
        let formatter = PropertyFormatter::new();
        let money = Money::new(Decimal::new(250, 2), "EUR".to_string());
        assert_eq!(formatter.copy(&money).unwrap(), money);

        let parsed: Money = formatter.from_text_map_as([("AMOUNT", "7.5")]).unwrap();
        assert_eq!(parsed, Money::new(Decimal::new(75, 1), "USD".to_string()));

        // An argument of the wrong type falls back to the default.
        let loose = Loose {
            amount: "lots".to_string(),
            currency: "JPY".to_string(),
        };
        let parsed: Money = formatter.from_properties_as(&formatter.to_properties(&loose)).unwrap();
        assert_eq!(parsed, Money::new(Decimal::ZERO, "JPY".to_string()));
    }

    #[derive(Shape, Clone, Debug)]
    struct Loose {
        pub amount: String,
        pub currency: String,
    }

    #[derive(Shape, Clone, Debug)]
    struct NoWay {
        pub id: i32,
    }

    #[test]
    fn construction_errors() {
        let formatter = PropertyFormatter::new();
        let elements = formatter.to_properties(&NoWay { id: 1 });
        assert_eq!(
            formatter.from_properties(NoWay::type_info(), &elements).unwrap_err(),
            ShapeError::Construction {
                type_path: NoWay::type_info().type_path(),
            }
        );

        let formatter = formatter.with_activator(|info| {
            info.is::<NoWay>()
                .then(|| Box::new(NoWay { id: 0 }) as Box<dyn Value>)
        });
        let copied: NoWay = formatter.from_properties_as(&elements).unwrap();
        assert_eq!(copied.id, 1);

        let wrong = PropertyFormatter::new().with_activator(|_| Some(Box::new(1_u8) as Box<dyn Value>));
        assert!(matches!(
            wrong.from_properties(NoWay::type_info(), &elements),
            Err(ShapeError::MismatchedType { .. })
        ));
    }

    #[derive(Shape, Clone, Debug, PartialEq)]
    struct Code {
        #[shape(get)]
        raw: String,
    }

    #[derive(Shape, Clone, Debug, PartialEq)]
    #[shape(extends = Code)]
    struct OrderCode {
        #[shape(skip)]
        code: Code,
    }

    impl AsRef<Code> for OrderCode {
        fn as_ref(&self) -> &Code {
            &self.code
        }
    }

    impl From<Code> for OrderCode {
        fn from(code: Code) -> Self {
            Self { code }
        }
    }

    struct CodeConverter;

    impl TextConverter for CodeConverter {
        type Target = Code;

        fn to_text(&self, value: &Code) -> String {
            format!("#{}", value.raw)
        }

        fn from_text(&self, text: &str) -> Result<Code, ShapeError> {
            match text.strip_prefix('#') {
                Some(raw) => Ok(Code {
                    raw: raw.to_string(),
                }),
                None => Err(ShapeError::InvalidText {
                    text: text.to_string(),
                    type_path: Code::type_info().type_path(),
                }),
            }
        }
    }

    #[derive(Shape, Clone, Debug, Default, PartialEq)]
    #[shape(default)]
    struct Order {
        pub code: Option<OrderCode>,
        pub qty: u32,
    }

    #[test]
    fn converters_serve_derived_types() {
        let formatter =
            PropertyFormatter::new().with_converters(TextConverterRegistry::new().with(CodeConverter));
        let order = Order {
            code: Some(OrderCode::from(Code {
                raw: "A-1".to_string(),
            })),
            qty: 2,
        };

        let pairs = formatter.to_text_map(&order, false);
        assert_eq!(pairs, [("code", "#A-1".to_string()), ("qty", "2".to_string())]);

        let parsed: Order = formatter.from_text_map_as([("code", "#B-2"), ("qty", "3")]).unwrap();
        assert_eq!(parsed.code.map(|code| code.code.raw).as_deref(), Some("B-2"));
        assert_eq!(parsed.qty, 3);

        assert!(matches!(
            formatter.from_text_map_as::<Order, _, _, _>([("code", "B-2")]),
            Err(ShapeError::InvalidText { .. })
        ));
        // Empty text is left to the converter.
        assert!(matches!(
            formatter.parse_text(OrderCode::type_info(), Some("")),
            Err(ShapeError::InvalidText { .. })
        ));
    }

    #[test]
    fn text_without_conversion_is_unsupported() {
        let formatter = PropertyFormatter::new();
        assert_eq!(
            formatter.from_text_map_as::<Order, _, _, _>([("code", "#A-1")]).unwrap_err(),
            ShapeError::UnsupportedType {
                type_path: OrderCode::type_info().type_path(),
            }
        );
        // Decomposition degrades to the default textual form instead.
        let order = Order {
            code: Some(OrderCode::from(Code {
                raw: "A-1".to_string(),
            })),
            qty: 0,
        };
        let text = text_of(&formatter, &order, "code").unwrap();
        assert!(text.contains("A-1"));
    }

    #[test]
    fn decompose_as_ancestor() {
        let formatter = PropertyFormatter::new();
        let code = OrderCode::from(Code {
            raw: "C-3".to_string(),
        });
        assert!(formatter.to_properties(&code).is_empty());

        let elements = formatter.to_properties_of(Code::type_info(), &code).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text(), Some("C-3"));

        assert!(formatter.to_properties_of(Order::type_info(), &code).is_err());
    }

    #[test]
    fn parse_text_shapes() {
        let formatter = PropertyFormatter::new();
        let parse = |info, text| formatter.parse_text(info, text).unwrap();

        assert!(parse(<Option<i32>>::type_info(), Some("")).is_none());
        let zero = parse(u32::type_info(), Some("")).unwrap();
        assert_eq!(zero.downcast_ref::<u32>(), Some(&0));
        let empty = parse(String::type_info(), Some("")).unwrap();
        assert_eq!(empty.downcast_ref::<String>().map(String::as_str), Some(""));
        assert!(parse(i32::type_info(), None).is_none());
        let items = parse(<Vec<u8>>::type_info(), Some("")).unwrap();
        assert_eq!(items.downcast_ref::<Vec<u8>>(), Some(&Vec::new()));
        let items = parse(<[i16; 2]>::type_info(), Some("-1,2")).unwrap();
        assert_eq!(items.downcast_ref::<[i16; 2]>(), Some(&[-1, 2]));

        assert!(matches!(
            formatter.parse_text(<[i16; 2]>::type_info(), Some("1")),
            Err(ShapeError::InvalidText { .. })
        ));
        assert!(matches!(
            formatter.parse_text(u8::type_info(), Some("300")),
            Err(ShapeError::InvalidText { .. })
        ));
    }

    #[test]
    fn lookups() {
        let formatter = PropertyFormatter::new();
        let by_ordinal = formatter.properties_by_ordinal(Large::type_info());
        assert_eq!(by_ordinal.len(), 3);
        let extra = formatter.properties_by_name(Large::type_info(), "EXTRA").unwrap();
        assert_eq!(extra.ordinal(), 2);
        assert!(core::ptr::eq(extra, &by_ordinal[2]));
        assert!(formatter.converters().is_none());
    }
}
