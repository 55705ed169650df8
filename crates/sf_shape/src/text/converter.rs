use core::any::TypeId;
use core::fmt;

use sf_utils::TypeIdMap;

use crate::ShapeError;
use crate::info::TypeInfo;
use crate::value::{Property, Value};

// -----------------------------------------------------------------------------
// TextConverter

/// A custom text conversion for one concrete type.
///
/// # Examples
///
/// ```
/// use sf_shape::ShapeError;
/// use sf_shape::derive::Shape;
/// use sf_shape::info::Typed;
/// use sf_shape::text::{TextConverter, TextConverterRegistry};
///
/// #[derive(Shape, Clone, Debug, PartialEq)]
/// struct Rgb {
///     pub r: u8,
///     pub g: u8,
///     pub b: u8,
/// }
///
/// struct HexConverter;
///
/// impl TextConverter for HexConverter {
///     type Target = Rgb;
///
///     fn to_text(&self, value: &Rgb) -> String {
///         format!("#{:02x}{:02x}{:02x}", value.r, value.g, value.b)
///     }
///
///     fn from_text(&self, text: &str) -> Result<Rgb, ShapeError> {
///         let invalid = || ShapeError::InvalidText {
///             text: text.to_string(),
///             type_path: Rgb::type_info().type_path(),
///         };
///         let hex = text.strip_prefix('#').ok_or_else(invalid)?;
///         let channel = |at: usize| {
///             hex.get(at..at + 2)
///                 .and_then(|digits| u8::from_str_radix(digits, 16).ok())
///                 .ok_or_else(invalid)
///         };
///         Ok(Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
///     }
/// }
///
/// let registry = TextConverterRegistry::new().with(HexConverter);
/// let red = Rgb { r: 255, g: 0, b: 0 };
///
/// assert_eq!(registry.to_text(&red).as_deref(), Some("#ff0000"));
///
/// let parsed = registry.from_text(Rgb::type_info(), "#ff0000").unwrap().unwrap();
/// assert_eq!(parsed.take::<Rgb>().ok(), Some(red));
/// ```
pub trait TextConverter: Send + Sync + 'static {
    /// The type this converter handles.
    type Target: Property;

    fn to_text(&self, value: &Self::Target) -> String;

    fn from_text(&self, text: &str) -> Result<Self::Target, ShapeError>;
}

trait ErasedConverter: Send + Sync {
    fn to_text(&self, value: &dyn Value) -> Option<String>;

    fn from_text(&self, text: &str) -> Result<Box<dyn Value>, ShapeError>;
}

impl<C: TextConverter> ErasedConverter for C {
    fn to_text(&self, value: &dyn Value) -> Option<String> {
        value
            .downcast_ref::<C::Target>()
            .map(|value| TextConverter::to_text(self, value))
    }

    fn from_text(&self, text: &str) -> Result<Box<dyn Value>, ShapeError> {
        TextConverter::from_text(self, text).map(|value| Box::new(value) as Box<dyn Value>)
    }
}

// -----------------------------------------------------------------------------
// TextConverterRegistry

/// A set of [`TextConverter`]s keyed by their target type.
///
/// Every lookup walks the inheritance chain: the value's own type first,
/// then each ancestor, until a converter is found. A converter registered
/// for a base type therefore serves all types extending it.
#[derive(Default)]
pub struct TextConverterRegistry {
    converters: TypeIdMap<Box<dyn ErasedConverter>>,
}

impl TextConverterRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a converter, replacing any previous converter for the same type.
    pub fn register<C: TextConverter>(&mut self, converter: C) -> &mut Self {
        self.converters
            .insert(TypeId::of::<C::Target>(), Box::new(converter));
        self
    }

    /// Builder form of [`register`](Self::register).
    #[inline]
    pub fn with<C: TextConverter>(mut self, converter: C) -> Self {
        self.register(converter);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Returns `true` if a converter serves `info` or one of its ancestors.
    pub fn can_convert(&self, info: &'static TypeInfo) -> bool {
        info.lineage()
            .any(|info| self.converters.contains(&info.type_id()))
    }

    /// Converts a value to text with the nearest converter in its chain.
    ///
    /// Returns `None` if no converter is found.
    pub fn to_text(&self, value: &dyn Value) -> Option<String> {
        let mut current = value;
        loop {
            let info = current.value_info();
            if let Some(converter) = self.converters.get(&info.type_id()) {
                return converter.to_text(current);
            }
            current = info.ancestor()?.upcast(current)?;
        }
    }

    /// Converts text into a value of `info` with the nearest converter in its chain.
    ///
    /// A value produced by an ancestor's converter is narrowed back into
    /// `info`. Returns `Ok(None)` if no converter is found.
    pub fn from_text(
        &self,
        info: &'static TypeInfo,
        text: &str,
    ) -> Result<Option<Box<dyn Value>>, ShapeError> {
        let chain: Vec<&'static TypeInfo> = info.lineage().collect();

        let Some((depth, converter)) = chain
            .iter()
            .enumerate()
            .find_map(|(depth, info)| Some((depth, self.converters.get(&info.type_id())?)))
        else {
            return Ok(None);
        };

        let mut value = converter.from_text(text)?;
        for derived in chain[..depth].iter().rev() {
            let actual = value.value_info().type_path();
            value = derived
                .ancestor()
                .and_then(|ancestor| ancestor.narrow(value))
                .ok_or(ShapeError::MismatchedType {
                    expected: derived.type_path(),
                    actual,
                })?;
        }
        Ok(Some(value))
    }
}

impl fmt::Debug for TextConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextConverterRegistry")
            .field("len", &self.converters.len())
            .finish()
    }
}
