use core::str::FromStr;

use rust_decimal::Decimal;

// -----------------------------------------------------------------------------
// Traits

/// Formats a value the same way regardless of locale or host settings.
///
/// # Examples
///
/// ```
/// use sf_shape::text::InvariantFormat;
///
/// assert_eq!(1.5_f64.invariant_format(), "1.5");
/// assert_eq!(f32::NEG_INFINITY.invariant_format(), "-Infinity");
/// assert_eq!(true.invariant_format(), "true");
/// ```
pub trait InvariantFormat {
    fn invariant_format(&self) -> String;
}

/// Parses the text produced by [`InvariantFormat`].
pub trait InvariantParse: Sized {
    /// Returns `None` if the text is not a valid representation.
    fn invariant_parse(text: &str) -> Option<Self>;
}

// -----------------------------------------------------------------------------
// Integers and decimal

macro_rules! impl_from_str {
    ($($ty:ty),*) => {$(
        impl InvariantFormat for $ty {
            #[inline]
            fn invariant_format(&self) -> String {
                self.to_string()
            }
        }

        impl InvariantParse for $ty {
            #[inline]
            fn invariant_parse(text: &str) -> Option<Self> {
                <$ty as FromStr>::from_str(text.trim()).ok()
            }
        }
    )*};
}

impl_from_str!(u8, i8, u16, i16, u32, i32, u64, i64, Decimal);

// -----------------------------------------------------------------------------
// Floating point

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl InvariantFormat for $ty {
            fn invariant_format(&self) -> String {
                if self.is_nan() {
                    String::from("NaN")
                } else if self.is_infinite() {
                    String::from(if *self > 0.0 { "Infinity" } else { "-Infinity" })
                } else {
                    self.to_string()
                }
            }
        }

        impl InvariantParse for $ty {
            fn invariant_parse(text: &str) -> Option<Self> {
                match text.trim() {
                    "NaN" => Some(<$ty>::NAN),
                    "Infinity" => Some(<$ty>::INFINITY),
                    "-Infinity" => Some(<$ty>::NEG_INFINITY),
                    text => text.parse().ok().filter(|value: &$ty| value.is_finite()),
                }
            }
        }
    )*};
}

impl_float!(f32, f64);

// -----------------------------------------------------------------------------
// Text-like

impl InvariantFormat for bool {
    #[inline]
    fn invariant_format(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }
}

impl InvariantParse for bool {
    fn invariant_parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl InvariantFormat for char {
    #[inline]
    fn invariant_format(&self) -> String {
        self.to_string()
    }
}

impl InvariantParse for char {
    fn invariant_parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

impl InvariantFormat for String {
    #[inline]
    fn invariant_format(&self) -> String {
        self.clone()
    }
}

impl InvariantParse for String {
    #[inline]
    fn invariant_parse(text: &str) -> Option<Self> {
        Some(String::from(text))
    }
}
