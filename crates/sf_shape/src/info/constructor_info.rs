use crate::ShapeError;
use crate::info::TypeInfo;
use crate::value::{Property, Value, into_nullable};

// -----------------------------------------------------------------------------
// ParamInfo

/// A constructor parameter.
#[derive(Debug, Clone)]
pub struct ParamInfo {
    name: &'static str,
    position: usize,
    type_info: fn() -> &'static TypeInfo,
    accepts: fn(Option<&dyn Value>) -> bool,
    default: Option<fn() -> Box<dyn Value>>,
}

fn accepts<T: Property>(value: Option<&dyn Value>) -> bool {
    T::from_value(value).is_some()
}

impl ParamInfo {
    pub fn new<T: Property>(name: &'static str, position: usize) -> Self {
        Self {
            name,
            position,
            type_info: T::type_info,
            accepts: accepts::<T>,
            default: None,
        }
    }

    /// Sets the declared default of the parameter.
    #[inline]
    pub fn with_default(mut self, default: fn() -> Box<dyn Value>) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns `true` if `value` converts into the parameter type.
    #[inline]
    pub fn accepts(&self, value: Option<&dyn Value>) -> bool {
        (self.accepts)(value)
    }

    #[inline]
    pub fn declared_default(&self) -> Option<fn() -> Box<dyn Value>> {
        self.default
    }

    /// The declared default, or else the zero value of the parameter type.
    ///
    /// An empty optional yields `None`.
    pub fn default_value(&self) -> Option<Box<dyn Value>> {
        let value = match self.default {
            Some(default) => default(),
            None => self.type_info().zero_value()?,
        };
        into_nullable(value)
    }
}

// -----------------------------------------------------------------------------
// Arguments

/// Positional arguments handed to [`ConstructorInfo::invoke`].
#[derive(Debug)]
pub struct Arguments {
    type_path: &'static str,
    values: Vec<(&'static str, Option<Box<dyn Value>>)>,
}

impl Arguments {
    /// Creates an empty argument list for a constructor of `type_path`.
    pub fn new(type_path: &'static str) -> Self {
        Self {
            type_path,
            values: Vec::new(),
        }
    }

    /// Appends the next positional argument.
    pub fn push(&mut self, name: &'static str, value: Option<Box<dyn Value>>) {
        self.values.push((name, value));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Takes the argument at `index`, converted into `T`.
    ///
    /// A null argument converts into an empty optional; for other types it
    /// is reported as [`ShapeError::MissingArgument`].
    pub fn take<T: Property>(&mut self, index: usize) -> Result<T, ShapeError> {
        let (name, value) = match self.values.get_mut(index) {
            Some((name, value)) => (*name, value.take()),
            None => ("", None),
        };
        T::from_value(value.as_deref()).ok_or(ShapeError::MissingArgument {
            name,
            type_path: self.type_path,
        })
    }
}

// -----------------------------------------------------------------------------
// ConstructorInfo

/// A constructor of a struct.
#[derive(Debug, Clone)]
pub struct ConstructorInfo {
    public: bool,
    params: Box<[ParamInfo]>,
    invoke: fn(Arguments) -> Result<Box<dyn Value>, ShapeError>,
}

impl ConstructorInfo {
    /// Creates a public constructor.
    pub fn new(
        params: Vec<ParamInfo>,
        invoke: fn(Arguments) -> Result<Box<dyn Value>, ShapeError>,
    ) -> Self {
        Self {
            public: true,
            params: params.into_boxed_slice(),
            invoke,
        }
    }

    /// Marks the constructor as not public.
    #[inline]
    pub fn non_public(mut self) -> Self {
        self.public = false;
        self
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn invoke(&self, args: Arguments) -> Result<Box<dyn Value>, ShapeError> {
        (self.invoke)(args)
    }
}
