use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{EnumInfo, SequenceInfo, StructInfo};
use crate::value::{Property, Value};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by [`#[derive(Shape)]`](crate::derive::Shape) and for the
/// built-in primitive, temporal, optional and sequence types.
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`] so the information is built once:
///
/// ```
/// use sf_shape::impls::NonGenericTypeInfoCell;
/// use sf_shape::info::{TypeInfo, TypeKind, Typed};
///
/// struct Token;
///
/// impl Typed for Token {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::new::<Self>(TypeKind::Opaque))
///     }
/// }
///
/// assert_eq!(Token::type_info().type_name(), "Token");
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the static type information of `Self`.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeKind

/// The structural kind of a type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A type with named members.
    Struct(StructInfo),
    /// An enumeration of unit variants.
    Enum(EnumInfo),
    /// An optional wrapper, holding the wrapped type.
    Nullable(fn() -> &'static TypeInfo),
    /// An array or single-parameter collection.
    Sequence(SequenceInfo),
    /// A type without visible structure.
    Opaque,
}

// -----------------------------------------------------------------------------
// Ancestor

/// A link from a type to the type it extends.
///
/// `upcast` views a value of the derived type as its base, and `narrow`
/// turns a base value back into the derived type. Together they form the
/// inheritance chain walked by text converter lookups.
#[derive(Debug, Clone, Copy)]
pub struct Ancestor {
    info: fn() -> &'static TypeInfo,
    upcast: fn(&dyn Value) -> Option<&dyn Value>,
    narrow: fn(Box<dyn Value>) -> Option<Box<dyn Value>>,
}

fn upcast_impl<T: Value + AsRef<B>, B: Value>(value: &dyn Value) -> Option<&dyn Value> {
    value
        .downcast_ref::<T>()
        .map(|derived| AsRef::<B>::as_ref(derived) as &dyn Value)
}

fn narrow_impl<T: Value + From<B>, B: Value>(value: Box<dyn Value>) -> Option<Box<dyn Value>> {
    let base = value.take::<B>().ok()?;
    Some(Box::new(T::from(base)))
}

impl Ancestor {
    /// Creates the link from `T` to its base `B`.
    pub fn new<T, B>() -> Self
    where
        T: Value + AsRef<B> + From<B>,
        B: Property,
    {
        Self {
            info: B::type_info,
            upcast: upcast_impl::<T, B>,
            narrow: narrow_impl::<T, B>,
        }
    }

    /// Returns the base type information.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// Views a value of the derived type as its base.
    #[inline]
    pub fn upcast<'a>(&self, value: &'a dyn Value) -> Option<&'a dyn Value> {
        (self.upcast)(value)
    }

    /// Converts a base value into the derived type.
    #[inline]
    pub fn narrow(&self, value: Box<dyn Value>) -> Option<Box<dyn Value>> {
        (self.narrow)(value)
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about one type.
///
/// # Content
///
/// - **id**: [`TypeId`], the identity used by every cache and registry.
/// - **path**: the full path as given by [`core::any::type_name`].
/// - **name**: the path with module prefixes stripped (`Option<Vec<i32>>`).
/// - **kind**: see [`TypeKind`].
/// - **zero**: an optional factory for the type's zero value.
/// - **ancestor**: an optional base type, see [`Ancestor`].
#[derive(Clone)]
pub struct TypeInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: String,
    kind: TypeKind,
    zero: Option<fn() -> Box<dyn Value>>,
    ancestor: Option<Ancestor>,
}

impl TypeInfo {
    /// Creates the information of `T` with the given kind.
    pub fn new<T: Any>(kind: TypeKind) -> Self {
        let type_path = core::any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: short_name(type_path),
            kind,
            zero: None,
            ancestor: None,
        }
    }

    /// Sets the zero value factory.
    #[inline]
    pub fn with_zero(mut self, zero: fn() -> Box<dyn Value>) -> Self {
        self.zero = Some(zero);
        self
    }

    /// Sets the base type.
    #[inline]
    pub fn with_ancestor(mut self, ancestor: Ancestor) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if this is the information of `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.kind {
            TypeKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceInfo> {
        match &self.kind {
            TypeKind::Sequence(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the wrapped type if this is a nullable wrapper.
    pub fn nullable_inner(&self) -> Option<&'static TypeInfo> {
        match &self.kind {
            TypeKind::Nullable(inner) => Some(inner()),
            _ => None,
        }
    }

    /// Strips every nullable wrapper, `Option<Option<T>>` gives `T`.
    pub fn underlying(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Some(inner) = info.nullable_inner() {
            info = inner;
        }
        info
    }

    /// Creates the zero value of the type, if it has one.
    pub fn zero_value(&self) -> Option<Box<dyn Value>> {
        self.zero.map(|zero| zero())
    }

    #[inline]
    pub fn ancestor(&self) -> Option<&Ancestor> {
        self.ancestor.as_ref()
    }

    /// Iterates over this type and then each of its ancestors.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static TypeInfo> {
        core::iter::successors(Some(self), |info| info.ancestor().map(Ancestor::info))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Strips module prefixes from every path segment of a type path.
fn short_name(type_path: &str) -> String {
    let mut output = String::with_capacity(type_path.len());
    let mut segment_start = 0;

    for (index, ch) in type_path.char_indices() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            continue;
        }
        output.push_str(last_segment(&type_path[segment_start..index]));
        output.push(ch);
        segment_start = index + ch.len_utf8();
    }
    output.push_str(last_segment(&type_path[segment_start..]));
    output
}

#[inline]
fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
