use crate::info::TypeInfo;
use crate::value::{Property, Value};

/// Reads a member from an instance of the declaring type.
///
/// Returns `None` if the instance is not of the declaring type.
pub type Getter = fn(&dyn Value) -> Option<Box<dyn Value>>;

/// Writes a member of an instance of the declaring type.
///
/// Returns `false` if the instance is not of the declaring type or the
/// incoming value cannot be converted into the member type.
pub type Setter = fn(&mut dyn Value, Option<&dyn Value>) -> bool;

// -----------------------------------------------------------------------------
// Access

/// Visibility of a property accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// The accessor does not exist.
    #[default]
    None,
    /// The accessor exists but is not public.
    NonPublic,
    /// The accessor is public.
    Public,
}

// -----------------------------------------------------------------------------
// MemberKind

/// Whether a member is a plain field or an accessor property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field {
        public: bool,
        read_only: bool,
    },
    Property {
        getter: Access,
        setter: Access,
        indexed: bool,
    },
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A field or property of a struct.
///
/// The bound getter and setter operate on `dyn Value` instances of the
/// declaring type; see [`Getter`] and [`Setter`].
#[derive(Debug, Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    type_info: fn() -> &'static TypeInfo,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberInfo {
    /// Creates a field of type `T`.
    pub fn field<T: Property>(name: &'static str, public: bool, read_only: bool) -> Self {
        Self {
            name,
            kind: MemberKind::Field { public, read_only },
            type_info: T::type_info,
            getter: None,
            setter: None,
        }
    }

    /// Creates a non-indexed property of type `T`.
    pub fn property<T: Property>(name: &'static str, getter: Access, setter: Access) -> Self {
        Self {
            name,
            kind: MemberKind::Property {
                getter,
                setter,
                indexed: false,
            },
            type_info: T::type_info,
            getter: None,
            setter: None,
        }
    }

    /// Marks a property as indexed. Has no effect on fields.
    pub fn indexed(mut self) -> Self {
        if let MemberKind::Property { indexed, .. } = &mut self.kind {
            *indexed = true;
        }
        self
    }

    #[inline]
    pub fn with_getter(mut self, getter: Getter) -> Self {
        self.getter = Some(getter);
        self
    }

    #[inline]
    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn getter(&self) -> Option<Getter> {
        self.getter
    }

    #[inline]
    pub fn setter(&self) -> Option<Setter> {
        self.setter
    }

    /// A public field, or a property with a public getter that is not indexed.
    pub fn is_public_readable(&self) -> bool {
        match self.kind {
            MemberKind::Field { public, .. } => public,
            MemberKind::Property {
                getter, indexed, ..
            } => getter == Access::Public && !indexed,
        }
    }

    /// A public field that is not read-only, or a property with a public setter.
    pub fn is_public_writable(&self) -> bool {
        match self.kind {
            MemberKind::Field { public, read_only } => public && !read_only,
            MemberKind::Property { setter, .. } => setter == Access::Public,
        }
    }
}
