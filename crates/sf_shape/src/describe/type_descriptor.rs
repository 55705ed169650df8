use core::fmt;

use sf_utils::NoCaseMap;

use crate::describe::PropertyDescriptor;
use crate::info::{ConstructorInfo, TypeInfo};

/// The discovered property set of one type.
///
/// Ordinals are dense and zero-based: the descriptor with ordinal `n` is at
/// index `n` of [`properties`](Self::properties). Names are unique when
/// compared case-insensitively.
pub struct TypeDescriptor {
    type_info: &'static TypeInfo,
    constructor: Option<&'static ConstructorInfo>,
    is_immutable: bool,
    properties: Box<[PropertyDescriptor]>,
    by_name: NoCaseMap<usize>,
}

impl TypeDescriptor {
    pub(crate) fn new(
        type_info: &'static TypeInfo,
        constructor: Option<&'static ConstructorInfo>,
        is_immutable: bool,
        properties: Vec<PropertyDescriptor>,
        by_name: NoCaseMap<usize>,
    ) -> Self {
        Self {
            type_info,
            constructor,
            is_immutable,
            properties: properties.into_boxed_slice(),
            by_name,
        }
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// The constructor used to rebuild instances of an immutable type.
    #[inline]
    pub fn constructor(&self) -> Option<&'static ConstructorInfo> {
        self.constructor
    }

    /// Returns `true` if the type has no public mutators.
    #[inline]
    pub fn is_immutable(&self) -> bool {
        self.is_immutable
    }

    /// The descriptors ordered by ordinal.
    #[inline]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Returns the descriptor named `name`, ignoring case.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name
            .get(name)
            .and_then(|&ordinal| self.properties.get(ordinal))
    }

    #[inline]
    pub fn property_at(&self, ordinal: usize) -> Option<&PropertyDescriptor> {
        self.properties.get(ordinal)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_path", &self.type_info.type_path())
            .field("is_immutable", &self.is_immutable)
            .field("has_constructor", &self.constructor.is_some())
            .field("properties", &self.properties)
            .finish()
    }
}
