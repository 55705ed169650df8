use core::fmt;

use crate::info::{Getter, MemberInfo, ParamInfo, PropertyType, Setter, TypeInfo};
use crate::value::{Value, into_nullable};

/// Where a descriptor was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    Parameter(usize),
    Member,
}

/// Metadata and bound accessors for one property of a type.
///
/// Values read through [`get`](Self::get) are null-normalized: an empty
/// optional reads as `None` and a present one reads as its inner value.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: &'static str,
    ordinal: usize,
    origin: Origin,
    member_type: &'static TypeInfo,
    declared_type: &'static TypeInfo,
    property_type: PropertyType,
    is_array: bool,
    is_read_only: bool,
    default: Option<fn() -> Box<dyn Value>>,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

/// Unwraps a sequence type to its item type, looking through nullable wrappers.
fn unwrap_sequence(info: &'static TypeInfo) -> (&'static TypeInfo, bool) {
    match info.underlying().as_sequence() {
        Some(sequence) => (sequence.item(), true),
        None => (info, false),
    }
}

impl PropertyDescriptor {
    fn new(name: &'static str, ordinal: usize, origin: Origin, member_type: &'static TypeInfo) -> Self {
        let (declared_type, is_array) = unwrap_sequence(member_type);
        Self {
            name,
            ordinal,
            origin,
            member_type,
            declared_type,
            property_type: PropertyType::classify(declared_type),
            is_array,
            is_read_only: true,
            default: None,
            getter: None,
            setter: None,
        }
    }

    /// A read-only descriptor for a constructor parameter.
    pub(crate) fn from_param(param: &ParamInfo, ordinal: usize, getter: Option<Getter>) -> Self {
        let mut descriptor = Self::new(
            param.name(),
            ordinal,
            Origin::Parameter(param.position()),
            param.type_info(),
        );
        descriptor.default = param.declared_default();
        descriptor.getter = getter;
        descriptor
    }

    /// A descriptor for a readable member.
    pub(crate) fn from_member(member: &MemberInfo, ordinal: usize) -> Self {
        let mut descriptor = Self::new(member.name(), ordinal, Origin::Member, member.type_info());
        descriptor.getter = member.getter();
        if member.is_public_writable() {
            descriptor.is_read_only = false;
            descriptor.setter = member.setter();
        }
        descriptor
    }

    /// The declared name, compared case-insensitively on lookup.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The full member type, e.g. `Option<Vec<i32>>`.
    #[inline]
    pub fn member_type(&self) -> &'static TypeInfo {
        self.member_type
    }

    /// The member type, or its item type for sequences.
    #[inline]
    pub fn declared_type(&self) -> &'static TypeInfo {
        self.declared_type
    }

    #[inline]
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.property_type.is_number()
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    /// The constructor parameter position, if the descriptor stems from one.
    #[inline]
    pub fn parameter_position(&self) -> Option<usize> {
        match self.origin {
            Origin::Parameter(position) => Some(position),
            Origin::Member => None,
        }
    }

    /// Returns `true` if values can be read from instances.
    #[inline]
    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    /// The parameter default, or else the zero value of the member type.
    pub fn default_value(&self) -> Option<Box<dyn Value>> {
        let value = match self.default {
            Some(default) => default(),
            None => self.member_type.zero_value()?,
        };
        into_nullable(value)
    }

    /// Reads the property from `instance`.
    ///
    /// Without a bound getter this yields the default value.
    pub fn get(&self, instance: &dyn Value) -> Option<Box<dyn Value>> {
        match self.getter {
            Some(getter) => into_nullable(getter(instance)?),
            None => self.default_value(),
        }
    }

    /// Writes the property of `instance`.
    ///
    /// Does nothing for read-only descriptors. Returns `true` if the value
    /// was written.
    pub fn set(&self, instance: &mut dyn Value, value: Option<&dyn Value>) -> bool {
        match self.setter {
            Some(setter) if !self.is_read_only => setter(instance, value),
            _ => false,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("declared_type", &self.declared_type.type_path())
            .field("property_type", &self.property_type)
            .field("is_array", &self.is_array)
            .field("is_read_only", &self.is_read_only)
            .finish()
    }
}
