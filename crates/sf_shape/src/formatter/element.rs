use crate::describe::PropertyDescriptor;
use crate::value::Value;

/// One decomposed property: its descriptor, typed value and canonical text.
///
/// A null value has no text.
#[derive(Debug, Clone)]
pub struct PropertyElement {
    descriptor: &'static PropertyDescriptor,
    value: Option<Box<dyn Value>>,
    text: Option<String>,
}

impl PropertyElement {
    pub fn new(
        descriptor: &'static PropertyDescriptor,
        value: Option<Box<dyn Value>>,
        text: Option<String>,
    ) -> Self {
        Self {
            descriptor,
            value,
            text,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    #[inline]
    pub fn ordinal(&self) -> usize {
        self.descriptor.ordinal()
    }

    /// The descriptor of the type the element was decomposed from.
    #[inline]
    pub fn descriptor(&self) -> &'static PropertyDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn value(&self) -> Option<&dyn Value> {
        self.value.as_deref()
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn into_value(self) -> Option<Box<dyn Value>> {
        self.value
    }
}
