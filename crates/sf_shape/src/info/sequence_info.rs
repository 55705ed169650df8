use crate::info::TypeInfo;
use crate::value::Value;

/// The collection shapes whose element type is unwrapped during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceShape {
    /// A fixed-length array, `[T; N]`.
    Array,
    /// `Box<[T]>`.
    ReadOnlySequence,
    /// `Arc<[T]>`.
    ReadOnlyList,
    /// `VecDeque<T>`.
    Sequence,
    /// `Vec<T>`.
    List,
}

/// Information of a sequence type.
#[derive(Debug, Clone)]
pub struct SequenceInfo {
    shape: SequenceShape,
    item: fn() -> &'static TypeInfo,
    from_items: fn(Vec<Option<Box<dyn Value>>>) -> Option<Box<dyn Value>>,
}

impl SequenceInfo {
    pub fn new(
        shape: SequenceShape,
        item: fn() -> &'static TypeInfo,
        from_items: fn(Vec<Option<Box<dyn Value>>>) -> Option<Box<dyn Value>>,
    ) -> Self {
        Self {
            shape,
            item,
            from_items,
        }
    }

    #[inline]
    pub fn shape(&self) -> SequenceShape {
        self.shape
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Builds a sequence from item values.
    ///
    /// Returns `None` if an item cannot be converted into the item type,
    /// or if the length does not fit an array.
    #[inline]
    pub fn from_items(&self, items: Vec<Option<Box<dyn Value>>>) -> Option<Box<dyn Value>> {
        (self.from_items)(items)
    }
}
