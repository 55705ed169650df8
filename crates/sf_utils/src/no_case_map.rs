use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt::Debug;

use crate::hash::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

/// Folds a name for case-insensitive comparison.
///
/// Names without uppercase letters are returned as-is, so the common
/// lookup path does not allocate.
#[inline]
fn fold(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_uppercase) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Compares two names case-insensitively, the way [`NoCaseMap`] does.
///
/// ```
/// assert!(sf_utils::eq_no_case("Comparison", "comparison"));
/// assert!(!sf_utils::eq_no_case("Comparison", "comparisons"));
/// ```
pub fn eq_no_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// -----------------------------------------------------------------------------
// NoCaseMap

/// A map keyed by names that compares keys case-insensitively.
///
/// Insertion never overwrites: the first value stored under a name wins,
/// whatever the case of later duplicates.
///
/// # Examples
///
/// ```
/// use sf_utils::NoCaseMap;
///
/// let mut map = NoCaseMap::new();
/// assert!(map.try_insert("Comparison", 0));
/// assert!(!map.try_insert("comparison", 1));
///
/// assert_eq!(map.get("COMPARISON"), Some(&0));
/// assert_eq!(map.len(), 1);
/// ```
pub struct NoCaseMap<V>(HashMap<Box<str>, V>);

impl<V> NoCaseMap<V> {
    /// Creates an empty `NoCaseMap`.
    #[inline]
    pub fn new() -> Self {
        Self(HashMap::default())
    }

    /// Creates an empty `NoCaseMap` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, Default::default()))
    }

    /// Inserts `value` under `name` if no entry with the same folded name exists.
    ///
    /// Returns `true` if the value was inserted.
    pub fn try_insert(&mut self, name: &str, value: V) -> bool {
        match self.0.entry(fold(name).into()) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns the value stored under `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(fold(name).as_ref())
    }

    /// Returns `true` if an entry with the same folded name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(fold(name).as_ref())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An iterator visiting all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for NoCaseMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for NoCaseMap<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: Debug> Debug for NoCaseMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}
