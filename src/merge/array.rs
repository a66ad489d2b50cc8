use serde::{Deserialize, Serialize};

/// A value supplied either on its own or as an ordered list.
///
/// User-facing hook registration accepts both shapes; [`merge_object_array`]
/// normalizes them into a single `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View the value as a slice; a single value is a slice of length one.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v.as_slice(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// Concatenate two single-or-many values into a new ordered `Vec`.
///
/// `a`'s elements come first, in their given order, followed by `b`'s. Nothing
/// is dropped, reordered or deduplicated, and neither input is modified.
///
/// ```
/// use brisk::merge::{merge_object_array, OneOrMany};
///
/// let merged = merge_object_array(&OneOrMany::One(1), &OneOrMany::Many(vec![2, 3]));
/// assert_eq!(merged, vec![1, 2, 3]);
/// ```
#[must_use]
pub fn merge_object_array<T: Clone>(a: &OneOrMany<T>, b: &OneOrMany<T>) -> Vec<T> {
    concat_slices(a.as_slice(), b.as_slice())
}

/// Slice form of [`merge_object_array`]; used where hook fields are already `Vec`s.
#[must_use]
pub fn concat_slices<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    merged.extend_from_slice(a);
    merged.extend_from_slice(b);
    merged
}
