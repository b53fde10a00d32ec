use tsearch_common::{Result, error::Error};

/// A growable array of `i64` values.
///
/// Values are kept in insertion order; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntegerArray {
    values: Vec<i64>,
}

impl IntegerArray {
    /// Creates an empty array.
    pub fn new() -> IntegerArray {
        IntegerArray { values: Vec::new() }
    }

    /// Creates an empty array with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Result<IntegerArray> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(capacity)
            .map_err(|e| Error::allocation("integer array", e))?;
        Ok(IntegerArray { values })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Appends `value`.
    pub fn push(&mut self, value: i64) -> Result<()> {
        self.values
            .try_reserve(1)
            .map_err(|e| Error::allocation("integer array", e))?;
        self.values.push(value);
        Ok(())
    }

    /// Returns the value at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Returns the value at `index`, or an `IndexOutOfBounds` error.
    pub fn try_get(&self, index: usize) -> Result<i64> {
        self.get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, self.len()))
    }

    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.values
    }
}

impl From<Vec<i64>> for IntegerArray {
    fn from(values: Vec<i64>) -> Self {
        IntegerArray { values }
    }
}

impl<'a> IntoIterator for &'a IntegerArray {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for IntegerArray {
    type Item = i64;
    type IntoIter = std::vec::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
