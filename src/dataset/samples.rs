use crate::error::{ConvertError, Result};

/// `count` samples of `sample_size` values each, stored flat and row-major.
///
/// Invariant: `data.len() == count * sample_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples<T> {
    count: usize,
    sample_size: usize,
    data: Vec<T>,
}

impl<T> Samples<T> {
    /// Wraps flat sample data, checking its length against the declared shape.
    pub fn new(count: usize, sample_size: usize, data: Vec<T>) -> Result<Self> {
        if count.checked_mul(sample_size) != Some(data.len()) {
            return Err(ConvertError::Shape { count, sample_size, len: data.len() });
        }
        Ok(Samples { count, sample_size, data })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Borrows the `index`-th sample.
    pub fn sample(&self, index: usize) -> Option<&[T]> {
        if index >= self.count {
            return None;
        }
        let start = index * self.sample_size;
        Some(&self.data[start..start + self.sample_size])
    }

    /// Iterates samples in order. Yields nothing when `sample_size` is zero.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> {
        let size = self.sample_size.max(1);
        self.data.chunks_exact(size)
    }

    /// Same shape, new values. `data` must have the same length.
    pub(crate) fn with_data<U>(&self, data: Vec<U>) -> Samples<U> {
        debug_assert_eq!(data.len(), self.data.len());
        Samples { count: self.count, sample_size: self.sample_size, data }
    }

    /// Applies `f` to every value, keeping the shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Samples<U> {
        Samples {
            count: self.count,
            sample_size: self.sample_size,
            data: self.data.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_inconsistent_length() {
        let err = Samples::new(2, 3, vec![0u8; 5]).unwrap_err();
        assert!(matches!(err, ConvertError::Shape { count: 2, sample_size: 3, len: 5 }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn indexes_samples_row_major() {
        let samples = Samples::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(samples.sample(1), Some(&[4, 5, 6][..]));
        assert_eq!(samples.sample(2), None);
        assert_eq!(samples.iter().count(), 2);
    }

    #[test]
    fn map_keeps_shape() {
        let samples = Samples::new(1, 2, vec![1u8, 2]).unwrap();
        let doubled = samples.map(|&v| f64::from(v) * 2.0);
        assert_eq!(doubled.count(), 1);
        assert_eq!(doubled.sample_size(), 2);
        assert_eq!(doubled.data(), &[2.0, 4.0]);
    }
}
