use crate::error::{ConvertError, Result};

/// A cursor over a byte slice where every read is bounds-checked.
///
/// Reads never go past the end of the buffer: a shortfall produces an
/// `UnexpectedEof` I/O error naming the field, its offset, and how many bytes
/// were missing.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(ConvertError::truncated(what, self.pos, n, self.remaining()));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N, what)?);
        Ok(buf)
    }

    pub fn read_u64_le(&mut self, what: &str) -> Result<u64> {
        self.read_array::<8>(what).map(u64::from_le_bytes)
    }

    pub fn read_f64_le(&mut self, what: &str) -> Result<f64> {
        self.read_array::<8>(what).map(f64::from_le_bytes)
    }

    pub fn read_u32_be(&mut self, what: &str) -> Result<u32> {
        self.read_array::<4>(what).map(u32::from_be_bytes)
    }

    /// Reads a u64 element count and checks that the buffer could hold that
    /// many elements of at least `min_elem_size` bytes each.
    ///
    /// Guards allocations sized from untrusted counts.
    pub fn read_count(&mut self, what: &str, min_elem_size: usize) -> Result<usize> {
        let offset = self.pos;
        let count = self.read_u64_le(what)?;
        let needed = count
            .checked_mul(min_elem_size as u64)
            .filter(|&n| n <= self.remaining() as u64);
        match needed {
            Some(_) => Ok(count as usize),
            None => Err(ConvertError::truncated(
                what,
                offset,
                count.saturating_mul(min_elem_size as u64).min(usize::MAX as u64) as usize,
                self.remaining(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn reads_little_and_big_endian_fields() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&7u64.to_le_bytes());
        bytes.extend_from_slice(&(-1.5f64).to_le_bytes());
        bytes.extend_from_slice(&2051u32.to_be_bytes());

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u64_le("count").unwrap(), 7);
        assert_eq!(reader.read_f64_le("bias").unwrap(), -1.5);
        assert_eq!(reader.read_u32_be("magic").unwrap(), 2051);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 20);
    }

    #[test]
    fn short_read_does_not_advance() {
        let bytes = [1u8, 2, 3];
        let mut reader = ByteReader::new(&bytes);
        let err = reader.read_u64_le("count").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bytes(3, "tail").unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn oversized_count_is_rejected_before_allocation() {
        let bytes = u64::MAX.to_le_bytes();
        let mut reader = ByteReader::new(&bytes);
        let err = reader.read_count("layer count", 8).unwrap_err();
        assert!(err.to_string().contains("layer count"), "{err}");
    }

    #[test]
    fn zero_count_needs_no_payload() {
        let bytes = 0u64.to_le_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_count("neuron count", 16).unwrap(), 0);
    }
}
