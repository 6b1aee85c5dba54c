//! Byte storage contracts and the in-memory implementation.
//!
//! The engine only ever needs the document size; content is read by the
//! host for painting (the dump binary) and mutated by the command handler.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("position {position} is outside the document of {size} bytes")]
    OutOfRange { position: u64, size: u64 },
    #[error("range {position}+{length} is outside the document of {size} bytes")]
    RangeOutOfBounds { position: u64, length: u64, size: u64 },
}

/// Read access to an addressable byte sequence.
pub trait ByteSource {
    fn data_size(&self) -> u64;

    fn byte_at(&self, position: u64) -> Option<u8>;

    /// Copy bytes starting at `position` into `dst`; returns how many bytes
    /// were available.
    fn copy_to_slice(&self, position: u64, dst: &mut [u8]) -> usize {
        let size = self.data_size();
        let mut copied = 0;
        for (i, slot) in dst.iter_mut().enumerate() {
            let at = position.saturating_add(i as u64);
            if at >= size {
                break;
            }
            match self.byte_at(at) {
                Some(b) => *slot = b,
                None => break,
            }
            copied += 1;
        }
        copied
    }
}

pub trait EditableByteBuffer: ByteSource {
    /// Insert `bytes` before `position` (`position == data_size` appends).
    fn insert(&mut self, position: u64, bytes: &[u8]) -> Result<(), DataError>;

    fn remove(&mut self, position: u64, length: u64) -> Result<(), DataError>;

    /// Overwrite starting at `position`, growing the buffer when the bytes
    /// run past its end.
    fn replace(&mut self, position: u64, bytes: &[u8]) -> Result<(), DataError>;

    fn set_byte(&mut self, position: u64, value: u8) -> Result<(), DataError>;
}

/// `Vec`-backed buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    bytes: Vec<u8>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    fn index(&self, position: u64, allow_end: bool) -> Result<usize, DataError> {
        let size = self.data_size();
        if position < size || (allow_end && position == size) {
            Ok(position as usize)
        } else {
            Err(DataError::OutOfRange { position, size })
        }
    }
}

impl From<Vec<u8>> for MemoryBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for MemoryBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl ByteSource for MemoryBuffer {
    fn data_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn byte_at(&self, position: u64) -> Option<u8> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.bytes.get(i).copied())
    }

    fn copy_to_slice(&self, position: u64, dst: &mut [u8]) -> usize {
        let Ok(start) = usize::try_from(position) else {
            return 0;
        };
        let Some(available) = self.bytes.get(start..) else {
            return 0;
        };
        let n = available.len().min(dst.len());
        dst[..n].copy_from_slice(&available[..n]);
        n
    }
}

impl EditableByteBuffer for MemoryBuffer {
    fn insert(&mut self, position: u64, bytes: &[u8]) -> Result<(), DataError> {
        let at = self.index(position, true)?;
        self.bytes.splice(at..at, bytes.iter().copied());
        Ok(())
    }

    fn remove(&mut self, position: u64, length: u64) -> Result<(), DataError> {
        let size = self.data_size();
        let end = position.checked_add(length).filter(|end| *end <= size);
        let Some(end) = end else {
            return Err(DataError::RangeOutOfBounds {
                position,
                length,
                size,
            });
        };
        self.bytes.drain(position as usize..end as usize);
        Ok(())
    }

    fn replace(&mut self, position: u64, bytes: &[u8]) -> Result<(), DataError> {
        let at = self.index(position, true)?;
        let overlap = bytes.len().min(self.bytes.len() - at);
        self.bytes[at..at + overlap].copy_from_slice(&bytes[..overlap]);
        self.bytes.extend_from_slice(&bytes[overlap..]);
        Ok(())
    }

    fn set_byte(&mut self, position: u64, value: u8) -> Result<(), DataError> {
        let at = self.index(position, false)?;
        self.bytes[at] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_remove_replace() {
        let mut buf = MemoryBuffer::from(vec![1, 2, 3]);
        buf.insert(1, &[9, 9]).unwrap();
        assert_eq!(buf.as_slice(), &[1, 9, 9, 2, 3]);
        buf.insert(5, &[7]).unwrap();
        assert_eq!(buf.data_size(), 6);
        buf.remove(0, 3).unwrap();
        assert_eq!(buf.as_slice(), &[2, 3, 7]);
        buf.replace(2, &[4, 5]).unwrap();
        assert_eq!(buf.as_slice(), &[2, 3, 4, 5]);
        buf.set_byte(0, 0xff).unwrap();
        assert_eq!(buf.byte_at(0), Some(0xff));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut buf = MemoryBuffer::from(vec![1, 2, 3]);
        assert_eq!(
            buf.insert(4, &[0]),
            Err(DataError::OutOfRange { position: 4, size: 3 })
        );
        assert!(buf.set_byte(3, 0).is_err());
        assert!(buf.remove(2, 2).is_err());
        assert!(buf.remove(u64::MAX, 2).is_err());
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn copy_reports_available_bytes() {
        let buf = MemoryBuffer::from(&b"abcdef"[..]);
        let mut dst = [0u8; 4];
        assert_eq!(buf.copy_to_slice(4, &mut dst), 2);
        assert_eq!(&dst[..2], b"ef");
        assert_eq!(buf.copy_to_slice(10, &mut dst), 0);
    }

    struct Repeating(u64);

    impl ByteSource for Repeating {
        fn data_size(&self) -> u64 {
            self.0
        }
        fn byte_at(&self, position: u64) -> Option<u8> {
            (position < self.0).then_some((position % 256) as u8)
        }
    }

    #[test]
    fn default_copy_walks_byte_at() {
        let src = Repeating(258);
        let mut dst = [0u8; 4];
        assert_eq!(src.copy_to_slice(255, &mut dst), 3);
        assert_eq!(&dst[..3], &[255, 0, 1]);
    }
}
