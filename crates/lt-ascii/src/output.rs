use crate::error::EncodeError;

/// `CSI 1;1H`. Every frame starts here and overwrites the previous one.
pub const CURSOR_HOME: &[u8] = b"\x1b[1;1H";

/// `CSI 0m`.
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Buffer de sortie à capacité fixe. Pré-alloué, jamais agrandi.
///
/// Every write is checked against the capacity; a frame that would not fit
/// fails with [`EncodeError::Overflow`] instead of being truncated mid-escape.
///
/// # Example
/// ```
/// use lt_ascii::output::FrameBuf;
/// let mut buf = FrameBuf::with_capacity(4);
/// buf.extend(b"abc").unwrap();
/// assert!(buf.extend(b"de").is_err());
/// assert_eq!(buf.as_bytes(), b"abc");
/// ```
pub struct FrameBuf {
    data: Vec<u8>,
    capacity: usize,
}

impl FrameBuf {
    /// Allocate `capacity` bytes up front.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Hard limit, in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written since the last [`clear`](Self::clear).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rewind the write cursor. Keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Append one byte.
    ///
    /// # Errors
    /// [`EncodeError::Overflow`] if the buffer is full.
    #[inline(always)]
    pub fn push(&mut self, byte: u8) -> Result<(), EncodeError> {
        if self.data.len() >= self.capacity {
            return Err(EncodeError::Overflow {
                capacity: self.capacity,
            });
        }
        self.data.push(byte);
        Ok(())
    }

    /// Append a byte string, all or nothing.
    ///
    /// # Errors
    /// [`EncodeError::Overflow`] if `bytes` does not fit entirely.
    #[inline(always)]
    pub fn extend(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if self.data.len() + bytes.len() > self.capacity {
            return Err(EncodeError::Overflow {
                capacity: self.capacity,
            });
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append `value` in decimal, no padding.
    ///
    /// # Errors
    /// [`EncodeError::Overflow`] if the digits do not fit.
    ///
    /// # Example
    /// ```
    /// use lt_ascii::output::FrameBuf;
    /// let mut buf = FrameBuf::with_capacity(16);
    /// buf.push_decimal(0).unwrap();
    /// buf.push_decimal(255).unwrap();
    /// assert_eq!(buf.as_bytes(), b"0255");
    /// ```
    pub fn push_decimal(&mut self, mut value: usize) -> Result<(), EncodeError> {
        let mut digits = [0u8; 20];
        let mut start = digits.len();
        loop {
            start -= 1;
            digits[start] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        self.extend(&digits[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = FrameBuf::with_capacity(2);
        buf.push(b'a').unwrap();
        buf.push(b'b').unwrap();
        assert_eq!(buf.push(b'c'), Err(EncodeError::Overflow { capacity: 2 }));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = FrameBuf::with_capacity(8);
        buf.extend(b"12345678").unwrap();
        buf.clear();
        assert!(buf.is_empty());
        buf.extend(b"87654321").unwrap();
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn decimal_max_width() {
        let mut buf = FrameBuf::with_capacity(32);
        buf.push_decimal(usize::MAX).unwrap();
        assert_eq!(buf.as_bytes(), usize::MAX.to_string().as_bytes());
    }
}
