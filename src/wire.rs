//! Big-endian field codec for the variable-width header fields.
//!
//! The message-type and payload-size fields each occupy 1, 2, or 4 bytes on
//! the wire, always big-endian. [`FieldWidth`] makes any other width
//! unrepresentable once a configuration has been validated.

/// Width of a variable-size header field in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldWidth {
    /// One byte, values 0..=255.
    One = 1,
    /// Two bytes, values 0..=65535.
    Two = 2,
    /// Four bytes, values 0..=4294967295.
    Four = 4,
}

impl FieldWidth {
    /// Convert a raw byte count into a width, if it is one of 1, 2, or 4.
    #[inline]
    #[must_use]
    pub fn from_bytes(bytes: u8) -> Option<Self> {
        match bytes {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    /// Number of bytes the field occupies on the wire.
    #[inline]
    #[must_use]
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// Largest value representable in this width.
    #[inline]
    #[must_use]
    pub fn max_value(self) -> u32 {
        match self {
            Self::One => u8::MAX as u32,
            Self::Two => u16::MAX as u32,
            Self::Four => u32::MAX,
        }
    }
}

/// Write the low `width` bytes of `value` big-endian into `buf`.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if `buf.len() < width.bytes()`.
#[inline]
pub fn encode_be(value: u32, width: FieldWidth, buf: &mut [u8]) -> usize {
    debug_assert!(buf.len() >= width.bytes(), "buffer too small for field");
    match width {
        FieldWidth::One => buf[0] = value as u8,
        FieldWidth::Two => buf[..2].copy_from_slice(&(value as u16).to_be_bytes()),
        FieldWidth::Four => buf[..4].copy_from_slice(&value.to_be_bytes()),
    }
    width.bytes()
}

/// Read a big-endian unsigned value of the given width from `buf`.
///
/// # Panics
///
/// Panics if `buf.len() < width.bytes()`.
#[inline]
#[must_use]
pub fn decode_be(buf: &[u8], width: FieldWidth) -> u32 {
    debug_assert!(buf.len() >= width.bytes(), "buffer too small for field");
    match width {
        FieldWidth::One => buf[0] as u32,
        FieldWidth::Two => u16::from_be_bytes([buf[0], buf[1]]) as u32,
        FieldWidth::Four => u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_from_bytes() {
        assert_eq!(FieldWidth::from_bytes(1), Some(FieldWidth::One));
        assert_eq!(FieldWidth::from_bytes(2), Some(FieldWidth::Two));
        assert_eq!(FieldWidth::from_bytes(4), Some(FieldWidth::Four));
        assert_eq!(FieldWidth::from_bytes(0), None);
        assert_eq!(FieldWidth::from_bytes(3), None);
        assert_eq!(FieldWidth::from_bytes(8), None);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(FieldWidth::One.max_value(), 0xFF);
        assert_eq!(FieldWidth::Two.max_value(), 0xFFFF);
        assert_eq!(FieldWidth::Four.max_value(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_encode_one_byte() {
        let mut buf = [0u8; 4];
        let n = encode_be(0xAB, FieldWidth::One, &mut buf);
        assert_eq!(n, 1);
        assert_eq!(buf[0], 0xAB);
    }

    #[test]
    fn test_encode_two_bytes_big_endian() {
        let mut buf = [0u8; 4];
        let n = encode_be(0x1234, FieldWidth::Two, &mut buf);
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], &[0x12, 0x34]);
    }

    #[test]
    fn test_encode_four_bytes_big_endian() {
        let mut buf = [0u8; 4];
        let n = encode_be(0xDEAD_BEEF, FieldWidth::Four, &mut buf);
        assert_eq!(n, 4);
        assert_eq!(&buf, &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_encode_truncates_to_width() {
        let mut buf = [0u8; 4];
        encode_be(0x1234_5678, FieldWidth::Two, &mut buf);
        assert_eq!(&buf[..2], &[0x56, 0x78]);
    }

    #[test]
    fn test_decode_round_trip() {
        let mut buf = [0u8; 4];
        for &(value, width) in &[
            (0u32, FieldWidth::One),
            (0xFF, FieldWidth::One),
            (0x0102, FieldWidth::Two),
            (0xFFFF, FieldWidth::Two),
            (0x0102_0304, FieldWidth::Four),
            (u32::MAX, FieldWidth::Four),
        ] {
            encode_be(value, width, &mut buf);
            assert_eq!(decode_be(&buf, width), value);
        }
    }
}
