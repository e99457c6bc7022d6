//! CRC-16 integrity checks for frame headers and payloads.
//!
//! Uses the CRC-16/KERMIT algorithm (poly 0x1021, reflected, init 0,
//! xorout 0) with a 256-entry lookup table. Because the algorithm has a
//! zero residue, a region followed by its own CRC re-checksums to zero;
//! [`verify_residue`] is that check and is how both frame guards are
//! validated.

use crc::{Crc, CRC_16_KERMIT};

/// CRC-16/KERMIT calculator with 256-entry lookup table.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_KERMIT);

/// Calculate the CRC-16/KERMIT checksum of a byte slice.
#[inline]
#[must_use]
pub fn calculate_crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Check that a region ending in its own 2-byte CRC re-checksums to zero.
///
/// The trailing CRC must be stored in register order (LSB first), which is
/// how [`Crc16Digest::finalize_bytes`] emits it.
#[inline]
#[must_use]
pub fn verify_residue(data_with_crc: &[u8]) -> bool {
    calculate_crc16(data_with_crc) == 0
}

/// CRC-16 digest for incremental calculation.
///
/// Use this when a guarded region arrives or departs in pieces, such as a
/// payload copied across several non-blocking stream calls.
pub struct Crc16Digest {
    digest: crc::Digest<'static, u16>,
}

impl Crc16Digest {
    /// Create a new CRC-16 digest.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            digest: CRC16.digest(),
        }
    }

    /// Update the digest with a single byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.digest.update(&[byte]);
    }

    /// Update the digest with a byte slice.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    /// Finalize and return the checksum value.
    ///
    /// KERMIT is a reflected algorithm with no output xor, so this is the
    /// raw register value.
    #[inline]
    #[must_use]
    pub fn finalize(self) -> u16 {
        self.digest.finalize()
    }

    /// Finalize and return the checksum in wire order (LSB first).
    ///
    /// This is the byte order the frame guards are transmitted in; it is
    /// what makes the trailing-CRC residue check come out to zero.
    #[inline]
    #[must_use]
    pub fn finalize_bytes(self) -> [u8; 2] {
        self.digest.finalize().to_le_bytes()
    }

    /// Finalize and test the zero-residue condition.
    ///
    /// Call after folding in a guarded region *and* its trailing CRC bytes.
    #[inline]
    #[must_use]
    pub fn finalize_residue(self) -> bool {
        self.digest.finalize() == 0
    }
}

impl Default for Crc16Digest {
    fn default() -> Self {
        Self::new()
    }
}
