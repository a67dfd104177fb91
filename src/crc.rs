//! CRC-32 checksum computation for entry payloads.
//!
//! Zip uses the reflected CRC-32 with polynomial `0xedb88320`. Payload bytes
//! are folded in a single left-to-right pass in submission order; the
//! checksum is a pure function of the byte sequence.

use crc32fast::Hasher;

/// A running CRC-32 computation.
///
/// ```rust
/// let mut crc = detzip::Crc32::new();
/// crc.update(b"123456789");
/// assert_eq!(crc.finalize(), 0xcbf43926);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    /// Creates a new checksum computation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds additional bytes into the running checksum.
    #[inline]
    pub fn update(&mut self, buf: &[u8]) {
        self.hasher.update(buf);
    }

    /// Returns the checksum of all bytes seen so far.
    ///
    /// The computation may continue to be updated afterwards.
    #[inline]
    pub fn finalize(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Starts a new computation, discarding all bytes seen so far.
    #[inline]
    pub fn reset(&mut self) {
        self.hasher.reset();
    }
}

/// Computes the CRC-32 of a byte slice in one shot.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finalize()
}
