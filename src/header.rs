//! Fixed-layout Zip structures and format constants.
//!
//! Every multi-byte field in the Zip format is little-endian. The structs
//! here mirror the fixed-width portions of the local file header, central
//! directory header, and data descriptor; variable-length pieces (name,
//! extra field, comment) are written separately by the archive writer.

use std::io::{self, Write};

pub(crate) const LOCAL_HEADER_SIGNATURE: u32 = 0x04034b50;
pub(crate) const CENTRAL_HEADER_SIGNATURE: u32 = 0x02014b50;
pub(crate) const END_OF_CENTRAL_DIR_SIGNATURE: u32 = 0x06054b50;
pub(crate) const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x08074b50;
pub(crate) const END_OF_CENTRAL_DIR_SIGNATURE64: u32 = 0x06064b50;
pub(crate) const END_OF_CENTRAL_DIR_LOCATOR_SIGNATURE: u32 = 0x07064b50;

/// Version 2.0: deflate and directory entries.
pub(crate) const VERSION_NEEDED_DEFAULT: u16 = 20;
/// Version 4.5: Zip64 extensions.
pub(crate) const VERSION_NEEDED_ZIP64: u16 = 45;

/// The `version made by` high byte is pinned to Unix so the external
/// attributes are interpreted as a Unix mode. It never reflects the host
/// that actually built the archive.
pub(crate) const CREATOR_UNIX: u16 = 3;

/// General-purpose flag bit 3: sizes and CRC follow in a data descriptor.
pub(crate) const FLAG_DATA_DESCRIPTOR: u16 = 0x08;
/// General-purpose flag bit 11: the name is UTF-8 encoded.
pub(crate) const FLAG_UTF8_ENCODING: u16 = 0x800;

/// 32-bit fields at or above this value overflow into the Zip64 extra field.
pub(crate) const ZIP64_SENTINEL: u64 = u32::MAX as u64;
/// Entry counts above this overflow into the Zip64 end of central directory.
pub(crate) const MAX_STANDARD_ENTRIES: u64 = u16::MAX as u64;

/// MS-DOS directory attribute, set on directory entries alongside the mode.
pub(crate) const MSDOS_DIR_BIT: u32 = 0x10;

const ZIP64_EXTRA_ID: u16 = 0x0001;

/// Fixed portion of the local file header (30 bytes after the signature is
/// included). Reference: section 4.3.7 of the Zip specification.
#[derive(Debug, Clone)]
pub(crate) struct LocalFileHeader {
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_len: u16,
    pub extra_field_len: u16,
}

impl LocalFileHeader {
    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&LOCAL_HEADER_SIGNATURE.to_le_bytes())?;
        writer.write_all(&self.version_needed.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compression_method.to_le_bytes())?;
        writer.write_all(&self.last_mod_time.to_le_bytes())?;
        writer.write_all(&self.last_mod_date.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&self.file_name_len.to_le_bytes())?;
        writer.write_all(&self.extra_field_len.to_le_bytes())?;
        Ok(())
    }
}

/// Fixed portion of a central directory file header (46 bytes including the
/// signature). Reference: section 4.3.12 of the Zip specification.
#[derive(Debug, Clone)]
pub(crate) struct CentralFileHeader {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_len: u16,
    pub extra_field_len: u16,
    pub file_comment_len: u16,
    pub internal_file_attrs: u16,
    pub external_file_attrs: u32,
    pub local_header_offset: u32,
}

impl CentralFileHeader {
    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&CENTRAL_HEADER_SIGNATURE.to_le_bytes())?;
        writer.write_all(&self.version_made_by.to_le_bytes())?;
        writer.write_all(&self.version_needed.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compression_method.to_le_bytes())?;
        writer.write_all(&self.last_mod_time.to_le_bytes())?;
        writer.write_all(&self.last_mod_date.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&self.file_name_len.to_le_bytes())?;
        writer.write_all(&self.extra_field_len.to_le_bytes())?;
        writer.write_all(&self.file_comment_len.to_le_bytes())?;
        // Disk number start; always a single-volume archive.
        writer.write_all(&0u16.to_le_bytes())?;
        writer.write_all(&self.internal_file_attrs.to_le_bytes())?;
        writer.write_all(&self.external_file_attrs.to_le_bytes())?;
        writer.write_all(&self.local_header_offset.to_le_bytes())?;
        Ok(())
    }
}

/// Trailing record carrying CRC and sizes for entries written in streaming
/// mode. Sizes widen to 8 bytes once either reaches the Zip64 sentinel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DataDescriptor {
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

impl DataDescriptor {
    pub(crate) fn is_zip64(&self) -> bool {
        self.compressed_size >= ZIP64_SENTINEL || self.uncompressed_size >= ZIP64_SENTINEL
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&DATA_DESCRIPTOR_SIGNATURE.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        if self.is_zip64() {
            writer.write_all(&self.compressed_size.to_le_bytes())?;
            writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        } else {
            writer.write_all(&(self.compressed_size as u32).to_le_bytes())?;
            writer.write_all(&(self.uncompressed_size as u32).to_le_bytes())?;
        }
        Ok(())
    }
}

/// A Zip64 extended-information extra field holding up to three 64-bit
/// values. This is the only extra field the crate ever emits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Zip64ExtraField {
    buf: [u8; 28],
    len: usize,
}

impl Zip64ExtraField {
    /// Encodes `values` in order. The Zip specification fixes the order as
    /// uncompressed size, compressed size, local header offset, with each
    /// value present only when its 32-bit field holds the sentinel.
    pub(crate) fn new(values: &[u64]) -> Self {
        debug_assert!(values.len() <= 3);
        let mut buf = [0u8; 28];
        buf[0..2].copy_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
        buf[2..4].copy_from_slice(&((values.len() * 8) as u16).to_le_bytes());
        let mut len = 4;
        for value in values {
            buf[len..len + 8].copy_from_slice(&value.to_le_bytes());
            len += 8;
        }
        Zip64ExtraField { buf, len }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Total encoded length; fits a 16-bit extra-field length by
    /// construction.
    pub(crate) fn len_u16(&self) -> u16 {
        self.len as u16
    }
}
