//! The archive writer: sequences entries into the Zip byte layout.
//!
//! A single logical writer owns the output sink. Entries are emitted in
//! submission order, the central directory mirrors that order exactly, and
//! the running byte offset is tracked by counting writes — the sink is
//! append-only and never seeked. Every header field that a naive Zip
//! writer fills from ambient state (clock, umask, host OS) is instead
//! derived from explicit values on the entry builders.

use crate::compress::{CompressionLevel, CompressionMethod, Compressor};
use crate::crc::Crc32;
use crate::errors::Error;
use crate::header::{
    CentralFileHeader, DataDescriptor, LocalFileHeader, Zip64ExtraField, CREATOR_UNIX,
    END_OF_CENTRAL_DIR_LOCATOR_SIGNATURE, END_OF_CENTRAL_DIR_SIGNATURE,
    END_OF_CENTRAL_DIR_SIGNATURE64, FLAG_DATA_DESCRIPTOR, FLAG_UTF8_ENCODING,
    MAX_STANDARD_ENTRIES, MSDOS_DIR_BIT, VERSION_NEEDED_DEFAULT, VERSION_NEEDED_ZIP64,
    ZIP64_SENTINEL,
};
use crate::path::EntryName;
use crate::time::{DosDateTime, Timestamp};
use std::collections::HashSet;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Chunk size used when folding an in-memory payload through the
/// compressor and checksum.
const PAYLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Size of the Zip64 end of central directory record.
const ZIP64_EOCD_SIZE: usize = 56;

#[derive(Debug)]
struct CountWriter<W> {
    writer: W,
    count: u64,
}

impl<W> CountWriter<W> {
    fn new(writer: W, count: u64) -> Self {
        CountWriter { writer, count }
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<W: Write> Write for CountWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let bytes_written = self.writer.write(buf)?;
        self.count += bytes_written as u64;
        Ok(bytes_written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    /// An entry stream is (or was) in flight. Cleared by the stream's
    /// `finish`; if the stream is dropped instead, the archive stays in
    /// this state and refuses further use, since the sink already holds a
    /// truncated entry.
    Streaming,
    Finalized,
}

/// Builds an [`ArchiveWriter`].
#[derive(Debug, Default)]
pub struct ArchiveWriterBuilder {
    offset: u64,
    capacity: usize,
}

impl ArchiveWriterBuilder {
    /// Creates a new `ArchiveWriterBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the anticipated number of entries to optimize memory allocation.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the starting byte offset. Useful when prelude data precedes
    /// the archive in the same sink; recorded offsets (and the Zip64
    /// decision for them) account for it.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Builds an `ArchiveWriter` that writes to `writer`.
    pub fn build<W>(&self, writer: W) -> ArchiveWriter<W> {
        ArchiveWriter {
            sink: CountWriter::new(writer, self.offset),
            central: Vec::with_capacity(self.capacity),
            names: HashSet::new(),
            comment: String::new(),
            state: State::Open,
        }
    }
}

/// Writes a Zip archive whose bytes are a pure function of the entries
/// supplied to it.
///
/// Basic usage:
/// ```rust
/// let mut output = std::io::Cursor::new(Vec::new());
/// let mut archive = detzip::ArchiveWriter::new(&mut output);
/// archive.new_file("file.txt").write_bytes(b"Hello, world!")?;
/// archive.finish()?;
/// # Ok::<(), detzip::Error>(())
/// ```
///
/// Streaming a payload of unknown length:
/// ```rust
/// use std::io::Write;
///
/// let mut output = std::io::Cursor::new(Vec::new());
/// let mut archive = detzip::ArchiveWriter::new(&mut output);
/// let mut entry = archive
///     .new_file("data.bin")
///     .compression_method(detzip::CompressionMethod::Deflate)
///     .start_stream()?;
/// entry.write_all(b"chunk by chunk")?;
/// entry.finish()?;
/// archive.finish()?;
/// # Ok::<(), detzip::Error>(())
/// ```
#[derive(Debug)]
pub struct ArchiveWriter<W> {
    sink: CountWriter<W>,
    central: Vec<CentralDirectoryRecord>,
    names: HashSet<String>,
    comment: String,
    state: State,
}

impl ArchiveWriter<()> {
    /// Creates an [`ArchiveWriterBuilder`] for configuring the writer.
    pub fn builder() -> ArchiveWriterBuilder {
        ArchiveWriterBuilder::new()
    }
}

impl<W> ArchiveWriter<W> {
    /// Creates a new `ArchiveWriter` that writes to `writer`.
    pub fn new(writer: W) -> Self {
        ArchiveWriterBuilder::new().build(writer)
    }

    /// Consumes the archive writer and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink.writer
    }

    fn ensure_open(&self) -> Result<(), Error> {
        match self.state {
            State::Open => Ok(()),
            State::Streaming => Err(Error::invalid_state(
                "an entry stream was started and never finished",
            )),
            State::Finalized => Err(Error::invalid_state("the archive is already finalized")),
        }
    }

    /// Registers `name`, rejecting exact byte-for-byte duplicates before
    /// any bytes for the entry reach the sink.
    fn claim_name(&mut self, name: &EntryName) -> Result<(), Error> {
        if !self.names.insert(name.as_str().to_string()) {
            return Err(Error::duplicate_name(name.as_str()));
        }
        Ok(())
    }
}

impl<W: Write> ArchiveWriter<W> {
    /// Creates a builder for adding a new file entry to the archive.
    ///
    /// Defaults are pinned for reproducibility: STORE, mode `0o644`, and a
    /// modification time of [`Timestamp::DOS_EPOCH`].
    ///
    /// ```rust
    /// # let mut output = std::io::Cursor::new(Vec::new());
    /// # let mut archive = detzip::ArchiveWriter::new(&mut output);
    /// archive
    ///     .new_file("src/main.rs")
    ///     .compression_method(detzip::CompressionMethod::Deflate)
    ///     .unix_permissions(0o644)
    ///     .last_modified(detzip::Timestamp::from_unix(1_700_000_000))
    ///     .write_bytes(b"fn main() {}")?;
    /// # archive.finish()?;
    /// # Ok::<(), detzip::Error>(())
    /// ```
    #[must_use]
    pub fn new_file<'name>(&mut self, name: &'name str) -> FileBuilder<'_, 'name, W> {
        FileBuilder {
            archive: self,
            name,
            method: CompressionMethod::Store,
            level: CompressionLevel::default(),
            mtime: Timestamp::DOS_EPOCH,
            mode: 0o644,
            comment: String::new(),
        }
    }

    /// Creates a builder for adding a directory entry to the archive.
    ///
    /// A trailing `/` is appended to the name when missing. Directory
    /// entries carry no payload and default to mode `0o755`.
    ///
    /// ```rust
    /// # let mut output = std::io::Cursor::new(Vec::new());
    /// # let mut archive = detzip::ArchiveWriter::new(&mut output);
    /// archive.new_dir("assets/").unix_permissions(0o755).create()?;
    /// # archive.finish()?;
    /// # Ok::<(), detzip::Error>(())
    /// ```
    #[must_use]
    pub fn new_dir<'name>(&mut self, name: &'name str) -> DirBuilder<'_, 'name, W> {
        DirBuilder {
            archive: self,
            name,
            mtime: Timestamp::DOS_EPOCH,
            mode: 0o755,
            comment: String::new(),
        }
    }

    /// Sets the archive-level comment written into the end of central
    /// directory record.
    pub fn set_comment(&mut self, comment: &str) -> Result<(), Error> {
        check_comment_len("archive comment length", comment)?;
        self.comment = comment.to_string();
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_local_header(
        &mut self,
        name: &EntryName,
        flags: u16,
        method: CompressionMethod,
        dos_time: u16,
        dos_date: u16,
        crc32: u32,
        compressed_size: u64,
        uncompressed_size: u64,
    ) -> Result<(), Error> {
        let zip64 = compressed_size >= ZIP64_SENTINEL || uncompressed_size >= ZIP64_SENTINEL;
        // A local Zip64 field must carry both sizes, unlike the central one.
        let extra = if zip64 {
            Some(Zip64ExtraField::new(&[uncompressed_size, compressed_size]))
        } else {
            None
        };

        let header = LocalFileHeader {
            version_needed: if zip64 {
                VERSION_NEEDED_ZIP64
            } else {
                VERSION_NEEDED_DEFAULT
            },
            flags,
            compression_method: method.as_id(),
            last_mod_time: dos_time,
            last_mod_date: dos_date,
            crc32,
            compressed_size: compressed_size.min(ZIP64_SENTINEL) as u32,
            uncompressed_size: uncompressed_size.min(ZIP64_SENTINEL) as u32,
            file_name_len: name.len(),
            extra_field_len: extra.as_ref().map_or(0, Zip64ExtraField::len_u16),
        };
        header.write(&mut self.sink)?;
        self.sink.write_all(name.as_bytes())?;
        if let Some(extra) = &extra {
            self.sink.write_all(extra.as_slice())?;
        }
        Ok(())
    }

    /// Finishes the archive: writes the central directory in entry
    /// submission order, the Zip64 footer records when required, and the
    /// end of central directory record.
    ///
    /// Returns the total number of bytes the sink holds (including any
    /// starting offset). Calling `finish` twice, or after an abandoned
    /// entry stream, fails with an invalid-state error.
    pub fn finish(&mut self) -> Result<u64, Error> {
        self.ensure_open()?;

        let central_directory_offset = self.sink.count();
        let total_entries = self.central.len() as u64;

        for record in &self.central {
            let zip64 = record.needs_zip64();
            let version_needed = if zip64 {
                VERSION_NEEDED_ZIP64
            } else {
                VERSION_NEEDED_DEFAULT
            };
            let extra = record.central_zip64_extra();

            let header = CentralFileHeader {
                version_made_by: (CREATOR_UNIX << 8) | version_needed,
                version_needed,
                flags: record.flags,
                compression_method: record.method.as_id(),
                last_mod_time: record.dos_time,
                last_mod_date: record.dos_date,
                crc32: record.crc,
                compressed_size: record.compressed_size.min(ZIP64_SENTINEL) as u32,
                uncompressed_size: record.uncompressed_size.min(ZIP64_SENTINEL) as u32,
                file_name_len: record.name.len(),
                extra_field_len: extra.as_ref().map_or(0, Zip64ExtraField::len_u16),
                file_comment_len: record.comment.len() as u16,
                internal_file_attrs: 0,
                external_file_attrs: record.external_attrs(),
                local_header_offset: record.local_header_offset.min(ZIP64_SENTINEL) as u32,
            };
            header.write(&mut self.sink)?;
            self.sink.write_all(record.name.as_bytes())?;
            if let Some(extra) = &extra {
                self.sink.write_all(extra.as_slice())?;
            }
            self.sink.write_all(record.comment.as_bytes())?;
        }

        let central_directory_size = self.sink.count() - central_directory_offset;

        let needs_zip64 = total_entries > MAX_STANDARD_ENTRIES
            || central_directory_offset >= ZIP64_SENTINEL
            || central_directory_size >= ZIP64_SENTINEL
            || self.central.iter().any(CentralDirectoryRecord::needs_zip64);

        if needs_zip64 {
            let zip64_eocd_offset = self.sink.count();
            write_zip64_eocd(
                &mut self.sink,
                total_entries,
                central_directory_size,
                central_directory_offset,
            )?;
            write_zip64_eocd_locator(&mut self.sink, zip64_eocd_offset)?;
        }

        self.sink
            .write_all(&END_OF_CENTRAL_DIR_SIGNATURE.to_le_bytes())?;
        // Disk numbers
        self.sink.write_all(&[0u8; 4])?;
        let entry_count = total_entries.min(MAX_STANDARD_ENTRIES) as u16;
        self.sink.write_all(&entry_count.to_le_bytes())?;
        self.sink.write_all(&entry_count.to_le_bytes())?;
        self.sink
            .write_all(&(central_directory_size.min(ZIP64_SENTINEL) as u32).to_le_bytes())?;
        self.sink
            .write_all(&(central_directory_offset.min(ZIP64_SENTINEL) as u32).to_le_bytes())?;
        self.sink
            .write_all(&(self.comment.len() as u16).to_le_bytes())?;
        self.sink.write_all(self.comment.as_bytes())?;
        self.sink.flush()?;

        self.state = State::Finalized;
        debug!(
            entries = total_entries,
            central_directory_size,
            zip64 = needs_zip64,
            "finalized archive"
        );
        Ok(self.sink.count())
    }
}

/// A builder for a file entry.
///
/// Created by [`ArchiveWriter::new_file`]. The payload is supplied either
/// up front with [`write_bytes`](Self::write_bytes) (sizes and CRC land in
/// the local header, no data descriptor) or incrementally through
/// [`start_stream`](Self::start_stream) (a data descriptor trails the
/// payload).
#[derive(Debug)]
pub struct FileBuilder<'archive, 'name, W> {
    archive: &'archive mut ArchiveWriter<W>,
    name: &'name str,
    method: CompressionMethod,
    level: CompressionLevel,
    mtime: Timestamp,
    mode: u32,
    comment: String,
}

impl<'archive, W> FileBuilder<'archive, '_, W>
where
    W: Write,
{
    /// Sets the compression method for the entry.
    #[must_use]
    #[inline]
    pub fn compression_method(mut self, method: CompressionMethod) -> Self {
        self.method = method;
        self
    }

    /// Pins the DEFLATE compression level for the entry. Ignored for STORE.
    #[must_use]
    #[inline]
    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the modification time recorded for the entry.
    ///
    /// Reproducible builds pass a constant; the clock is never consulted.
    #[must_use]
    #[inline]
    pub fn last_modified(mut self, mtime: Timestamp) -> Self {
        self.mtime = mtime;
        self
    }

    /// Sets the Unix permission bits recorded for the entry.
    ///
    /// Accepts bare permissions (`0o644`) or a full mode including the
    /// file type (`0o100644`); the value is recorded as given, never read
    /// from the filesystem.
    #[must_use]
    #[inline]
    pub fn unix_permissions(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the entry's comment, carried in its central directory record.
    #[must_use]
    #[inline]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// Validates the entry and claims its name. No bytes are written until
    /// this succeeds.
    fn prepare(&mut self) -> Result<(EntryName, u16), Error> {
        self.archive.ensure_open()?;
        let name = EntryName::file(self.name)?;
        check_comment_len("entry comment length", &self.comment)?;
        self.archive.claim_name(&name)?;
        let flags = if name.needs_utf8_flag() {
            FLAG_UTF8_ENCODING
        } else {
            0
        };
        Ok((name, flags))
    }

    /// Writes the entry with the given payload and returns the compressed
    /// size.
    ///
    /// The payload length is known, so the local header carries the true
    /// CRC and sizes and no data descriptor is emitted.
    pub fn write_bytes(mut self, payload: &[u8]) -> Result<u64, Error> {
        let (name, flags) = self.prepare()?;
        let (dos_time, dos_date) = DosDateTime::from(self.mtime).into_parts();
        let local_header_offset = self.archive.sink.count();

        let mut crc = Crc32::new();
        let mut compressor = Compressor::new(self.method, self.level);
        let mut compressed = Vec::new();
        for chunk in payload.chunks(PAYLOAD_CHUNK_SIZE) {
            crc.update(chunk);
            compressor.write_chunk(&mut compressed, chunk)?;
        }
        let (compressed_size, uncompressed_size) = compressor.finish(&mut compressed)?;
        let crc32 = crc.finalize();

        self.archive.write_local_header(
            &name,
            flags,
            self.method,
            dos_time,
            dos_date,
            crc32,
            compressed_size,
            uncompressed_size,
        )?;
        self.archive.sink.write_all(&compressed)?;

        trace!(
            name = name.as_str(),
            method = ?self.method,
            compressed_size,
            uncompressed_size,
            "wrote file entry"
        );

        self.archive.central.push(CentralDirectoryRecord {
            name,
            method: self.method,
            crc: crc32,
            compressed_size,
            uncompressed_size,
            local_header_offset,
            flags,
            dos_time,
            dos_date,
            mode: self.mode,
            is_dir: false,
            comment: self.comment,
        });
        Ok(compressed_size)
    }

    /// Starts a streaming entry for a payload of unknown length and
    /// returns a writer for the raw payload bytes.
    ///
    /// The local header is written immediately with zeroed CRC and sizes
    /// and the data-descriptor flag set; the true values follow the
    /// payload in a trailing data descriptor once
    /// [`EntryStreamWriter::finish`] is called. Dropping the stream
    /// without finishing it leaves a truncated entry in the sink, so the
    /// archive refuses any further operation.
    pub fn start_stream(mut self) -> Result<EntryStreamWriter<'archive, W>, Error> {
        let (name, mut flags) = self.prepare()?;
        flags |= FLAG_DATA_DESCRIPTOR;
        let (dos_time, dos_date) = DosDateTime::from(self.mtime).into_parts();
        let local_header_offset = self.archive.sink.count();

        self.archive
            .write_local_header(&name, flags, self.method, dos_time, dos_date, 0, 0, 0)?;

        trace!(name = name.as_str(), method = ?self.method, "started streaming entry");
        self.archive.state = State::Streaming;

        Ok(EntryStreamWriter {
            compressor: Compressor::new(self.method, self.level),
            crc: Crc32::new(),
            pending: PendingEntry {
                name,
                flags,
                method: self.method,
                dos_time,
                dos_date,
                mode: self.mode,
                comment: self.comment,
                local_header_offset,
            },
            archive: self.archive,
        })
    }
}

/// A builder for a directory entry.
///
/// Created by [`ArchiveWriter::new_dir`].
#[derive(Debug)]
pub struct DirBuilder<'archive, 'name, W> {
    archive: &'archive mut ArchiveWriter<W>,
    name: &'name str,
    mtime: Timestamp,
    mode: u32,
    comment: String,
}

impl<W> DirBuilder<'_, '_, W>
where
    W: Write,
{
    /// Sets the modification time recorded for the directory.
    #[must_use]
    #[inline]
    pub fn last_modified(mut self, mtime: Timestamp) -> Self {
        self.mtime = mtime;
        self
    }

    /// Sets the Unix permission bits recorded for the directory.
    #[must_use]
    #[inline]
    pub fn unix_permissions(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the directory entry's comment.
    #[must_use]
    #[inline]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// Writes the directory entry.
    pub fn create(self) -> Result<(), Error> {
        self.archive.ensure_open()?;
        let name = EntryName::directory(self.name)?;
        check_comment_len("entry comment length", &self.comment)?;
        self.archive.claim_name(&name)?;

        let flags = if name.needs_utf8_flag() {
            FLAG_UTF8_ENCODING
        } else {
            0
        };
        let (dos_time, dos_date) = DosDateTime::from(self.mtime).into_parts();
        let local_header_offset = self.archive.sink.count();

        self.archive.write_local_header(
            &name,
            flags,
            CompressionMethod::Store,
            dos_time,
            dos_date,
            0,
            0,
            0,
        )?;

        trace!(name = name.as_str(), "wrote directory entry");

        self.archive.central.push(CentralDirectoryRecord {
            name,
            method: CompressionMethod::Store,
            crc: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            local_header_offset,
            flags,
            dos_time,
            dos_date,
            mode: self.mode,
            is_dir: true,
            comment: self.comment,
        });
        Ok(())
    }
}

/// A writer for the raw payload bytes of a streaming entry.
///
/// Bytes written here are checksummed, transformed by the entry's
/// compression method, and appended to the archive. Call
/// [`finish`](Self::finish) to emit the data descriptor and register the
/// entry in the central directory.
pub struct EntryStreamWriter<'archive, W: Write> {
    archive: &'archive mut ArchiveWriter<W>,
    compressor: Compressor,
    crc: Crc32,
    pending: PendingEntry,
}

impl<W: Write> std::fmt::Debug for EntryStreamWriter<'_, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStreamWriter")
            .field("name", &self.pending.name)
            .finish_non_exhaustive()
    }
}

struct PendingEntry {
    name: EntryName,
    flags: u16,
    method: CompressionMethod,
    dos_time: u16,
    dos_date: u16,
    mode: u32,
    comment: String,
    local_header_offset: u64,
}

impl<W: Write> EntryStreamWriter<'_, W> {
    /// Finishes the entry: flushes the compressor, writes the data
    /// descriptor, and registers the central directory record. Returns
    /// the compressed size.
    pub fn finish(self) -> Result<u64, Error> {
        let EntryStreamWriter {
            archive,
            mut compressor,
            crc,
            pending,
        } = self;

        let (compressed_size, uncompressed_size) = compressor.finish(&mut archive.sink)?;
        let crc32 = crc.finalize();

        DataDescriptor {
            crc32,
            compressed_size,
            uncompressed_size,
        }
        .write(&mut archive.sink)?;

        trace!(
            name = pending.name.as_str(),
            compressed_size,
            uncompressed_size,
            "finished streaming entry"
        );

        archive.central.push(CentralDirectoryRecord {
            name: pending.name,
            method: pending.method,
            crc: crc32,
            compressed_size,
            uncompressed_size,
            local_header_offset: pending.local_header_offset,
            flags: pending.flags,
            dos_time: pending.dos_time,
            dos_date: pending.dos_date,
            mode: pending.mode,
            is_dir: false,
            comment: pending.comment,
        });
        archive.state = State::Open;
        Ok(compressed_size)
    }
}

impl<W: Write> Write for EntryStreamWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.crc.update(buf);
        self.compressor
            .write_chunk(&mut self.archive.sink, buf)
            .map_err(io::Error::from)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.archive.sink.flush()
    }
}

/// One entry's central directory record, captured when its payload was
/// fully written and held until [`ArchiveWriter::finish`] emits it.
#[derive(Debug)]
struct CentralDirectoryRecord {
    name: EntryName,
    method: CompressionMethod,
    crc: u32,
    compressed_size: u64,
    uncompressed_size: u64,
    local_header_offset: u64,
    flags: u16,
    dos_time: u16,
    dos_date: u16,
    mode: u32,
    is_dir: bool,
    comment: String,
}

impl CentralDirectoryRecord {
    fn needs_zip64(&self) -> bool {
        self.compressed_size >= ZIP64_SENTINEL
            || self.uncompressed_size >= ZIP64_SENTINEL
            || self.local_header_offset >= ZIP64_SENTINEL
    }

    /// The central Zip64 field holds exactly the overflowed values, in
    /// uncompressed/compressed/offset order.
    fn central_zip64_extra(&self) -> Option<Zip64ExtraField> {
        if !self.needs_zip64() {
            return None;
        }
        let mut values = [0u64; 3];
        let mut len = 0;
        if self.uncompressed_size >= ZIP64_SENTINEL {
            values[len] = self.uncompressed_size;
            len += 1;
        }
        if self.compressed_size >= ZIP64_SENTINEL {
            values[len] = self.compressed_size;
            len += 1;
        }
        if self.local_header_offset >= ZIP64_SENTINEL {
            values[len] = self.local_header_offset;
            len += 1;
        }
        Some(Zip64ExtraField::new(&values[..len]))
    }

    fn external_attrs(&self) -> u32 {
        let mut attrs = self.mode << 16;
        if self.is_dir {
            attrs |= MSDOS_DIR_BIT;
        }
        attrs
    }
}

fn check_comment_len(field: &'static str, comment: &str) -> Result<(), Error> {
    if comment.len() > u16::MAX as usize {
        return Err(Error::oversized_field(
            field,
            comment.len() as u64,
            u64::from(u16::MAX),
        ));
    }
    Ok(())
}

/// Writes the Zip64 end of central directory record.
fn write_zip64_eocd<W: Write>(
    writer: &mut W,
    total_entries: u64,
    central_directory_size: u64,
    central_directory_offset: u64,
) -> Result<(), Error> {
    writer.write_all(&END_OF_CENTRAL_DIR_SIGNATURE64.to_le_bytes())?;

    // Record size, excluding the signature and this field.
    writer.write_all(&((ZIP64_EOCD_SIZE - 12) as u64).to_le_bytes())?;

    writer.write_all(&((CREATOR_UNIX << 8) | VERSION_NEEDED_ZIP64).to_le_bytes())?;
    writer.write_all(&VERSION_NEEDED_ZIP64.to_le_bytes())?;

    // Disk number, and disk with the start of the central directory.
    writer.write_all(&0u32.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?;

    // Entries on this disk, and in total.
    writer.write_all(&total_entries.to_le_bytes())?;
    writer.write_all(&total_entries.to_le_bytes())?;

    writer.write_all(&central_directory_size.to_le_bytes())?;
    writer.write_all(&central_directory_offset.to_le_bytes())?;
    Ok(())
}

/// Writes the Zip64 end of central directory locator.
fn write_zip64_eocd_locator<W: Write>(writer: &mut W, zip64_eocd_offset: u64) -> Result<(), Error> {
    writer.write_all(&END_OF_CENTRAL_DIR_LOCATOR_SIGNATURE.to_le_bytes())?;

    // Disk with the Zip64 end of central directory.
    writer.write_all(&0u32.to_le_bytes())?;
    writer.write_all(&zip64_eocd_offset.to_le_bytes())?;

    // Total number of disks.
    writer.write_all(&1u32.to_le_bytes())?;
    Ok(())
}
