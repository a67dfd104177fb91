//! Zip64 thresholds: entry counts past the 16-bit footer field and
//! offsets past the 32-bit header fields.

use crate::util;
use detzip::{ArchiveWriter, ArchiveWriterBuilder};
use std::io::Cursor;

#[test]
fn entry_count_at_the_limit_stays_standard() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::builder()
        .with_capacity(u16::MAX as usize)
        .build(&mut output);
    for i in 0..u16::MAX as u32 {
        archive.new_file(&format!("e{i:05}")).write_bytes(b"").unwrap();
    }
    archive.finish().unwrap();

    let data = output.into_inner();
    let parsed = util::parse(&data);
    assert!(parsed.zip64.is_none());
    assert_eq!(parsed.eocd.total_entries, u16::MAX);
    assert_eq!(parsed.records.len(), u16::MAX as usize);
}

#[test]
fn entry_count_past_the_limit_goes_zip64() {
    let count = u16::MAX as u32 + 1;
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::builder()
        .with_capacity(count as usize)
        .build(&mut output);
    for i in 0..count {
        archive.new_file(&format!("e{i:05}")).write_bytes(b"").unwrap();
    }
    archive.finish().unwrap();

    let data = output.into_inner();
    let parsed = util::parse(&data);

    // The standard footer caps at 0xffff; the true count lives in the
    // Zip64 end of central directory.
    assert_eq!(parsed.eocd.total_entries, u16::MAX);
    let zip64 = parsed.zip64.as_ref().expect("zip64 footer expected");
    assert_eq!(zip64.total_entries, u64::from(count));
    assert_eq!(parsed.records.len(), count as usize);
    assert_eq!(parsed.records[0].name_str(), "e00000");
    assert_eq!(parsed.records[count as usize - 1].name_str(), "e65535");
}

#[test]
fn offsets_past_four_gigabytes_go_zip64() {
    // Prelude data can push an archive past the 32-bit offset range
    // without writing four gigabytes in a test: the builder offset takes
    // part in all offset arithmetic.
    let base = 0x1_0000_0000u64;
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriterBuilder::new()
        .with_offset(base)
        .build(&mut output);
    archive.new_file("far.txt").write_bytes(b"payload").unwrap();
    archive.finish().unwrap();

    let data = output.into_inner();
    let parsed = util::parse_with_base(&data, base);

    let zip64 = parsed.zip64.as_ref().expect("zip64 footer expected");
    assert_eq!(zip64.total_entries, 1);
    assert_eq!(zip64.central_offset, base + data.len() as u64 - 22 - 20 - 56 - zip64.central_size);

    // The fixed-width fields hold the sentinel; the real offset is in the
    // record's Zip64 extra field.
    let record = &parsed.records[0];
    assert_eq!(record.local_header_offset, base);
    assert_eq!(record.version_needed, 45);
    assert!(!record.extra.is_empty());
    assert_eq!(util::le_u16(&record.extra, 0), 0x0001);

    // The standard footer stores sentinels too.
    assert_eq!(parsed.eocd.central_offset, u32::MAX);
}

#[test]
fn small_archives_never_emit_zip64_records() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);
    archive.new_file("a.txt").write_bytes(b"abc").unwrap();
    archive.finish().unwrap();

    let data = output.into_inner();
    let parsed = util::parse(&data);
    assert!(parsed.zip64.is_none());
    assert_eq!(parsed.records[0].version_needed, 20);
    assert!(parsed.records[0].extra.is_empty());

    // No Zip64 signatures anywhere in the byte stream.
    assert!(!data.windows(4).any(|w| w == util::EOCD64_SIGNATURE));
    assert!(!data
        .windows(4)
        .any(|w| w == util::EOCD64_LOCATOR_SIGNATURE));
}
