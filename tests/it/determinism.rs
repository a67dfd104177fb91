//! The core contract: archive bytes are a pure function of the entry
//! sequence.

use crate::util;
use detzip::{ArchiveWriter, CompressionLevel, CompressionMethod, Timestamp};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::io::{Cursor, Write};

/// Builds a representative archive: stored and deflated files, a streamed
/// entry, a directory, comments, and explicit timestamps.
fn build_mixed_archive() -> Vec<u8> {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);

    archive
        .new_file("readme.txt")
        .last_modified(Timestamp::from_components(2021, 3, 14, 15, 9, 26).unwrap())
        .write_bytes(b"deterministic by construction")
        .unwrap();

    archive
        .new_file("data/blob.bin")
        .compression_method(CompressionMethod::Deflate)
        .compression_level(CompressionLevel::BEST)
        .unix_permissions(0o600)
        .comment("compressed payload")
        .write_bytes(&[42u8; 10_000])
        .unwrap();

    let mut entry = archive
        .new_file("stream.log")
        .compression_method(CompressionMethod::Deflate)
        .start_stream()
        .unwrap();
    for line in 0..100 {
        writeln!(entry, "line {line}").unwrap();
    }
    entry.finish().unwrap();

    archive.new_dir("data/").unix_permissions(0o700).create().unwrap();

    archive.set_comment("an archive comment").unwrap();
    archive.finish().unwrap();
    output.into_inner()
}

#[test]
fn identical_inputs_yield_identical_bytes() {
    assert_eq!(build_mixed_archive(), build_mixed_archive());
}

#[test]
fn entry_order_is_preserved_not_normalized() {
    let build = |names: &[&str]| {
        let mut output = Cursor::new(Vec::new());
        let mut archive = ArchiveWriter::new(&mut output);
        for name in names {
            archive.new_file(name).write_bytes(b"same bytes").unwrap();
        }
        archive.finish().unwrap();
        output.into_inner()
    };

    let forward = build(&["a.txt", "b.txt"]);
    let backward = build(&["b.txt", "a.txt"]);
    assert_ne!(forward, backward);

    let parsed = util::parse(&backward);
    let names: Vec<&str> = parsed.records.iter().map(|r| r.name_str()).collect();
    assert_eq!(names, ["b.txt", "a.txt"]);
}

#[test]
fn stored_scenario_pins_order_and_attributes() {
    let build = || {
        let mut output = Cursor::new(Vec::new());
        let mut archive = ArchiveWriter::new(&mut output);
        archive
            .new_file("a.txt")
            .last_modified(Timestamp::from_unix(0))
            .write_bytes(b"hello")
            .unwrap();
        archive
            .new_file("b/c.txt")
            .last_modified(Timestamp::from_unix(0))
            .write_bytes(b"world")
            .unwrap();
        archive.finish().unwrap();
        output.into_inner()
    };

    let first = build();
    assert_eq!(first, build());

    let parsed = util::parse(&first);
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].name_str(), "a.txt");
    assert_eq!(parsed.records[1].name_str(), "b/c.txt");
    for record in &parsed.records {
        assert_eq!(record.method, 0);
        assert_eq!(record.external_attrs, 0o644 << 16);
        // Unix timestamps before 1980 clamp to the DOS epoch.
        assert_eq!(record.dos_time, 0);
        assert_eq!(record.dos_date, 0x21);
    }
}

#[test]
fn modification_time_is_the_only_varying_input() {
    let build = |mtime: Timestamp| {
        let mut output = Cursor::new(Vec::new());
        let mut archive = ArchiveWriter::new(&mut output);
        archive
            .new_file("a.txt")
            .last_modified(mtime)
            .write_bytes(b"same payload")
            .unwrap();
        archive.finish().unwrap();
        output.into_inner()
    };

    let t1 = Timestamp::from_components(2020, 1, 1, 0, 0, 0).unwrap();
    let t2 = Timestamp::from_components(2022, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(build(t1), build(t1));
    assert_ne!(build(t1), build(t2));
}

#[quickcheck]
fn arbitrary_payloads_build_identically(payloads: Vec<Vec<u8>>) -> bool {
    let build = || {
        let mut output = Cursor::new(Vec::new());
        let mut archive = ArchiveWriter::new(&mut output);
        for (i, payload) in payloads.iter().enumerate() {
            let method = if i % 2 == 0 {
                CompressionMethod::Store
            } else {
                CompressionMethod::Deflate
            };
            archive
                .new_file(&format!("entry-{i}.bin"))
                .compression_method(method)
                .write_bytes(payload)
                .unwrap();
        }
        archive.finish().unwrap();
        output.into_inner()
    };
    build() == build()
}

#[quickcheck]
fn arbitrary_names_build_identically(names: Vec<String>) -> TestResult {
    // Index prefixes keep names unique after normalization.
    let names: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{i}-{name}"))
        .collect();
    if names.iter().any(|name| name.len() > u16::MAX as usize) {
        return TestResult::discard();
    }

    let build = || {
        let mut output = Cursor::new(Vec::new());
        let mut archive = ArchiveWriter::new(&mut output);
        for name in &names {
            archive.new_file(name).write_bytes(b"payload").unwrap();
        }
        archive.finish().unwrap();
        output.into_inner()
    };
    TestResult::from_bool(build() == build())
}
