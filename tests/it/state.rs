//! The writer's state machine: open, streaming, finalized.

use detzip::{ArchiveWriter, ErrorKind};
use std::io::{Cursor, Write};

#[test]
fn finalizing_twice_fails() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);
    archive.new_file("a.txt").write_bytes(b"a").unwrap();
    archive.finish().unwrap();

    let err = archive.finish().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));
}

#[test]
fn adding_entries_after_finalize_fails() {
    let mut archive = ArchiveWriter::new(Cursor::new(Vec::new()));
    let len_after_finish = archive.finish().unwrap();

    let err = archive.new_file("late.txt").write_bytes(b"x").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));

    let err = archive.new_dir("late/").create().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));

    let err = archive.new_file("late2.txt").start_stream().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));

    // The rejected entries contributed no bytes.
    let data = archive.into_inner().into_inner();
    assert_eq!(data.len() as u64, len_after_finish);
}

#[test]
fn abandoned_stream_poisons_the_archive() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);

    {
        let mut entry = archive.new_file("torn.txt").start_stream().unwrap();
        entry.write_all(b"partial").unwrap();
        // Dropped without finish: the sink now holds a truncated entry.
    }

    let err = archive.finish().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));

    let err = archive.new_file("next.txt").write_bytes(b"x").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidState { .. }));
}

#[test]
fn finished_stream_reopens_the_archive() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);

    let mut entry = archive.new_file("first.txt").start_stream().unwrap();
    entry.write_all(b"streamed").unwrap();
    entry.finish().unwrap();

    archive.new_file("second.txt").write_bytes(b"direct").unwrap();
    archive.finish().unwrap();

    let data = output.into_inner();
    let parsed = crate::util::parse(&data);
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].name_str(), "first.txt");
    assert_eq!(parsed.records[1].name_str(), "second.txt");
}

#[test]
fn oversized_comments_are_rejected() {
    let mut output = Cursor::new(Vec::new());
    let mut archive = ArchiveWriter::new(&mut output);

    let long = "c".repeat(u16::MAX as usize + 1);
    let err = archive.set_comment(&long).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OversizedField { .. }));

    let err = archive
        .new_file("a.txt")
        .comment(&long)
        .write_bytes(b"a")
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OversizedField { .. }));

    // Nothing was written for the rejected entry; the name is still free.
    archive.new_file("a.txt").write_bytes(b"a").unwrap();
    archive.finish().unwrap();
}
