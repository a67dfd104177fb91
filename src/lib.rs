#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![forbid(unsafe_code)]

mod compress;
mod crc;
mod errors;
mod header;
mod path;
mod time;
mod writer;

pub use compress::{CompressionLevel, CompressionMethod};
pub use crc::{crc32, Crc32};
pub use errors::{Error, ErrorKind};
pub use time::Timestamp;
pub use writer::{
    ArchiveWriter, ArchiveWriterBuilder, DirBuilder, EntryStreamWriter, FileBuilder,
};
