//! The compression adapter between entry payloads and the output sink.
//!
//! Payload bytes stream through a [`Compressor`] in caller-sized chunks, so
//! memory use is bounded by chunk size rather than payload size. STORE
//! passes bytes through untouched; DEFLATE produces the raw deflate
//! bit-stream only — no gzip or zlib wrapper, no embedded timestamps or
//! codec metadata. The compression level is always pinned by the caller
//! (or this crate's named default), never left to the codec's ambient
//! default, so the compressed bytes are a pure function of the input.

use crate::errors::{Error, ErrorKind};
use flate2::{Compress, FlushCompress, Status};
use std::io::Write;

/// Size of the adapter's internal output window for deflate.
const OUT_BUFFER_SIZE: usize = 32 * 1024;

/// How an entry's payload bytes are encoded in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionMethod {
    /// Bytes are stored verbatim.
    #[default]
    Store,
    /// Bytes are compressed with raw DEFLATE.
    Deflate,
}

impl CompressionMethod {
    /// The method identifier stored in Zip headers.
    pub(crate) fn as_id(self) -> u16 {
        match self {
            CompressionMethod::Store => 0,
            CompressionMethod::Deflate => 8,
        }
    }
}

/// A pinned DEFLATE compression level.
///
/// The level is part of the archive's reproducibility contract: the same
/// payload at the same level yields the same compressed bytes on every
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Level 1: fastest compression.
    pub const FASTEST: CompressionLevel = CompressionLevel(1);
    /// Level 9: best compression.
    pub const BEST: CompressionLevel = CompressionLevel(9);

    /// Creates a level in the range `0..=9`, or `None` outside it.
    ///
    /// Level 0 emits stored deflate blocks; it is still a valid deflate
    /// stream, distinct from [`CompressionMethod::Store`].
    pub const fn new(level: u32) -> Option<CompressionLevel> {
        if level <= 9 {
            Some(CompressionLevel(level))
        } else {
            None
        }
    }

    /// The raw level value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    /// Level 6, the conventional speed/size tradeoff. A named constant
    /// rather than the codec's own default, which could drift between
    /// codec versions.
    fn default() -> Self {
        CompressionLevel(6)
    }
}

/// Streams one entry's payload into the output sink, tracking compressed
/// and uncompressed byte counts.
pub(crate) struct Compressor {
    kind: Kind,
    compressed: u64,
    uncompressed: u64,
}

enum Kind {
    Store,
    Deflate { codec: Box<Compress>, out: Vec<u8> },
}

impl Compressor {
    pub(crate) fn new(method: CompressionMethod, level: CompressionLevel) -> Self {
        let kind = match method {
            CompressionMethod::Store => Kind::Store,
            CompressionMethod::Deflate => Kind::Deflate {
                // `false`: raw deflate, no zlib header or trailing checksum.
                codec: Box::new(Compress::new(flate2::Compression::new(level.0), false)),
                out: vec![0u8; OUT_BUFFER_SIZE],
            },
        };
        Compressor {
            kind,
            compressed: 0,
            uncompressed: 0,
        }
    }

    /// Transforms one chunk of payload bytes and writes the result to `sink`.
    pub(crate) fn write_chunk<W: Write>(&mut self, sink: &mut W, chunk: &[u8]) -> Result<(), Error> {
        self.uncompressed += chunk.len() as u64;
        match &mut self.kind {
            Kind::Store => {
                sink.write_all(chunk)?;
                self.compressed += chunk.len() as u64;
                Ok(())
            }
            Kind::Deflate { codec, out } => {
                let mut input = chunk;
                while !input.is_empty() {
                    let before_in = codec.total_in();
                    let before_out = codec.total_out();
                    let status = codec
                        .compress(input, out, FlushCompress::None)
                        .map_err(codec_fault)?;
                    let consumed = (codec.total_in() - before_in) as usize;
                    let produced = (codec.total_out() - before_out) as usize;
                    sink.write_all(&out[..produced])?;
                    self.compressed += produced as u64;
                    input = &input[consumed..];
                    if consumed == 0 && produced == 0 {
                        debug_assert!(matches!(status, Status::BufError));
                        return Err(Error::from(ErrorKind::Codec {
                            msg: "deflate stream made no progress".to_string(),
                        }));
                    }
                }
                Ok(())
            }
        }
    }

    /// Flushes the codec's epilogue and returns the final
    /// `(compressed, uncompressed)` byte counts.
    pub(crate) fn finish<W: Write>(&mut self, sink: &mut W) -> Result<(u64, u64), Error> {
        if let Kind::Deflate { codec, out } = &mut self.kind {
            loop {
                let before_out = codec.total_out();
                let status = codec
                    .compress(&[], out, FlushCompress::Finish)
                    .map_err(codec_fault)?;
                let produced = (codec.total_out() - before_out) as usize;
                sink.write_all(&out[..produced])?;
                self.compressed += produced as u64;
                match status {
                    Status::StreamEnd => break,
                    Status::Ok => continue,
                    Status::BufError => {
                        return Err(Error::from(ErrorKind::Codec {
                            msg: "deflate stream failed to terminate".to_string(),
                        }))
                    }
                }
            }
        }
        Ok((self.compressed, self.uncompressed))
    }
}

fn codec_fault(err: flate2::CompressError) -> Error {
    Error::from(ErrorKind::Codec {
        msg: err.to_string(),
    })
}
