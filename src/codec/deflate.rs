//! Raw deflate codec.

use std::io::{self, BufRead, Read, Write};

use flate2::Compression;
use flate2::bufread::DeflateDecoder as FlateDecoder;
use flate2::write::DeflateEncoder as FlateEncoder;

use super::{DEFAULT_LEVEL, Decoder};
use crate::format::CompressionMethod;

/// Deflate decoder.
pub struct DeflateDecoder<R> {
    inner: FlateDecoder<R>,
}

impl<R> std::fmt::Debug for DeflateDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeflateDecoder").finish_non_exhaustive()
    }
}

impl<R: BufRead> DeflateDecoder<R> {
    /// Creates a new Deflate decoder over a raw deflate stream.
    pub fn new(input: R) -> Self {
        Self {
            inner: FlateDecoder::new(input),
        }
    }
}

impl<R: BufRead> Read for DeflateDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: BufRead> Decoder for DeflateDecoder<R> {
    fn method(&self) -> CompressionMethod {
        CompressionMethod::Deflate
    }
}

/// Deflate encoder options.
#[derive(Debug, Clone)]
pub struct DeflateEncoderOptions {
    /// Compression level (0-9, default 6).
    pub level: u32,
}

impl Default for DeflateEncoderOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
        }
    }
}

impl DeflateEncoderOptions {
    /// Creates options with the given compression level.
    pub fn with_level(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }
}

/// Compresses a buffer into a raw deflate stream.
pub fn deflate(data: &[u8], options: &DeflateEncoderOptions) -> io::Result<Vec<u8>> {
    let mut encoder = FlateEncoder::new(
        Vec::with_capacity(data.len() / 2 + 64),
        Compression::new(options.level),
    );
    encoder.write_all(data)?;
    encoder.finish()
}
