//! Compression codecs for ZIP entry data.
//!
//! Only the two methods every ZIP tool understands are implemented: stored
//! (method 0) and raw deflate (method 8, behind the `deflate` feature).
//! Entries using any other method are still copied verbatim by the rewrite
//! engine; they just cannot be read or created.

#[cfg(feature = "deflate")]
pub mod deflate;

mod copy;

use std::io::{BufRead, Read};

use crate::format::CompressionMethod;
use crate::{Error, Result};

/// A decoder that reads compressed data and produces uncompressed output.
pub trait Decoder: Read {
    /// Returns the method this decoder handles.
    fn method(&self) -> CompressionMethod;
}

/// Copy decoder (no compression).
pub use copy::CopyDecoder;

#[cfg(feature = "deflate")]
pub use deflate::{DeflateDecoder, DeflateEncoderOptions, deflate};

/// Default compression level.
pub const DEFAULT_LEVEL: u32 = 6;

/// Returns true if entries using `method` can be read and written.
pub fn is_supported(method: CompressionMethod) -> bool {
    match method {
        CompressionMethod::Stored => true,
        CompressionMethod::Deflate => cfg!(feature = "deflate"),
        CompressionMethod::Other(_) => false,
    }
}

/// Builds a decoder for `compressed_size` bytes of `input`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMethod`] for methods this build cannot decode.
pub fn build_decoder<'a, R: BufRead + 'a>(
    method: CompressionMethod,
    input: R,
    compressed_size: u64,
) -> Result<Box<dyn Decoder + 'a>> {
    match method {
        CompressionMethod::Stored => Ok(Box::new(CopyDecoder::new(input, compressed_size))),
        #[cfg(feature = "deflate")]
        CompressionMethod::Deflate => Ok(Box::new(DeflateDecoder::new(
            input.take(compressed_size),
        ))),
        other => Err(Error::UnsupportedMethod { method: other.id() }),
    }
}

/// Compresses `data` in one shot.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMethod`] for methods this build cannot encode.
#[cfg_attr(not(feature = "deflate"), allow(unused_variables))]
pub fn compress(method: CompressionMethod, level: u32, data: &[u8]) -> Result<Vec<u8>> {
    match method {
        CompressionMethod::Stored => Ok(data.to_vec()),
        #[cfg(feature = "deflate")]
        CompressionMethod::Deflate => {
            Ok(deflate(data, &DeflateEncoderOptions::with_level(level))?)
        }
        other => Err(Error::UnsupportedMethod { method: other.id() }),
    }
}
