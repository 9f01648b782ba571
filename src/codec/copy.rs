//! Copy codec (stored entries).

use std::io::{self, Read};

use super::Decoder;
use crate::format::CompressionMethod;

/// A decoder that passes at most `size` bytes through unchanged.
pub struct CopyDecoder<R> {
    inner: R,
    remaining: u64,
}

impl<R: Read> CopyDecoder<R> {
    /// Creates a new copy decoder.
    ///
    /// # Arguments
    ///
    /// * `inner` - The data source
    /// * `size` - Stored size of the entry data
    pub fn new(inner: R, size: u64) -> Self {
        Self {
            inner,
            remaining: size,
        }
    }
}

impl<R: Read> Read for CopyDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Ok(0);
        }

        let max_read = self.remaining.min(buf.len() as u64) as usize;
        let n = self.inner.read(&mut buf[..max_read])?;
        self.remaining = self.remaining.saturating_sub(n as u64);
        Ok(n)
    }
}

impl<R: Read> Decoder for CopyDecoder<R> {
    fn method(&self) -> CompressionMethod {
        CompressionMethod::Stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_stops_at_size() {
        let data = b"Hello, World!";
        let mut decoder = CopyDecoder::new(Cursor::new(data.to_vec()), 5);

        let mut output = Vec::new();
        decoder.read_to_end(&mut output).unwrap();
        assert_eq!(output, b"Hello");
    }

    #[test]
    fn test_copy_empty() {
        let mut decoder = CopyDecoder::new(Cursor::new(Vec::<u8>::new()), 0);

        let mut output = Vec::new();
        decoder.read_to_end(&mut output).unwrap();
        assert!(output.is_empty());
    }
}
