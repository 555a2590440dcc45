//! Sequential byte cursors.
//!
//! Decoders are written against [`Reader`] and encoders against [`Writer`],
//! so the same codec runs over an in-memory buffer, a blocking stream or a
//! hash engine. All multi-byte integers are little-endian.

use crate::constants::{HASH_SIZE, VAR_BYTES_CHUNK};
use crate::error::{DecodeError, Result};
use crate::hash::Hash;
use crate::varint;
use sha2::{Digest, Sha256};
use std::io;

/// Read side of a cursor: "read exactly N bytes or fail".
pub trait Reader {
    /// Fills `buf` completely or fails with [`DecodeError::ShortRead`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes consumed so far.
    fn position(&self) -> u64;

    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_u16_le(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64_le(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_hash(&mut self) -> Result<Hash> {
        let mut buf = [0u8; HASH_SIZE];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_var_int(&mut self) -> Result<u64> {
        varint::read_var_int(self)
    }

    /// Reads a var-int length followed by that many bytes.
    ///
    /// The payload is pulled in bounded chunks, so a hostile length prefix
    /// ends in a short read rather than an allocation of the declared size.
    fn read_var_bytes(&mut self) -> Result<Vec<u8>> {
        let declared = self.read_var_int()?;
        let len = usize::try_from(declared)
            .map_err(|_| DecodeError::malformed("length", format!("{declared} overflows usize")))?;

        let mut out = Vec::with_capacity(len.min(VAR_BYTES_CHUNK));
        while out.len() < len {
            let start = out.len();
            let take = (len - start).min(VAR_BYTES_CHUNK);
            out.resize(start + take, 0);
            self.read_exact(&mut out[start..])?;
        }
        Ok(out)
    }
}

/// Write side of a cursor.
pub trait Writer {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Bytes accepted so far.
    fn position(&self) -> u64;

    fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_all(&[value])
    }

    fn write_u16_le(&mut self, value: u16) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_u32_le(&mut self, value: u32) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_u64_le(&mut self, value: u64) -> io::Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    fn write_hash(&mut self, hash: &Hash) -> io::Result<()> {
        self.write_all(hash)
    }

    fn write_var_int(&mut self, value: u64) -> io::Result<()> {
        varint::write_var_int(self, value)
    }

    fn write_var_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_var_int(bytes.len() as u64)?;
        self.write_all(bytes)
    }
}

/// Buffer-backed reader.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Reader for SliceReader<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(DecodeError::ShortRead {
                requested: buf.len(),
                available: Some(available),
            });
        }
        let end = self.pos + buf.len();
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

/// Stream-backed reader. Blocking, if any, is the inner reader's business.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    pos: u64,
}

impl<R: io::Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> Reader for StreamReader<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.pos += filled as u64;
                    return Err(DecodeError::ShortRead {
                        requested: buf.len(),
                        available: None,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(DecodeError::ShortRead {
                        requested: buf.len(),
                        available: None,
                    });
                }
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
        self.pos += filled as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos
    }
}

/// Writer into an owned, growable buffer. Never fails.
#[derive(Debug, Clone, Default)]
pub struct BufferWriter {
    buf: Vec<u8>,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl Writer for BufferWriter {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.buf.len() as u64
    }
}

/// Writer over any [`io::Write`].
#[derive(Debug)]
pub struct StreamWriter<W> {
    inner: W,
    written: u64,
}

impl<W: io::Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Writer for StreamWriter<W> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.written
    }
}

/// Feeds encoded bytes straight into SHA-256, so identity hashes need no
/// intermediate buffer.
#[derive(Debug, Clone, Default)]
pub struct HashWriter {
    engine: Sha256,
    written: u64,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Double SHA-256 of everything written.
    pub fn finish(self) -> Hash {
        let second = Sha256::digest(self.engine.finalize());
        let mut out = [0u8; HASH_SIZE];
        out.copy_from_slice(&second[..]);
        out
    }
}

impl Writer for HashWriter {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.engine.update(bytes);
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.written
    }
}
