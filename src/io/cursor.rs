//! Sequential, seek-capable reader over a binary byte source.
//!
//! The vendor container formats decoded by this crate have no self-describing
//! schema: every read is either a compile-time constant number of bytes or a
//! size derived from an already-decoded header field. The cursor therefore
//! knows the total source length up front and turns short reads and
//! out-of-bounds seeks into typed errors instead of partial data.
//!
//! All multi-byte numeric fields in the vendor formats are little-endian;
//! fixed-width character fields are NUL-padded.

use bytes::Bytes;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::CursorError;

// =============================================================================
// FileCursor
// =============================================================================

/// A length-aware cursor over a seekable binary byte source.
///
/// Wraps any `Read + Seek` source (a buffered file, an in-memory buffer in
/// tests) and provides typed fixed-width little-endian reads plus
/// absolute-offset seeks. The total length is captured at construction so
/// every read and seek can be bounds-checked before touching the source.
#[derive(Debug)]
pub struct FileCursor<R> {
    inner: R,
    len: u64,
    pos: u64,
}

impl FileCursor<BufReader<File>> {
    /// Open a file in binary mode and wrap it in a cursor.
    pub fn open(path: &Path) -> Result<Self, CursorError> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> FileCursor<R> {
    /// Wrap a byte source, measuring its total length.
    ///
    /// The source is left positioned at offset 0.
    pub fn new(mut inner: R) -> Result<Self, CursorError> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(FileCursor { inner, len, pos: 0 })
    }

    /// Total length of the underlying source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the underlying source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current absolute read position.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Seek to an absolute offset.
    ///
    /// Fails with [`CursorError::SeekFailed`] if the offset lies past the end
    /// of the source.
    pub fn seek_to(&mut self, offset: u64) -> Result<(), CursorError> {
        if offset > self.len {
            return Err(CursorError::SeekFailed {
                offset,
                len: self.len,
            });
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    /// Read exactly `count` bytes from the current position.
    ///
    /// Fails with [`CursorError::Truncated`] if fewer bytes remain.
    pub fn read_exact(&mut self, count: usize) -> Result<Bytes, CursorError> {
        let available = self.len - self.pos;
        if count as u64 > available {
            return Err(CursorError::Truncated {
                offset: self.pos,
                requested: count as u64,
                available,
            });
        }
        let mut buf = vec![0u8; count];
        self.inner.read_exact(&mut buf)?;
        self.pos += count as u64;
        Ok(Bytes::from(buf))
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.read_exact(1)?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        Ok(read_u16_le(&self.read_exact(2)?))
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        Ok(read_u32_le(&self.read_exact(4)?))
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32, CursorError> {
        Ok(read_i32_le(&self.read_exact(4)?))
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        Ok(read_u64_le(&self.read_exact(8)?))
    }

    /// Read a little-endian f32.
    pub fn read_f32(&mut self) -> Result<f32, CursorError> {
        Ok(read_f32_le(&self.read_exact(4)?))
    }

    /// Read a little-endian f64.
    pub fn read_f64(&mut self) -> Result<f64, CursorError> {
        Ok(read_f64_le(&self.read_exact(8)?))
    }

    /// Read a fixed-width NUL-padded character field, trimmed at the first
    /// NUL byte.
    pub fn read_fixed_str(&mut self, width: usize) -> Result<String, CursorError> {
        Ok(fixed_str(&self.read_exact(width)?))
    }
}

// =============================================================================
// Slice Decode Helpers
// =============================================================================
//
// Header regions are extracted as one block and decoded field by field at
// known offsets. These helpers read fixed-width values out of such a block.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian i32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_i32_le(bytes: &[u8]) -> i32 {
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian u64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read a little-endian f32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_f32_le(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian f64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_f64_le(bytes: &[u8]) -> f64 {
    f64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Decode a fixed-width NUL-padded character field, trimmed at the first NUL.
pub fn fixed_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(bytes: &[u8]) -> FileCursor<Cursor<Vec<u8>>> {
        FileCursor::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    // -------------------------------------------------------------------------
    // Slice helper tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_read_u16_le() {
        // 0x0102 in little-endian is stored as [0x02, 0x01]
        assert_eq!(read_u16_le(&[0x02, 0x01]), 0x0102);
        assert_eq!(read_u16_le(&[0xFF, 0xFF]), 0xFFFF);
    }

    #[test]
    fn test_read_u32_le() {
        assert_eq!(read_u32_le(&[0x04, 0x03, 0x02, 0x01]), 0x01020304);
        assert_eq!(read_u32_le(&[0x00, 0x00, 0x00, 0x00]), 0x00000000);
    }

    #[test]
    fn test_read_i32_le() {
        assert_eq!(read_i32_le(&(-5i32).to_le_bytes()), -5);
        assert_eq!(read_i32_le(&[0xFF, 0xFF, 0xFF, 0xFF]), -1);
    }

    #[test]
    fn test_read_u64_le() {
        assert_eq!(
            read_u64_le(&[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]),
            0x0102030405060708
        );
    }

    #[test]
    fn test_read_f32_le() {
        assert_eq!(read_f32_le(&1.5f32.to_le_bytes()), 1.5);
        assert_eq!(read_f32_le(&(-0.25f32).to_le_bytes()), -0.25);
    }

    #[test]
    fn test_read_f64_le() {
        assert_eq!(read_f64_le(&3.875f64.to_le_bytes()), 3.875);
    }

    #[test]
    fn test_fixed_str_trims_at_first_nul() {
        assert_eq!(fixed_str(b"OD\0\0"), "OD");
        assert_eq!(fixed_str(b"OS\0X"), "OS");
        assert_eq!(fixed_str(b"full"), "full");
        assert_eq!(fixed_str(b"\0\0\0\0"), "");
    }

    // -------------------------------------------------------------------------
    // FileCursor tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_cursor_len_and_position() {
        let mut c = cursor(&[1, 2, 3, 4]);
        assert_eq!(c.len(), 4);
        assert_eq!(c.position(), 0);

        c.read_exact(2).unwrap();
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn test_cursor_typed_reads() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x01020304u32.to_le_bytes());
        bytes.extend_from_slice(&2.5f64.to_le_bytes());
        bytes.extend_from_slice(&(-7i32).to_le_bytes());

        let mut c = cursor(&bytes);
        assert_eq!(c.read_u32().unwrap(), 0x01020304);
        assert_eq!(c.read_f64().unwrap(), 2.5);
        assert_eq!(c.read_i32().unwrap(), -7);
    }

    #[test]
    fn test_cursor_read_fixed_str() {
        let mut c = cursor(b"HSF\0____");
        assert_eq!(c.read_fixed_str(4).unwrap(), "HSF");
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn test_cursor_truncated_read() {
        let mut c = cursor(&[1, 2, 3]);
        let err = c.read_exact(4).unwrap_err();
        assert!(matches!(
            err,
            CursorError::Truncated {
                offset: 0,
                requested: 4,
                available: 3,
            }
        ));
    }

    #[test]
    fn test_cursor_truncated_after_partial_consumption() {
        let mut c = cursor(&[1, 2, 3, 4, 5, 6]);
        c.read_exact(4).unwrap();

        let err = c.read_exact(3).unwrap_err();
        assert!(matches!(
            err,
            CursorError::Truncated {
                offset: 4,
                requested: 3,
                available: 2,
            }
        ));
    }

    #[test]
    fn test_cursor_seek_within_bounds() {
        let mut c = cursor(&[0, 0, 0xAB, 0xCD]);
        c.seek_to(2).unwrap();
        assert_eq!(c.read_u8().unwrap(), 0xAB);
    }

    #[test]
    fn test_cursor_seek_past_end() {
        let mut c = cursor(&[1, 2, 3]);
        let err = c.seek_to(4).unwrap_err();
        assert!(matches!(err, CursorError::SeekFailed { offset: 4, len: 3 }));
    }

    #[test]
    fn test_cursor_seek_to_exact_end_is_ok() {
        let mut c = cursor(&[1, 2, 3]);
        c.seek_to(3).unwrap();
        assert!(c.read_exact(1).is_err());
    }

    #[test]
    fn test_cursor_empty_source() {
        let c = cursor(&[]);
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
    }
}
