use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

/// A 4-byte signature or asset type tag, kept in on-disk byte order.
pub type Tag = [u8; 4];

pub trait ReadExt: Read + Seek {
    /// Reads a 4-byte tag and advances the stream.
    fn read_tag(&mut self) -> io::Result<Tag>;

    /// Reads the next 4-byte stride, or `None` once fewer than 4 bytes remain.
    fn read_stride(&mut self) -> io::Result<Option<Tag>>;

    /// Reads a null-terminated byte string of at most `limit - 1` bytes.
    fn read_null_terminated(&mut self, limit: usize) -> io::Result<Vec<u8>>;
}

impl<T> ReadExt for T
where
    T: Read + Seek,
{
    fn read_tag(&mut self) -> io::Result<Tag> {
        let mut tag = [0u8; 4];
        self.read_exact(&mut tag)?;
        Ok(tag)
    }

    fn read_stride(&mut self) -> io::Result<Option<Tag>> {
        let mut stride = [0u8; 4];
        let mut filled = 0;
        while filled < stride.len() {
            match self.read(&mut stride[filled..])? {
                0 => return Ok(None),
                n => filled += n,
            }
        }
        Ok(Some(stride))
    }

    /// Stops at the terminator, at `limit - 1` bytes, or at end of stream,
    /// whichever comes first. The terminator itself is not returned.
    fn read_null_terminated(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        let max = limit.saturating_sub(1);
        let mut bytes = Vec::with_capacity(max.min(64));
        let mut byte = [0u8; 1];
        while bytes.len() < max {
            if self.read(&mut byte)? == 0 || byte[0] == 0 {
                break;
            }
            bytes.push(byte[0]);
        }
        Ok(bytes)
    }
}

/// Utility methods for working with seekable streams.
pub trait SeekExt: Seek {
    /// Skips over the given number of bytes from the current position.
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        u64: TryFrom<P>;

    /// Seeks to an absolute offset, failing if it lies beyond `len`.
    fn seek_within(&mut self, offset: u64, len: u64) -> io::Result<u64>;
}

impl<T> SeekExt for T
where
    T: Seek,
{
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        u64: TryFrom<P>,
    {
        let size = u64::try_from(size).map_err(|_| io::Error::from(io::ErrorKind::InvalidData))?;

        self.seek(SeekFrom::Current(size as i64))
    }

    fn seek_within(&mut self, offset: u64, len: u64) -> io::Result<u64> {
        if offset > len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("offset {offset:#X} is past the end of the data ({len:#X})"),
            ));
        }
        self.seek(SeekFrom::Start(offset))
    }
}
