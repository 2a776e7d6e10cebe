/// Represents all possible errors that can occur while decoding a BARS container.
///
/// Every variant is fatal for the input being decoded. Non-fatal conditions are
/// reported as [`Advisory`](crate::diagnostics::Advisory) values instead.
#[derive(Debug)]
pub enum BarsError {
    /// The data does not follow the container layout (bad signature, size mismatch,
    /// offsets outside the buffer, unusable entry names).
    FormatViolation(String),
    /// The container declares big-endian byte order, which is not supported.
    UnsupportedByteOrder(u16),
    /// The zstd frame wrapping the container could not be decompressed.
    DecompressionFailure(String),
    /// A name checksum does not match the stored value.
    IntegrityMismatch {
        /// Absolute offset of the metadata record.
        offset: u32,
        /// Resolved entry name.
        name: String,
        /// The stored checksum.
        expected: u32,
        /// The checksum it was compared against.
        actual: u32,
        /// Extra detail about where the record and name were found.
        context: String,
    },
    /// Represents an error that occurs during I/O operations.
    Io(std::io::Error),
}

impl std::fmt::Display for BarsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarsError::FormatViolation(err) => write!(f, "Format violation: {err}"),
            BarsError::UnsupportedByteOrder(bom) => write!(
                f,
                "Only little-endian formatting supported! (byte order mark {bom:#06X})"
            ),
            BarsError::DecompressionFailure(err) => write!(f, "Decompression failed: {err}"),
            BarsError::IntegrityMismatch {
                offset,
                name,
                expected,
                actual,
                context,
            } => write!(
                f,
                "Checksum mismatch at {offset:#X}, with subfile {name} \
                 (stored {expected:08X}, got {actual:08X}; {context})"
            ),
            BarsError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for BarsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BarsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BarsError {
    fn from(error: std::io::Error) -> Self {
        BarsError::Io(error)
    }
}

/// Turns a short read while parsing into a format violation naming what was being read.
///
/// Input buffers are fully in memory, so an unexpected EOF always means the container
/// is truncated or an offset points past its end.
pub(crate) fn truncated(what: &str) -> impl FnOnce(std::io::Error) -> BarsError + '_ {
    move |err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            BarsError::FormatViolation(format!("unexpected end of data while reading {what}"))
        } else {
            BarsError::Io(err)
        }
    }
}
