//! Detection and decompression of the optional zstd frame around a container.

use crate::diagnostics::DiagnosticSink;
use crate::error::BarsError;

/// Little-endian magic number that starts every zstd frame.
pub const ZSTD_MAGIC: u32 = 0xFD2F_B528;

/// Returns `true` if `data` starts with the zstd frame magic.
pub fn is_compressed(data: &[u8]) -> bool {
    data.get(..4)
        .map(|head| u32::from_le_bytes([head[0], head[1], head[2], head[3]]) == ZSTD_MAGIC)
        .unwrap_or(false)
}

/// Decompresses a single zstd frame into a buffer of exactly its declared content size.
///
/// The frame header must carry a content size, and it must fit in a u32 since the
/// container's own size field is 32 bits wide.
pub fn decompress(data: &[u8], sink: &mut dyn DiagnosticSink) -> Result<Vec<u8>, BarsError> {
    let declared = zstd::zstd_safe::get_frame_content_size(data)
        .map_err(|_| {
            BarsError::DecompressionFailure("unable to read the frame content size".into())
        })?
        .ok_or_else(|| {
            BarsError::DecompressionFailure("frame does not declare its content size".into())
        })?;

    if declared > u64::from(u32::MAX) {
        return Err(BarsError::DecompressionFailure(format!(
            "declared content size {declared} is too large for a BARS container"
        )));
    }
    let declared = declared as usize;

    sink.info(&format!(
        "Decompressing {} bytes -> {} bytes.",
        data.len(),
        declared
    ));

    // zstd itself rejects frames whose output differs from the declared size
    zstd::bulk::decompress(data, declared)
        .map_err(|e| BarsError::DecompressionFailure(e.to_string()))
}

/// Unwraps the zstd layer if present, otherwise hands the input back untouched.
pub fn unwrap_frame(data: Vec<u8>, sink: &mut dyn DiagnosticSink) -> Result<Vec<u8>, BarsError> {
    if is_compressed(&data) {
        decompress(&data, sink)
    } else {
        Ok(data)
    }
}
