use crate::{
    bars_entry::BarsOffsetEntry,
    diagnostics::DiagnosticSink,
    error::{truncated, BarsError},
    version::Version,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Little-endian magic number for `BARS`.
pub const BARS_MAGIC: u32 = 0x5352_4142;

/// Byte order mark as read from a little-endian container (`FF FE` on disk).
pub const BOM_LITTLE_ENDIAN: u16 = 0xFEFF;
/// Byte order mark as read from a big-endian container (`FE FF` on disk).
pub const BOM_BIG_ENDIAN: u16 = 0xFFFE;

/// Size of the fixed part of the header, before the checksum table.
pub const HEADER_SIZE: u64 = 0x10;

/// The fixed container header together with its two per-entry tables.
///
/// Both tables always hold exactly `entry_count` rows, index-aligned with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsHeader {
    /// Declared size of the whole container in bytes.
    pub total_size: u32,
    /// Byte order mark, always [`BOM_LITTLE_ENDIAN`] once parsed.
    pub byte_order_marker: u16,
    /// Container format version.
    pub version: Version,
    /// Number of entries described by the tables.
    pub entry_count: u32,
    /// Name checksum per entry.
    pub checksum_table: Vec<u32>,
    /// Metadata and asset offsets per entry.
    pub offset_table: Vec<BarsOffsetEntry>,
}

impl BarsHeader {
    /// Parses the header and tables from the start of a decompressed container.
    pub fn parse(data: &[u8], sink: &mut dyn DiagnosticSink) -> Result<Self, BarsError> {
        let mut reader = Cursor::new(data);

        let magic = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("container signature"))?;
        if magic != BARS_MAGIC {
            return Err(BarsError::FormatViolation(format!(
                "Invalid BARS signature: {magic:#010X}"
            )));
        }
        sink.info("BARS File identified.");

        let total_size = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("container size"))?;
        if total_size as usize != data.len() {
            return Err(BarsError::FormatViolation(format!(
                "declared size {total_size} does not match actual size {}",
                data.len()
            )));
        }

        let byte_order_marker = reader
            .read_u16::<LittleEndian>()
            .map_err(truncated("byte order mark"))?;
        match byte_order_marker {
            BOM_LITTLE_ENDIAN => {}
            BOM_BIG_ENDIAN => return Err(BarsError::UnsupportedByteOrder(byte_order_marker)),
            other => {
                return Err(BarsError::FormatViolation(format!(
                    "Invalid byte order mark: {other:#06X}"
                )))
            }
        }

        let version = Version::from(
            reader
                .read_u16::<LittleEndian>()
                .map_err(truncated("container version"))?,
        );
        sink.info(&format!("BARS Version {version}"));

        let entry_count = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("entry count"))?;
        sink.info(&format!("BARS Entries to parse: {entry_count}"));

        // 4 bytes of checksum plus 8 bytes of offsets per entry
        let tables_end = HEADER_SIZE + u64::from(entry_count) * 12;
        if tables_end > data.len() as u64 {
            return Err(BarsError::FormatViolation(format!(
                "{entry_count} entries need {tables_end} bytes of tables, container has {}",
                data.len()
            )));
        }

        let mut checksum_table = vec![0u32; entry_count as usize];
        reader
            .read_u32_into::<LittleEndian>(&mut checksum_table)
            .map_err(truncated("checksum table"))?;

        let mut offset_table = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let metadata_offset = reader
                .read_u32::<LittleEndian>()
                .map_err(truncated("offset table"))?;
            let asset_offset = reader
                .read_u32::<LittleEndian>()
                .map_err(truncated("offset table"))?;
            offset_table.push(BarsOffsetEntry::new(metadata_offset, asset_offset));
        }

        Ok(BarsHeader {
            total_size,
            byte_order_marker,
            version,
            entry_count,
            checksum_table,
            offset_table,
        })
    }

    /// Number of entries as a `usize`, for indexing.
    pub fn len(&self) -> usize {
        self.entry_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}
