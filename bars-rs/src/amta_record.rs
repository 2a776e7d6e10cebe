use crate::{
    diagnostics::{Advisory, DiagnosticSink},
    error::{truncated, BarsError},
    ext::io_ext::{ReadExt, SeekExt},
    integrity::{is_known_defect, name_hash},
    version::Version,
};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Little-endian magic number for `AMTA`.
pub const AMTA_MAGIC: u32 = 0x4154_4D41;

/// Offset inside a record of the name-offset field; names are relative to it too.
pub const AMTA_NAME_BASE: u32 = 0x24;

/// Upper bound on the bytes probed for a name, terminator included.
pub const MAX_NAME_LENGTH: usize = 256;

/// Oldest record version whose names are known to resolve correctly.
pub const MIN_RELIABLE_VERSION: u8 = 5;

/// The metadata record describing a single container entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmtaRecord {
    /// Absolute offset of the record in the container.
    pub offset: u32,
    /// Record format version.
    pub version: Version,
    /// Size the record declares for itself.
    pub size: u32,
    /// Name position relative to `offset + AMTA_NAME_BASE`.
    pub name_offset: u32,
    /// Stored CRC-32 of the name.
    pub checksum: u32,
    /// The resolved entry name.
    pub name: String,
}

impl AmtaRecord {
    /// Parses the record at `offset` and verifies its name checksum.
    pub fn parse(
        data: &[u8],
        index: usize,
        offset: u32,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, BarsError> {
        let len = data.len() as u64;
        let mut reader = Cursor::new(data);
        reader
            .seek_within(u64::from(offset), len)
            .map_err(|_| out_of_bounds("metadata record", index, u64::from(offset), len))?;

        let magic = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("metadata signature"))?;
        if magic != AMTA_MAGIC {
            return Err(BarsError::FormatViolation(format!(
                "Invalid AMTA signature {magic:#010X} at {offset:#X} (index={index})"
            )));
        }
        // byte order mark, already validated on the container header
        reader.skip(2u64)?;

        let version = Version::from(
            reader
                .read_u16::<LittleEndian>()
                .map_err(truncated("metadata version"))?,
        );
        if version.major < MIN_RELIABLE_VERSION {
            sink.advisory(&Advisory::OldMetadataVersion {
                index,
                offset,
                major: version.major,
                minor: version.minor,
            });
        }

        let size = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("metadata size"))?;

        let name_base = u64::from(offset) + u64::from(AMTA_NAME_BASE);
        reader
            .seek_within(name_base, len)
            .map_err(|_| out_of_bounds("metadata name fields", index, name_base, len))?;
        let name_offset = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("metadata name offset"))?;
        let checksum = reader
            .read_u32::<LittleEndian>()
            .map_err(truncated("metadata checksum"))?;

        let name_position = name_base + u64::from(name_offset);
        reader
            .seek_within(name_position, len)
            .map_err(|_| out_of_bounds("entry name", index, name_position, len))?;
        let raw_name = reader.read_null_terminated(MAX_NAME_LENGTH)?;
        let name = String::from_utf8_lossy(&raw_name).into_owned();

        let computed = name_hash(&raw_name);
        if computed != checksum && is_known_defect(checksum, computed) {
            sink.advisory(&Advisory::KnownChecksumDefect {
                index,
                expected: checksum,
                found: computed,
            });
        } else if computed != checksum {
            return Err(BarsError::IntegrityMismatch {
                offset,
                name,
                expected: checksum,
                actual: computed,
                context: format!("name at {name_position:#X}, record size {size}, v{version}"),
            });
        }

        Ok(AmtaRecord {
            offset,
            version,
            size,
            name_offset,
            checksum,
            name,
        })
    }
}

fn out_of_bounds(what: &str, index: usize, position: u64, len: u64) -> BarsError {
    BarsError::FormatViolation(format!(
        "{what} for index {index} at {position:#X} lies outside the container ({len:#X} bytes)"
    ))
}
