use crate::{
    amta_record::AmtaRecord,
    diagnostics::{Advisory, DiagnosticSink},
    error::BarsError,
};

/// Checksum stored in the container table for the one mistyped asset name.
pub const KNOWN_DEFECT_TABLE_CHECKSUM: u32 = 0x835B_804B;
/// Checksum stored in the metadata record for the same entry.
pub const KNOWN_DEFECT_RECORD_CHECKSUM: u32 = 0xCC06_839B;

/// Name checksum used throughout the format: CRC-32 (IEEE) over the raw name bytes.
pub fn name_hash(name: &[u8]) -> u32 {
    crc32fast::hash(name)
}

/// Returns `true` for the accepted table/record mismatch.
///
/// One shipped container (`Object_BillboardNpcBowling.bars`) stores the record name
/// `SE_NPC_Lv2_M_middleA_16`, while its table checksum was computed over
/// `SE_NPC_Lv2_M_MiddleA_16`.
pub fn is_known_defect(table_checksum: u32, record_checksum: u32) -> bool {
    table_checksum == KNOWN_DEFECT_TABLE_CHECKSUM && record_checksum == KNOWN_DEFECT_RECORD_CHECKSUM
}

/// Cross-checks the container's checksum table against a parsed metadata record.
pub fn check_entry(
    index: usize,
    table_checksum: u32,
    record: &AmtaRecord,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), BarsError> {
    if table_checksum == record.checksum {
        return Ok(());
    }
    if is_known_defect(table_checksum, record.checksum) {
        sink.advisory(&Advisory::KnownChecksumDefect {
            index,
            expected: table_checksum,
            found: record.checksum,
        });
        return Ok(());
    }
    Err(BarsError::IntegrityMismatch {
        offset: record.offset,
        name: record.name.clone(),
        expected: table_checksum,
        actual: record.checksum,
        context: format!("checksum table entry {index} disagrees with the metadata record"),
    })
}
