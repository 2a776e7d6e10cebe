/// One row of the container's offset table.
///
/// Both offsets are absolute positions in the decompressed container.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BarsOffsetEntry {
    /// Where the entry's AMTA metadata record starts.
    pub metadata_offset: u32,
    /// Where the entry's asset data starts.
    pub asset_offset: u32,
}

impl BarsOffsetEntry {
    pub fn new(metadata_offset: u32, asset_offset: u32) -> Self {
        Self {
            metadata_offset,
            asset_offset,
        }
    }
}
