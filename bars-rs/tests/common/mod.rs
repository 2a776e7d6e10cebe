//! Builds synthetic BARS containers for the integration tests.
#![allow(dead_code)]

pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];
pub const BOM_BE: [u8; 2] = [0xFE, 0xFF];

#[derive(Debug, Clone)]
pub struct EntrySpec {
    pub name: Vec<u8>,
    pub amta_version: u16,
    pub asset: Vec<u8>,
    /// Overrides the checksum table value (defaults to the record checksum).
    pub table_checksum: Option<u32>,
    /// Overrides the record checksum (defaults to the CRC-32 of the name).
    pub record_checksum: Option<u32>,
}

impl EntrySpec {
    pub fn new(name: &str, asset: &[u8]) -> Self {
        Self {
            name: name.as_bytes().to_vec(),
            amta_version: 0x0500,
            asset: asset.to_vec(),
            table_checksum: None,
            record_checksum: None,
        }
    }

    pub fn amta_version(mut self, major: u8, minor: u8) -> Self {
        self.amta_version = u16::from_le_bytes([minor, major]);
        self
    }

    pub fn table_checksum(mut self, checksum: u32) -> Self {
        self.table_checksum = Some(checksum);
        self
    }

    pub fn record_checksum(mut self, checksum: u32) -> Self {
        self.record_checksum = Some(checksum);
        self
    }
}

/// Layout of a built container.
#[derive(Debug, Clone)]
pub struct Built {
    pub bytes: Vec<u8>,
    pub metadata_offsets: Vec<u32>,
    pub asset_offsets: Vec<u32>,
}

impl Built {
    /// Position of entry `index`'s row in the offset table.
    pub fn offset_row(&self, index: usize) -> usize {
        0x10 + 4 * self.metadata_offsets.len() + 8 * index
    }
}

#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    pub version: u16,
    pub bom: [u8; 2],
    pub entries: Vec<EntrySpec>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            version: 0x0102,
            bom: BOM_LE,
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, entry: EntrySpec) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.build().bytes
    }

    /// Header, tables, all AMTA records (4-byte aligned), then the assets back to back.
    pub fn build(&self) -> Built {
        let count = self.entries.len();
        let mut out = Vec::new();
        out.extend_from_slice(b"BARS");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.bom);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&(count as u32).to_le_bytes());

        let checksum_table = out.len();
        out.resize(out.len() + 4 * count, 0);
        let offset_table = out.len();
        out.resize(out.len() + 8 * count, 0);

        let mut metadata_offsets = Vec::new();
        let mut record_checksums = Vec::new();
        for entry in &self.entries {
            let start = out.len();
            metadata_offsets.push(start as u32);
            let checksum = entry
                .record_checksum
                .unwrap_or_else(|| crc32fast::hash(&entry.name));
            record_checksums.push(checksum);

            out.extend_from_slice(b"AMTA");
            out.extend_from_slice(&BOM_LE);
            out.extend_from_slice(&entry.amta_version.to_le_bytes());
            let size_pos = out.len();
            out.extend_from_slice(&0u32.to_le_bytes());
            out.resize(start + 0x24, 0);
            // name starts right after the name offset and checksum fields
            out.extend_from_slice(&8u32.to_le_bytes());
            out.extend_from_slice(&checksum.to_le_bytes());
            out.extend_from_slice(&entry.name);
            out.push(0);
            while out.len() % 4 != 0 {
                out.push(0);
            }
            let size = (out.len() - start) as u32;
            out[size_pos..size_pos + 4].copy_from_slice(&size.to_le_bytes());
        }

        let mut asset_offsets = Vec::new();
        for entry in &self.entries {
            asset_offsets.push(out.len() as u32);
            out.extend_from_slice(&entry.asset);
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let table = entry.table_checksum.unwrap_or(record_checksums[i]);
            patch_u32(&mut out, checksum_table + 4 * i, table);
            patch_u32(&mut out, offset_table + 8 * i, metadata_offsets[i]);
            patch_u32(&mut out, offset_table + 8 * i + 4, asset_offsets[i]);
        }

        let total = out.len() as u32;
        patch_u32(&mut out, 4, total);

        Built {
            bytes: out,
            metadata_offsets,
            asset_offsets,
        }
    }
}

pub fn patch_u32(bytes: &mut [u8], pos: usize, value: u32) {
    bytes[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}

/// An asset starting with `tag`, followed by `words` filler strides.
pub fn asset(tag: &[u8; 4], fill: u8, words: usize) -> Vec<u8> {
    let mut data = tag.to_vec();
    for i in 0..words {
        data.extend_from_slice(&[fill, i as u8, fill.wrapping_add(1), 0x7F]);
    }
    data
}
