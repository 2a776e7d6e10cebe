use crate::{
    diagnostics::{Advisory, DiagnosticSink},
    error::{truncated, BarsError},
    ext::io_ext::{ReadExt, SeekExt, Tag},
};
use std::io::Cursor;
use std::path::{Component, Path};

/// Little-endian magic number for `BWAV` audio streams.
pub const BWAV_MAGIC: u32 = 0x5641_5742;

/// Extension used for tags without a known mapping.
pub const FALLBACK_EXTENSION: &str = "unk";

/// Asset formats recognised by their leading type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Wave stream.
    Bwav,
    /// Anything else, keeps the raw tag value.
    Unknown(u32),
}

impl From<Tag> for AssetKind {
    fn from(tag: Tag) -> Self {
        match u32::from_le_bytes(tag) {
            BWAV_MAGIC => AssetKind::Bwav,
            other => AssetKind::Unknown(other),
        }
    }
}

impl AssetKind {
    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Bwav => "bwav",
            AssetKind::Unknown(_) => FALLBACK_EXTENSION,
        }
    }
}

/// One asset cut out of a container, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAsset {
    /// Position of the entry in the container tables.
    pub index: usize,
    /// The asset's leading type tag.
    pub tag: Tag,
    /// `<name>.<extension>`.
    pub file_name: String,
    /// Asset bytes, starting with the tag.
    pub data: Vec<u8>,
}

impl ExtractedAsset {
    pub fn kind(&self) -> AssetKind {
        AssetKind::from(self.tag)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Cuts the asset starting at `asset_offset` out of the container.
///
/// Assets carry no stored length. The asset ends right before the next 4-byte
/// stride equal to its own leading tag, or where the data runs out. A trailing
/// stride shorter than 4 bytes is not part of the asset.
pub fn extract_asset(
    data: &[u8],
    index: usize,
    asset_offset: u32,
    name: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<ExtractedAsset, BarsError> {
    let len = data.len() as u64;
    let mut reader = Cursor::new(data);
    reader.seek_within(u64::from(asset_offset), len).map_err(|_| {
        BarsError::FormatViolation(format!(
            "asset for index {index} at {asset_offset:#X} lies outside the container ({len:#X} bytes)"
        ))
    })?;

    let tag = reader.read_tag().map_err(truncated("asset type tag"))?;

    let mut content = tag.to_vec();
    while let Some(stride) = reader.read_stride()? {
        if stride == tag {
            break;
        }
        content.extend_from_slice(&stride);
    }

    let kind = AssetKind::from(tag);
    if let AssetKind::Unknown(_) = kind {
        sink.advisory(&Advisory::UnknownAssetTag { index, tag });
    }

    Ok(ExtractedAsset {
        index,
        tag,
        file_name: output_file_name(index, name, kind)?,
        data: content,
    })
}

/// Builds `<name>.<extension>`, refusing names that would leave the output directory.
///
/// An empty name is allowed and yields a bare `.<extension>` file.
pub fn output_file_name(index: usize, name: &str, kind: AssetKind) -> Result<String, BarsError> {
    let file_name = format!("{name}.{}", kind.extension());
    let mut components = Path::new(&file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == file_name.as_str() => Ok(file_name),
        _ => Err(BarsError::FormatViolation(format!(
            "entry name {name:?} (index={index}) is not a plain file name"
        ))),
    }
}
