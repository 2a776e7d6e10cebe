use crate::{
    amta_record::AmtaRecord,
    bars_asset::{extract_asset, ExtractedAsset},
    bars_header::BarsHeader,
    diagnostics::DiagnosticSink,
    error::BarsError,
    integrity, zstd_frame,
};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

/// A decoded BARS container.
///
/// `BarsArchive` is the main entry point of the crate. It owns the decompressed
/// container bytes, the parsed header and tables, and one verified metadata record
/// per entry. Assets are cut out of the buffer on demand.
///
/// ```rust,no_run
/// use bars_rs::bars_archive::BarsArchive;
/// use bars_rs::diagnostics::LogSink;
///
/// let archive = BarsArchive::open("Object_BillboardNpcBowling.bars.zs", &mut LogSink).unwrap();
/// for record in archive.records() {
///     println!("{} (v{})", record.name, record.version);
/// }
/// let report = archive.extract_to("out/Object_BillboardNpcBowling.bars.zs_out", &mut LogSink).unwrap();
/// println!("{} bytes written", report.bytes_written);
/// ```
#[derive(Debug)]
pub struct BarsArchive {
    /// Decompressed container bytes.
    data: Vec<u8>,
    /// Header and per-entry tables.
    header: BarsHeader,
    /// Metadata records, index-aligned with the tables.
    records: Vec<AmtaRecord>,
}

/// Summary of an [`BarsArchive::extract_to`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Total asset bytes written across all entries.
    pub bytes_written: u64,
    /// Every distinct file created, in table order of first write.
    pub files: Vec<PathBuf>,
}

impl BarsArchive {
    /// Reads and decodes the container stored at `path`.
    pub fn open<P: AsRef<Path>>(path: P, sink: &mut dyn DiagnosticSink) -> Result<Self, BarsError> {
        let data = fs::read(path)?;
        Self::from_bytes(data, sink)
    }

    /// Decodes a container, unwrapping a zstd frame first if there is one.
    ///
    /// Every metadata record is parsed and checked against the checksum table here,
    /// so a returned archive is known to be consistent.
    pub fn from_bytes(data: Vec<u8>, sink: &mut dyn DiagnosticSink) -> Result<Self, BarsError> {
        let data = zstd_frame::unwrap_frame(data, sink)?;
        let header = BarsHeader::parse(&data, sink)?;

        let mut records = Vec::with_capacity(header.len());
        for (index, entry) in header.offset_table.iter().enumerate() {
            let record = AmtaRecord::parse(&data, index, entry.metadata_offset, sink)?;
            integrity::check_entry(index, header.checksum_table[index], &record, sink)?;
            records.push(record);
        }

        Ok(BarsArchive {
            data,
            header,
            records,
        })
    }

    pub fn header(&self) -> &BarsHeader {
        &self.header
    }

    pub fn records(&self) -> &[AmtaRecord] {
        &self.records
    }

    /// The decompressed container bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn entry_count(&self) -> usize {
        self.header.len()
    }

    /// Cuts every asset out of the container, in table order.
    pub fn assets(&self, sink: &mut dyn DiagnosticSink) -> Result<Vec<ExtractedAsset>, BarsError> {
        self.header
            .offset_table
            .iter()
            .zip(&self.records)
            .enumerate()
            .map(|(index, (entry, record))| {
                extract_asset(&self.data, index, entry.asset_offset, &record.name, sink)
            })
            .collect()
    }

    /// Extracts every asset into `dir`, creating it if needed.
    ///
    /// Files are named `<entry name>.<extension>`. An existing file with the same
    /// name is overwritten; `files` lists each path once, while `bytes_written`
    /// counts every write, overwritten ones included.
    pub fn extract_to<P: AsRef<Path>>(
        &self,
        dir: P,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ExtractionReport, BarsError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut report = ExtractionReport::default();
        for asset in self.assets(sink)? {
            let path = dir.join(&asset.file_name);
            let mut file = File::create(&path)?;
            file.write_all(&asset.data)?;

            report.bytes_written += asset.data.len() as u64;
            if !report.files.contains(&path) {
                report.files.push(path);
            }
        }

        sink.info("Finished writing to disk.");
        sink.info(&format!("Total bytes written: {}", report.bytes_written));
        Ok(report)
    }
}

/// Output directory for one input: `<target>/<input file name>_out`.
pub fn output_dir_for<P: AsRef<Path>, Q: AsRef<Path>>(target: P, input: Q) -> PathBuf {
    let name = input
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.as_ref().join(format!("{name}_out"))
}
