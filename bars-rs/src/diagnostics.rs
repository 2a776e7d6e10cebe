use crate::ext::io_ext::Tag;
use std::fmt;

/// A non-fatal condition found while decoding a container.
///
/// Advisories never stop decoding; they are handed to a [`DiagnosticSink`] so the
/// caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The metadata record predates version 5, so its name may be wrong.
    OldMetadataVersion {
        index: usize,
        offset: u32,
        major: u8,
        minor: u8,
    },
    /// The asset type tag has no known extension; the fallback was used.
    UnknownAssetTag { index: usize, tag: Tag },
    /// The one shipped checksum mismatch that is accepted on purpose.
    KnownChecksumDefect {
        index: usize,
        expected: u32,
        found: u32,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::OldMetadataVersion {
                index,
                offset,
                major,
                minor,
            } => write!(
                f,
                "AMTA Version {major}.{minor} < 5, file names may not be accurate! (index={index},off={offset:#X})"
            ),
            Advisory::UnknownAssetTag { index, tag } => write!(
                f,
                "Unknown magic {} (index={index})",
                hex::encode_upper(tag)
            ),
            Advisory::KnownChecksumDefect {
                index,
                expected,
                found,
            } => write!(
                f,
                "Checksum mismatch {expected:08X} != {found:08X} at index {index} \
                 is a known typo in the shipped asset name, continuing."
            ),
        }
    }
}

/// Receives progress messages and advisories from the decoder.
///
/// The decoder itself never prints; fatal conditions are returned as
/// [`BarsError`](crate::error::BarsError) values.
pub trait DiagnosticSink {
    fn info(&mut self, message: &str);

    fn advisory(&mut self, advisory: &Advisory);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn advisory(&mut self, advisory: &Advisory) {
        match advisory {
            Advisory::KnownChecksumDefect { .. } => log::info!("{advisory}"),
            _ => log::warn!("{advisory}"),
        }
    }
}

/// Collects advisories in memory and drops info messages.
impl DiagnosticSink for Vec<Advisory> {
    fn info(&mut self, _message: &str) {}

    fn advisory(&mut self, advisory: &Advisory) {
        self.push(advisory.clone());
    }
}
