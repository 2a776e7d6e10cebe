use std::fmt;

/// A `major.minor` format version stored as one little-endian u16.
///
/// The low byte holds the minor component and the high byte the major one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl From<u16> for Version {
    fn from(raw: u16) -> Self {
        let [minor, major] = raw.to_le_bytes();
        Version { major, minor }
    }
}

impl From<Version> for u16 {
    fn from(version: Version) -> Self {
        u16::from_le_bytes([version.minor, version.major])
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
