//! MOBI compression and encryption code definitions.
//!
//! Maps the 2-byte compression field (bytes 0-1 of section 0) and the
//! 2-byte crypto field (bytes 12-13) to enums with display names. Both are
//! informational here: this crate neither decompresses text records nor
//! touches DRM.

use serde::Serialize;
use std::fmt;

/// PalmDoc/MOBI text compression codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compression {
    /// No compression (code 0)
    None,
    /// PalmDoc LZ77 compression (code 1)
    PalmDoc,
    /// Huffman/CDIC dictionary compression (code 17480, "HUFF")
    HuffCdic,
    /// Unrecognized compression code
    Unknown(u16),
}

impl Compression {
    /// Parse a compression code from the document header.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Compression::None,
            1 => Compression::PalmDoc,
            17480 => Compression::HuffCdic,
            other => Compression::Unknown(other),
        }
    }

    /// Display name for the compression scheme.
    pub fn name(&self) -> String {
        match self {
            Compression::None => "none".to_string(),
            Compression::PalmDoc => "PalmDoc".to_string(),
            Compression::HuffCdic => "HUFF/CDIC".to_string(),
            Compression::Unknown(code) => format!("unknown ({})", code),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// MOBI encryption (DRM) scheme codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CryptoType {
    /// No encryption (code 0)
    None,
    /// Legacy Mobipocket encryption (code 1)
    Mobipocket,
    /// Amazon Kindle DRM (code 2)
    Amazon,
    /// Unrecognized encryption code
    Unknown(u16),
}

impl CryptoType {
    /// Parse a crypto code from the document header.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CryptoType::None,
            1 => CryptoType::Mobipocket,
            2 => CryptoType::Amazon,
            other => CryptoType::Unknown(other),
        }
    }

    /// Display name for the encryption scheme.
    pub fn name(&self) -> String {
        match self {
            CryptoType::None => "none".to_string(),
            CryptoType::Mobipocket => "Mobipocket".to_string(),
            CryptoType::Amazon => "Amazon".to_string(),
            CryptoType::Unknown(code) => format!("unknown ({})", code),
        }
    }

    /// Returns true if the book carries any form of DRM.
    pub fn is_encrypted(&self) -> bool {
        !matches!(self, CryptoType::None)
    }
}

impl fmt::Display for CryptoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
