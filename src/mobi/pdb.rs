//! PDB container header and section table parsing.
//!
//! Every MOBI book is wrapped in a Palm Database (PDB) archive: a 78-byte
//! header ([`PdbHeader`]) holding the database name, a type/creator tag,
//! and a section count, followed by an 8-byte directory entry per section
//! ([`SectionDescriptor`]). Section contents are located by slicing from
//! one section's offset to the next (or to end-of-file for the last
//! section); the directory carries no explicit lengths.

use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;

use crate::mobi::constants::*;
use crate::MobiError;

/// Parsed PDB container header (first 78 bytes of the file).
#[derive(Debug, Clone, Serialize)]
pub struct PdbHeader {
    /// Null-padded database name. Bytes 0-31, kept raw; the display name
    /// is decoded on demand with the book's resolved encoding.
    pub name: Vec<u8>,
    /// Number of sections in the archive. Bytes 76-77.
    pub num_sections: u16,
}

impl PdbHeader {
    /// Parse the PDB header and verify the MOBI type/creator tag.
    ///
    /// Fails with `InvalidFormat` if the buffer is shorter than 78 bytes
    /// or the 8 bytes at 0x3C are not `BOOKMOBI`.
    pub fn parse(data: &[u8]) -> Result<Self, MobiError> {
        if data.len() < SIZE_PDB_HEADER {
            return Err(MobiError::InvalidFormat(format!(
                "File too short for a PDB header: {} bytes",
                data.len()
            )));
        }

        let magic = &data[PDB_TYPE_CREATOR..PDB_TYPE_CREATOR + MOBI_MAGIC.len()];
        if magic != MOBI_MAGIC {
            return Err(MobiError::InvalidFormat(format!(
                "Not a MOBI book (type/creator {:?})",
                String::from_utf8_lossy(magic)
            )));
        }

        Ok(PdbHeader {
            name: data[PDB_NAME..PDB_NAME + PDB_NAME_LEN].to_vec(),
            num_sections: BigEndian::read_u16(&data[PDB_NUM_SECTIONS..]),
        })
    }
}

/// One entry of the PDB section directory (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    /// Absolute file offset of the section's first byte. Bytes 0-3.
    pub offset: u32,
    /// Attribute flags. Byte 4.
    pub flags: u8,
    /// 24-bit unique record id. Bytes 5-7.
    pub unique_id: u32,
}

/// The ordered section directory of a PDB archive.
#[derive(Debug, Clone, Serialize)]
pub struct SectionTable {
    sections: Vec<SectionDescriptor>,
}

impl SectionTable {
    /// Parse `num_sections` directory entries starting at byte 78.
    ///
    /// Fails with `InvalidFormat` if the buffer cannot hold the declared
    /// number of entries.
    pub fn parse(data: &[u8], num_sections: u16) -> Result<Self, MobiError> {
        let count = num_sections as usize;
        let table_end = SIZE_PDB_HEADER + count * SIZE_SECTION_ENTRY;
        if data.len() < table_end {
            return Err(MobiError::InvalidFormat(format!(
                "Section table truncated: {} sections need {} bytes, have {}",
                count,
                table_end,
                data.len()
            )));
        }

        let mut sections = Vec::with_capacity(count);
        for i in 0..count {
            let entry = &data[SIZE_PDB_HEADER + i * SIZE_SECTION_ENTRY..];
            sections.push(SectionDescriptor {
                offset: BigEndian::read_u32(&entry[SECTION_OFFSET..]),
                flags: entry[SECTION_FLAGS],
                unique_id: BigEndian::read_u24(&entry[SECTION_UNIQUE_ID..]),
            });
        }

        Ok(SectionTable { sections })
    }

    /// Number of sections in the directory.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The ordered section descriptors.
    pub fn descriptors(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    /// Slice one section's bytes out of the full document.
    ///
    /// A section runs from its own offset to the next section's offset,
    /// or to the end of the document for the last section. Fails with
    /// `Argument` for an out-of-range index and `InvalidFormat` when the
    /// directory declares a byte range that does not fit the document
    /// (reversed or past end-of-file).
    pub fn section_bytes<'a>(&self, index: usize, data: &'a [u8]) -> Result<&'a [u8], MobiError> {
        if index >= self.sections.len() {
            return Err(MobiError::Argument(format!(
                "Section index {} out of range (have {})",
                index,
                self.sections.len()
            )));
        }

        let start = self.sections[index].offset as usize;
        let end = if index + 1 == self.sections.len() {
            data.len()
        } else {
            self.sections[index + 1].offset as usize
        };

        data.get(start..end).ok_or_else(|| {
            MobiError::InvalidFormat(format!(
                "Section {} declares byte range {}..{} outside document of {} bytes",
                index,
                start,
                end,
                data.len()
            ))
        })
    }
}
