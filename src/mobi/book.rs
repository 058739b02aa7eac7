//! The MOBI parsing session and query surface.
//!
//! [`MobiBook`] owns the full file contents and parses them once, front to
//! back: PDB header, section table, MOBI header from section 0, and the
//! EXTH metadata index. After construction everything is immutable and
//! queries (`title`, `field`, `section`) are pure reads.

use encoding_rs::Encoding;

use crate::mobi::exth::MetadataIndex;
use crate::mobi::fields;
use crate::mobi::header::MobiHeader;
use crate::mobi::pdb::{PdbHeader, SectionTable};
use crate::MobiError;

/// A parsed MOBI book.
pub struct MobiBook {
    data: Vec<u8>,
    pdb: PdbHeader,
    sections: SectionTable,
    header: MobiHeader,
    metadata: MetadataIndex,
}

impl MobiBook {
    /// Parse a book from the entire file contents.
    ///
    /// Fails with `InvalidFormat` for anything that prevents structural
    /// decoding: wrong type/creator tag, truncated section table, or a
    /// section 0 too short for the MOBI header. A malformed EXTH block is
    /// not fatal — the book loads with an empty metadata index.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, MobiError> {
        let pdb = PdbHeader::parse(&data)?;
        let sections = SectionTable::parse(&data, pdb.num_sections)?;

        let record0 = sections.section_bytes(0, &data)?;
        let header = MobiHeader::parse(record0)?;
        let metadata = header.metadata(record0);

        Ok(MobiBook {
            data,
            pdb,
            sections,
            header,
            metadata,
        })
    }

    /// The parsed PDB container header.
    pub fn pdb(&self) -> &PdbHeader {
        &self.pdb
    }

    /// The parsed MOBI document header.
    pub fn header(&self) -> &MobiHeader {
        &self.header
    }

    /// The section directory.
    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    /// The EXTH metadata index (tag → raw payload).
    pub fn metadata(&self) -> &MetadataIndex {
        &self.metadata
    }

    /// Total size of the document in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-length document (never constructed in
    /// practice; the PDB header check requires 78 bytes).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw bytes of one section.
    pub fn section(&self, index: usize) -> Result<&[u8], MobiError> {
        self.sections.section_bytes(index, &self.data)
    }

    /// The text encoding resolved from the document's codepage.
    pub fn encoding(&self) -> &'static Encoding {
        fields::encoding_for_codepage(self.header.codepage)
    }

    /// Resolve a metadata field by name (see [`fields::resolve`]).
    pub fn field(&self, name: &str) -> Result<String, MobiError> {
        fields::resolve(name, &self.metadata, self.header.codepage)
    }

    /// Names of every field the closed EXTH table knows about.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        fields::field_names()
    }

    /// Resolve the display title with a three-stage fallback:
    ///
    /// 1. the `updatedtitle` EXTH record,
    /// 2. the title range the MOBI header declares within section 0,
    /// 3. the PDB database name (first 32 bytes, up to the first NUL).
    ///
    /// Each candidate is decoded with the resolved encoding and trimmed;
    /// the first non-empty one wins. An undecodable candidate counts as
    /// empty so a damaged record falls through to the next stage. If all
    /// three come up empty the result is an empty string, not an error.
    pub fn title(&self) -> Result<String, MobiError> {
        let updated = self.field("updatedtitle").unwrap_or_default();
        let title = updated.trim();
        if !title.is_empty() {
            return Ok(title.to_string());
        }

        let record0 = self.section(0)?;
        let declared = self.declared_title_bytes(record0);
        let title = fields::decode_text(declared, self.encoding()).unwrap_or_default();
        let title = title.trim();
        if !title.is_empty() {
            return Ok(title.to_string());
        }

        let name = self
            .pdb
            .name
            .split(|&b| b == 0)
            .next()
            .unwrap_or_default();
        let title = fields::decode_text(name, self.encoding()).unwrap_or_default();
        Ok(title.trim().to_string())
    }

    /// The byte range inside section 0 that the header declares as the
    /// full title, clamped to the section bounds.
    fn declared_title_bytes<'a>(&self, record0: &'a [u8]) -> &'a [u8] {
        let start = self.header.title_offset as usize;
        if start >= record0.len() {
            return &[];
        }
        let end = start
            .saturating_add(self.header.title_length as usize)
            .min(record0.len());
        &record0[start..end]
    }
}
