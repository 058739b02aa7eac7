//! MOBI document header parsing (section 0).
//!
//! Section 0 of the archive starts with the PalmDoc record header
//! (compression, text record count) and continues with the MOBI header
//! proper: length, codepage, version, image index, EXTH flags, and the DRM
//! descriptor. All integers are big-endian at fixed offsets.
//!
//! The EXTH metadata block, when present, begins at `header_length + 16`
//! within the same section; [`MobiHeader::metadata`] walks it and absorbs
//! any parse failure into an empty index so a corrupt metadata block never
//! prevents the book itself from loading.

use byteorder::{BigEndian, ByteOrder};
use log::warn;
use serde::Serialize;

use crate::mobi::constants::*;
use crate::mobi::exth::{self, MetadataIndex};
use crate::mobi::types::{Compression, CryptoType};
use crate::MobiError;

/// DRM descriptor from the MOBI header (bytes 0xA8-0xB7).
///
/// Read and exposed for display only; this crate never decrypts content.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DrmDescriptor {
    /// Offset of the DRM data. 0xFFFFFFFF when the book has no DRM.
    pub offset: u32,
    /// Number of DRM entries.
    pub count: u32,
    /// Size of the DRM data in bytes.
    pub size: u32,
    /// DRM flags.
    pub flags: u32,
}

/// Parsed fixed-layout fields of the MOBI document header.
#[derive(Debug, Clone, Serialize)]
pub struct MobiHeader {
    /// Text compression scheme. Bytes 0x00-0x01.
    pub compression: Compression,
    /// Number of text records. Bytes 0x08-0x09.
    pub txt_records: u16,
    /// Encryption scheme. Bytes 0x0C-0x0D.
    pub crypto_type: CryptoType,
    /// Declared MOBI header length; the EXTH block (if any) starts 16
    /// bytes past it. Bytes 0x14-0x17.
    pub header_length: u32,
    /// Codepage of embedded text (1252, 65001, ...). Bytes 0x1C-0x1F.
    pub codepage: u32,
    /// Offset within section 0 of the full title. Bytes 0x54-0x57.
    pub title_offset: u32,
    /// Length in bytes of the full title. Bytes 0x58-0x5B.
    pub title_length: u32,
    /// MOBI format version. Bytes 0x68-0x6B.
    pub version: u32,
    /// Record index of the first image. Bytes 0x6C-0x6F.
    pub first_image_index: u32,
    /// EXTH presence flags; bit 0x40 marks an EXTH block. Bytes 0x80-0x83.
    pub exth_flag: u32,
    /// DRM descriptor. Bytes 0xA8-0xB7.
    pub drm: DrmDescriptor,
    /// Per-record trailing data flags. Bytes 0xF2-0xF3, present only when
    /// `header_length >= 0xE4` and `version >= 5`; 0 otherwise.
    pub extra_data_flags: u16,
}

impl MobiHeader {
    /// Parse the fixed-offset header fields from section 0's bytes.
    ///
    /// Fails with `InvalidFormat` when the section cannot hold the fixed
    /// fields (or the conditionally present extra-data flags).
    pub fn parse(record0: &[u8]) -> Result<Self, MobiError> {
        if record0.len() < SIZE_MOBI_HEADER_MIN {
            return Err(MobiError::InvalidFormat(format!(
                "Section 0 too short for a MOBI header: {} bytes",
                record0.len()
            )));
        }

        let header_length = BigEndian::read_u32(&record0[MOBI_HEADER_LENGTH..]);
        let version = BigEndian::read_u32(&record0[MOBI_VERSION..]);

        let extra_data_flags = if header_length >= MOBI_EXTRA_FLAGS_MIN_LENGTH
            && version >= MOBI_EXTRA_FLAGS_MIN_VERSION
        {
            if record0.len() < MOBI_EXTRA_FLAGS + 2 {
                return Err(MobiError::InvalidFormat(format!(
                    "Section 0 too short for extra data flags: {} bytes",
                    record0.len()
                )));
            }
            BigEndian::read_u16(&record0[MOBI_EXTRA_FLAGS..])
        } else {
            0
        };

        Ok(MobiHeader {
            compression: Compression::from_u16(BigEndian::read_u16(
                &record0[MOBI_COMPRESSION..],
            )),
            txt_records: BigEndian::read_u16(&record0[MOBI_TXT_RECORDS..]),
            crypto_type: CryptoType::from_u16(BigEndian::read_u16(&record0[MOBI_CRYPTO_TYPE..])),
            header_length,
            codepage: BigEndian::read_u32(&record0[MOBI_CODEPAGE..]),
            title_offset: BigEndian::read_u32(&record0[MOBI_TITLE_INFO..]),
            title_length: BigEndian::read_u32(&record0[MOBI_TITLE_INFO + 4..]),
            version,
            first_image_index: BigEndian::read_u32(&record0[MOBI_FIRST_IMAGE..]),
            exth_flag: BigEndian::read_u32(&record0[MOBI_EXTH_FLAG..]),
            drm: DrmDescriptor {
                offset: BigEndian::read_u32(&record0[MOBI_DRM..]),
                count: BigEndian::read_u32(&record0[MOBI_DRM + 4..]),
                size: BigEndian::read_u32(&record0[MOBI_DRM + 8..]),
                flags: BigEndian::read_u32(&record0[MOBI_DRM + 12..]),
            },
            extra_data_flags,
        })
    }

    /// Offset of the EXTH block within section 0.
    pub fn exth_offset(&self) -> usize {
        self.header_length as usize + 16
    }

    /// Whether the EXTH flag bit declares a metadata block.
    pub fn has_exth(&self) -> bool {
        self.exth_flag & EXTH_FLAG_PRESENT != 0
    }

    /// Build the metadata index from the EXTH block this header declares.
    ///
    /// Returns an empty index when the EXTH flag is unset, and also when
    /// the block fails to parse — the failure is logged at warning level
    /// and contained here, so the book still loads with no metadata.
    pub fn metadata(&self, record0: &[u8]) -> MetadataIndex {
        if !self.has_exth() {
            return MetadataIndex::new();
        }

        let block = record0.get(self.exth_offset()..).unwrap_or(&[]);
        match exth::parse(block) {
            Ok(index) => index,
            Err(e) => {
                warn!("Discarding unreadable EXTH metadata: {}", e);
                MetadataIndex::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    fn record0(header_length: u32, version: u32) -> Vec<u8> {
        let mut buf = vec![0u8; 0x100];
        BigEndian::write_u16(&mut buf[MOBI_COMPRESSION..], 1);
        BigEndian::write_u16(&mut buf[MOBI_TXT_RECORDS..], 12);
        BigEndian::write_u16(&mut buf[MOBI_CRYPTO_TYPE..], 2);
        BigEndian::write_u32(&mut buf[MOBI_HEADER_LENGTH..], header_length);
        BigEndian::write_u32(&mut buf[MOBI_CODEPAGE..], 65001);
        BigEndian::write_u32(&mut buf[MOBI_VERSION..], version);
        BigEndian::write_u32(&mut buf[MOBI_FIRST_IMAGE..], 13);
        BigEndian::write_u32(&mut buf[MOBI_DRM..], 0xFFFFFFFF);
        BigEndian::write_u32(&mut buf[MOBI_DRM + 4..], 0);
        BigEndian::write_u32(&mut buf[MOBI_DRM + 8..], 0);
        BigEndian::write_u16(&mut buf[MOBI_EXTRA_FLAGS..], 0x0003);
        buf
    }

    fn append_exth(buf: &mut Vec<u8>, header_length: u32, records: &[(u32, &[u8])]) {
        BigEndian::write_u32(&mut buf[MOBI_EXTH_FLAG..], EXTH_FLAG_PRESENT);
        let exth_off = header_length as usize + 16;
        buf.resize(exth_off, 0);
        buf.extend_from_slice(EXTH_MAGIC);
        let body_len: usize = records.iter().map(|(_, p)| p.len() + 8).sum();
        buf.write_u32::<BigEndian>((12 + body_len) as u32).unwrap();
        buf.write_u32::<BigEndian>(records.len() as u32).unwrap();
        for (tag, payload) in records {
            buf.write_u32::<BigEndian>(*tag).unwrap();
            buf.write_u32::<BigEndian>((payload.len() + 8) as u32).unwrap();
            buf.extend_from_slice(payload);
        }
    }

    #[test]
    fn test_parse_fixed_fields() {
        let buf = record0(0xE8, 6);
        let header = MobiHeader::parse(&buf).unwrap();
        assert_eq!(header.compression, Compression::PalmDoc);
        assert_eq!(header.txt_records, 12);
        assert_eq!(header.crypto_type, CryptoType::Amazon);
        assert_eq!(header.codepage, 65001);
        assert_eq!(header.version, 6);
        assert_eq!(header.first_image_index, 13);
        assert_eq!(header.drm.offset, 0xFFFFFFFF);
        assert_eq!(header.exth_offset(), 0xE8 + 16);
    }

    #[test]
    fn test_extra_flags_read_for_modern_headers() {
        let header = MobiHeader::parse(&record0(0xE4, 5)).unwrap();
        assert_eq!(header.extra_data_flags, 0x0003);
    }

    #[test]
    fn test_extra_flags_default_for_short_header() {
        // header_length 0xE0 is below the 0xE4 threshold, so the bytes at
        // 0xF2 must be ignored.
        let header = MobiHeader::parse(&record0(0xE0, 6)).unwrap();
        assert_eq!(header.extra_data_flags, 0);
    }

    #[test]
    fn test_extra_flags_default_for_old_version() {
        let header = MobiHeader::parse(&record0(0xE8, 4)).unwrap();
        assert_eq!(header.extra_data_flags, 0);
    }

    #[test]
    fn test_short_section_is_invalid() {
        assert!(matches!(
            MobiHeader::parse(&[0u8; 0x40]),
            Err(MobiError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_metadata_without_exth_flag_is_empty() {
        let buf = record0(0xE8, 6);
        let header = MobiHeader::parse(&buf).unwrap();
        assert!(header.metadata(&buf).is_empty());
    }

    #[test]
    fn test_metadata_parses_declared_block() {
        let mut buf = record0(0xE8, 6);
        append_exth(&mut buf, 0xE8, &[(101, b"Acme Press")]);
        let header = MobiHeader::parse(&buf).unwrap();
        let index = header.metadata(&buf);
        assert_eq!(index[&101], b"Acme Press");
    }

    #[test]
    fn test_metadata_failure_is_absorbed() {
        let mut buf = record0(0xE8, 6);
        append_exth(&mut buf, 0xE8, &[(101, b"Acme Press")]);
        // Corrupt the record count so the walk runs off the block.
        let count_at = 0xE8 + 16 + EXTH_RECORD_COUNT;
        BigEndian::write_u32(&mut buf[count_at..], 40);
        let header = MobiHeader::parse(&buf).unwrap();
        assert!(header.metadata(&buf).is_empty());
    }

    #[test]
    fn test_metadata_past_section_end_is_absorbed() {
        let mut buf = record0(0xE8, 6);
        BigEndian::write_u32(&mut buf[MOBI_EXTH_FLAG..], EXTH_FLAG_PRESENT);
        BigEndian::write_u32(&mut buf[MOBI_HEADER_LENGTH..], 0x4000);
        let header = MobiHeader::parse(&buf).unwrap();
        assert!(header.metadata(&buf).is_empty());
    }
}
