/// PDB/MOBI/EXTH byte-layout constants.
///
/// Offsets are derived from the Mobipocket file format as used by the
/// Kindle (PDB container per the Palm Database spec, MOBI header in
/// record 0, EXTH header appended after the MOBI header).
// PDB container header (78 bytes total)
pub const SIZE_PDB_HEADER: usize = 78;
pub const PDB_NAME: usize = 0; // 32 bytes - null-padded database name
pub const PDB_NAME_LEN: usize = 32;
pub const PDB_TYPE_CREATOR: usize = 0x3C; // 8 bytes - type + creator tag
pub const PDB_NUM_SECTIONS: usize = 76; // 2 bytes - section count

/// Type/creator tag identifying a MOBI book inside a PDB container.
pub const MOBI_MAGIC: &[u8; 8] = b"BOOKMOBI";

// Section directory: 8-byte entries starting right after the PDB header.
pub const SIZE_SECTION_ENTRY: usize = 8;
pub const SECTION_OFFSET: usize = 0; // 4 bytes - absolute file offset
pub const SECTION_FLAGS: usize = 4; // 1 byte - attribute flags
pub const SECTION_UNIQUE_ID: usize = 5; // 3 bytes - 24-bit unique id

// MOBI header (section 0). PalmDoc fields first, MOBI fields from 0x10.
pub const MOBI_COMPRESSION: usize = 0x00; // 2 bytes - compression code
pub const MOBI_TXT_RECORDS: usize = 0x08; // 2 bytes - text record count
pub const MOBI_CRYPTO_TYPE: usize = 0x0C; // 2 bytes - encryption code
pub const MOBI_HEADER_LENGTH: usize = 0x14; // 4 bytes - MOBI header length
pub const MOBI_CODEPAGE: usize = 0x1C; // 4 bytes - text encoding codepage
pub const MOBI_TITLE_INFO: usize = 0x54; // 4+4 bytes - full title offset, length
pub const MOBI_VERSION: usize = 0x68; // 4 bytes - MOBI format version
pub const MOBI_FIRST_IMAGE: usize = 0x6C; // 4 bytes - first image record index
pub const MOBI_EXTH_FLAG: usize = 0x80; // 4 bytes - EXTH presence flags
pub const MOBI_DRM: usize = 0xA8; // 4x4 bytes - DRM offset, count, size, flags
pub const MOBI_EXTRA_FLAGS: usize = 0xF2; // 2 bytes - extra record data flags

/// Minimum section 0 length covering every fixed field above except the
/// conditional extra-data flags.
pub const SIZE_MOBI_HEADER_MIN: usize = MOBI_DRM + 16;

/// `extra_data_flags` exists only when the header is at least this long
/// (and the version is 5+).
pub const MOBI_EXTRA_FLAGS_MIN_LENGTH: u32 = 0xE4;
/// Minimum MOBI version carrying `extra_data_flags`.
pub const MOBI_EXTRA_FLAGS_MIN_VERSION: u32 = 5;

/// Bit in `exth_flag` indicating an EXTH block follows the MOBI header.
pub const EXTH_FLAG_PRESENT: u32 = 0x40;

// EXTH block: 12-byte header followed by variable-length records.
pub const EXTH_MAGIC: &[u8; 4] = b"EXTH";
pub const SIZE_EXTH_HEADER: usize = 12;
pub const EXTH_RECORD_COUNT: usize = 8; // 4 bytes - number of records
pub const SIZE_EXTH_RECORD_HEADER: usize = 8; // tag (4) + total size (4)

// Text encoding codepages.
pub const CODEPAGE_CP1252: u32 = 1252;
pub const CODEPAGE_UTF8: u32 = 65001;
