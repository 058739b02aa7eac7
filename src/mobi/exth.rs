//! EXTH metadata block parsing.
//!
//! The EXTH block sits immediately after the MOBI header inside section 0
//! when bit 0x40 of the header's EXTH flag is set. It is self-framing: a
//! 12-byte header (`EXTH` magic, length, record count) followed by
//! `count` records of `(tag: u32, total_size: u32, payload)` where the
//! payload occupies `total_size - 8` bytes.
//!
//! Parsing is all-or-nothing: any malformed record aborts the walk with
//! [`MobiError::ExthParse`] and no partial index is returned. The header
//! parser maps that failure to an empty index (see
//! [`header`](crate::mobi::header)), so a corrupt EXTH block never stops a
//! book from loading.

use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder};

use crate::mobi::constants::*;
use crate::MobiError;

/// Tag → raw payload mapping built from one EXTH block.
///
/// Duplicate tags are last-writer-wins, matching reader behavior for books
/// whose tooling emitted a tag twice.
pub type MetadataIndex = HashMap<u32, Vec<u8>>;

/// Parse an EXTH block into a [`MetadataIndex`].
///
/// `block` must start at the first byte of the EXTH header and may extend
/// past the block's end (trailing padding is ignored; the walk is bounded
/// by the declared record count).
pub fn parse(block: &[u8]) -> Result<MetadataIndex, MobiError> {
    if block.len() < SIZE_EXTH_HEADER || &block[..EXTH_MAGIC.len()] != EXTH_MAGIC {
        return Err(MobiError::ExthParse(
            "Missing EXTH header at declared offset".to_string(),
        ));
    }

    let num_records = BigEndian::read_u32(&block[EXTH_RECORD_COUNT..]);

    let mut index = MetadataIndex::new();
    let mut pos = SIZE_EXTH_HEADER;
    for i in 0..num_records {
        if pos + SIZE_EXTH_RECORD_HEADER > block.len() {
            return Err(MobiError::ExthParse(format!(
                "Record {} header at offset {} past end of block ({} bytes)",
                i,
                pos,
                block.len()
            )));
        }
        let tag = BigEndian::read_u32(&block[pos..]);
        let total_size = BigEndian::read_u32(&block[pos + 4..]) as usize;

        if total_size < SIZE_EXTH_RECORD_HEADER || pos + total_size > block.len() {
            return Err(MobiError::ExthParse(format!(
                "Record {} (tag {}) declares {} bytes at offset {}, block has {}",
                i,
                tag,
                total_size,
                pos,
                block.len()
            )));
        }

        let payload = &block[pos + SIZE_EXTH_RECORD_HEADER..pos + total_size];
        index.insert(tag, payload.to_vec());
        pos += total_size;
    }

    Ok(index)
}
