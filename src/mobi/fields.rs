//! EXTH field naming, numeric conversions, and text encoding.
//!
//! Field lookup is driven by a closed table of known EXTH tags: each tag
//! has a lower-cased field name, and a handful of tags carry big-endian
//! integers instead of text and are rendered as decimal strings. Text
//! payloads are decoded with the encoding selected by the document's
//! codepage field (windows-1252 unless the book declares UTF-8).

use byteorder::{BigEndian, ByteOrder};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::mobi::constants::{CODEPAGE_CP1252, CODEPAGE_UTF8};
use crate::mobi::exth::MetadataIndex;
use crate::MobiError;

/// Known EXTH tags and their field names. Closed table: lookups for names
/// outside it fail with [`MobiError::UnknownField`].
pub const EXTH_FIELDS: &[(u32, &str)] = &[
    (100, "creator"),
    (101, "publisher"),
    (102, "imprint"),
    (103, "description"),
    (104, "isbn"),
    (105, "subject"),
    (106, "published"),
    (107, "review"),
    (108, "contributor"),
    (109, "rights"),
    (110, "subjectcode"),
    (111, "type"),
    (112, "source"),
    (113, "asin"),
    (116, "startoffset"),
    (118, "price"),
    (119, "currency"),
    (201, "coveroffset"),
    (406, "islibraryrental"),
    (503, "updatedtitle"),
];

/// Look up the EXTH tag for a field name (case-insensitive).
pub fn tag_for_name(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    EXTH_FIELDS
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(tag, _)| *tag)
}

/// Look up the field name for an EXTH tag.
pub fn name_for_tag(tag: u32) -> Option<&'static str> {
    EXTH_FIELDS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, n)| *n)
}

/// All known field names, in tag order.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    EXTH_FIELDS.iter().map(|(_, n)| *n)
}

/// Byte width for tags stored as big-endian unsigned integers rather than
/// text. Tags 116 (StartOffset) and 201 (CoverOffset) are 4 bytes; tag
/// 406 (IsLibraryRental) is 8.
fn integer_width(tag: u32) -> Option<usize> {
    match tag {
        116 | 201 => Some(4),
        406 => Some(8),
        _ => None,
    }
}

/// Resolve the text encoding for a MOBI codepage value.
///
/// Codepage 1252 and anything unrecognized map to windows-1252 (the
/// historical default for Mobipocket files); 65001 maps to UTF-8.
pub fn encoding_for_codepage(codepage: u32) -> &'static Encoding {
    match codepage {
        CODEPAGE_UTF8 => UTF_8,
        CODEPAGE_CP1252 => WINDOWS_1252,
        _ => WINDOWS_1252,
    }
}

/// Decode raw bytes with the given encoding.
///
/// Fails with [`MobiError::Decode`] if the bytes are malformed under the
/// encoding (only possible for UTF-8; windows-1252 accepts every byte).
pub fn decode_text(raw: &[u8], encoding: &'static Encoding) -> Result<String, MobiError> {
    let (text, _, had_errors) = encoding.decode(raw);
    if had_errors {
        return Err(MobiError::Decode(format!(
            "Bytes are not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Resolve a metadata field by name.
///
/// A known name whose tag is absent from the index yields an empty string.
/// Integer-typed tags are decoded as big-endian unsigned values and
/// rendered in decimal; everything else is decoded as text with the
/// encoding for `codepage`.
pub fn resolve(name: &str, index: &MetadataIndex, codepage: u32) -> Result<String, MobiError> {
    let tag = tag_for_name(name).ok_or_else(|| MobiError::UnknownField(name.to_string()))?;

    let raw = index.get(&tag).map(Vec::as_slice).unwrap_or(&[]);

    if let Some(width) = integer_width(tag) {
        // Absent values skip conversion and resolve to an empty string.
        if !raw.is_empty() {
            if raw.len() != width {
                return Err(MobiError::Decode(format!(
                    "Field '{}' (tag {}) expects a {}-byte integer, got {} bytes",
                    name,
                    tag,
                    width,
                    raw.len()
                )));
            }
            let value = match width {
                4 => BigEndian::read_u32(raw) as u64,
                _ => BigEndian::read_u64(raw),
            };
            return Ok(value.to_string());
        }
    }

    decode_text(raw, encoding_for_codepage(codepage))
}
