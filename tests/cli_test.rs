//! CLI subcommand tests.
//!
//! Each test writes a synthetic book to a temp file, runs a subcommand's
//! `execute` with a captured writer, and checks the rendered output.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::Write;
use tempfile::NamedTempFile;

use mobi::cli::fields::{execute as fields_execute, FieldsOptions};
use mobi::cli::info::{execute as info_execute, InfoOptions};
use mobi::cli::sections::{execute as sections_execute, SectionsOptions};
use mobi::mobi::constants::*;
use mobi::MobiError;

const HEADER_LENGTH: u32 = 0xE8;

fn build_book(exth: &[(u32, &[u8])], declared_title: &[u8]) -> Vec<u8> {
    let mut record0 = vec![0u8; HEADER_LENGTH as usize + 16];
    BigEndian::write_u16(&mut record0[MOBI_COMPRESSION..], 1);
    BigEndian::write_u16(&mut record0[MOBI_TXT_RECORDS..], 1);
    BigEndian::write_u32(&mut record0[MOBI_HEADER_LENGTH..], HEADER_LENGTH);
    BigEndian::write_u32(&mut record0[MOBI_CODEPAGE..], 1252);
    BigEndian::write_u32(&mut record0[MOBI_VERSION..], 6);
    BigEndian::write_u32(&mut record0[MOBI_EXTH_FLAG..], EXTH_FLAG_PRESENT);

    record0.extend_from_slice(EXTH_MAGIC);
    let body_len: usize = exth.iter().map(|(_, p)| p.len() + 8).sum();
    record0.write_u32::<BigEndian>((12 + body_len) as u32).unwrap();
    record0.write_u32::<BigEndian>(exth.len() as u32).unwrap();
    for (tag, payload) in exth {
        record0.write_u32::<BigEndian>(*tag).unwrap();
        record0.write_u32::<BigEndian>((payload.len() + 8) as u32).unwrap();
        record0.extend_from_slice(payload);
    }

    let title_offset = record0.len() as u32;
    record0.extend_from_slice(declared_title);
    BigEndian::write_u32(&mut record0[MOBI_TITLE_INFO..], title_offset);
    BigEndian::write_u32(&mut record0[MOBI_TITLE_INFO + 4..], declared_title.len() as u32);

    let sections: [&[u8]; 2] = [&record0, b"text"];
    let mut data = vec![0u8; SIZE_PDB_HEADER + sections.len() * SIZE_SECTION_ENTRY];
    data[..9].copy_from_slice(b"pdb-title");
    data[PDB_TYPE_CREATOR..PDB_TYPE_CREATOR + 8].copy_from_slice(MOBI_MAGIC);
    BigEndian::write_u16(&mut data[PDB_NUM_SECTIONS..], sections.len() as u16);
    let mut offset = data.len() as u32;
    for (i, section) in sections.iter().enumerate() {
        BigEndian::write_u32(&mut data[SIZE_PDB_HEADER + i * SIZE_SECTION_ENTRY..], offset);
        offset += section.len() as u32;
    }
    for section in sections {
        data.extend_from_slice(section);
    }
    data
}

fn book_file(exth: &[(u32, &[u8])]) -> NamedTempFile {
    colored::control::set_override(false);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&build_book(exth, b"A Test Book")).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn info_prints_title_and_header_summary() {
    let file = book_file(&[(101, b"Acme Press")]);
    let mut out = Vec::new();
    info_execute(
        &InfoOptions {
            file: file.path().to_string_lossy().to_string(),
            json: false,
        },
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("A Test Book"));
    assert!(text.contains("PalmDoc"));
    assert!(text.contains("1252"));
    assert!(text.contains("windows-1252"));
}

#[test]
fn info_json_is_machine_readable() {
    let file = book_file(&[(101, b"Acme Press")]);
    let mut out = Vec::new();
    info_execute(
        &InfoOptions {
            file: file.path().to_string_lossy().to_string(),
            json: true,
        },
        &mut out,
    )
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["title"], "A Test Book");
    assert_eq!(parsed["mobi_version"], 6);
    assert_eq!(parsed["codepage"], 1252);
    assert_eq!(parsed["crypto_type"], "none");
    assert_eq!(parsed["metadata_records"], 1);
    assert_eq!(parsed["sections"], 2);
}

#[test]
fn fields_lists_nonempty_values() {
    let file = book_file(&[(101, b"Acme Press"), (113, b"B00TEST123")]);
    let mut out = Vec::new();
    fields_execute(
        &FieldsOptions {
            file: file.path().to_string_lossy().to_string(),
            name: None,
            all: false,
            json: false,
        },
        &mut out,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("publisher: Acme Press"));
    assert!(text.contains("asin: B00TEST123"));
    // Empty fields are skipped without --all.
    assert!(!text.contains("isbn"));
}

#[test]
fn fields_single_lookup_prints_bare_value() {
    let file = book_file(&[(104, b"9780000000001")]);
    let mut out = Vec::new();
    fields_execute(
        &FieldsOptions {
            file: file.path().to_string_lossy().to_string(),
            name: Some("isbn".to_string()),
            all: false,
            json: false,
        },
        &mut out,
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim(), "9780000000001");
}

#[test]
fn fields_unknown_name_fails() {
    let file = book_file(&[]);
    let mut out = Vec::new();
    let result = fields_execute(
        &FieldsOptions {
            file: file.path().to_string_lossy().to_string(),
            name: Some("narrator".to_string()),
            all: false,
            json: false,
        },
        &mut out,
    );
    assert!(matches!(result, Err(MobiError::UnknownField(_))));
}

#[test]
fn sections_json_reports_derived_lengths() {
    let file = book_file(&[]);
    let mut out = Vec::new();
    sections_execute(
        &SectionsOptions {
            file: file.path().to_string_lossy().to_string(),
            json: true,
        },
        &mut out,
    )
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1]["length"], 4); // b"text"
    assert_eq!(list[0]["index"], 0);
}

#[test]
fn missing_file_is_io_error() {
    let mut out = Vec::new();
    let result = info_execute(
        &InfoOptions {
            file: "/nonexistent/book.azw".to_string(),
            json: false,
        },
        &mut out,
    );
    assert!(matches!(result, Err(MobiError::Io(_))));
}
