//! MOBI binary format parsing.
//!
//! This module contains types and functions for reading the on-disk
//! structures of a MOBI/AZW e-book: the PDB section archive directory, the
//! fixed-layout MOBI header in section 0, and the EXTH block of tagged
//! metadata records, plus the name/encoding logic that turns raw record
//! bytes into displayable field values.
//!
//! Start with [`book::MobiBook`] to parse a byte buffer, then query fields
//! by name or resolve the display title.

pub mod book;
pub mod constants;
pub mod exth;
pub mod fields;
pub mod header;
pub mod pdb;
pub mod types;
