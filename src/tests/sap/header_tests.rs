//! Tests for header segment extraction.

use crate::sap::error::HeaderError;
use crate::sap::header::{read_header, split_header};
use crate::tests::helpers::{sap_file, sap_header, write_raw};
use tempfile::TempDir;

#[test]
fn test_split_stops_at_first_sentinel() {
    let header = sap_header("Rob Hubbard", "Warhawk", "1986", &[]);
    let mut bytes = sap_file(&header);
    bytes.extend_from_slice(&[0xFF, 0xFF, 0x01]);

    assert_eq!(split_header(&bytes), header.as_slice());
}

#[test]
fn test_split_without_sentinel_keeps_everything() {
    let bytes = b"SAP\r\nAUTHOR \"X\"\r\n".to_vec();
    assert_eq!(split_header(&bytes), bytes.as_slice());
}

#[test]
fn test_split_single_ff_is_not_a_sentinel() {
    let bytes = [b'S', 0xFF, b'A', 0xFF, b'P'];
    assert_eq!(split_header(&bytes), &bytes[..]);
}

#[test]
fn test_split_sentinel_at_start_gives_empty_header() {
    assert!(split_header(&[0xFF, 0xFF, 0x00]).is_empty());
}

#[test]
fn test_read_header_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let header = sap_header("Jeroen Tel", "Cybernoid", "1988", &["STEREO"]);
    let path = write_raw(temp_dir.path(), "tel.sap", &sap_file(&header));

    assert_eq!(read_header(&path).unwrap(), header);
}

#[test]
fn test_read_header_missing_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.sap");

    match read_header(&missing) {
        Err(HeaderError::Read { path, source }) => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected read error, got {:?}", other),
    }
}
