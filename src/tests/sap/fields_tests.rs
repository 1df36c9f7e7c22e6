//! Tests for positional field extraction.

use crate::sap::document::{DocumentSchema, SapDocument};
use crate::sap::error::HeaderError;
use crate::sap::fields::{find_year, split_lines, FieldParser, ParseMode};
use crate::tests::helpers::sap_header;

fn extended() -> FieldParser {
    FieldParser::new(DocumentSchema::Extended, ParseMode::Lenient)
}

fn strict() -> FieldParser {
    FieldParser::new(DocumentSchema::Extended, ParseMode::Strict)
}

#[test]
fn test_parse_reference_header() {
    let header = b"SAP\r\nAUTHOR \"J. Doe\"\r\nNAME \"Test Song\"\r\nDATE \"1987?\"\r\n";
    let doc = extended().parse(header).unwrap();

    assert_eq!(
        doc,
        SapDocument {
            author: "J. Doe".to_string(),
            name: "Test Song".to_string(),
            date: "1987".to_string(),
            stereo: Some(false),
        }
    );
}

#[test]
fn test_values_round_trip() {
    let header = sap_header("Adam Bienias (SoTe)", "Tomcat's Revenge, part 2", "1995", &["TYPE B"]);
    let doc = extended().parse(&header).unwrap();

    assert_eq!(doc.author, "Adam Bienias (SoTe)");
    assert_eq!(doc.name, "Tomcat's Revenge, part 2");
    assert_eq!(doc.date, "1995");
}

#[test]
fn test_value_ends_at_next_delimiter_and_quotes_are_stripped() {
    let header = b"SAP\r\nAUTHOR \"Fox\"s Tune\"\r\nNAME \"A \"B\" C\"\r\nDATE \"1990\"";
    let doc = extended().parse(header).unwrap();

    assert_eq!(doc.author, "Foxs Tune");
    // Splitting on ` "` keeps only the first segment after the tag.
    assert_eq!(doc.name, "A");
}

#[test]
fn test_unknown_last_digit_is_kept() {
    let header = sap_header("Unknown", "Demo", "198?", &[]);
    assert_eq!(extended().parse(&header).unwrap().date, "198?");
}

#[test]
fn test_year_found_inside_free_text_date() {
    let header = sap_header("Unknown", "Demo", "24/12/1994", &[]);
    assert_eq!(extended().parse(&header).unwrap().date, "1994");
}

#[test]
fn test_date_without_year_is_empty() {
    let header = sap_header("Unknown", "Demo", "<?>", &[]);
    assert_eq!(extended().parse(&header).unwrap().date, "");
    assert_eq!(find_year(b"0123"), "");
    assert_eq!(find_year(b"12"), "");
}

#[test]
fn test_date_extraction_is_idempotent() {
    let header = sap_header("Unknown", "Demo", "02/1993-1994", &[]);
    let parser = extended();
    let first = parser.parse(&header).unwrap().date;
    for _ in 0..5 {
        assert_eq!(parser.parse(&header).unwrap().date, first);
    }
    assert_eq!(first, "1993");
}

#[test]
fn test_stereo_marker_anywhere_in_header() {
    let after_date = sap_header("A", "B", "1990", &["TYPE B", "STEREO"]);
    assert_eq!(extended().parse(&after_date).unwrap().stereo, Some(true));

    let inside_name = sap_header("A", "STEREO test", "1990", &[]);
    assert_eq!(extended().parse(&inside_name).unwrap().stereo, Some(true));

    let absent = sap_header("A", "Stereo test", "1990", &["TYPE B"]);
    assert_eq!(extended().parse(&absent).unwrap().stereo, Some(false));
}

#[test]
fn test_basic_schema_has_no_stereo() {
    let header = sap_header("A", "B", "1990", &["STEREO"]);
    let parser = FieldParser::new(DocumentSchema::Basic, ParseMode::Lenient);
    assert_eq!(parser.parse(&header).unwrap().stereo, None);
}

#[test]
fn test_short_header_lenient_gives_empty_fields() {
    let header = b"SAP\r\nAUTHOR \"Only Author\"";
    let doc = extended().parse(header).unwrap();

    assert_eq!(doc.author, "Only Author");
    assert_eq!(doc.name, "");
    assert_eq!(doc.date, "");
}

#[test]
fn test_short_header_strict_is_missing_line() {
    let header = b"SAP\r\nAUTHOR \"Only Author\"";
    match strict().parse(header) {
        Err(HeaderError::MissingLine { field, line, found }) => {
            assert_eq!(field, "NAME");
            assert_eq!(line, 2);
            assert_eq!(found, 2);
        }
        other => panic!("Expected missing line, got {:?}", other),
    }
}

#[test]
fn test_missing_delimiter() {
    let header = b"SAP\r\nAUTHOR_\"J. Doe\"\r\nNAME \"Song\"\r\nDATE \"1990\"";

    let lenient = extended().parse(header).unwrap();
    assert_eq!(lenient.author, "");
    assert_eq!(lenient.name, "Song");

    assert!(matches!(
        strict().parse(header),
        Err(HeaderError::MissingDelimiter { field: "AUTHOR" })
    ));
}

#[test]
fn test_empty_header_never_panics() {
    let doc = extended().parse(b"").unwrap();
    assert_eq!(doc, SapDocument { stereo: Some(false), ..SapDocument::default() });
    assert!(strict().parse(b"").is_err());
}

#[test]
fn test_non_utf8_bytes_are_decoded_lossily() {
    let header = b"SAP\r\nAUTHOR \"M\xF6ller\"\r\nNAME \"x\"\r\nDATE \"1991\"";
    let doc = extended().parse(header).unwrap();
    assert_eq!(doc.author, "M\u{FFFD}ller");
}

#[test]
fn test_split_lines_keeps_trailing_empty_line() {
    assert_eq!(split_lines(b"a\r\nb\r\n"), vec![&b"a"[..], &b"b"[..], &b""[..]]);
    assert_eq!(split_lines(b"a\nb"), vec![&b"a\nb"[..]]);
}

#[test]
fn test_display_forms() {
    let mut doc = SapDocument {
        author: "J. Doe".to_string(),
        name: "Test Song".to_string(),
        date: "1987".to_string(),
        stereo: Some(true),
    };
    assert_eq!(doc.to_string(), "[Author:J. Doe,Name:Test Song,Date:1987,Stereo:1]");

    doc.stereo = None;
    assert_eq!(doc.to_string(), "[Author:J. Doe,Name:Test Song,Date:1987]");
}

#[test]
fn test_numeric_year() {
    let mut doc = SapDocument::default();
    assert_eq!(doc.year(), None);

    doc.date = "1987".to_string();
    assert_eq!(doc.year(), Some(1987));

    doc.date = "198?".to_string();
    assert_eq!(doc.year(), Some(1980));
}
