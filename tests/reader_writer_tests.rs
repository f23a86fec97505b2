#![allow(missing_docs)]

use textset::{PlainReader, PlainWriter, ReaderOptions, TextsetError, WriterOptions};

fn reader(text: &str) -> PlainReader<&[u8]> {
    PlainReader::new(text.as_bytes())
}

// --- HEADER BLOCK ---

#[test]
fn test_header_roundtrip() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    writer.write_header(&["A", "B"]).expect("write header");
    drop(writer);

    let text = String::from_utf8(buf).expect("utf-8 output");
    let mut reader = reader(&text);
    let entries = reader.read_header().expect("read header");
    assert_eq!(entries, Some(vec!["A".to_owned(), "B".to_owned()]));
}

#[test]
fn test_header_rule_length() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    writer.write_header(&["AB"]).expect("write header");
    drop(writer);

    let text = String::from_utf8(buf).expect("utf-8 output");
    let first = text.lines().next().expect("rule line");
    // max(3, longest) + 2 with a 2-char line is 5.
    assert_eq!(first, "/// =====");
    assert!(text.ends_with("\n\n"), "header ends with a blank line");
}

#[test]
fn test_header_omission_and_empty_lines() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::with_options(
        &mut buf,
        WriterOptions {
            omit_header: true,
            ..WriterOptions::default()
        },
    );
    writer.write_header(&["A"]).expect("write header");
    drop(writer);
    assert!(buf.is_empty());

    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    writer.write_header(&["", ""]).expect("write header");
    drop(writer);
    assert!(buf.is_empty(), "all-empty header lines emit nothing");
}

#[test]
fn test_missing_header_consumes_first_line() {
    // A header probe on a header-less file eats the first body line. This
    // pins observed behavior; the deserializer avoids it by never probing.
    let mut reader = reader("First = 1\nSecond = 2\n");
    assert_eq!(reader.read_header().expect("probe"), None);
    let (name, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!((name.as_str(), value.as_str()), ("Second", "2"));
}

#[test]
fn test_unterminated_header_is_a_format_error() {
    let mut reader = reader("/// ===\n// only line\n");
    assert!(matches!(
        reader.read_header(),
        Err(TextsetError::Format(_))
    ));
}

#[test]
fn test_malformed_header_line_is_a_format_error() {
    let mut reader = reader("/// ===\nnot a comment\n/// ===\n");
    assert!(matches!(
        reader.read_header(),
        Err(TextsetError::Format(_))
    ));
}

// --- PROPERTY LINES ---

#[test]
fn test_values_skip_blank_and_comment_lines() {
    let text = "\n// a comment\n# another\n\nName = 1\n";
    let mut reader = reader(text);
    let (name, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!((name.as_str(), value.as_str()), ("Name", "1"));
    assert_eq!(reader.read_next_value().expect("read"), None);
    assert_eq!(reader.line_number(), 5);
}

#[test]
fn test_missing_separator_is_a_format_error() {
    let mut reader = reader("Name NoSeparator\n");
    match reader.read_next_value() {
        Err(TextsetError::Format(msg)) => assert!(msg.contains("missing separator"), "{msg}"),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn test_comment_in_name_is_a_format_error() {
    let mut reader = reader("Na//me = 1\n");
    match reader.read_next_value() {
        Err(TextsetError::Format(msg)) => assert!(msg.contains("comment"), "{msg}"),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn test_trailing_comments_are_stripped() {
    let mut reader = reader("Answer = 42 // the answer\nNote = 7 # short\n");
    let (_, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!(value, "42");
    let (_, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!(value, "7");
}

#[test]
fn test_value_may_contain_further_separators() {
    let mut reader = reader("Equation = a=b\n");
    let (name, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!((name.as_str(), value.as_str()), ("Equation", "a=b"));
}

#[test]
fn test_custom_separator_and_indicators() {
    let options = ReaderOptions {
        separator: ':',
        comment_indicators: vec![";".to_owned()],
    };
    let mut reader = PlainReader::with_options("; note\nName: 3 ; tail\n".as_bytes(), options);
    let (name, value) = reader.read_next_value().expect("read").expect("line");
    assert_eq!((name.as_str(), value.as_str()), ("Name", "3"));
}

#[test]
fn test_line_counter_is_one_based() {
    let mut reader = reader("A = 1\nB = 2\n");
    reader.read_next_value().expect("read");
    assert_eq!(reader.line_number(), 1);
    reader.read_next_value().expect("read");
    assert_eq!(reader.line_number(), 2);
}

#[test]
fn test_many_consecutive_comment_lines_do_not_overflow() {
    // The skip loop is iterative; a pathological run of comments must not
    // consume stack.
    let mut text = String::new();
    for _ in 0..100_000 {
        text.push_str("// filler\n");
    }
    text.push_str("Name = 1\n");
    let mut reader = PlainReader::new(text.as_bytes());
    let (name, _) = reader.read_next_value().expect("read").expect("line");
    assert_eq!(name, "Name");
}

// --- COMMENTS ---

#[test]
fn test_read_next_comment_skips_other_lines() {
    let mut reader = reader("Name = 1\n// hello\nOther = 2\n# hash note\n");
    assert_eq!(reader.read_next_comment().expect("read"), Some("hello".to_owned()));
    assert_eq!(
        reader.read_next_comment().expect("read"),
        Some("hash note".to_owned())
    );
    assert_eq!(reader.read_next_comment().expect("read"), None);
}

// --- WRITER OUTPUT ---

#[test]
fn test_property_formatting() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    writer.write_property("Count", "3", false, false).expect("write");
    writer.write_property("Label", "\"hi\"", true, false).expect("write");
    writer.write_property("Next", "1", false, true).expect("write");
    drop(writer);

    let text = String::from_utf8(buf).expect("utf-8 output");
    assert_eq!(text, "Count = 3\n// Label = \"hi\"\n\nNext = 1\n");
}

#[test]
fn test_property_without_separator_spacing() {
    let mut buf = Vec::new();
    let options = WriterOptions {
        separator_spacing: false,
        ..WriterOptions::default()
    };
    let mut writer = PlainWriter::with_options(&mut buf, options);
    writer.write_property("Count", "3", false, false).expect("write");
    drop(writer);
    assert_eq!(buf, b"Count=3\n");
}

#[test]
fn test_empty_property_name_is_an_argument_error() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    assert!(matches!(
        writer.write_property("", "3", false, false),
        Err(TextsetError::Argument(_))
    ));
}

#[test]
fn test_comment_writing() {
    let mut buf = Vec::new();
    let mut writer = PlainWriter::new(&mut buf);
    writer.write_comment("plain").expect("write");
    writer.write_comment_with("#", "hashed").expect("write");
    drop(writer);
    assert_eq!(buf, b"// plain\n# hashed\n");
}
