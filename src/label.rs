use std::fs;
use std::path::Path;

use crate::error::{Error, LabelLineError, Result};

/// One `<class_id> <cx> <cy> <w> <h>` line of a label file.
///
/// All four box values are fractions of the image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRecord {
    pub class_id: usize,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelRecord {
    /// Parses a single label line. Fields after the fifth are ignored.
    pub fn parse_line(line: &str) -> std::result::Result<Self, LabelLineError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(LabelLineError::TooFewFields(fields.len()));
        }

        let class_id = fields[0]
            .parse::<usize>()
            .map_err(|_| LabelLineError::InvalidClassId(fields[0].to_string()))?;

        let number = |field: &'static str, value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| LabelLineError::InvalidNumber {
                    field,
                    value: value.to_string(),
                })
        };

        Ok(Self {
            class_id,
            center_x: number("center x", fields[1])?,
            center_y: number("center y", fields[2])?,
            width: number("width", fields[3])?,
            height: number("height", fields[4])?,
        })
    }
}

/// Parses every non-blank line of a label file.
///
/// The first malformed line rejects the whole file with
/// [`Error::MalformedLabelLine`] carrying its 1-based line number. Bytes that
/// are not UTF-8 make their line malformed.
pub fn parse_label_file(path: &Path) -> Result<Vec<LabelRecord>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(content) => parse_label_str(&content, path),
        Err(e) => {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let complete = valid
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(&valid[..0], |end| &valid[..end]);
            // lines before the bad byte may already be malformed
            parse_label_str(&String::from_utf8_lossy(complete), path)?;
            Err(Error::MalformedLabelLine {
                path: path.to_path_buf(),
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                reason: LabelLineError::NotUtf8,
            })
        }
    }
}

pub(crate) fn parse_label_str(content: &str, path: &Path) -> Result<Vec<LabelRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            LabelRecord::parse_line(line).map_err(|reason| Error::MalformedLabelLine {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_line() {
        let record = LabelRecord::parse_line("0 0.5 0.5 0.2 0.4").unwrap();
        assert_eq!(
            record,
            LabelRecord {
                class_id: 0,
                center_x: 0.5,
                center_y: 0.5,
                width: 0.2,
                height: 0.4,
            }
        );
    }

    #[test]
    fn repeated_spaces_and_tabs_are_tolerated() {
        let record = LabelRecord::parse_line("  3   0.1\t0.2  0.3 0.4  ").unwrap();
        assert_eq!(record.class_id, 3);
        assert_eq!(record.height, 0.4);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let record = LabelRecord::parse_line("1 0.1 0.2 0.3 0.4 0.99").unwrap();
        assert_eq!(record.class_id, 1);
        assert_eq!(record.width, 0.3);
    }

    #[test]
    fn rejects_short_and_non_numeric_lines() {
        assert_eq!(
            LabelRecord::parse_line("0 0.5 0.5 0.2"),
            Err(LabelLineError::TooFewFields(4))
        );
        assert_eq!(
            LabelRecord::parse_line("cone 0.5 0.5 0.2 0.4"),
            Err(LabelLineError::InvalidClassId("cone".to_string()))
        );
        assert_eq!(
            LabelRecord::parse_line("-1 0.5 0.5 0.2 0.4"),
            Err(LabelLineError::InvalidClassId("-1".to_string()))
        );
        assert_eq!(
            LabelRecord::parse_line("0 0.5 abc 0.2 0.4"),
            Err(LabelLineError::InvalidNumber {
                field: "center y",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn file_skips_blank_lines_and_reports_line_numbers() {
        let path = Path::new("a.txt");
        let records = parse_label_str("0 0.5 0.5 0.2 0.4\n\n1 0.1 0.1 0.1 0.1\n", path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].class_id, 1);

        let err = parse_label_str("0 0.5 0.5 0.2 0.4\n\n1 0.1\n", path).unwrap_err();
        match err {
            Error::MalformedLabelLine { line, reason, .. } => {
                assert_eq!(line, 3);
                assert_eq!(reason, LabelLineError::TooFewFields(2));
            }
            other => panic!("expected MalformedLabelLine, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_marks_its_line_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, b"0 0.5 0.5 0.2 0.4\n0 0.5 0.5 0.2 \xff\n").unwrap();

        match parse_label_file(&path) {
            Err(Error::MalformedLabelLine { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, LabelLineError::NotUtf8);
            }
            other => panic!("expected MalformedLabelLine, got {other:?}"),
        }

        // an earlier bad line is reported first
        fs::write(&path, b"0 0.5\n0 0.5 0.5 0.2 \xff\n").unwrap();
        match parse_label_file(&path) {
            Err(Error::MalformedLabelLine { line, reason, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(reason, LabelLineError::TooFewFields(2));
            }
            other => panic!("expected MalformedLabelLine, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_has_no_records() {
        assert!(parse_label_str("", Path::new("a.txt")).unwrap().is_empty());
    }
}
