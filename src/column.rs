use crate::tokenizer;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Values pulled from one column of one CSV document
#[derive(Debug, Default)]
pub struct ColumnExtraction {
    pub column_index: usize,
    pub values: Vec<String>,
    /// Data lines dropped because they could not be decoded
    pub skipped_lines: usize,
    /// Data lines kept despite an unmatched quote
    pub unbalanced_lines: usize,
}

/// Locates `column` in a header line.
///
/// The header is split on every comma regardless of quoting; cells are trimmed
/// (byte order mark included) before comparing.
pub fn header_index(header: &str, column: &str) -> Option<usize> {
    header.split(',').position(|cell| {
        cell.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}') == column
    })
}

/// Extracts every non-empty value of `column` from raw CSV content.
pub fn extract_column(content: &[u8], column: &str) -> Result<ColumnExtraction> {
    let mut lines = content.split(|&b| b == b'\n');

    let header = lines.next().unwrap_or_default();
    let header = std::str::from_utf8(header).context("Header line is not valid UTF-8")?;
    let Some(column_index) = header_index(header, column) else {
        bail!("Column '{}' not found in header", column);
    };

    let mut extraction = ColumnExtraction {
        column_index,
        ..Default::default()
    };

    for (offset, raw) in lines.enumerate() {
        let line_no = offset + 2;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping undecodable line");
                extraction.skipped_lines += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let mut scan = tokenizer::fields(line);
        let raw_value = scan.by_ref().nth(column_index);
        if !scan.finish() {
            warn!(line = line_no, "Unbalanced quotes, remainder of line read as one field");
            extraction.unbalanced_lines += 1;
        }

        if let Some(value) = raw_value.as_deref().and_then(tokenizer::clean_value) {
            extraction.values.push(value);
        }
    }

    debug!(
        column,
        index = column_index,
        values = extraction.values.len(),
        "Column extracted"
    );
    Ok(extraction)
}

/// Reads `path` and extracts `column` from it.
pub fn extract_column_from_file(path: &Path, column: &str) -> Result<ColumnExtraction> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    extract_column(&content, column)
        .with_context(|| format!("Failed to extract '{}' from: {}", column, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_index_trims_cells() {
        assert_eq!(header_index("id, token_address ,name", "token_address"), Some(1));
        assert_eq!(header_index("\u{feff}token_address,id", "token_address"), Some(0));
        assert_eq!(header_index("id,name", "token_address"), None);
    }

    #[test]
    fn header_split_ignores_quotes() {
        // naive split: the quoted comma still separates header cells
        assert_eq!(header_index(r#""a,b",token_address"#, "token_address"), Some(2));
    }

    #[test]
    fn extracts_quoted_and_plain_values() -> Result<()> {
        let content = b"id,token_address\n1,\"0xABC\"\n2,0xDEF\n";
        let extraction = extract_column(content, "token_address")?;
        assert_eq!(extraction.values, vec!["0xABC", "0xDEF"]);
        assert_eq!(extraction.column_index, 1);
        Ok(())
    }

    #[test]
    fn skips_blank_and_short_lines() -> Result<()> {
        let content = b"id,addr\r\n1,0x1\r\n   \r\n2\r\n3,\r\n4,0x4";
        let extraction = extract_column(content, "addr")?;
        assert_eq!(extraction.values, vec!["0x1", "0x4"]);
        Ok(())
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = extract_column(b"id,name\n1,x", "addr").unwrap_err();
        assert!(err.to_string().contains("addr"));
    }

    #[test]
    fn empty_content_is_missing_column() {
        assert!(extract_column(b"", "addr").is_err());
    }

    #[test]
    fn undecodable_line_is_skipped() -> Result<()> {
        let mut content = b"id,addr\n1,0x1\n2,".to_vec();
        content.extend_from_slice(&[0xff, 0xfe]);
        content.extend_from_slice(b"\n3,0x3");
        let extraction = extract_column(&content, "addr")?;
        assert_eq!(extraction.values, vec!["0x1", "0x3"]);
        assert_eq!(extraction.skipped_lines, 1);
        Ok(())
    }

    #[test]
    fn unbalanced_line_is_kept_and_counted() -> Result<()> {
        let content = b"id,addr,note\n1,\"0x1,tail\n2,0x2,ok";
        let extraction = extract_column(content, "addr")?;
        assert_eq!(extraction.values, vec!["0x1,tail", "0x2"]);
        assert_eq!(extraction.unbalanced_lines, 1);
        Ok(())
    }
}
