//! Message loading for dry runs.
//!
//! Messages are stored either as raw bytes (`.bin`) or as hex text (`.hex`):
//! pairs of hex digits, optionally separated by whitespace or commas, with
//! `#` starting a comment that runs to the end of the line.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit { digit: char, position: usize },
    #[error("odd number of hex digits ({count})")]
    OddHexLength { count: usize },
    #[error("unsupported message format: {0}")]
    UnsupportedFormat(String),
}

/// Message file encodings understood by [`load_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Binary,
    Hex,
}

impl MessageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "bin" => Some(MessageFormat::Binary),
            "hex" => Some(MessageFormat::Hex),
            _ => None,
        }
    }
}

pub fn load_message(path: &Path) -> Result<Vec<u8>, SourceError> {
    let format = MessageFormat::from_path(path)
        .ok_or_else(|| SourceError::UnsupportedFormat(path.display().to_string()))?;
    match format {
        MessageFormat::Binary => Ok(fs::read(path)?),
        MessageFormat::Hex => parse_hex_message(&fs::read_to_string(path)?),
    }
}

/// Parse hex text such as `"02 05 F0 01 02 03 04"` into bytes.
///
/// # Examples
/// ```
/// use irbridge_core::parse_hex_message;
///
/// assert_eq!(parse_hex_message("02 ef,00 0A # delay")?, vec![0x02, 0xEF, 0x00, 0x0A]);
/// # Ok::<(), irbridge_core::SourceError>(())
/// ```
pub fn parse_hex_message(text: &str) -> Result<Vec<u8>, SourceError> {
    let mut digits = Vec::new();
    for line in text.lines() {
        let content = line.split('#').next().unwrap_or("");
        for (position, ch) in content.char_indices() {
            if ch.is_whitespace() || ch == ',' {
                continue;
            }
            let value = ch
                .to_digit(16)
                .ok_or(SourceError::InvalidHexDigit { digit: ch, position })?;
            digits.push(value as u8);
        }
    }
    if digits.len() % 2 != 0 {
        return Err(SourceError::OddHexLength {
            count: digits.len(),
        });
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
