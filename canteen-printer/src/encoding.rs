//! Windows-1252 encoding utilities for receipt printers
//!
//! Most thermal printers ship with the WPC1252 code page. This module provides
//! utilities for:
//! - Calculating printed string widths (one column per encoded byte)
//! - Truncating/padding strings to printed widths
//! - Converting UTF-8 to WPC1252 while preserving ESC/POS commands

use encoding_rs::WINDOWS_1252;
use tracing::instrument;

/// ESC t 16 - select WPC1252 character table
const SELECT_WPC1252: [u8; 3] = [0x1B, 0x74, 16];

/// Replacement for characters the code page cannot print
const UNMAPPABLE: u8 = b'?';

/// Encode a single character, substituting what the code page lacks
fn encode_char(c: char, out: &mut Vec<u8>) {
    // The rupee sign is not in any single-byte printer table
    if c == '₹' {
        out.extend_from_slice(b"Rs.");
        return;
    }
    let mut tmp = [0u8; 4];
    let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
    if had_errors {
        out.push(UNMAPPABLE);
    } else {
        out.extend_from_slice(&bytes);
    }
}

/// Encode a string to WPC1252
pub fn encode_cp1252(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        encode_char(c, &mut out);
    }
    out
}

/// Get the printed width of a string in columns
pub fn text_width(s: &str) -> usize {
    encode_cp1252(s).len()
}

/// Truncate a string to fit within a printed width
pub fn truncate_text(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    let mut buf = Vec::with_capacity(4);
    for c in s.chars() {
        buf.clear();
        encode_char(c, &mut buf);
        if width + buf.len() > max_width {
            break;
        }
        result.push(c);
        width += buf.len();
    }
    result
}

/// Pad a string to a specific printed width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_text(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to WPC1252
///
/// ASCII bytes (0x00-0x7F) are kept exactly as is, which protects ESC/POS
/// commands from being corrupted. Only bytes >= 0x80 are treated as UTF-8
/// sequences and converted. The code page is selected at the start and again
/// after every INIT command (ESC @), which resets it.
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);
    result.extend_from_slice(&SELECT_WPC1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);
            result.extend_from_slice(&[0x1B, 0x40]);
            result.extend_from_slice(&SELECT_WPC1252);
            i += 2;
            continue;
        }

        if b < 128 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to WPC1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }
    let s = String::from_utf8_lossy(buffer);
    for c in s.chars() {
        encode_char(c, result);
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("café"), 4);
        assert_eq!(text_width("₹250"), 6); // "Rs.250"
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello world", 5), "hello");
        assert_eq!(truncate_text("₹99", 2), "");
        assert_eq!(truncate_text("₹99", 4), "₹9");
    }

    #[test]
    fn test_pad_text() {
        assert_eq!(pad_text("hi", 5, false), "hi   ");
        assert_eq!(pad_text("hi", 5, true), "   hi");
        assert_eq!(pad_text("hello world", 5, false), "hello");
    }

    #[test]
    fn test_encode_substitutions() {
        assert_eq!(encode_cp1252("é"), vec![0xE9]);
        assert_eq!(encode_cp1252("₹"), b"Rs.".to_vec());
        assert_eq!(encode_cp1252("漢"), vec![b'?']);
    }

    #[test]
    fn test_convert_preserves_commands() {
        let input = [&[0x1B, 0x40][..], "Total ₹5".as_bytes(), &[0x1D, 0x56, 0x42, 0x04]].concat();
        let out = convert_to_cp1252(&input);

        assert_eq!(&out[..3], &SELECT_WPC1252);
        // INIT is followed by a fresh code page selection
        assert_eq!(&out[3..8], &[0x1B, 0x40, 0x1B, 0x74, 16]);
        assert!(out.windows(9).any(|w| w == b"Total Rs."));
        assert_eq!(&out[out.len() - 4..], &[0x1D, 0x56, 0x42, 0x04]);
    }
}
