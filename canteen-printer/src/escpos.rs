//! ESC/POS command builder
//!
//! Only the commands a customer receipt needs: alignment, bold, double size,
//! rules, two-column lines, and a feed-and-cut at the end.

use crate::encoding::{convert_to_cp1252, text_width};

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Horizontal alignment (ESC a n)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left = 0,
    Center = 1,
}

/// Receipt byte builder
///
/// Text stays UTF-8 until `build`, which converts it to WPC1252.
/// Typical widths: 32 characters on 58mm paper, 48 on 80mm.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Start a job with the printer reset (ESC @)
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(&[ESC, b'@']);
        Self { buf, width }
    }

    fn command(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    fn text(&mut self, s: &str) -> &mut Self {
        self.command(s.as_bytes())
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s).command(b"\n")
    }

    pub fn align(&mut self, align: Align) -> &mut Self {
        self.command(&[ESC, b'a', align as u8])
    }

    /// ESC E n
    pub fn bold(&mut self, on: bool) -> &mut Self {
        self.command(&[ESC, b'E', u8::from(on)])
    }

    /// GS ! n, double width and height when on
    pub fn double_size(&mut self, on: bool) -> &mut Self {
        self.command(&[GS, b'!', if on { 0x11 } else { 0x00 }])
    }

    /// Full-width line of `fill`
    pub fn rule(&mut self, fill: char) -> &mut Self {
        let rule: String = std::iter::repeat_n(fill, self.width).collect();
        self.line(&rule)
    }

    /// `left` flush left and `right` flush right on one line
    ///
    /// Falls back to a single space between them when they don't fit.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let used = text_width(left) + text_width(right);
        let gap = if used >= self.width { 1 } else { self.width - used };
        let padded = format!("{}{}{}", left, " ".repeat(gap), right);
        self.line(&padded)
    }

    /// Feed `lines` and cut (GS V 66 n)
    pub fn cut_after(&mut self, lines: u8) -> &mut Self {
        self.command(&[GS, b'V', 0x42, lines])
    }

    /// WPC1252-encoded job
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Job with text left as UTF-8
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}
