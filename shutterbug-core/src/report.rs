//! Console report lines
//!
//! Each closed frame prints a blank separator line, the handler name if an
//! opcode matched, then the raw bytes for tuning:
//!
//! ```text
//!
//! photo_short()
//! Code line:
//! 224, 28, 252, 0, 0, 28, 0, 224, 0, 28
//!
//! Code line:
//! 224, 28, 252, 28, 0, 0, 7
//! ```

use core::fmt::Write;

use heapless::String;
use shutterbug_protocol::{Classification, Opcode, FRAME_CAPACITY};

/// Header printed before the frame bytes
pub const CODE_LINE_HEADER: &str = "Code line:";

/// Longest handler line (`drone_motors_on()`)
pub const HANDLER_LINE_CAPACITY: usize = 32;

/// Longest code line: every byte as `255, `
pub const CODE_LINE_CAPACITY: usize = FRAME_CAPACITY * 5;

/// `photo_short()` style line for an opcode
pub fn handler_line(opcode: Opcode) -> String<HANDLER_LINE_CAPACITY> {
    let mut line = String::new();
    let _ = write!(line, "{}()", opcode.name());
    line
}

/// Comma-separated decimal bytes, starting at index 0
pub fn code_line(bytes: &[u8]) -> String<CODE_LINE_CAPACITY> {
    let mut line = String::new();
    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 {
            let _ = line.push_str(", ");
        }
        let _ = write!(line, "{}", byte);
    }
    line
}

/// Formatted report for one classified frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    handler: Option<String<HANDLER_LINE_CAPACITY>>,
    code: String<CODE_LINE_CAPACITY>,
}

impl Report {
    /// Format the report for a classification
    pub fn new(classification: &Classification) -> Self {
        Self {
            handler: classification.opcode().map(handler_line),
            code: code_line(classification.frame()),
        }
    }

    /// Lines to print, without line endings
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        core::iter::once("")
            .chain(self.handler.as_deref())
            .chain([CODE_LINE_HEADER, self.code.as_str()])
    }

    /// Total bytes of the report with CRLF line endings
    pub fn byte_len(&self) -> usize {
        self.lines().map(|line| line.len() + 2).sum()
    }
}
