//! Line assembly for the host serial link.
//!
//! Bytes arrive one at a time from the UART and are accumulated until a
//! line terminator (`\n` or `\r`). The buffer has a fixed capacity; once it
//! is full, further bytes are dropped until the next terminator and the
//! truncated line is emitted as-is.

use heapless::Vec;

/// Default line buffer capacity in bytes
pub const LINE_CAPACITY: usize = 512;

/// Returns true if `byte` terminates a command line
#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Bounded accumulator for newline-terminated command lines
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize = LINE_CAPACITY> {
    buffer: Vec<u8, N>,
    /// The buffer holds a line that was handed out and must be cleared
    emitted: bool,
    /// Total number of bytes dropped by the overflow policy
    dropped: u32,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            emitted: false,
            dropped: 0,
        }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.emitted = false;
    }

    /// Number of bytes currently buffered for the next line
    pub fn pending(&self) -> usize {
        if self.emitted {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Total bytes dropped by the overflow policy since creation
    ///
    /// Wraps at `u32::MAX`; callers diff successive readings.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped
    }

    /// Feed a single byte
    ///
    /// Returns the completed line (trimmed, never empty) when `byte` is a
    /// terminator. The returned slice stays valid until the next call.
    pub fn feed(&mut self, byte: u8) -> Option<&str> {
        if self.emitted {
            self.reset();
        }

        if is_terminator(byte) {
            if decode(&self.buffer).trim().is_empty() {
                self.reset();
                return None;
            }
            self.emitted = true;
            return Some(decode(&self.buffer).trim());
        }

        if self.buffer.push(byte).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
        }
        None
    }
}

/// Decode as much of `bytes` as forms valid UTF-8
///
/// The overflow policy can cut a multi-byte sequence in half; the partial
/// tail is discarded instead of rejecting the whole line.
fn decode(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            // valid_up_to() guarantees this prefix decodes
            core::str::from_utf8(valid).unwrap_or("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all<const N: usize>(
        assembler: &mut LineAssembler<N>,
        bytes: &[u8],
    ) -> Option<heapless::String<N>> {
        let mut last = None;
        for &b in bytes {
            if let Some(line) = assembler.feed(b) {
                let mut s = heapless::String::new();
                s.push_str(line).unwrap();
                last = Some(s);
            }
        }
        last
    }

    #[test]
    fn test_emits_line_on_newline() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        let line = feed_all(&mut asm, b"PING\n").unwrap();
        assert_eq!(line.as_str(), "PING");
        assert_eq!(asm.pending(), 0);
    }

    #[test]
    fn test_carriage_return_terminates() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        let line = feed_all(&mut asm, b"CLR\r").unwrap();
        assert_eq!(line.as_str(), "CLR");
    }

    #[test]
    fn test_crlf_yields_single_line() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        let mut count = 0;
        for &b in b"PING\r\nPING\r\n" {
            if asm.feed(b).is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        for &b in b"\n\n   \n\r" {
            assert!(asm.feed(b).is_none());
        }
    }

    #[test]
    fn test_line_is_trimmed() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        let line = feed_all(&mut asm, b"  TXT|hi there \t\n").unwrap();
        assert_eq!(line.as_str(), "TXT|hi there");
    }

    #[test]
    fn test_overflow_drops_until_terminator() {
        let mut asm: LineAssembler<8> = LineAssembler::new();
        for &b in b"TXT|abcdefgh" {
            assert!(asm.feed(b).is_none());
        }
        assert_eq!(asm.pending(), 8);
        assert_eq!(asm.dropped_bytes(), 4);

        let line = feed_all(&mut asm, b"\n").unwrap();
        assert_eq!(line.as_str(), "TXT|abcd");

        // Next line starts clean
        let line = feed_all(&mut asm, b"PING\n").unwrap();
        assert_eq!(line.as_str(), "PING");
        assert_eq!(asm.dropped_bytes(), 4);
    }

    #[test]
    fn test_truncated_utf8_is_cut_to_valid_prefix() {
        let mut asm: LineAssembler<6> = LineAssembler::new();
        // "TXT|é" is 6 bytes; "TXT|aé" would need 7
        let line = feed_all(&mut asm, "TXT|aé\n".as_bytes()).unwrap();
        assert_eq!(line.as_str(), "TXT|a");
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut asm: LineAssembler<64> = LineAssembler::new();
        for &b in b"TXT|partial" {
            asm.feed(b);
        }
        asm.reset();
        let line = feed_all(&mut asm, b"PING\n").unwrap();
        assert_eq!(line.as_str(), "PING");
    }
}
