//! Line input with a fixed buffer size

use std::io::{self, BufRead, Read};

use crate::core::INPUT_CAPACITY;

/// Reads one line: up to and including the first newline, capped at
/// `INPUT_CAPACITY - 1` bytes. End of input yields an empty line.
pub fn read_line<R: BufRead>(reader: R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    reader
        .take((INPUT_CAPACITY - 1) as u64)
        .read_until(b'\n', &mut line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_first_line_only() {
        let line = read_line(&b"1+2\n3+4\n"[..]).unwrap();
        assert_eq!(line, b"1+2\n");
    }

    #[test]
    fn test_line_without_newline() {
        assert_eq!(read_line(&b"7+8"[..]).unwrap(), b"7+8");
    }

    #[test]
    fn test_empty_input() {
        assert!(read_line(&b""[..]).unwrap().is_empty());
    }

    #[test]
    fn test_caps_line_length() {
        let input = vec![b'9'; INPUT_CAPACITY * 2];
        let line = read_line(&input[..]).unwrap();
        assert_eq!(line.len(), INPUT_CAPACITY - 1);
    }
}
