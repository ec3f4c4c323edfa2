// Text decoding for ID3 string fields

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// Text encoding types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => TextEncoding::Iso8859_1,
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16BE,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Iso8859_1,
        }
    }

    /// Width of the string terminator in bytes
    fn terminator_width(self) -> usize {
        match self {
            TextEncoding::Utf16 | TextEncoding::Utf16BE => 2,
            TextEncoding::Iso8859_1 | TextEncoding::Utf8 => 1,
        }
    }
}

/// Decode text with specified encoding
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Iso8859_1 => {
            WINDOWS_1252.decode(data).0.to_string()
        }
        TextEncoding::Utf16 => {
            // Detect BOM
            if data.len() >= 2 {
                if data[0..2] == [0xFF, 0xFE] {
                    UTF_16LE.decode_without_bom_handling(&data[2..]).0.to_string()
                } else if data[0..2] == [0xFE, 0xFF] {
                    UTF_16BE.decode_without_bom_handling(&data[2..]).0.to_string()
                } else {
                    UTF_16LE.decode_without_bom_handling(data).0.to_string()
                }
            } else {
                String::new()
            }
        }
        TextEncoding::Utf16BE => {
            UTF_16BE.decode_without_bom_handling(data).0.to_string()
        }
        TextEncoding::Utf8 => {
            UTF_8.decode(data).0.to_string()
        }
    }
}

/// Split `data` at the first string terminator for `encoding`.
///
/// Returns the string bytes and the bytes following the terminator. Without a
/// terminator the whole input is the string and the remainder is empty.
pub fn split_terminated(data: &[u8], encoding: TextEncoding) -> (&[u8], &[u8]) {
    let width = encoding.terminator_width();
    let mut pos = 0;
    while pos + width <= data.len() {
        if data[pos..pos + width].iter().all(|&b| b == 0) {
            return (&data[..pos], &data[pos + width..]);
        }
        pos += width;
    }
    (data, &[])
}

/// Decode a terminated string and return it with the remaining bytes
pub fn decode_terminated(data: &[u8], encoding: TextEncoding) -> (String, &[u8]) {
    let (text, rest) = split_terminated(data, encoding);
    (decode_text(text, encoding), rest)
}

/// Decode every terminated string in `data`, dropping empty trailing values
pub fn decode_all(mut data: &[u8], encoding: TextEncoding) -> Vec<String> {
    let mut values = Vec::new();
    while !data.is_empty() {
        let (value, rest) = decode_terminated(data, encoding);
        values.push(value);
        data = rest;
    }
    while values.last().is_some_and(|v| v.is_empty()) {
        values.pop();
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_is_decoded() {
        assert_eq!(decode_text(b"Caf\xe9", TextEncoding::Iso8859_1), "Café");
    }

    #[test]
    fn test_utf16_bom_selects_byte_order() {
        let le = [0xFF, 0xFE, b'H', 0, b'i', 0];
        let be = [0xFE, 0xFF, 0, b'H', 0, b'i'];
        assert_eq!(decode_text(&le, TextEncoding::Utf16), "Hi");
        assert_eq!(decode_text(&be, TextEncoding::Utf16), "Hi");
    }

    #[test]
    fn test_utf16_terminator_is_aligned() {
        // 0x00 0x01 0x00 0x00: the first pair is not a terminator even though
        // bytes 1..3 are zero and one.
        let data = [b'A', 0, 0, 1, 0, 0, b'B', 0];
        let (text, rest) = split_terminated(&data, TextEncoding::Utf16BE);
        assert_eq!(text, &[b'A', 0, 0, 1]);
        assert_eq!(rest, &[b'B', 0]);
    }

    #[test]
    fn test_decode_all_splits_values() {
        assert_eq!(
            decode_all(b"Alice\0Bob\0", TextEncoding::Utf8),
            vec!["Alice".to_string(), "Bob".to_string()]
        );
        assert!(decode_all(b"\0", TextEncoding::Iso8859_1).is_empty());
    }
}
