// ID3v1 tag implementation

use std::io::{Read, Seek, SeekFrom};

use crate::id3::genres::genre_name;
use crate::utils::encoding::{decode_text, TextEncoding};

/// ID3v1 tag structure: the legacy fixed-field record at the end of the file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Id3v1Tag {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub comment: Option<String>,
    pub genre: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    const TAG_ID: [u8; 3] = [b'T', b'A', b'G'];

    /// Read ID3v1 tag from the last 128 bytes of the reader
    pub fn read<R: Read + Seek>(reader: &mut R) -> std::io::Result<Option<Self>> {
        let file_size = reader.seek(SeekFrom::End(0))?;

        if file_size < Self::TAG_SIZE as u64 {
            return Ok(None);
        }

        reader.seek(SeekFrom::End(-(Self::TAG_SIZE as i64)))?;
        let mut buffer = [0u8; Self::TAG_SIZE];
        reader.read_exact(&mut buffer)?;

        // Check for TAG identifier
        if buffer[0..3] != Self::TAG_ID {
            return Ok(None);
        }

        Ok(Some(Self::parse(&buffer)))
    }

    /// Parse ID3v1 tag from buffer
    fn parse(buffer: &[u8; Self::TAG_SIZE]) -> Self {
        // ID3v1.1 stores a track number in the last two comment bytes
        let comment_end = if buffer[125] == 0 && buffer[126] != 0 { 125 } else { 127 };

        Id3v1Tag {
            title: Self::parse_string(&buffer[3..33]),
            artist: Self::parse_string(&buffer[33..63]),
            album: Self::parse_string(&buffer[63..93]),
            year: Self::parse_string(&buffer[93..97]),
            comment: Self::parse_string(&buffer[97..comment_end]),
            genre: genre_name(buffer[127]).map(str::to_string),
        }
    }

    /// Parse null-terminated ISO-8859-1 string, `None` when blank
    fn parse_string(bytes: &[u8]) -> Option<String> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = decode_text(&bytes[..end], TextEncoding::Iso8859_1);
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}
