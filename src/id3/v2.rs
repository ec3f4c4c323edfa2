// ID3v2 tag implementation (versions 2.2, 2.3 and 2.4)

use std::borrow::Cow;
use std::io::Read;

use crate::error::{Result, TagTextError};
use crate::id3::frames::{decode_body, object_ids, Frame, Mp3Object};
use crate::utils::io::{be_u24, be_u32, read_up_to, remove_unsynchronisation, synchsafe_u32};

/// ID3v2 header structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    pub size: u32,
}

/// ID3v2 tag structure, fully decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub frames: Vec<Frame>,
}

impl Id3v2Header {
    pub const HEADER_SIZE: usize = 10;
    const ID: [u8; 3] = [b'I', b'D', b'3'];

    const FLAG_UNSYNCHRONISATION: u8 = 0x80;
    const FLAG_EXTENDED_HEADER: u8 = 0x40;

    /// Read ID3v2 header from reader.
    ///
    /// Inputs shorter than a header, or not starting with `ID3`, carry no tag.
    pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Option<Self>> {
        let mut buffer = [0u8; Self::HEADER_SIZE];
        if read_up_to(reader, &mut buffer)? < Self::HEADER_SIZE {
            return Ok(None);
        }

        Ok(Self::parse(&buffer))
    }

    /// Parse ID3v2 header from buffer
    pub fn parse(buffer: &[u8; Self::HEADER_SIZE]) -> Option<Self> {
        if buffer[0..3] != Self::ID {
            return None;
        }

        Some(Id3v2Header {
            version: (buffer[3], buffer[4]),
            flags: buffer[5],
            size: synchsafe_u32(&buffer[6..10]),
        })
    }

    pub fn major(&self) -> u8 {
        self.version.0
    }

    fn unsynchronised(&self) -> bool {
        self.flags & Self::FLAG_UNSYNCHRONISATION != 0
    }

    fn has_extended_header(&self) -> bool {
        self.flags & Self::FLAG_EXTENDED_HEADER != 0
    }
}

/// Per-version frame header layout
struct FrameLayout {
    id_len: usize,
    header_len: usize,
}

impl FrameLayout {
    fn for_major(major: u8) -> Self {
        if major == 2 {
            FrameLayout { id_len: 3, header_len: 6 }
        } else {
            FrameLayout { id_len: 4, header_len: 10 }
        }
    }
}

impl Id3v2Tag {
    /// Read ID3v2 tag from reader.
    ///
    /// Returns `Ok(None)` when the input has no ID3v2 header. A header that is
    /// present but followed by a malformed or truncated tag is an error.
    pub fn read<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let header = match Id3v2Header::read(reader)
            .map_err(|e| TagTextError::tag_decode_with_source("failed to read ID3v2 header", e))?
        {
            Some(h) => h,
            None => return Ok(None),
        };

        if !matches!(header.major(), 2..=4) {
            return Err(TagTextError::tag_decode(format!(
                "unsupported ID3v2 version 2.{}.{}",
                header.version.0, header.version.1
            )));
        }

        let mut body = vec![0u8; header.size as usize];
        reader.read_exact(&mut body).map_err(|e| {
            TagTextError::tag_decode_with_source(
                format!("tag declares {} bytes but the file ends early", header.size),
                e,
            )
        })?;

        // v2.4 moved unsynchronisation to the frame level
        if header.unsynchronised() && header.major() < 4 {
            body = remove_unsynchronisation(&body);
        }

        let frames = Self::parse_frames(&header, &body)?;
        Ok(Some(Id3v2Tag { header, frames }))
    }

    fn parse_frames(header: &Id3v2Header, body: &[u8]) -> Result<Vec<Frame>> {
        let major = header.major();
        let layout = FrameLayout::for_major(major);
        let mut pos = Self::extended_header_len(header, body)?;
        let mut frames = Vec::new();

        while pos + layout.header_len <= body.len() {
            let frame_header = &body[pos..pos + layout.header_len];

            // Check for padding
            if frame_header[0] == 0 {
                break;
            }

            let id_bytes = &frame_header[..layout.id_len];
            if !id_bytes.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(TagTextError::tag_decode(format!(
                    "invalid frame identifier {:?} at offset {}",
                    String::from_utf8_lossy(id_bytes),
                    pos
                )));
            }
            let identifier = String::from_utf8_lossy(id_bytes).into_owned();

            // Frame size parsing depends on version
            let (size, flags) = match major {
                2 => (be_u24(&frame_header[3..6]), 0u16),
                3 => (
                    be_u32(&frame_header[4..8]),
                    u16::from_be_bytes([frame_header[8], frame_header[9]]),
                ),
                _ => (
                    synchsafe_u32(&frame_header[4..8]),
                    u16::from_be_bytes([frame_header[8], frame_header[9]]),
                ),
            };

            let start = pos + layout.header_len;
            let end = start + size as usize;
            if end > body.len() {
                return Err(TagTextError::tag_decode(format!(
                    "frame '{}' overruns tag ({} bytes declared, {} available)",
                    identifier,
                    size,
                    body.len() - start
                )));
            }

            let objects = Self::decode_frame(header, &identifier, flags, &body[start..end])?;
            frames.push(Frame { identifier, objects });
            pos = end;
        }

        Ok(frames)
    }

    /// Number of bytes occupied by the extended header, if any
    fn extended_header_len(header: &Id3v2Header, body: &[u8]) -> Result<usize> {
        if !header.has_extended_header() {
            return Ok(0);
        }

        if header.major() == 2 {
            return Err(TagTextError::tag_decode("compressed ID3v2.2 tags are not supported"));
        }

        if body.len() < 4 {
            return Err(TagTextError::tag_decode("extended header is truncated"));
        }

        // v2.3 excludes the size field itself, v2.4 includes it
        let len = if header.major() == 3 {
            be_u32(&body[0..4]) as usize + 4
        } else {
            synchsafe_u32(&body[0..4]) as usize
        };

        if len > body.len() {
            return Err(TagTextError::tag_decode("extended header overruns tag"));
        }
        Ok(len)
    }

    /// Apply frame format flags and decode the body.
    ///
    /// Compressed and encrypted frames are kept as a single opaque object.
    fn decode_frame(header: &Id3v2Header, identifier: &str, flags: u16, data: &[u8]) -> Result<Vec<Mp3Object>> {
        let format = (flags & 0xFF) as u8;

        let (opaque, skip, unsync) = match header.major() {
            3 => (format & 0xC0 != 0, usize::from(format & 0x20 != 0), false),
            4 => (
                format & 0x0C != 0,
                usize::from(format & 0x40 != 0) + if format & 0x01 != 0 { 4 } else { 0 },
                format & 0x02 != 0 || header.unsynchronised(),
            ),
            _ => (false, 0, false),
        };

        if opaque {
            return Ok(vec![Mp3Object::binary(object_ids::DATA, data)]);
        }

        if data.len() < skip {
            return Err(TagTextError::tag_decode(format!(
                "frame '{}' body is truncated",
                identifier
            )));
        }

        let payload: Cow<'_, [u8]> = if unsync {
            Cow::Owned(remove_unsynchronisation(&data[skip..]))
        } else {
            Cow::Borrowed(&data[skip..])
        };

        decode_body(identifier, &payload)
    }
}
