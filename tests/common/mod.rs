//! Builders for synthetic MP3 inputs.
#![allow(dead_code)]

/// Fake MPEG audio payload (frame sync bytes, no tag markers)
pub fn audio(len: usize) -> Vec<u8> {
    vec![0xFF; len]
}

fn synchsafe(size: u32) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

/// An ID3v2.3 frame with a plain 32-bit size and no flags
pub fn v23_frame(id: &str, body: &[u8]) -> Vec<u8> {
    let mut out = id.as_bytes().to_vec();
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(body);
    out
}

/// An ID3v2.3 text frame in ISO-8859-1
pub fn text_frame(id: &str, text: &str) -> Vec<u8> {
    let mut body = vec![0u8];
    body.extend_from_slice(text.as_bytes());
    v23_frame(id, &body)
}

/// An ID3v2.3 attached picture frame
pub fn picture_frame(mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = vec![0u8];
    body.extend_from_slice(mime.as_bytes());
    body.push(0);
    body.push(3);
    body.extend_from_slice(b"cover\0");
    body.extend_from_slice(data);
    v23_frame("APIC", &body)
}

/// An ID3v2.3 tag wrapping `frames`, followed by `padding` zero bytes
pub fn v23_tag(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
    let mut body: Vec<u8> = frames.concat();
    body.extend(std::iter::repeat(0u8).take(padding));

    let mut out = vec![b'I', b'D', b'3', 3, 0, 0];
    out.extend_from_slice(&synchsafe(body.len() as u32));
    out.extend(body);
    out
}

/// Fields of an ID3v1 trailer
#[derive(Default)]
pub struct V1Fields<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub year: &'a str,
    pub comment: &'a str,
    pub genre: u8,
}

fn fixed(text: &str, len: usize) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.resize(len, 0);
    out
}

/// A 128-byte ID3v1 trailer
pub fn v1_tag(fields: &V1Fields<'_>) -> Vec<u8> {
    let mut out = b"TAG".to_vec();
    out.extend(fixed(fields.title, 30));
    out.extend(fixed(fields.artist, 30));
    out.extend(fixed(fields.album, 30));
    out.extend(fixed(fields.year, 4));
    out.extend(fixed(fields.comment, 30));
    out.push(fields.genre);
    out
}

/// Number of entries in a directory
pub fn entry_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
