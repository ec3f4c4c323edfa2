// ID3v2 frame definitions and body decoders

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, TagTextError};
use crate::utils::encoding::{decode_all, decode_terminated, decode_text, split_terminated, TextEncoding};
use crate::utils::io::be_uint;

/// Frame identifiers the parser treats specially (v2.3/v2.4 and v2.2 forms)
pub mod frame_ids {
    pub const TITLE: &str = "TIT2"; // Title/songname/content description
    pub const TITLE_V22: &str = "TT2";
    pub const ARTIST: &str = "TPE1"; // Lead performer(s)/Soloist(s)
    pub const ALBUM: &str = "TALB"; // Album/Movie/Show title
    pub const YEAR: &str = "TYER"; // Year
    pub const GENRE: &str = "TCON"; // Content type
    pub const COMMENT: &str = "COMM"; // Comments
    pub const PICTURE: &str = "APIC"; // Attached picture
}

/// Names of the objects a frame body decodes into
pub mod object_ids {
    pub const TEXT: &str = "Text";
    pub const DESCRIPTION: &str = "Description";
    pub const LANGUAGE: &str = "Language";
    pub const URL: &str = "URL";
    pub const MIME_TYPE: &str = "MIME Type";
    pub const IMAGE_FORMAT: &str = "Image Format";
    pub const PICTURE_TYPE: &str = "Picture Type";
    pub const PICTURE_DATA: &str = "Picture data";
    pub const OWNER: &str = "Owner";
    pub const IDENTIFIER: &str = "Identifier";
    pub const EMAIL: &str = "Email";
    pub const RATING: &str = "Rating";
    pub const COUNTER: &str = "Counter";
    pub const DATA: &str = "Data";
}

/// Separator used when a text frame carries several values
const MULTI_VALUE_SEPARATOR: &str = "/";

/// Decoded value of a frame object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectValue {
    Text(String),
    Number(u64),
    Binary(Vec<u8>),
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectValue::Text(text) => f.write_str(text),
            ObjectValue::Number(n) => write!(f, "{}", n),
            ObjectValue::Binary(bytes) => f.write_str(&STANDARD.encode(bytes)),
        }
    }
}

/// A named leaf value inside a frame body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp3Object {
    pub identifier: String,
    pub value: ObjectValue,
}

impl Mp3Object {
    pub fn text<S: Into<String>>(identifier: &str, value: S) -> Self {
        Mp3Object {
            identifier: identifier.to_string(),
            value: ObjectValue::Text(value.into()),
        }
    }

    pub fn number(identifier: &str, value: u64) -> Self {
        Mp3Object {
            identifier: identifier.to_string(),
            value: ObjectValue::Number(value),
        }
    }

    pub fn binary(identifier: &str, value: &[u8]) -> Self {
        Mp3Object {
            identifier: identifier.to_string(),
            value: ObjectValue::Binary(value.to_vec()),
        }
    }
}

/// A decoded ID3v2 frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub identifier: String,
    pub objects: Vec<Mp3Object>,
}

/// Decode a frame body into its objects.
///
/// `frame_id` may be a four-character (v2.3/v2.4) or three-character (v2.2)
/// identifier; both families share the same body layouts.
pub fn decode_body(frame_id: &str, data: &[u8]) -> Result<Vec<Mp3Object>> {
    use object_ids::*;

    let objects = match frame_id {
        "TXXX" | "TXX" => {
            let (encoding, body) = split_encoding(data);
            let (description, rest) = decode_terminated(body, encoding);
            vec![
                Mp3Object::text(DESCRIPTION, description),
                Mp3Object::text(TEXT, join_values(rest, encoding)),
            ]
        }
        id if id.starts_with('T') => {
            let (encoding, body) = split_encoding(data);
            vec![Mp3Object::text(TEXT, join_values(body, encoding))]
        }
        "WXXX" | "WXX" => {
            let (encoding, body) = split_encoding(data);
            let (description, rest) = decode_terminated(body, encoding);
            vec![
                Mp3Object::text(DESCRIPTION, description),
                Mp3Object::text(URL, latin1_string(rest)),
            ]
        }
        id if id.starts_with('W') => vec![Mp3Object::text(URL, latin1_string(data))],
        "COMM" | "COM" | "USLT" | "ULT" => {
            let (encoding, body) = split_encoding(data);
            let (language, body) = take(frame_id, body, 3)?;
            let (description, rest) = decode_terminated(body, encoding);
            let (text, _) = decode_terminated(rest, encoding);
            vec![
                Mp3Object::text(LANGUAGE, decode_text(language, TextEncoding::Iso8859_1)),
                Mp3Object::text(DESCRIPTION, description),
                Mp3Object::text(TEXT, text),
            ]
        }
        "APIC" => {
            let (encoding, body) = split_encoding(data);
            let (mime_type, body) = decode_terminated(body, TextEncoding::Iso8859_1);
            let (picture_type, body) = take(frame_id, body, 1)?;
            let (description, picture) = decode_terminated(body, encoding);
            vec![
                Mp3Object::text(MIME_TYPE, mime_type),
                Mp3Object::number(PICTURE_TYPE, picture_type[0] as u64),
                Mp3Object::text(DESCRIPTION, description),
                Mp3Object::binary(PICTURE_DATA, picture),
            ]
        }
        "PIC" => {
            let (encoding, body) = split_encoding(data);
            let (format, body) = take(frame_id, body, 3)?;
            let (picture_type, body) = take(frame_id, body, 1)?;
            let (description, picture) = decode_terminated(body, encoding);
            vec![
                Mp3Object::text(IMAGE_FORMAT, decode_text(format, TextEncoding::Iso8859_1)),
                Mp3Object::number(PICTURE_TYPE, picture_type[0] as u64),
                Mp3Object::text(DESCRIPTION, description),
                Mp3Object::binary(PICTURE_DATA, picture),
            ]
        }
        "UFID" | "UFI" => {
            let (owner, identifier) = decode_terminated(data, TextEncoding::Iso8859_1);
            vec![
                Mp3Object::text(OWNER, owner),
                Mp3Object::binary(IDENTIFIER, identifier),
            ]
        }
        "PRIV" => {
            let (owner, private) = decode_terminated(data, TextEncoding::Iso8859_1);
            vec![Mp3Object::text(OWNER, owner), Mp3Object::binary(DATA, private)]
        }
        "PCNT" | "CNT" => vec![Mp3Object::number(COUNTER, be_uint(data))],
        "POPM" | "POP" => {
            let (email, body) = decode_terminated(data, TextEncoding::Iso8859_1);
            let (rating, counter) = take(frame_id, body, 1)?;
            vec![
                Mp3Object::text(EMAIL, email),
                Mp3Object::number(RATING, rating[0] as u64),
                Mp3Object::number(COUNTER, be_uint(counter)),
            ]
        }
        _ => vec![Mp3Object::binary(DATA, data)],
    };

    Ok(objects)
}

/// Split off the leading text encoding byte. An empty body decodes as ISO-8859-1.
fn split_encoding(data: &[u8]) -> (TextEncoding, &[u8]) {
    match data.split_first() {
        Some((&byte, rest)) => (TextEncoding::from_byte(byte), rest),
        None => (TextEncoding::Iso8859_1, data),
    }
}

fn take<'a>(frame_id: &str, data: &'a [u8], len: usize) -> Result<(&'a [u8], &'a [u8])> {
    if data.len() < len {
        return Err(TagTextError::tag_decode(format!(
            "frame '{}' body is truncated",
            frame_id
        )));
    }
    Ok(data.split_at(len))
}

fn join_values(data: &[u8], encoding: TextEncoding) -> String {
    decode_all(data, encoding).join(MULTI_VALUE_SEPARATOR)
}

fn latin1_string(data: &[u8]) -> String {
    let (text, _) = split_terminated(data, TextEncoding::Iso8859_1);
    decode_text(text, TextEncoding::Iso8859_1)
}
