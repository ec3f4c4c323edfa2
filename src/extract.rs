// Property extraction from decoded tags

use crate::id3::frames::{frame_ids, object_ids};
use crate::id3::{Id3v1Tag, Id3v2Tag, TagVariant};
use crate::metadata::{Property, PropertyKey};

/// Flatten a decoded tag into `(key, value)` properties.
///
/// Attached pictures are skipped entirely, as is any `Picture data` object
/// in other frames. Frame and object order follow the tag.
pub fn extract(tag: &TagVariant) -> Vec<Property> {
    match tag {
        TagVariant::V2(tag) => extract_v2(tag),
        TagVariant::V1(tag) => extract_v1(tag),
        TagVariant::None => Vec::new(),
    }
}

fn extract_v2(tag: &Id3v2Tag) -> Vec<Property> {
    let mut properties = Vec::new();

    for frame in &tag.frames {
        let name = frame.identifier.trim();
        if name == frame_ids::PICTURE {
            continue;
        }

        for object in &frame.objects {
            if object.identifier == object_ids::PICTURE_DATA {
                continue;
            }
            properties.push((
                PropertyKey::new(name, &object.identifier),
                object.value.to_string(),
            ));
        }
    }

    properties
}

fn extract_v1(tag: &Id3v1Tag) -> Vec<Property> {
    let text = |frame: &str, value: &Option<String>| {
        (
            PropertyKey::new(frame, object_ids::TEXT),
            value.clone().unwrap_or_default(),
        )
    };

    vec![
        text(frame_ids::ALBUM, &tag.album),
        text(frame_ids::ARTIST, &tag.artist),
        text(frame_ids::COMMENT, &tag.comment),
        (
            PropertyKey::new(frame_ids::GENRE, object_ids::TEXT),
            format!("({})", tag.genre.as_deref().unwrap_or_default()),
        ),
        text(frame_ids::TITLE, &tag.title),
        text(frame_ids::YEAR, &tag.year),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::frames::{Frame, Mp3Object};
    use crate::id3::Id3v2Header;

    fn v2(frames: Vec<Frame>) -> TagVariant {
        TagVariant::V2(Id3v2Tag {
            header: Id3v2Header {
                version: (3, 0),
                flags: 0,
                size: 0,
            },
            frames,
        })
    }

    fn keys(properties: &[Property]) -> Vec<&str> {
        properties.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_v2_skips_pictures() {
        let tag = v2(vec![
            Frame {
                identifier: "TIT2".into(),
                objects: vec![Mp3Object::text("Text", "Song")],
            },
            Frame {
                identifier: "APIC".into(),
                objects: vec![
                    Mp3Object::text("MIME Type", "image/jpeg"),
                    Mp3Object::binary("Picture data", &[0xFF, 0xD8]),
                ],
            },
        ]);

        let properties = extract(&tag);
        assert_eq!(properties, vec![(PropertyKey::new("TIT2", "Text"), "Song".to_string())]);
    }

    #[test]
    fn test_v2_skips_picture_data_in_other_frames() {
        let tag = v2(vec![Frame {
            identifier: "PIC".into(),
            objects: vec![
                Mp3Object::text("Image Format", "PNG"),
                Mp3Object::number("Picture Type", 3),
                Mp3Object::binary("Picture data", &[1, 2, 3]),
            ],
        }]);

        let properties = extract(&tag);
        assert_eq!(keys(&properties), vec!["PIC-Image Format", "PIC-Picture Type"]);
        assert_eq!(properties[1].1, "3");
    }

    #[test]
    fn test_v2_trims_frame_identifier_and_keeps_order() {
        let tag = v2(vec![
            Frame {
                identifier: "TPE1".into(),
                objects: vec![Mp3Object::text("Text", "Band")],
            },
            Frame {
                identifier: "COMM ".into(),
                objects: vec![
                    Mp3Object::text("Language", "eng"),
                    Mp3Object::text("Description", ""),
                    Mp3Object::text("Text", "Hi"),
                ],
            },
        ]);

        assert_eq!(
            keys(&extract(&tag)),
            vec!["TPE1-Text", "COMM-Language", "COMM-Description", "COMM-Text"]
        );
    }

    #[test]
    fn test_v1_emits_six_properties() {
        let tag = TagVariant::V1(Id3v1Tag {
            album: Some("X".into()),
            artist: Some("Y".into()),
            comment: None,
            genre: Some("Rock".into()),
            title: Some("Z".into()),
            year: Some("1999".into()),
        });

        let properties = extract(&tag);
        assert_eq!(
            keys(&properties),
            vec!["TALB-Text", "TPE1-Text", "COMM-Text", "TCON-Text", "TIT2-Text", "TYER-Text"]
        );
        let values: Vec<_> = properties.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["X", "Y", "", "(Rock)", "Z", "1999"]);
    }

    #[test]
    fn test_v1_empty_genre_is_wrapped() {
        let properties = extract(&TagVariant::V1(Id3v1Tag::default()));
        assert_eq!(properties[3].1, "()");
    }

    #[test]
    fn test_none_is_empty() {
        assert!(extract(&TagVariant::None).is_empty());
    }
}
