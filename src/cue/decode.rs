use crate::cue::error::{CueError, CueResult};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use log::debug;
use std::path::Path;

/// Decodes raw sheet bytes into text.
///
/// An explicit `label` always wins. Without one, a byte order mark decides the
/// encoding, and failing that the encoding is guessed from the content.
/// Decoding never substitutes replacement characters: malformed input is an error.
pub fn decode_cue_bytes(path: &Path, bytes: &[u8], label: Option<&str>) -> CueResult<String> {
    let (encoding, body) = match label {
        Some(label) => {
            let encoding = Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| CueError::UnknownEncoding(label.to_string()))?;
            (encoding, bytes)
        }
        None => match Encoding::for_bom(bytes) {
            Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
            None => {
                let mut detector = EncodingDetector::new();
                detector.feed(bytes, true);
                (detector.guess(None, true), bytes)
            }
        },
    };

    debug!("Decoding {path:?} as {}", encoding.name());

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| CueError::Undecodable {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    let text: &str = &text;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("album.cue")
    }

    #[test]
    fn decodes_plain_utf8_without_label() {
        let text = decode_cue_bytes(path(), "TITLE \"Café\"".as_bytes(), None).unwrap();
        assert_eq!(text, "TITLE \"Café\"");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"REM DATE 1969");
        assert_eq!(decode_cue_bytes(path(), &bytes, None).unwrap(), "REM DATE 1969");
        assert_eq!(
            decode_cue_bytes(path(), &bytes, Some("utf-8")).unwrap(),
            "REM DATE 1969"
        );
    }

    #[test]
    fn honours_explicit_label() {
        // "Mötley" in windows-1252
        let bytes = b"PERFORMER \"M\xF6tley\"";
        let text = decode_cue_bytes(path(), bytes, Some("windows-1252")).unwrap();
        assert_eq!(text, "PERFORMER \"Mötley\"");
    }

    #[test]
    fn rejects_unknown_label() {
        let err = decode_cue_bytes(path(), b"TITLE \"x\"", Some("klingon-8")).unwrap_err();
        assert!(matches!(err, CueError::UnknownEncoding(label) if label == "klingon-8"));
    }

    #[test]
    fn malformed_input_for_explicit_encoding_is_undecodable() {
        let err = decode_cue_bytes(path(), b"TITLE \"\xFF\xFE\xFD\"", Some("utf-8")).unwrap_err();
        assert!(matches!(err, CueError::Undecodable { encoding: "UTF-8", .. }));
    }
}
