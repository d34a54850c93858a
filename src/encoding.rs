//! Text encoding support for loading and saving documents.
//!
//! The editor works on UTF-8 `String`s internally; this module converts
//! between that and the byte encodings a document may live in on disk.
//! Decoding sniffs UTF-16 byte-order marks, validates UTF-8, and falls back
//! to Latin-1 for other byte content; files that cannot round-trip safely
//! are opened uneditable instead of being rejected.

/// Encoding names accepted by the loader, the save path, and
/// encoding enforcement.
pub const SUPPORTED: [&str; 4] = ["UTF-8", "UTF-16LE", "UTF-16BE", "ISO-8859-1"];

/// Files larger than this fail to load with the generic load-failure signal.
pub const MAX_LOAD_BYTES: u64 = 100 * 1024 * 1024;

/// A single line longer than this forces the document uneditable.
pub const MAX_LINE_BYTES: usize = 500_000;

/// Whether `name` is one of the supported encoding names.
pub fn is_supported(name: &str) -> bool {
    SUPPORTED.contains(&name)
}

/// Result of decoding raw file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Document text, always valid UTF-8 in memory.
    pub text: String,
    /// Name of the encoding the bytes were read as.
    pub encoding: &'static str,
    /// Set when the content cannot be edited safely (Latin-1 fallback or a
    /// line beyond [`MAX_LINE_BYTES`]).
    pub uneditable: bool,
}

/// Decode raw file bytes into document text.
///
/// Returns `None` for content that is not text at all (NUL bytes without a
/// UTF-16 byte-order mark).
pub fn decode(bytes: &[u8]) -> Option<Decoded> {
    let decoded = if bytes.starts_with(&[0xFF, 0xFE]) {
        Decoded {
            text: decode_utf16(&bytes[2..], u16::from_le_bytes),
            encoding: "UTF-16LE",
            uneditable: false,
        }
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Decoded {
            text: decode_utf16(&bytes[2..], u16::from_be_bytes),
            encoding: "UTF-16BE",
            uneditable: false,
        }
    } else if bytes.contains(&0x00) {
        return None;
    } else {
        match std::str::from_utf8(bytes) {
            Ok(text) => Decoded {
                text: text.to_string(),
                encoding: "UTF-8",
                uneditable: false,
            },
            // Latin-1 maps every byte, so this always opens, but the
            // document may not survive a save and stays uneditable.
            Err(_) => Decoded {
                text: bytes.iter().map(|&b| b as char).collect(),
                encoding: "ISO-8859-1",
                uneditable: true,
            },
        }
    };

    let huge_line = decoded
        .text
        .split('\n')
        .any(|line| line.len() > MAX_LINE_BYTES);
    Some(Decoded {
        uneditable: decoded.uneditable || huge_line,
        ..decoded
    })
}

/// Encode document text as bytes in the named encoding.
///
/// Returns `None` when the encoding is unknown or the text contains
/// characters outside the target repertoire; callers surface that as a
/// save failure.
pub fn encode(text: &str, encoding: &str) -> Option<Vec<u8>> {
    match encoding {
        "UTF-8" => Some(text.as_bytes().to_vec()),
        "UTF-16LE" => Some(encode_utf16(text, &[0xFF, 0xFE], u16::to_le_bytes)),
        "UTF-16BE" => Some(encode_utf16(text, &[0xFE, 0xFF], u16::to_be_bytes)),
        "ISO-8859-1" => {
            let mut out = Vec::with_capacity(text.len());
            for c in text.chars() {
                let code = c as u32;
                if code > 0xFF {
                    return None;
                }
                out.push(code as u8);
            }
            Some(out)
        }
        _ => None,
    }
}

fn decode_utf16(bytes: &[u8], from_bytes: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn encode_utf16(text: &str, bom: &[u8], to_bytes: fn(u16) -> [u8; 2]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(bom);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&to_bytes(unit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_round_trip() {
        let text = "héllo wörld\nsecond line";
        let bytes = encode(text, "UTF-8").expect("encode");
        let decoded = decode(&bytes).expect("decode");
        assert_eq!(decoded.text, text);
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.uneditable);
    }

    #[test]
    fn utf16le_bom_is_sniffed() {
        let bytes = encode("abc", "UTF-16LE").expect("encode");
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        let decoded = decode(&bytes).expect("decode");
        assert_eq!(decoded.text, "abc");
        assert_eq!(decoded.encoding, "UTF-16LE");
    }

    #[test]
    fn utf16be_bom_is_sniffed() {
        let bytes = encode("abc", "UTF-16BE").expect("encode");
        let decoded = decode(&bytes).expect("decode");
        assert_eq!(decoded.text, "abc");
        assert_eq!(decoded.encoding, "UTF-16BE");
    }

    #[test]
    fn nul_bytes_without_bom_are_not_text() {
        assert_eq!(decode(b"ab\x00cd"), None);
    }

    #[test]
    fn latin1_fallback_opens_uneditable() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte.
        let decoded = decode(b"caf\xE9").expect("decode");
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding, "ISO-8859-1");
        assert!(decoded.uneditable);
    }

    #[test]
    fn latin1_encode_refuses_wide_characters() {
        assert_eq!(encode("price: €5", "ISO-8859-1"), None);
        assert!(encode("price: e5", "ISO-8859-1").is_some());
    }

    #[test]
    fn unknown_encoding_refused() {
        assert_eq!(encode("x", "KOI8-R"), None);
        assert!(!is_supported("KOI8-R"));
        assert!(is_supported("UTF-8"));
    }

    #[test]
    fn huge_line_forces_uneditable() {
        let text = "a".repeat(MAX_LINE_BYTES + 1);
        let decoded = decode(text.as_bytes()).expect("decode");
        assert!(decoded.uneditable);
    }
}
