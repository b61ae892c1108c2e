//! core::document::encoding
//!
//! Byte encoding of document files.
//!
//! Files are written as UTF-16LE with a byte-order mark and CRLF line
//! endings. On read, a leading `FF FE` selects UTF-16LE; anything else is
//! read as UTF-8 (which covers the legacy plain-ASCII files), falling back
//! to Latin-1 for stray 8-bit bytes. Line endings are normalized to `\n`.

use crate::core::error::MetaError;

/// UTF-16 little-endian byte-order mark.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encode `text` as BOM-prefixed UTF-16LE with CRLF line endings.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16LE_BOM);
    for c in text.replace('\n', "\r\n").encode_utf16() {
        bytes.extend_from_slice(&c.to_le_bytes());
    }
    bytes
}

/// Decode a document file.
///
/// # Errors
///
/// Returns `MetaError::DocumentFormat` for truncated or invalid UTF-16.
pub fn decode(bytes: &[u8]) -> Result<String, MetaError> {
    let text = match bytes.strip_prefix(&UTF16LE_BOM) {
        Some(body) => decode_utf16le(body)?,
        None => {
            let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
            match std::str::from_utf8(body) {
                Ok(text) => text.to_string(),
                Err(_) => body.iter().map(|&b| char::from(b)).collect(),
            }
        }
    };
    Ok(text.replace("\r\n", "\n"))
}

fn decode_utf16le(body: &[u8]) -> Result<String, MetaError> {
    if body.len() % 2 != 0 {
        return Err(MetaError::DocumentFormat(
            "UTF-16 file has an odd number of bytes".to_string(),
        ));
    }
    let units = body
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| MetaError::DocumentFormat(format!("invalid UTF-16 text: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_bom_and_crlf() {
        let bytes = encode_utf16le("a\nb");
        assert_eq!(
            bytes,
            vec![0xFF, 0xFE, b'a', 0, b'\r', 0, b'\n', 0, b'b', 0]
        );
    }

    #[test]
    fn decodes_utf16_round_trip() {
        let text = "<Value>Привет 𝄞</Value>\n";
        assert_eq!(decode(&encode_utf16le(text)).unwrap(), text);
    }

    #[test]
    fn decodes_plain_ascii_and_utf8_bom() {
        assert_eq!(decode(b"<Metadata/>\r\n").unwrap(), "<Metadata/>\n");
        assert_eq!(
            decode(&[0xEF, 0xBB, 0xBF, b'x']).unwrap(),
            "x"
        );
    }

    #[test]
    fn falls_back_to_latin1() {
        assert_eq!(decode(&[b'c', 0xE9]).unwrap(), "cé");
    }

    #[test]
    fn rejects_broken_utf16() {
        assert!(decode(&[0xFF, 0xFE, b'a']).is_err());
        // Unpaired high surrogate
        assert!(decode(&[0xFF, 0xFE, 0x00, 0xD8]).is_err());
    }
}
