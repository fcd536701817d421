//! The comments section: `key=value` lines followed by a single NUL.

use std::collections::BTreeMap;
use std::io::Read;

use bytestream::ByteReader;
use wire::{ScfHeader, SectionKind};

use crate::error::{CodecError, CodecResult};
use crate::sections::{header_field, read_section};

/// Comment properties in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Comments(BTreeMap<String, String>);

impl Comments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Inserts a property, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Comments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for Comments {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Parses the raw bytes of a comments section.
///
/// Text after the first NUL is ignored. Lines split at the first `=`; a
/// line without `=` is a key with an empty value. Blank lines and empty
/// keys are dropped, which also discards the entry the terminating NUL
/// would otherwise produce. Bytes that are not UTF-8 are read as Latin-1.
#[must_use]
pub fn parse_comments(bytes: &[u8]) -> Comments {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let raw = &bytes[..end];
    let text = match std::str::from_utf8(raw) {
        Ok(text) => text.to_owned(),
        Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
    };

    let mut comments = Comments::new();
    for line in text.split('\n') {
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        if key.is_empty() {
            continue;
        }
        comments.insert(key, value);
    }
    comments
}

/// Formats comments as section bytes.
///
/// Returns an empty buffer for no comments; otherwise one line per entry and
/// exactly one NUL after the last line feed.
pub fn format_comments(comments: &Comments) -> CodecResult<Vec<u8>> {
    if comments.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for (key, value) in comments.iter() {
        let bad_key = key.is_empty() || key.contains(['=', '\n', '\0']);
        if bad_key || value.contains(['\n', '\0']) {
            return Err(CodecError::InvalidComment {
                key: key.to_owned(),
            });
        }
        out.extend_from_slice(key.as_bytes());
        out.push(b'=');
        out.extend_from_slice(value.as_bytes());
        out.push(b'\n');
    }
    out.push(0);
    Ok(out)
}

/// Decodes `header.comments_size` bytes at `header.comments_offset`.
pub fn decode_comments<R: Read>(
    reader: &mut ByteReader<R>,
    header: &ScfHeader,
) -> CodecResult<Comments> {
    if header.comments_size == 0 {
        return Ok(Comments::new());
    }
    let offset = u64::from(header.comments_offset);
    let len = header.comments_size as usize;
    read_section(reader, SectionKind::Comments, offset, |reader| {
        Ok(parse_comments(&reader.read_bytes(len)?))
    })
}

/// Encodes comments and records their byte size in `header`.
pub fn encode_comments(comments: &Comments, header: &mut ScfHeader) -> CodecResult<Vec<u8>> {
    let bytes = format_comments(comments)?;
    header.comments_size = header_field(bytes.len())?;
    tracing::debug!(entries = comments.len(), bytes = bytes.len(), "comments encoded");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::test_support::capture_logs;
    use wire::ScfVersion;

    #[test]
    fn parse_drops_trailing_nul_entry() {
        let comments = parse_comments(b"MACH=ABI 3730\nNAME=read1\n\0");
        assert_eq!(comments.len(), 2);
        assert_eq!(comments.get("MACH"), Some("ABI 3730"));
        assert_eq!(comments.get("NAME"), Some("read1"));
    }

    #[test]
    fn parse_splits_at_first_equals() {
        let comments = parse_comments(b"EXPR=a=b\nFLAG\n\0");
        assert_eq!(comments.get("EXPR"), Some("a=b"));
        assert_eq!(comments.get("FLAG"), Some(""));
    }

    #[test]
    fn parse_ignores_text_after_nul() {
        let comments = parse_comments(b"A=1\n\0B=2\n");
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn parse_without_terminator() {
        let comments = parse_comments(b"A=1");
        assert_eq!(comments.get("A"), Some("1"));
    }

    #[test]
    fn parse_latin1_fallback() {
        let comments = parse_comments(b"NAME=caf\xE9\n\0");
        assert_eq!(comments.get("NAME"), Some("café"));
    }

    #[test]
    fn format_appends_one_nul() {
        let comments: Comments = [("B", "2"), ("A", "1")].into_iter().collect();
        assert_eq!(format_comments(&comments).unwrap(), b"A=1\nB=2\n\0".to_vec());
        assert!(format_comments(&Comments::new()).unwrap().is_empty());
    }

    #[test]
    fn format_rejects_line_breaks() {
        let comments: Comments = [("NAME", "a\nb")].into_iter().collect();
        let err = format_comments(&comments).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Contract);

        let comments: Comments = [("K=V", "x")].into_iter().collect();
        assert!(format_comments(&comments).is_err());
    }

    #[test]
    fn encode_emits_debug_event() {
        let comments: Comments = [("NAME", "x")].into_iter().collect();
        let mut header = ScfHeader::new(ScfVersion::V3);
        let (_, logs) = capture_logs(tracing::Level::DEBUG, || {
            encode_comments(&comments, &mut header).unwrap()
        });
        assert!(logs.contains("comments encoded"));
        assert!(logs.contains("entries=1"));
    }

    #[test]
    fn section_roundtrip() {
        let comments: Comments = [("SIGN", "A=1,C=2"), ("SPAC", "12.5")]
            .into_iter()
            .collect();
        let mut header = ScfHeader::new(ScfVersion::V3);
        let bytes = encode_comments(&comments, &mut header).unwrap();
        assert_eq!(header.comments_size as usize, bytes.len());
        assert_eq!(bytes.last(), Some(&0));

        let decoded = decode_comments(&mut ByteReader::new(&bytes[..]), &header).unwrap();
        assert_eq!(decoded, comments);
    }

    #[test]
    fn truncated_section_names_comments() {
        let mut header = ScfHeader::new(ScfVersion::V3);
        header.comments_size = 10;
        let err = decode_comments(&mut ByteReader::new(&b"A=1\n"[..]), &header).unwrap_err();
        assert_eq!(err.section(), Some(SectionKind::Comments));
        assert_eq!(err.class(), ErrorClass::Truncated);
    }
}
