//! Content-type detection
//!
//! Infers a media type from the leading bytes of a stream, so uploads from
//! unseekable sources (standard input in particular) can be typed without
//! re-reading. The consumed bytes are handed back to the caller and must be
//! replayed ahead of the rest of the stream.

use std::io::Read;

use crate::error::Result;

/// Number of leading bytes consulted for detection
pub const SNIFF_WINDOW: usize = 512;

/// Generic fallback when nothing more specific matches
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// The outcome of sniffing a stream
#[derive(Debug, Clone)]
pub struct Sniffed {
    /// Best-guess media type
    pub media_type: String,

    /// The bytes consumed from the stream, at most [`SNIFF_WINDOW`]
    pub prefix: Vec<u8>,
}

/// Read up to [`SNIFF_WINDOW`] bytes from `reader` and classify them.
///
/// End-of-stream before the window fills is not an error; classification
/// runs on whatever was read, and an empty stream yields
/// [`DEFAULT_MEDIA_TYPE`].
pub fn sniff<R: Read + ?Sized>(reader: &mut R) -> Result<Sniffed> {
    let mut buf = [0u8; SNIFF_WINDOW];
    let mut filled = 0;
    // A single read may come back short without hitting end-of-stream.
    while filled < SNIFF_WINDOW {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let prefix = buf[..filled].to_vec();
    Ok(Sniffed {
        media_type: classify(&prefix).to_string(),
        prefix,
    })
}

/// Exact leading signatures, most specific first
const MAGIC: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"%PDF-", "application/pdf"),
    (b"%!PS-", "application/postscript"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b\x08", "application/x-gzip"),
    (b"BZh", "application/x-bzip2"),
    (b"\xfd7zXZ\x00", "application/x-xz"),
    (b"\x28\xb5\x2f\xfd", "application/zstd"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (b"Rar!\x1a\x07", "application/x-rar-compressed"),
    (b"ID3", "audio/mpeg"),
    (b"\xff\xfb", "audio/mpeg"),
    (b"OggS", "audio/ogg"),
    (b"fLaC", "audio/flac"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"\x1a\x45\xdf\xa3", "video/webm"),
];

fn classify(data: &[u8]) -> &'static str {
    if data.is_empty() {
        return DEFAULT_MEDIA_TYPE;
    }

    for (magic, media_type) in MAGIC {
        if data.starts_with(magic) {
            return media_type;
        }
    }

    // Container formats keyed away from offset zero.
    if data.len() >= 12 && data.starts_with(b"RIFF") {
        if &data[8..12] == b"WEBP" {
            return "image/webp";
        }
        if &data[8..12] == b"WAVE" {
            return "audio/wave";
        }
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return "video/mp4";
    }
    if data.len() >= 262 && &data[257..262] == b"ustar" {
        return "application/x-tar";
    }

    // Unicode byte-order marks pin the charset.
    if data.starts_with(b"\xef\xbb\xbf") {
        return "text/plain; charset=utf-8";
    }
    if data.starts_with(b"\xfe\xff") {
        return "text/plain; charset=utf-16be";
    }
    if data.starts_with(b"\xff\xfe") {
        return "text/plain; charset=utf-16le";
    }

    if looks_like_html(data) {
        return "text/html; charset=utf-8";
    }
    if looks_like_text(data) {
        return "text/plain; charset=utf-8";
    }

    DEFAULT_MEDIA_TYPE
}

fn looks_like_html(data: &[u8]) -> bool {
    let trimmed: &[u8] = {
        let start = data
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(data.len());
        &data[start..]
    };
    const TAGS: [&[u8]; 4] = [b"<!DOCTYPE HTML", b"<HTML", b"<HEAD", b"<BODY"];
    TAGS.iter().any(|tag| {
        trimmed.len() >= tag.len()
            && trimmed[..tag.len()].eq_ignore_ascii_case(tag)
    })
}

/// Binary detection: any byte outside the printable range (plus common
/// whitespace and escape controls) marks the sample as non-text.
fn looks_like_text(data: &[u8]) -> bool {
    data.iter().all(|&b| {
        b >= 0x20 || matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | 0x1b)
    })
}
