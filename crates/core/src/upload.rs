//! Upload filename sanitization and content-addressed key derivation.
//!
//! Client-supplied filenames are never used as storage paths. Only their
//! extension survives, attached to the SHA-256 digest of the file contents.

use crate::hashing::sha256_hex;

/// Longest extension kept from a client filename.
const MAX_EXTENSION_LEN: usize = 10;

/// Strip every directory component from a client-supplied filename.
///
/// Both `/` and `\` count as separators. Returns `None` when nothing usable
/// remains (empty input, `.`, `..`, or a trailing separator).
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>();
    let base = base.trim();

    match base {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// Lower-cased extension of a sanitized filename, if it is short and alphanumeric.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Derive the storage key for an upload: `<sha256>.<ext>`, or the bare
/// digest when the original filename carries no usable extension.
pub fn storage_key(original_filename: &str, data: &[u8]) -> String {
    let digest = sha256_hex(data);
    match sanitize_filename(original_filename)
        .as_deref()
        .and_then(file_extension)
    {
        Some(ext) => format!("{digest}.{ext}"),
        None => digest,
    }
}
