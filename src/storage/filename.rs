//! Filename handling for uploaded documents and derived images

use unicode_normalization::UnicodeNormalization;

use crate::document::DocumentFormat;

/// Reduce a client-supplied filename to a safe flat name
///
/// The name is NFKD-decomposed and reduced to ASCII first, so accented
/// letters keep their base letter. Path separators become spaces, runs of
/// whitespace become `_`, and only ASCII letters, digits, `_`, `.` and `-`
/// survive. Leading and trailing `.`/`_` are trimmed, so the result can
/// never be `..` or a dotfile.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Name under which an upload of `format` is stored
///
/// Falls back to `upload.<ext>` when sanitizing loses the name or its
/// extension (e.g. a filename made only of non-ASCII characters).
pub fn stored_name(declared: &str, format: DocumentFormat) -> String {
    let secured = secure_filename(declared);
    match DocumentFormat::classify(&secured) {
        Some(detected) if detected == format => secured,
        _ => format!("upload.{}", format.extension()),
    }
}

/// Prefix for images derived from a stored upload: its name without extension
pub fn image_prefix(stored_name: &str) -> &str {
    match stored_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => stored_name,
    }
}

/// Whether a requested name addresses a single file inside a flat directory
pub fn is_flat_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}
