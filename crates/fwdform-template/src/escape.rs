use std::borrow::Cow;

pub(crate) const ESCAPE: u8 = b'\\';
pub(crate) const DELIMITER: u8 = b'%';

fn is_escapable(byte: u8) -> bool {
    byte == ESCAPE || byte == DELIMITER
}

/// Protect every `\` and `%` in `text` with a leading `\`.
///
/// The result can be spliced into a template without introducing
/// placeholders, and [`unescape`] restores the original exactly.
///
/// ```
/// use fwdform_template::escape;
///
/// assert_eq!(escape("50% off"), r"50\% off");
/// assert_eq!(escape(r"C:\temp"), r"C:\\temp");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    let extra = text.bytes().filter(|b| is_escapable(*b)).count();
    if extra == 0 {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + extra);
    for chara in text.chars() {
        if chara == '\\' || chara == '%' {
            escaped.push('\\');
        }
        escaped.push(chara);
    }
    Cow::Owned(escaped)
}

/// Collapse `\\` to `\` and `\%` to `%`.
///
/// A backslash followed by anything else, or at the very end, is kept as-is.
///
/// ```
/// use fwdform_template::unescape;
///
/// assert_eq!(unescape(r"100\% done"), "100% done");
/// assert_eq!(unescape(r"a\\b"), r"a\b");
/// assert_eq!(unescape(r"a\b"), r"a\b");
/// assert_eq!(unescape(r"trailing\"), r"trailing\");
/// ```
pub fn unescape(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let first = match find_escape_sequence(bytes, 0) {
        Some(pos) => pos,
        None => return Cow::Borrowed(text),
    };

    let mut unescaped = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = first;
    loop {
        // Both bytes are ASCII, so these are char boundaries.
        unescaped.push_str(&text[copied..pos]);
        copied = pos + 1;

        match find_escape_sequence(bytes, pos + 2) {
            Some(next) => pos = next,
            None => break,
        }
    }
    unescaped.push_str(&text[copied..]);

    Cow::Owned(unescaped)
}

/// Position of the next `\` that starts a two-byte escape sequence.
fn find_escape_sequence(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while pos + 1 < bytes.len() {
        if bytes[pos] == ESCAPE && is_escapable(bytes[pos + 1]) {
            return Some(pos);
        }
        pos += 1;
    }
    None
}
