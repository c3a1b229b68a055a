use std::io;

/// Replace every UTF-16 code unit >= 128 with a `\uXXXX` escape (uppercase
/// hex). Characters outside the BMP become two escapes, one per surrogate.
pub fn escape_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            out.push_str(&format!("\\u{:04X}", unit));
        }
    }
}

/// Inverse of [`escape_unicode`] for text that contains no other backslash
/// sequences. Returns `None` on a malformed escape or an unpaired surrogate.
pub fn unescape_unicode(text: &str) -> Option<String> {
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("\\u") {
        units.extend(rest[..pos].encode_utf16());
        let hex = rest.get(pos + 2..pos + 6)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        units.push(u16::from_str_radix(hex, 16).ok()?);
        rest = &rest[pos + 6..];
    }
    units.extend(rest.encode_utf16());
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Writes text to an [`io::Write`] sink, escaping non-ASCII characters on the
/// way.
#[derive(Debug)]
pub struct EscapingWriter<W> {
    inner: W,
    buf: String,
}

impl<W: io::Write> EscapingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: String::new(),
        }
    }

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.buf.clear();
        push_escaped(&mut self.buf, text);
        self.inner.write_all(self.buf.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn escapes_bmp_and_supplementary_characters() {
        assert_eq!(escape_unicode("class Привет {}"), "class \\u041F\\u0440\\u0438\\u0432\\u0435\\u0442 {}");
        assert_eq!(escape_unicode("é"), "\\u00E9");
        assert_eq!(escape_unicode("\u{1F600}"), "\\uD83D\\uDE00");
        assert_eq!(escape_unicode("plain ascii\t\n"), "plain ascii\t\n");
    }

    #[test]
    fn writer_escapes_across_calls() {
        let mut writer = EscapingWriter::new(Vec::new());
        writer.write_str("a").unwrap();
        writer.write_str("ß").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), b"a\\u00DF".to_vec());
    }

    #[test]
    fn rejects_broken_escapes() {
        assert_eq!(unescape_unicode("\\u12"), None);
        assert_eq!(unescape_unicode("\\uZZZZ"), None);
        assert_eq!(unescape_unicode("\\uD83D"), None);
    }

    proptest! {
        #[test]
        fn escaping_round_trips(text in "[^\\\\]*") {
            let escaped = escape_unicode(&text);
            prop_assert!(escaped.is_ascii());
            prop_assert_eq!(unescape_unicode(&escaped), Some(text));
        }

        #[test]
        fn ascii_is_untouched(text in "[\\x00-\\x7F]*") {
            prop_assert_eq!(escape_unicode(&text), text);
        }
    }
}
