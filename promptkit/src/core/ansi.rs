/// One segment of rendered prompt output: an opaque style tag and the
/// text it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub style: String,
    pub text: String,
}

impl StyledToken {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }
}

/// Re-split style-tagged prompt text around raw SGR escape sequences.
///
/// Renderers that take (style, text) pairs choke on escape bytes left
/// inside the text, so each input token is split at every SGR escape
/// (`ESC [` parameters `m`). The escape bytes are dropped — their
/// styling effect is not modeled — and every resulting segment keeps
/// the original token's style tag. Segments made empty by a leading,
/// trailing, or doubled escape are kept, so callers can still zip the
/// output against positional data: a token with n escapes always
/// yields n + 1 segments, and a token without any yields itself.
pub fn tokenize_ansi(tokens: &[StyledToken]) -> Vec<StyledToken> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        for segment in split_sgr(&token.text) {
            out.push(StyledToken::new(token.style.clone(), segment));
        }
    }
    out
}

/// Split `text` at each SGR escape sequence, dropping the escapes.
fn split_sgr(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some((start, end)) = find_sgr(rest) {
        segments.push(rest[..start].to_string());
        rest = &rest[end..];
    }
    segments.push(rest.to_string());
    segments
}

/// Byte range of the first SGR escape sequence in `s`, if any.
/// Unterminated or non-SGR escapes are left alone as literal text.
fn find_sgr(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut from = 0;
    while let Some(pos) = s[from..].find('\x1b').map(|i| from + i) {
        if let Some(end) = sgr_end(bytes, pos) {
            return Some((pos, end));
        }
        from = pos + 1;
    }
    None
}

/// End (exclusive) of the SGR sequence starting at `start`, which must
/// point at ESC. Parameters are digits, `;` and `:`, closed by `m`.
fn sgr_end(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start + 1) != Some(&b'[') {
        return None;
    }
    let mut i = start + 2;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' | b';' | b':' => i += 1,
            b'm' => return Some(i + 1),
            _ => return None,
        }
    }
    None
}
