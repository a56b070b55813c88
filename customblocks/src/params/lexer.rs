/// How a token's value was written in the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Bare,
    Single,
    Double,
}

/// One header parameter as written: an optional `key=` and the raw value,
/// quotes still attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub key: Option<&'a str>,
    pub raw: &'a str,
    pub quoting: Quoting,
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Split the text following the block type into raw tokens.
///
/// Tokens are separated by whitespace. A quoted value only counts as quoted
/// when its closing quote is followed by whitespace or the end of input;
/// otherwise the whole run of non-whitespace is taken as a bare value, so
/// `"a"b` or an unterminated `"a` are bare tokens.
pub fn tokenize(input: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let (token, consumed) = lex_token(rest);
        tokens.push(token);
        rest = rest[consumed..].trim_start();
    }

    tokens
}

fn lex_token(s: &str) -> (RawToken<'_>, usize) {
    if let Some(eq) = key_end(s) {
        let value = &s[eq + 1..];
        // `key=` with nothing attached is not a keyword; it falls through as a bare value
        if value.chars().next().is_some_and(|c| !c.is_whitespace()) {
            let (quoting, len) = lex_value(value);
            let token = RawToken {
                key: Some(&s[..eq]),
                raw: &value[..len],
                quoting,
            };
            return (token, eq + 1 + len);
        }
    }

    let (quoting, len) = lex_value(s);
    let token = RawToken {
        key: None,
        raw: &s[..len],
        quoting,
    };
    (token, len)
}

/// Byte offset of the `=` ending a leading key, if `s` starts with one.
fn key_end(s: &str) -> Option<usize> {
    let end = s.find(|c: char| !is_name_char(c))?;
    if end > 0 && s[end..].starts_with('=') {
        Some(end)
    } else {
        None
    }
}

fn lex_value(s: &str) -> (Quoting, usize) {
    let quoting = match s.chars().next() {
        Some('"') => Quoting::Double,
        Some('\'') => Quoting::Single,
        _ => Quoting::Bare,
    };

    if quoting != Quoting::Bare {
        if let Some(end) = closing_quote(s) {
            if s[end..].chars().next().is_none_or(char::is_whitespace) {
                return (quoting, end);
            }
        }
    }

    (Quoting::Bare, s.find(char::is_whitespace).unwrap_or(s.len()))
}

/// Offset just past the quote closing the one at the start of `s`.
fn closing_quote(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, quote) = chars.next()?;
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            return Some(i + c.len_utf8());
        }
    }
    None
}
