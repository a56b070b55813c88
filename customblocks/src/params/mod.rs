//! Header parameters: lexing the text after the block type and splitting it
//! into positional values and keyword values.

pub mod lexer;
mod unescape;

pub use lexer::{Quoting, RawToken, tokenize};
pub use unescape::unescape;

/// An insertion-ordered map from parameter name to value.
///
/// Header keywords keep the order they were written in, which is also the
/// order generators emit them as attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Keywords<V = String> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Keywords<V> {
    fn default() -> Self {
        Keywords {
            entries: Vec::new(),
        }
    }
}

impl<V> Keywords<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace in place. Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> IntoIterator for Keywords<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Keywords<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keywords = Keywords::new();
        for (k, v) in iter {
            keywords.insert(k, v);
        }
        keywords
    }
}

/// Parameters of one block header, before any generator has seen them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    pub positional: Vec<String>,
    pub keywords: Keywords,
    /// Keys given more than once. The last value written is kept.
    pub duplicates: Vec<String>,
}

/// Split raw tokens into positional and keyword parameters,
/// decoding quoted values.
pub fn classify(tokens: Vec<RawToken<'_>>) -> ParamSet {
    let mut params = ParamSet::default();

    for token in tokens {
        let value = decode(&token);
        match token.key {
            Some(key) => {
                if params.keywords.insert(key, value).is_some()
                    && !params.duplicates.iter().any(|d| d == key)
                {
                    params.duplicates.push(key.to_string());
                }
            }
            None => params.positional.push(value),
        }
    }

    params
}

/// Lex and classify a header's parameter text.
pub fn parse_params(input: &str) -> ParamSet {
    classify(tokenize(input))
}

fn decode(token: &RawToken<'_>) -> String {
    match token.quoting {
        Quoting::Bare => token.raw.to_string(),
        Quoting::Single | Quoting::Double => {
            let body = &token.raw[1..token.raw.len() - 1];
            unescape(body)
        }
    }
}
