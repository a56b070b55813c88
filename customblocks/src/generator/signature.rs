use std::fmt;

/// How a generator parameter may receive its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Receives the block context; never matched against header values.
    Context,
    PositionalOnly,
    KeywordOnly,
    /// By keyword first, then by position.
    Either,
    /// Catch-all for unmatched positional values.
    VarPositional,
    /// Catch-all for unmatched keywords.
    VarKeyword,
}

/// A value bound to a generator parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Flag(bool),
    None,
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truth value. Text is false when empty or one of `false`, `no`,
    /// `off`, `0` (case-insensitive).
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Flag(b) => *b,
            ParamValue::None => false,
            ParamValue::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                !matches!(s.as_str(), "" | "false" | "no" | "off" | "0")
            }
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Flag(b) => write!(f, "{}", b),
            ParamValue::None => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Flag(b)
    }
}

/// One declared generator parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub mode: FillMode,
    pub default: Option<ParamValue>,
    /// Declared boolean even without a boolean default.
    pub boolean: bool,
}

impl Param {
    fn with_mode(name: impl Into<String>, mode: FillMode) -> Self {
        Param {
            name: name.into(),
            mode,
            default: None,
            boolean: false,
        }
    }

    pub fn context() -> Self {
        Self::with_mode("ctx", FillMode::Context)
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::with_mode(name, FillMode::PositionalOnly)
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::with_mode(name, FillMode::KeywordOnly)
    }

    pub fn either(name: impl Into<String>) -> Self {
        Self::with_mode(name, FillMode::Either)
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::with_mode(name, FillMode::VarPositional)
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::with_mode(name, FillMode::VarKeyword)
    }

    /// A keyword-only boolean with a default, written `name` or `noname` in headers.
    pub fn flag(name: impl Into<String>, default: bool) -> Self {
        Self::keyword(name).default(default)
    }

    pub fn default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Default to "no value" rather than leaving the parameter mandatory.
    pub fn optional(mut self) -> Self {
        self.default = Some(ParamValue::None);
        self
    }

    pub fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    pub fn is_context(&self) -> bool {
        self.mode == FillMode::Context || self.name == "ctx"
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.mode, FillMode::VarPositional | FillMode::VarKeyword)
    }

    /// Whether bare `name` / `noname` header tokens set this parameter.
    pub fn is_flag(&self) -> bool {
        !self.is_context()
            && !self.is_variadic()
            && (self.boolean || matches!(self.default, Some(ParamValue::Flag(_))))
    }

    pub fn accepts_keyword(&self) -> bool {
        matches!(self.mode, FillMode::KeywordOnly | FillMode::Either)
    }

    pub fn accepts_position(&self) -> bool {
        matches!(self.mode, FillMode::PositionalOnly | FillMode::Either)
    }
}

/// The declared parameter table of a generator, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Shorthand for a leading context parameter.
    pub fn context(self) -> Self {
        self.param(Param::context())
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Signature {
            params: iter.into_iter().collect(),
        }
    }
}
