use std::fmt;

/// A registry entry could not be turned into a generator.
/// These are configuration mistakes, not document problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference is not of the form `module:symbol`.
    MissingSeparator(String),
    ModuleNotFound(String),
    AttributeNotFound { module: String, symbol: String },
    /// The symbol exists but is not a generator.
    NotCallable { module: String, symbol: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::MissingSeparator(reference) => write!(
                f,
                "invalid generator reference '{}': expected 'module:symbol'",
                reference
            ),
            ResolveError::ModuleNotFound(module) => {
                write!(f, "generator module not found: {}", module)
            }
            ResolveError::AttributeNotFound { module, symbol } => {
                write!(f, "module '{}' has no attribute '{}'", module, symbol)
            }
            ResolveError::NotCallable { module, symbol } => {
                write!(f, "'{}:{}' is not a generator", module, symbol)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Fatal conversion errors. Everything else is reported as a diagnostic.
#[derive(Debug)]
pub enum ConvertError {
    Resolve(ResolveError),
    /// A block accepted by `test` no longer holds a header in `run`.
    HeaderMismatch(String),
    NestingTooDeep(usize),
    /// A generator gave up on its block.
    Generator { block_type: String, message: String },
}

impl ConvertError {
    pub fn generator(block_type: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::Generator {
            block_type: block_type.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Resolve(err) => write!(f, "{}", err),
            ConvertError::HeaderMismatch(block) => {
                write!(f, "internal error: block header vanished from {:?}", block)
            }
            ConvertError::NestingTooDeep(depth) => {
                write!(f, "blocks nested deeper than {} levels", depth)
            }
            ConvertError::Generator {
                block_type,
                message,
            } => write!(f, "generator for '{}' failed: {}", block_type, message),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolveError> for ConvertError {
    fn from(err: ResolveError) -> Self {
        ConvertError::Resolve(err)
    }
}
