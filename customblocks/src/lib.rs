//! Custom blocks for Markdown.
//!
//! A custom block starts with a header line `::: type params` and owns the
//! indented lines that follow it:
//!
//! ```text
//! ::: note "Careful" style="float:left"
//!     Body **Markdown**, parsed recursively.
//! ```
//!
//! The header is matched to a [`generator::Generator`] through a
//! [`generator::Registry`], its parameters are bound to the generator's
//! signature, and the generator output is attached to the output tree.

pub mod block;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod error;
pub mod generator;
pub mod html;
pub mod params;
pub mod parser;

pub use config::ExtensionConfig;
pub use convert::{Conversion, Converter};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ConvertError, ResolveError};
pub use html::{Element, Node};
