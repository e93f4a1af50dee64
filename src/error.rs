//! Error types shared by the resource and layout pipelines.

use crate::parser::TypeNameError;
use crate::rclass::ParserType;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AaptError> = std::result::Result<T, E>;

/// Fatal conditions. Any of these aborts the whole invocation.
#[derive(Error, Diagnostic, Debug)]
pub enum AaptError {
    #[error("Malformed type expression in <{element}> of {}", file.display())]
    #[diagnostic(code(aapt::malformed_type))]
    MalformedTypeExpression {
        file: PathBuf,
        element: String,
        #[source]
        source: TypeNameError,
    },

    #[error("<{element}> is missing required attribute `{attribute}` in {}", file.display())]
    #[diagnostic(code(aapt::missing_attribute))]
    MissingRequiredAttribute {
        file: PathBuf,
        element: String,
        attribute: &'static str,
    },

    #[error("Missing implementation: no parser registered for {0:?}")]
    #[diagnostic(
        code(aapt::missing_parser),
        help("every ParserType must be registered in ParserRegistry")
    )]
    MissingParserImplementation(ParserType),

    #[error("Unknown resource type `{0}`")]
    #[diagnostic(code(aapt::unknown_resource_type))]
    UnknownResourceKind(String),

    #[error("Malformed symbol line `{0}`")]
    #[diagnostic(
        code(aapt::malformed_symbol_line),
        help("expected `<int|int[]> <type> <name> <value...>`")
    )]
    MalformedSymbolLine(String),

    #[error("Failed to parse {}", file.display())]
    #[diagnostic(code(aapt::parse_failure))]
    ParseFailure {
        file: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Invalid class info {}", path.display())]
    #[diagnostic(code(aapt::invalid_class_info))]
    InvalidClassInfo {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}", path.display())]
    #[diagnostic(code(aapt::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AaptError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AaptError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(file: impl Into<PathBuf>, source: impl Into<quick_xml::Error>) -> Self {
        AaptError::ParseFailure {
            file: file.into(),
            source: source.into(),
        }
    }
}

/// Read a whole file, tagging failures with the path.
pub fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AaptError::io(path, e))
}
