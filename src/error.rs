//! # Error and Result for this crate
//!
//! This crate defines a common [Error] structure that's used by the marshaller, the unmarshaller
//! and the schema context. Every failure is fatal for the marshal or unmarshal call in progress,
//! there is no partial-result mode.

use std::{error, fmt, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. The context string is
/// populated with the offending JSON reference address or type tag, so that a failure deep inside
/// a document can be traced back to the node that caused it.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits. It also implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// The document is malformed: a missing or unrecognized type tag, the wrong number of schema
    /// entries, or a reference path that does not resolve.
    Format,
    /// A type tag that has no registered constructor, or a named lookup that found nothing.
    UnknownType,
    /// A node was referenced that was never registered with the current context.
    Identity,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: ErrorType) -> Self {
        Self {
            message: message.into(),
            context: None,
            error_type,
        }
    }

    /// Create a new Error with a main message and a context string from two input strings.
    pub fn new_with_context<S: Into<String>, C: Into<String>>(
        message: S,
        context: C,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            context: Some(context.into()),
            error_type,
        }
    }

    #[inline]
    pub(crate) fn format<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::new_with_context(message, context, ErrorType::Format)
    }

    #[inline]
    pub(crate) fn unknown_type<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::new_with_context(message, context, ErrorType::UnknownType)
    }

    #[inline]
    pub(crate) fn identity<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::new_with_context(message, context, ErrorType::Identity)
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the address or type tag the error was raised for, if any.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the category of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = match self.error_type {
            ErrorType::Format => format!("Format Error: {}", self.message),
            ErrorType::UnknownType => format!("Unknown Type Error: {}", self.message),
            ErrorType::Identity => format!("Identity Error: {}", self.message),
        };

        match self.context {
            Some(ref context) if include_ctx => format!("{}\n  at {}", formatted, context),
            _ => formatted,
        }
    }
}

/// A line and column pair pointing into a query source, as reported by query collaborators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_with_context() {
        let error = Error::format("Expected 1 schema, found: 2", "#/__schemas/");
        assert_eq!(error.error_type(), ErrorType::Format);
        assert_eq!(
            error.print(true),
            "Format Error: Expected 1 schema, found: 2\n  at #/__schemas/"
        );
        assert_eq!(error.print(false), "Format Error: Expected 1 schema, found: 2");
    }

    #[test]
    fn print_without_context() {
        let error = Error::new("Unknown node", ErrorType::Identity);
        assert_eq!(error.context(), None);
        assert_eq!(error.to_string(), "Identity Error: Unknown node");
    }
}
