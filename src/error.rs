// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::path::PathBuf;

use snafu::Snafu;

use crate::parser::*;

/// A Dockerfile parsing error.
///
/// Every error belongs to exactly one [`ErrorKind`], available via
/// [`Error::kind()`], so callers can tell an unreadable file apart from a
/// syntax problem without inspecting messages.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
  #[snafu(display(
    "could not read Dockerfile {}: {}", path.display(), source
  ))]
  AccessError {
    path: PathBuf,
    source: std::io::Error
  },

  #[snafu(display(
    "could not read Dockerfile: {}", source
  ))]
  ReadError {
    source: std::io::Error
  },

  /// A line-level malformation: unterminated continuations or heredocs,
  /// invalid parser directives, or a file without instructions.
  #[snafu(display(
    "syntax error on line {}: {}", line, message
  ))]
  StructuralError {
    line: usize,
    message: String
  },

  /// A malformed instruction: invalid JSON-form arguments, a nested
  /// `ONBUILD`, or key/value arguments missing their `=`.
  #[snafu(display(
    "invalid instruction on line {}: {}", line, message
  ))]
  FormError {
    line: usize,
    message: String
  }
}

/// The three error tiers a caller may branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// The Dockerfile could not be opened or read.
  Access,

  /// The text could not be split into logical instructions.
  Structural,

  /// A logical instruction could not be turned into an `Instruction`.
  Form
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::AccessError { .. } | Error::ReadError { .. } => ErrorKind::Access,
      Error::StructuralError { .. } => ErrorKind::Structural,
      Error::FormError { .. } => ErrorKind::Form
    }
  }

  /// The 1-based source line at which the offending construct began, if this
  /// is a parse error.
  pub fn line(&self) -> Option<usize> {
    match self {
      Error::StructuralError { line, .. } | Error::FormError { line, .. } => {
        Some(*line)
      },
      _ => None
    }
  }
}

/// A Dockerfile parsing Result.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Helper to create an unexpected token error.
pub(crate) fn unexpected_token(record: Pair, line: usize) -> Error {
  Error::FormError {
    line,
    message: format!("unexpected token {:?}", record.as_rule())
  }
}
