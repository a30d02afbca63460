use parse_sandbox::error::SyntaxError;

/// Errors surfaced to the embedding host.
///
/// Every variant renders as a single human-readable message. Internal control-flow signals
/// (`return` unwinding, safe-navigation short-circuits) are not errors and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VmError {
  /// The parser rejected the source. The message embeds 1-based line/column information.
  #[error("Syntax error at {line}:{column}: {message}")]
  Syntax {
    message: String,
    line: usize,
    column: usize,
  },

  // Name resolution.
  #[error("Unknown variable {0}")]
  UnknownVariable(String),
  #[error("{0} is already declared")]
  AlreadyDeclared(String),
  #[error("{0} is unknown")]
  UnknownBinding(String),

  // Type errors.
  #[error("{0} is not a function")]
  NotAFunction(String),
  #[error("Cannot read properties of {kind} (reading '{property}')")]
  NullishMemberRead {
    kind: &'static str,
    property: String,
  },
  #[error("Cannot set properties of {kind} (setting '{property}')")]
  NullishMemberWrite {
    kind: &'static str,
    property: String,
  },
  #[error("Cannot redefine property: {0}")]
  CannotRedefine(String),
  #[error("{0} is not iterable")]
  NotIterable(String),
  #[error("Cannot delete {0}")]
  CannotDelete(&'static str),

  // Unsupported language features.
  #[error("Unknown variable declaration {0}")]
  UnsupportedPattern(&'static str),
  #[error("Async functions are not supported")]
  AsyncUnsupported,
  #[error("Unknown node {0}")]
  UnsupportedNode(&'static str),

  // Resource guards.
  #[error("Execution timed out")]
  TimedOut,
  #[error("Execution aborted")]
  Aborted,
  #[error("Maximum stack size exceeded: {0}")]
  StackExceeded(usize),
  #[error("While statements are not available")]
  WhileUnavailable,
}

impl VmError {
  /// Wraps a parser error, rendering its position against the source it came from.
  pub fn from_syntax(error: SyntaxError, source: &str) -> VmError {
    let (line, column) = error.loc.line_col(source);
    VmError::Syntax {
      message: error.message(),
      line,
      column,
    }
  }
}
