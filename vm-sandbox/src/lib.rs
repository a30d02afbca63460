//! Sandboxed evaluator for a restricted JavaScript subset.
//!
//! A host passes [`evaluate`] a source string, a [`Context`] of bindings (data values and
//! [`NativeFunction`] callables), and a set of [`VmOptions`] resource limits; it gets back the
//! value of the last evaluated top-level statement. Untrusted code runs under:
//! - a wall-clock time budget ([`VmOptions::timeout`]),
//! - a cooperative abort flag ([`VmOptions::abort_flag`], or an [`AbortHandle`]),
//! - a script-function call-depth bound ([`VmOptions::max_call_depth`]),
//! - an optional `while`-statement gate ([`VmOptions::disable_while_statements`]).
//!
//! Guard checks run at script-function entry and before each `while` iteration; straight-line
//! code between those points cannot be interrupted, so a long expression with no call or loop may
//! overrun the budget by one step. Hosts needing tighter bounds should wrap evaluation in their
//! own watchdog.
//!
//! Context values are shared by reference: scripts observe and mutate host arrays and objects in
//! place. The host must not mutate them concurrently with evaluation.
//!
//! ```
//! use vm_sandbox::{evaluate, Context, Value, VmOptions};
//!
//! let mut context = Context::default();
//! context.insert("base".to_string(), Value::Number(40.0));
//! let result = evaluate("base + 2", &context, &VmOptions::default()).unwrap();
//! assert_eq!(result, Value::Number(42.0));
//! ```

mod env;
mod error;
mod exec;
mod function;
mod host;
mod object;
mod ops;
mod value;
mod vm;

pub use crate::env::Env;
pub use crate::error::VmError;
pub use crate::function::JsFunction;
pub use crate::function::NativeFn;
pub use crate::function::NativeFunction;
pub use crate::host::Context;
pub use crate::object::JsArray;
pub use crate::object::JsObject;
pub use crate::value::Value;
pub use crate::vm::AbortHandle;
pub use crate::vm::Vm;
pub use crate::vm::VmOptions;
pub use parse_sandbox::ast::node::Node;
pub use parse_sandbox::ast::stx::TopLevel;
pub use parse_sandbox::parse::ParseOptions;

use crate::exec::Evaluator;

/// Parses `source` at the sandbox's fixed language level, returning the AST or a syntax error
/// carrying line/column information.
pub fn validate(source: &str, options: ParseOptions) -> Result<Node<TopLevel>, VmError> {
  parse_sandbox::parse_with_options(source, options)
    .map_err(|error| VmError::from_syntax(error, source))
}

/// Parses and runs `source` against a top-level frame seeded from `context`.
///
/// Returns the value of the last evaluated top-level statement, or the value of a top-level
/// `return` when [`VmOptions::allow_return_outside_function`] is set. Two back-to-back
/// evaluations with fresh contexts are fully independent; there is no process-wide state.
pub fn evaluate(source: &str, context: &Context, options: &VmOptions) -> Result<Value, VmError> {
  tracing::debug!(source_len = source.len(), "evaluating sandboxed script");
  let top = validate(source, ParseOptions {
    allow_return_outside_function: options.allow_return_outside_function,
  })?;

  let vm = Vm::new(options);
  let env = Env::new();
  host::seed_env(&env, context)?;

  let result = Evaluator::new(&vm).eval_program(&top, &env);
  match &result {
    Ok(_) => tracing::trace!("evaluation completed"),
    Err(error) => tracing::debug!(%error, "evaluation failed"),
  }
  result
}
