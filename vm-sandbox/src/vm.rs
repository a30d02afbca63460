use crate::error::VmError;
use std::cell::Cell;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Per-evaluation options supplied by the embedding host.
#[derive(Debug, Clone)]
pub struct VmOptions {
  /// Wall-clock execution budget. `None` means unlimited.
  pub timeout: Option<Duration>,
  /// Maximum script-function call depth; checked on every function entry.
  pub max_call_depth: usize,
  /// Rejects any `while` statement before its condition is evaluated.
  pub disable_while_statements: bool,
  /// Permits a top-level `return` statement, whose value becomes the program result.
  pub allow_return_outside_function: bool,
  /// Optional shared abort flag to observe for cooperative cancellation.
  ///
  /// If provided, the evaluator observes this flag directly, so hosts can cancel execution from
  /// another thread by setting it to `true`. Otherwise the evaluation owns a fresh flag,
  /// reachable through [`Vm::abort_handle`].
  pub abort_flag: Option<Arc<AtomicBool>>,
}

impl Default for VmOptions {
  fn default() -> Self {
    Self {
      timeout: None,
      max_call_depth: 1024,
      disable_while_statements: false,
      allow_return_outside_function: false,
      abort_flag: None,
    }
  }
}

/// A cloneable host handle that requests cooperative abort of an evaluation.
///
/// Aborting takes effect at the next resource-guard check; the script then unwinds with
/// [`VmError::Aborted`]. Handles stay valid (and inert) after evaluation ends.
#[derive(Debug, Clone)]
pub struct AbortHandle {
  aborted: Arc<AtomicBool>,
}

impl AbortHandle {
  pub fn abort(&self) {
    self.aborted.store(true, Ordering::Relaxed);
  }

  pub fn is_aborted(&self) -> bool {
    self.aborted.load(Ordering::Relaxed)
  }
}

/// Per-evaluation resource-guard state: deadline, abort flag, call depth, and the while gate.
///
/// Guard checks run at script-function entry and before each `while` iteration. Straight-line code
/// between those points is not interruptible; a long expression with no call or loop can overrun
/// the budget by one step.
#[derive(Debug)]
pub struct Vm {
  deadline: Option<Instant>,
  // Shared with every AbortHandle, and with the host's own flag when one was supplied through
  // VmOptions::abort_flag.
  aborted: Arc<AtomicBool>,
  call_depth: Cell<usize>,
  max_call_depth: usize,
  disable_while_statements: bool,
}

/// RAII guard returned by [`Vm::enter_call`]; decrements the call depth on all exits (success,
/// error, and `return` unwinding).
pub(crate) struct CallDepthGuard<'a> {
  vm: &'a Vm,
}

impl Drop for CallDepthGuard<'_> {
  fn drop(&mut self) {
    self.vm.call_depth.set(self.vm.call_depth.get() - 1);
  }
}

impl Vm {
  pub fn new(options: &VmOptions) -> Vm {
    let aborted = options
      .abort_flag
      .clone()
      .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
    let deadline = options
      .timeout
      .and_then(|timeout| Instant::now().checked_add(timeout));
    Vm {
      deadline,
      aborted,
      call_depth: Cell::new(0),
      max_call_depth: options.max_call_depth,
      disable_while_statements: options.disable_while_statements,
    }
  }

  /// A handle the host can move to another thread to cancel this evaluation.
  pub fn abort_handle(&self) -> AbortHandle {
    AbortHandle {
      aborted: self.aborted.clone(),
    }
  }

  pub(crate) fn while_statements_disabled(&self) -> bool {
    self.disable_while_statements
  }

  /// The resource-guard check: time budget first, then the abort flag.
  pub fn check(&self) -> Result<(), VmError> {
    if let Some(deadline) = self.deadline {
      if Instant::now() >= deadline {
        tracing::debug!("wall-clock budget exhausted");
        return Err(VmError::TimedOut);
      }
    }
    if self.aborted.load(Ordering::Relaxed) {
      tracing::debug!("host abort flag observed");
      return Err(VmError::Aborted);
    }
    Ok(())
  }

  /// Increments the call depth, failing once it would exceed the configured maximum.
  pub(crate) fn enter_call(&self) -> Result<CallDepthGuard<'_>, VmError> {
    let depth = self.call_depth.get() + 1;
    if depth > self.max_call_depth {
      return Err(VmError::StackExceeded(self.max_call_depth));
    }
    self.call_depth.set(depth);
    Ok(CallDepthGuard { vm: self })
  }
}
