use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;

/// A half-open location within the source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  /// Computes the 1-based line and column of this location's start within `source`.
  ///
  /// The column counts characters, not bytes, so it lines up with what an editor
  /// displays for non-ASCII source.
  pub fn line_col(&self, source: &str) -> (usize, usize) {
    let upto = &source[..min(self.0, source.len())];
    let line = upto.bytes().filter(|b| *b == b'\n').count() + 1;
    let line_start = upto.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = upto[line_start..].chars().count() + 1;
    (line, col)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_col_is_one_based() {
    let source = "let a = 1;\nlet b = ;";
    assert_eq!(Loc(0, 3).line_col(source), (1, 1));
    assert_eq!(Loc(4, 5).line_col(source), (1, 5));
    assert_eq!(Loc(11, 14).line_col(source), (2, 1));
    assert_eq!(Loc(19, 20).line_col(source), (2, 9));
  }

  #[test]
  fn extend_covers_both_ranges() {
    let mut loc = Loc(4, 6);
    loc.extend(Loc(10, 12));
    assert_eq!(loc, Loc(4, 12));
    loc.extend(Loc(0, 2));
    assert_eq!(loc, Loc(0, 12));
  }
}
