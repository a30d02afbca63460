use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use once_cell::sync::Lazy;

pub static KEYWORDS_MAPPING: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::default();
  map.insert("async", TT::KeywordAsync);
  map.insert("await", TT::KeywordAwait);
  map.insert("break", TT::KeywordBreak);
  map.insert("case", TT::KeywordCase);
  map.insert("catch", TT::KeywordCatch);
  map.insert("class", TT::KeywordClass);
  map.insert("const", TT::KeywordConst);
  map.insert("continue", TT::KeywordContinue);
  map.insert("delete", TT::KeywordDelete);
  map.insert("do", TT::KeywordDo);
  map.insert("else", TT::KeywordElse);
  map.insert("false", TT::LiteralFalse);
  map.insert("finally", TT::KeywordFinally);
  map.insert("for", TT::KeywordFor);
  map.insert("function", TT::KeywordFunction);
  map.insert("if", TT::KeywordIf);
  map.insert("in", TT::KeywordIn);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("let", TT::KeywordLet);
  map.insert("new", TT::KeywordNew);
  map.insert("null", TT::LiteralNull);
  map.insert("return", TT::KeywordReturn);
  map.insert("switch", TT::KeywordSwitch);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordThrow);
  map.insert("true", TT::LiteralTrue);
  map.insert("try", TT::KeywordTry);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("var", TT::KeywordVar);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordWhile);
  map
});

pub(crate) fn is_identifier_start(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

pub(crate) fn is_identifier_continue(b: u8) -> bool {
  is_identifier_start(b) || b.is_ascii_digit()
}

/// A hand-written maximal-munch lexer over the source bytes.
///
/// Template literals are lexed statefully: a backtick starts a template part scan, `${` suspends
/// it, and the matching `}` (tracked via `brace_depth`) resumes it. The parser therefore only ever
/// sees `LiteralTemplatePartString`/`LiteralTemplatePartStringEnd` tokens whose locations span the
/// raw segment between delimiters.
#[derive(Clone)]
pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  // Each entry is the `brace_depth` at which an open `${` substitution's template resumes.
  template_stack: Vec<usize>,
  brace_depth: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer {
      source,
      next: 0,
      template_stack: Vec::new(),
      brace_depth: 0,
    }
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.source[loc.0..loc.1]
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  fn at(&self, i: usize) -> u8 {
    self.source.as_bytes().get(i).copied().unwrap_or(0)
  }

  fn eof(&self) -> bool {
    self.next >= self.source.len()
  }

  fn token(&self, start: usize, preceded_by_line_terminator: bool, typ: TT) -> Token {
    Token {
      loc: Loc(start, self.next),
      preceded_by_line_terminator,
      typ,
    }
  }

  // Skips whitespace and comments. Returns whether at least one line terminator was skipped.
  fn skip_trivia(&mut self) -> bool {
    let mut saw_line_terminator = false;
    loop {
      match self.at(self.next) {
        b'\n' => {
          saw_line_terminator = true;
          self.next += 1;
        }
        b'\r' | b' ' | b'\t' | 0x0b | 0x0c => {
          self.next += 1;
        }
        b'/' if self.at(self.next + 1) == b'/' => {
          self.next += 2;
          while !self.eof() && self.at(self.next) != b'\n' {
            self.next += 1;
          }
        }
        b'/' if self.at(self.next + 1) == b'*' => {
          self.next += 2;
          loop {
            if self.eof() {
              break;
            }
            if self.at(self.next) == b'*' && self.at(self.next + 1) == b'/' {
              self.next += 2;
              break;
            }
            if self.at(self.next) == b'\n' {
              saw_line_terminator = true;
            }
            self.next += 1;
          }
        }
        _ => break,
      }
    }
    saw_line_terminator
  }

  pub fn next_token(&mut self) -> Token {
    let preceded = self.skip_trivia();
    let start = self.next;
    if self.eof() {
      return self.token(start, preceded, TT::EOF);
    }
    let b = self.at(self.next);

    if is_identifier_start(b) && !b.is_ascii_digit() {
      self.next += 1;
      while is_identifier_continue(self.at(self.next)) && !self.eof() {
        self.next += 1;
      }
      let name = &self.source[start..self.next];
      let typ = KEYWORDS_MAPPING
        .get(name)
        .copied()
        .unwrap_or(TT::Identifier);
      return self.token(start, preceded, typ);
    }

    if b.is_ascii_digit() || (b == b'.' && self.at(self.next + 1).is_ascii_digit()) {
      self.scan_number();
      return self.token(start, preceded, TT::LiteralNumber);
    }

    if b == b'"' || b == b'\'' {
      let typ = self.scan_string(b);
      return self.token(start, preceded, typ);
    }

    if b == b'`' {
      self.next += 1;
      return self.scan_template_part(preceded);
    }

    let typ = self.scan_punctuator(b);
    match typ {
      Some(typ) => self.token(start, preceded, typ),
      // `}` closing a `${` substitution resumes the template part scan instead of emitting a token.
      None => self.scan_template_part(preceded),
    }
  }

  // Returns None only when a `}` resumed an open template substitution.
  fn scan_punctuator(&mut self, b: u8) -> Option<TT> {
    let one = |lexer: &mut Self, tt| {
      lexer.next += 1;
      Some(tt)
    };
    match b {
      b'(' => one(self, TT::ParenthesisOpen),
      b')' => one(self, TT::ParenthesisClose),
      b'[' => one(self, TT::BracketOpen),
      b']' => one(self, TT::BracketClose),
      b'{' => {
        self.brace_depth += 1;
        one(self, TT::BraceOpen)
      }
      b'}' => {
        if self.template_stack.last() == Some(&self.brace_depth) {
          self.template_stack.pop();
          self.next += 1;
          return None;
        }
        self.brace_depth = self.brace_depth.saturating_sub(1);
        one(self, TT::BraceClose)
      }
      b';' => one(self, TT::Semicolon),
      b':' => one(self, TT::Colon),
      b',' => one(self, TT::Comma),
      b'~' => one(self, TT::Tilde),
      b'.' => {
        if self.at(self.next + 1) == b'.' && self.at(self.next + 2) == b'.' {
          self.next += 3;
          Some(TT::DotDotDot)
        } else {
          one(self, TT::Dot)
        }
      }
      b'?' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'?', _) => {
          self.next += 2;
          Some(TT::QuestionQuestion)
        }
        (b'.', b'[') => {
          self.next += 3;
          Some(TT::QuestionDotBracketOpen)
        }
        (b'.', b'(') => {
          self.next += 3;
          Some(TT::QuestionDotParenthesisOpen)
        }
        // `a ? .5 : b`: a digit after the dot means this is a conditional, not a chain link.
        (b'.', d) if !d.is_ascii_digit() => {
          self.next += 2;
          Some(TT::QuestionDot)
        }
        _ => one(self, TT::Question),
      },
      b'=' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'=', b'=') => {
          self.next += 3;
          Some(TT::EqualsEqualsEquals)
        }
        (b'=', _) => {
          self.next += 2;
          Some(TT::EqualsEquals)
        }
        (b'>', _) => {
          self.next += 2;
          Some(TT::EqualsChevronRight)
        }
        _ => one(self, TT::Equals),
      },
      b'!' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'=', b'=') => {
          self.next += 3;
          Some(TT::ExclamationEqualsEquals)
        }
        (b'=', _) => {
          self.next += 2;
          Some(TT::ExclamationEquals)
        }
        _ => one(self, TT::Exclamation),
      },
      b'+' => match self.at(self.next + 1) {
        b'+' => {
          self.next += 2;
          Some(TT::PlusPlus)
        }
        b'=' => {
          self.next += 2;
          Some(TT::PlusEquals)
        }
        _ => one(self, TT::Plus),
      },
      b'-' => match self.at(self.next + 1) {
        b'-' => {
          self.next += 2;
          Some(TT::HyphenHyphen)
        }
        b'=' => {
          self.next += 2;
          Some(TT::HyphenEquals)
        }
        _ => one(self, TT::Hyphen),
      },
      b'*' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'*', b'=') => {
          self.next += 3;
          Some(TT::AsteriskAsteriskEquals)
        }
        (b'*', _) => {
          self.next += 2;
          Some(TT::AsteriskAsterisk)
        }
        (b'=', _) => {
          self.next += 2;
          Some(TT::AsteriskEquals)
        }
        _ => one(self, TT::Asterisk),
      },
      b'/' => match self.at(self.next + 1) {
        b'=' => {
          self.next += 2;
          Some(TT::SlashEquals)
        }
        _ => one(self, TT::Slash),
      },
      b'%' => match self.at(self.next + 1) {
        b'=' => {
          self.next += 2;
          Some(TT::PercentEquals)
        }
        _ => one(self, TT::Percent),
      },
      b'&' => match self.at(self.next + 1) {
        b'&' => {
          self.next += 2;
          Some(TT::AmpersandAmpersand)
        }
        b'=' => {
          self.next += 2;
          Some(TT::AmpersandEquals)
        }
        _ => one(self, TT::Ampersand),
      },
      b'|' => match self.at(self.next + 1) {
        b'|' => {
          self.next += 2;
          Some(TT::BarBar)
        }
        b'=' => {
          self.next += 2;
          Some(TT::BarEquals)
        }
        _ => one(self, TT::Bar),
      },
      b'^' => match self.at(self.next + 1) {
        b'=' => {
          self.next += 2;
          Some(TT::CaretEquals)
        }
        _ => one(self, TT::Caret),
      },
      b'<' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'<', b'=') => {
          self.next += 3;
          Some(TT::ChevronLeftChevronLeftEquals)
        }
        (b'<', _) => {
          self.next += 2;
          Some(TT::ChevronLeftChevronLeft)
        }
        (b'=', _) => {
          self.next += 2;
          Some(TT::ChevronLeftEquals)
        }
        _ => one(self, TT::ChevronLeft),
      },
      b'>' => match (self.at(self.next + 1), self.at(self.next + 2)) {
        (b'>', b'>') => {
          self.next += 3;
          Some(TT::ChevronRightChevronRightChevronRight)
        }
        (b'>', b'=') => {
          self.next += 3;
          Some(TT::ChevronRightChevronRightEquals)
        }
        (b'>', _) => {
          self.next += 2;
          Some(TT::ChevronRightChevronRight)
        }
        (b'=', _) => {
          self.next += 2;
          Some(TT::ChevronRightEquals)
        }
        _ => one(self, TT::ChevronRight),
      },
      _ => {
        // Unknown byte; consume the whole char so the parser's error loc is sensible.
        let ch_len = self.source[self.next..]
          .chars()
          .next()
          .map(|c| c.len_utf8())
          .unwrap_or(1);
        self.next += ch_len;
        Some(TT::Invalid)
      }
    }
  }

  fn scan_number(&mut self) {
    let bytes = self.source.as_bytes();
    let radix_prefix = matches!(
      (self.at(self.next), self.at(self.next + 1)),
      (b'0', b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
    );
    if radix_prefix {
      self.next += 2;
      while self
        .at(self.next)
        .is_ascii_alphanumeric()
        || self.at(self.next) == b'_'
      {
        self.next += 1;
      }
      return;
    }
    while self.at(self.next).is_ascii_digit() || self.at(self.next) == b'_' {
      self.next += 1;
    }
    if self.at(self.next) == b'.' && self.at(self.next + 1).is_ascii_digit() {
      self.next += 1;
      while self.at(self.next).is_ascii_digit() || self.at(self.next) == b'_' {
        self.next += 1;
      }
    } else if self.at(self.next) == b'.' && self.next > 0 && bytes[self.next - 1].is_ascii_digit() {
      // Trailing dot as in `5.`; only when there are integer digits before it.
      self.next += 1;
    }
    if matches!(self.at(self.next), b'e' | b'E') {
      let mut i = self.next + 1;
      if matches!(self.at(i), b'+' | b'-') {
        i += 1;
      }
      if self.at(i).is_ascii_digit() {
        self.next = i;
        while self.at(self.next).is_ascii_digit() {
          self.next += 1;
        }
      }
    }
  }

  // Scans past the closing quote. The token loc includes both quotes; escapes are decoded by the
  // parser via `decode_escapes`.
  fn scan_string(&mut self, quote: u8) -> TT {
    self.next += 1;
    loop {
      if self.eof() {
        return TT::Invalid;
      }
      match self.at(self.next) {
        b'\\' => {
          self.next += 2;
        }
        b'\n' => {
          return TT::Invalid;
        }
        b if b == quote => {
          self.next += 1;
          return TT::LiteralString;
        }
        _ => {
          self.next += 1;
        }
      }
    }
  }

  // Scans a raw template segment starting at `self.next` (just past a backtick, `${`-closing `}`).
  // Emits a part token whose loc spans the raw segment only.
  fn scan_template_part(&mut self, preceded: bool) -> Token {
    let start = self.next;
    loop {
      if self.eof() {
        return self.token(start, preceded, TT::Invalid);
      }
      match self.at(self.next) {
        b'\\' => {
          self.next += 2;
        }
        b'`' => {
          let tok = Token {
            loc: Loc(start, self.next),
            preceded_by_line_terminator: preceded,
            typ: TT::LiteralTemplatePartStringEnd,
          };
          self.next += 1;
          return tok;
        }
        b'$' if self.at(self.next + 1) == b'{' => {
          let tok = Token {
            loc: Loc(start, self.next),
            preceded_by_line_terminator: preceded,
            typ: TT::LiteralTemplatePartString,
          };
          self.next += 2;
          self.template_stack.push(self.brace_depth);
          return tok;
        }
        _ => {
          self.next += 1;
        }
      }
    }
  }
}

/// Decodes the escape sequences of a string literal or template segment body.
pub fn decode_escapes(raw: &str, loc: Loc) -> SyntaxResult<String> {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars().peekable();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    let Some(esc) = chars.next() else {
      return Err(loc.error(SyntaxErrorType::InvalidCharacterEscape, None));
    };
    match esc {
      'n' => out.push('\n'),
      't' => out.push('\t'),
      'r' => out.push('\r'),
      'b' => out.push('\u{0008}'),
      'f' => out.push('\u{000c}'),
      'v' => out.push('\u{000b}'),
      '0' => out.push('\0'),
      '\n' => {}
      '\r' => {
        // Line continuation; swallow a following LF as well.
        if chars.peek() == Some(&'\n') {
          chars.next();
        }
      }
      'x' => {
        let hi = chars.next();
        let lo = chars.next();
        let (Some(hi), Some(lo)) = (hi, lo) else {
          return Err(loc.error(SyntaxErrorType::InvalidCharacterEscape, None));
        };
        let code = u32::from_str_radix(&format!("{}{}", hi, lo), 16)
          .map_err(|_| loc.error(SyntaxErrorType::InvalidCharacterEscape, None))?;
        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
      }
      'u' => {
        if chars.peek() == Some(&'{') {
          chars.next();
          let mut digits = String::new();
          loop {
            match chars.next() {
              Some('}') => break,
              Some(d) => digits.push(d),
              None => return Err(loc.error(SyntaxErrorType::InvalidCharacterEscape, None)),
            }
          }
          let code = u32::from_str_radix(&digits, 16)
            .map_err(|_| loc.error(SyntaxErrorType::InvalidCharacterEscape, None))?;
          out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
        } else {
          let mut digits = String::new();
          for _ in 0..4 {
            match chars.next() {
              Some(d) => digits.push(d),
              None => return Err(loc.error(SyntaxErrorType::InvalidCharacterEscape, None)),
            }
          }
          let code = u32::from_str_radix(&digits, 16)
            .map_err(|_| loc.error(SyntaxErrorType::InvalidCharacterEscape, None))?;
          out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
        }
      }
      other => out.push(other),
    }
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn types(source: &str) -> Vec<TT> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
      let tok = lexer.next_token();
      let done = tok.typ == TT::EOF;
      out.push(tok.typ);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn lexes_operators_with_maximal_munch() {
    assert_eq!(
      types("a **= b >>> c ?? d?.e"),
      vec![
        TT::Identifier,
        TT::AsteriskAsteriskEquals,
        TT::Identifier,
        TT::ChevronRightChevronRightChevronRight,
        TT::Identifier,
        TT::QuestionQuestion,
        TT::Identifier,
        TT::QuestionDot,
        TT::Identifier,
        TT::EOF,
      ]
    );
  }

  #[test]
  fn lexes_template_with_substitution() {
    assert_eq!(
      types("`a${ {b: 1} }c`"),
      vec![
        TT::LiteralTemplatePartString,
        TT::BraceOpen,
        TT::Identifier,
        TT::Colon,
        TT::LiteralNumber,
        TT::BraceClose,
        TT::LiteralTemplatePartStringEnd,
        TT::EOF,
      ]
    );
  }

  #[test]
  fn tracks_line_terminators_and_comments() {
    let mut lexer = Lexer::new("a // x\nb /* y\n */ c");
    assert!(!lexer.next_token().preceded_by_line_terminator);
    assert!(lexer.next_token().preceded_by_line_terminator);
    assert!(lexer.next_token().preceded_by_line_terminator);
  }

  #[test]
  fn decodes_escape_sequences() {
    let loc = Loc(0, 0);
    assert_eq!(decode_escapes(r"a\nb", loc).unwrap(), "a\nb");
    assert_eq!(decode_escapes(r"A\x42", loc).unwrap(), "AB");
    assert_eq!(decode_escapes(r"\u{1F600}", loc).unwrap(), "\u{1F600}");
    assert!(decode_escapes(r"\xZZ", loc).is_err());
  }
}
