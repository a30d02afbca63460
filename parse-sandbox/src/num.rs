fn strip_numeric_separators(raw: &str) -> String {
  raw.chars().filter(|c| *c != '_').collect()
}

fn parse_integer_literal(raw_digits: &str, radix: u32) -> Option<f64> {
  let cleaned = strip_numeric_separators(raw_digits);
  if cleaned.is_empty() {
    return None;
  }
  // Accumulate in f64 so literals beyond u64 range degrade the way JS numbers do.
  let radix_f = radix as f64;
  let mut value = 0.0f64;
  for b in cleaned.bytes() {
    let digit = match b {
      b'0'..=b'9' => (b - b'0') as u32,
      b'a'..=b'f' => (b - b'a' + 10) as u32,
      b'A'..=b'F' => (b - b'A' + 10) as u32,
      _ => return None,
    };
    if digit >= radix {
      return None;
    }
    value = value * radix_f + digit as f64;
  }
  Some(value)
}

fn parse_decimal_literal(raw: &str) -> Option<f64> {
  let mut cleaned = strip_numeric_separators(raw);
  if cleaned.starts_with('.') {
    cleaned.insert(0, '0');
  }
  if cleaned.ends_with('.') {
    cleaned.push('0');
  }
  // `5.e3` is valid source; `5.0e3` is what Rust's parser wants.
  if let Some(e) = cleaned.find(['e', 'E']) {
    if cleaned[..e].ends_with('.') {
      cleaned.insert(e, '0');
    }
  }
  // Reject forms Rust accepts but a numeric literal cannot be ("inf", "NaN", leading sign).
  if !cleaned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
    return None;
  }
  cleaned.parse::<f64>().ok()
}

/// Parse a source text numeric literal (with radix prefixes and `_` separators) into its value.
pub fn parse_number_literal(raw: &str) -> Option<f64> {
  if let Some(rest) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
    return parse_integer_literal(rest, 2);
  }
  if let Some(rest) = raw.strip_prefix("0o").or_else(|| raw.strip_prefix("0O")) {
    return parse_integer_literal(rest, 8);
  }
  if let Some(rest) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
    return parse_integer_literal(rest, 16);
  }
  parse_decimal_literal(raw)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_radix_prefixes() {
    assert_eq!(parse_number_literal("0x10"), Some(16.0));
    assert_eq!(parse_number_literal("0b101"), Some(5.0));
    assert_eq!(parse_number_literal("0o17"), Some(15.0));
    assert_eq!(parse_number_literal("0xZ"), None);
  }

  #[test]
  fn parses_decimal_forms() {
    assert_eq!(parse_number_literal("1"), Some(1.0));
    assert_eq!(parse_number_literal(".5"), Some(0.5));
    assert_eq!(parse_number_literal("5."), Some(5.0));
    assert_eq!(parse_number_literal("5.e2"), Some(500.0));
    assert_eq!(parse_number_literal("1_000"), Some(1000.0));
    assert_eq!(parse_number_literal("1e-3"), Some(0.001));
  }
}
