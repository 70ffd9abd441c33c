//! Small utility helpers used across modules.

/// Trim a template sentence; `None` when nothing is left.
pub fn clean_sentence(s: &str) -> Option<String> {
  let t = s.trim();
  if t.is_empty() { None } else { Some(t.to_string()) }
}

/// Log-safe truncation for long comments. Cuts on a char boundary so Hangul
/// text never splits mid-codepoint.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  match s.char_indices().nth(max_chars) {
    None => s.to_string(),
    Some((idx, _)) => format!("{}… ({} bytes total)", &s[..idx], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trunc_respects_char_boundaries() {
    assert_eq!(trunc_for_log("가나다", 5), "가나다");
    assert_eq!(trunc_for_log("가나다", 2), "가나… (9 bytes total)");
  }

  #[test]
  fn blank_sentences_are_rejected() {
    assert_eq!(clean_sentence("  "), None);
    assert_eq!(clean_sentence(" 잘함. ").as_deref(), Some("잘함."));
  }
}
