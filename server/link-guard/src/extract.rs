//! Candidate URL extraction from free text.

use regex::Regex;
use std::sync::LazyLock;

/// Scheme-prefixed token, or a bare `label.tld[/path]` token. Leftmost match wins.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?i)(https?://[^\s"'<>]+)|([a-z0-9-]+\.[a-z]{2,}(/[^\s"'<>]*)?)"#)
    .expect("url pattern compiles")
});

/// First URL-looking token in `text`, or `None`.
///
/// Only one candidate is ever returned, even if the text holds several.
/// Bare domains get `http://` prepended; they are never upgraded to `https://`.
pub fn extract_first_url(text: Option<&str>) -> Option<String> {
  let text = text?;
  if text.is_empty() {
    return None;
  }
  let token = URL_RE.find(text)?.as_str();
  if has_http_scheme(token) {
    Some(token.to_string())
  } else {
    Some(format!("http://{}", token))
  }
}

fn has_http_scheme(token: &str) -> bool {
  let lower = token.to_ascii_lowercase();
  lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_input_yields_none() {
    assert_eq!(extract_first_url(None), None);
    assert_eq!(extract_first_url(Some("")), None);
    assert_eq!(extract_first_url(Some("no links here at all")), None);
  }

  #[test]
  fn bare_domain_gets_http_prefix() {
    assert_eq!(
      extract_first_url(Some("visit example.com/path now")),
      Some("http://example.com/path".to_string())
    );
  }

  #[test]
  fn existing_scheme_is_kept() {
    assert_eq!(
      extract_first_url(Some("go to https://a.b/x")),
      Some("https://a.b/x".to_string())
    );
    assert_eq!(
      extract_first_url(Some("HTTP://Example.COM/Login")),
      Some("HTTP://Example.COM/Login".to_string())
    );
  }

  #[test]
  fn only_first_candidate_is_returned() {
    assert_eq!(
      extract_first_url(Some("first.org then https://second.net/x")),
      Some("http://first.org".to_string())
    );
  }

  #[test]
  fn quotes_and_brackets_terminate_token() {
    assert_eq!(
      extract_first_url(Some(r#"<a href="https://evil.tk/login">here</a>"#)),
      Some("https://evil.tk/login".to_string())
    );
    assert_eq!(
      extract_first_url(Some("see 'evil.tk/pay' please")),
      Some("http://evil.tk/pay".to_string())
    );
  }

  #[test]
  fn bare_domain_starting_with_http_is_still_prefixed() {
    assert_eq!(
      extract_first_url(Some("try httpbin.org/get")),
      Some("http://httpbin.org/get".to_string())
    );
  }

  #[test]
  fn trailing_sentence_period_is_not_part_of_bare_domain() {
    assert_eq!(
      extract_first_url(Some("Go to example.com.")),
      Some("http://example.com".to_string())
    );
  }
}
