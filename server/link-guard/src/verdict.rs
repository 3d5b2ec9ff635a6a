//! Verdict badge derived from `overall_score`, plus the advisory comment filter.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Label-style prefix such as "Text analysis:" in front of a verdict word.
static LABEL_PREFIX_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[\p{L}\s]+:\s*").expect("prefix pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
  Safe,
  Suspicious,
  Dangerous,
}

/// Presentation colors for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
  pub label: &'static str,
  pub background: &'static str,
  pub text_color: &'static str,
}

impl Verdict {
  /// Half-open buckets: [70, ∞) dangerous, [30, 70) suspicious, below 30 safe.
  pub fn from_score(score: f64) -> Self {
    let score = normalize_score(score);
    if score >= 70.0 {
      Self::Dangerous
    } else if score >= 30.0 {
      Self::Suspicious
    } else {
      Self::Safe
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Safe => "SAFE",
      Self::Suspicious => "SUSPICIOUS",
      Self::Dangerous => "DANGEROUS",
    }
  }

  pub fn badge(self) -> Badge {
    let (background, text_color) = match self {
      Self::Safe => ("#22c55e", "#052e16"),
      Self::Suspicious => ("#fbbf24", "#422006"),
      Self::Dangerous => ("#fb7185", "#4c0519"),
    };
    Badge {
      label: self.label(),
      background,
      text_color,
    }
  }
}

/// Badge for a raw score. Always derived from the score, never from `final_verdict`.
pub fn badge(score: f64) -> Badge {
  Verdict::from_score(score).badge()
}

/// Non-finite scores become 0; everything else is clamped to 0..=100.
pub fn normalize_score(score: f64) -> f64 {
  if score.is_finite() {
    score.clamp(0.0, 100.0)
  } else {
    0.0
  }
}

/// Score as shown to the user: "42", "69.9".
pub fn format_score(score: f64) -> String {
  let score = normalize_score(score);
  if score.fract() == 0.0 {
    format!("{}", score as u32)
  } else {
    format!("{}", score)
  }
}

/// The service's free-text verdict, unless it only restates one of the badge words.
pub fn verdict_comment(final_verdict: Option<&str>) -> Option<String> {
  let verdict = final_verdict?.trim();
  if verdict.is_empty() {
    return None;
  }
  let lower = verdict.to_lowercase();
  let normalized = LABEL_PREFIX_RE.replace(&lower, "");
  let redundant = matches!(normalized.trim(), "safe" | "suspicious" | "dangerous");
  if redundant {
    None
  } else {
    Some(verdict.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn boundaries_are_half_open() {
    assert_eq!(badge(69.9).label, "SUSPICIOUS");
    assert_eq!(badge(70.0).label, "DANGEROUS");
    assert_eq!(badge(29.9).label, "SAFE");
    assert_eq!(badge(30.0).label, "SUSPICIOUS");
  }

  #[test]
  fn extremes_and_garbage_scores() {
    assert_eq!(Verdict::from_score(0.0), Verdict::Safe);
    assert_eq!(Verdict::from_score(100.0), Verdict::Dangerous);
    assert_eq!(Verdict::from_score(250.0), Verdict::Dangerous);
    assert_eq!(Verdict::from_score(-5.0), Verdict::Safe);
    assert_eq!(Verdict::from_score(f64::NAN), Verdict::Safe);
    assert_eq!(Verdict::from_score(f64::INFINITY), Verdict::Safe);
  }

  #[test]
  fn badge_colors_follow_verdict() {
    let b = badge(85.0);
    assert_eq!(b.background, "#fb7185");
    assert_eq!(b.text_color, "#4c0519");
    assert_eq!(badge(10.0).background, "#22c55e");
  }

  #[test]
  fn score_formatting() {
    assert_eq!(format_score(42.0), "42");
    assert_eq!(format_score(69.9), "69.9");
    assert_eq!(format_score(f64::NAN), "0");
    assert_eq!(format_score(140.0), "100");
  }

  #[test]
  fn redundant_verdicts_are_suppressed() {
    assert_eq!(verdict_comment(Some("Safe")), None);
    assert_eq!(verdict_comment(Some("  SUSPICIOUS ")), None);
    assert_eq!(verdict_comment(Some("Text analysis: dangerous")), None);
    assert_eq!(verdict_comment(Some("")), None);
    assert_eq!(verdict_comment(None), None);
  }

  #[test]
  fn informative_verdicts_are_kept_verbatim() {
    assert_eq!(
      verdict_comment(Some(" DANGEROUS! High probability of phishing! ")),
      Some("DANGEROUS! High probability of phishing!".to_string())
    );
    assert_eq!(
      verdict_comment(Some("Text analysis: information")),
      Some("Text analysis: information".to_string())
    );
  }
}
