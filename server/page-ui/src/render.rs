//! HTML for the overlay panel. Every service-supplied string goes through [`escape_html`].

use std::fmt::Write;

use link_guard::verdict::{badge, format_score, verdict_comment};
use link_guard::AnalysisReport;

use crate::dom::OVERLAY_ID;

const CARD_STYLE: &str = "background:rgba(255,255,255,0.94);border:1px solid rgba(255,255,255,0.35);border-radius:12px;padding:10px";
const ACCENT_SUSPICIOUS: &str = "#fbbf24";
const ACCENT_CLEAN: &str = "#22c55e";

pub const PLACEHOLDER_TEXT: &str = "Preparing analysis…";

/// Escape `& < > " '` for safe interpolation into text and attribute values.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

pub fn placeholder_html() -> String {
  format!(r#"<div class="lg-card" style="{};color:#111827;">{}</div>"#, CARD_STYLE, PLACEHOLDER_TEXT)
}

pub fn error_html(message: &str) -> String {
  format!(
    r#"<div class="lg-error" style="{};color:#b00020;font-weight:800;">{}</div>"#,
    CARD_STYLE,
    escape_html(message)
  )
}

/// Badge, score line, optional comment, then one card per check in report order.
pub fn report_html(report: &AnalysisReport) -> String {
  let b = badge(report.overall_score);
  let mut html = String::new();

  let _ = write!(
    html,
    r#"<div class="lg-summary" style="{};margin-bottom:10px;"><span class="lg-badge" style="display:inline-block;padding:3px 10px;border-radius:999px;background:{};color:{};font-weight:900;font-size:12px;">{}</span> <span class="lg-score" style="color:#111827;font-weight:800;">Risk level: <b>{}/100</b></span>"#,
    CARD_STYLE,
    b.background,
    b.text_color,
    b.label,
    format_score(report.overall_score)
  );
  if let Some(comment) = verdict_comment(report.final_verdict.as_deref()) {
    let _ = write!(
      html,
      r#"<div class="lg-comment" style="margin-top:6px;color:#111827;font-size:13px;"><b>Comment:</b> {}</div>"#,
      escape_html(&comment)
    );
  }
  html.push_str("</div>");
  html.push_str(r#"<div class="lg-heading" style="font-weight:800;margin:10px 0 8px;color:#ffffff;">Detailed report</div>"#);

  for r in &report.results {
    let accent = if r.is_suspicious {
      ACCENT_SUSPICIOUS
    } else {
      ACCENT_CLEAN
    };
    let _ = write!(
      html,
      r#"<div class="lg-check" style="{};border-left:5px solid {};margin:6px 0;"><div class="lg-check-name" style="font-weight:900;color:#111827;">{}</div><div class="lg-check-details" style="color:#334155;font-size:13px;margin-top:2px;">{}</div></div>"#,
      CARD_STYLE,
      accent,
      escape_html(&r.check_name),
      escape_html(&r.details)
    );
  }
  html
}

/// Full fixed-position panel: title bar with close control, then `body`.
pub fn panel_html(body: &str) -> String {
  format!(
    r#"<div id="{}" style="position:fixed;top:18px;right:18px;z-index:2147483647;width:420px;background:#5e72e4;border-radius:14px;overflow:hidden;font:14px/1.4 -apple-system,Segoe UI,Roboto,Arial,sans-serif;"><div style="padding:12px;display:flex;justify-content:space-between;align-items:center;color:#fff;"><div style="font-size:18px;font-weight:900;">Link Guard</div><button id="lg_close">Close</button></div><div id="lg_body" style="padding:12px;max-height:60vh;overflow:auto;">{}</div></div>"#,
    OVERLAY_ID, body
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use link_guard::CheckResult;

  fn check(name: &str, details: &str, suspicious: bool) -> CheckResult {
    CheckResult {
      check_name: name.into(),
      details: details.into(),
      is_suspicious: suspicious,
    }
  }

  #[test]
  fn escapes_all_markup_characters() {
    assert_eq!(
      escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
      "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
  }

  #[test]
  fn empty_results_render_no_cards() {
    let report = AnalysisReport {
      overall_score: 10.0,
      final_verdict: None,
      results: vec![],
    };
    let html = report_html(&report);
    assert_eq!(html.matches("lg-check\"").count(), 0);
    assert!(html.contains("SAFE"));
    assert!(html.contains("10/100"));
  }

  #[test]
  fn cards_keep_order_accents_and_escaping() {
    let report = AnalysisReport {
      overall_score: 72.0,
      final_verdict: Some("Dangerous".into()),
      results: vec![
        check("<script>", "a & b", true),
        check("Second", "\"quoted\" 'single'", false),
      ],
    };
    let html = report_html(&report);

    assert_eq!(html.matches("lg-check\"").count(), 2);
    let first = html.find("&lt;script&gt;").unwrap();
    let second = html.find("Second").unwrap();
    assert!(first < second);
    assert!(!html.contains("<script>"));
    assert!(html.contains("a &amp; b"));
    assert!(html.contains("&quot;quoted&quot; &#39;single&#39;"));
    assert!(html.contains("border-left:5px solid #fbbf24"));
    assert!(html.contains("border-left:5px solid #22c55e"));
    assert!(html.contains("DANGEROUS"));
    // Redundant verdict word is not repeated as a comment.
    assert!(!html.contains("lg-comment"));
  }

  #[test]
  fn informative_verdict_is_shown_escaped() {
    let report = AnalysisReport {
      overall_score: 50.0,
      final_verdict: Some("Looks like <brand> spoofing".into()),
      results: vec![],
    };
    let html = report_html(&report);
    assert!(html.contains("lg-comment"));
    assert!(html.contains("Looks like &lt;brand&gt; spoofing"));
  }

  #[test]
  fn error_block_is_escaped() {
    let html = error_html("HTTP 500: <html>");
    assert!(html.contains("HTTP 500: &lt;html&gt;"));
  }
}
