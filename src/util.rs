//! Small utility helpers used across modules.

/// Human relative-time string for a solve timestamp.
/// Thresholds match what the frontend has always displayed.
pub fn time_ago(now_secs: i64, then_secs: i64) -> String {
  let diff = (now_secs - then_secs).max(0);
  if diff < 60 {
    "just now".to_string()
  } else if diff < 3600 {
    format!("{} minutes ago", diff / 60)
  } else if diff < 86400 {
    format!("{} hours ago", diff / 3600)
  } else {
    format!("{} days ago", diff / 86400)
  }
}

/// Seconds since epoch, for "solved N ago" rendering.
pub fn now_epoch_secs() -> i64 {
  std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map(|d| d.as_secs() as i64)
    .unwrap_or(0)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let cut = s
      .char_indices()
      .take_while(|(i, _)| *i <= max)
      .last()
      .map(|(i, _)| i)
      .unwrap_or(0);
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn time_ago_buckets() {
    assert_eq!(time_ago(1000, 990), "just now");
    assert_eq!(time_ago(10_000, 10_000 - 120), "2 minutes ago");
    assert_eq!(time_ago(100_000, 100_000 - 7200), "2 hours ago");
    assert_eq!(time_ago(1_000_000, 1_000_000 - 3 * 86400), "3 days ago");
  }

  #[test]
  fn time_ago_clamps_future_timestamps() {
    assert_eq!(time_ago(100, 500), "just now");
  }

  #[test]
  fn trunc_keeps_short_strings_intact() {
    assert_eq!(trunc_for_log("short", 64), "short");
    assert!(trunc_for_log(&"x".repeat(200), 64).contains("200 bytes total"));
  }
}
