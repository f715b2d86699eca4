//! Terminal styling for the lint/fix report.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::sync::OnceLock;

use owo_colors::OwoColorize;

use crate::{
   autofix::wrap_text,
   types::{IssueLevel, ValidationIssue, ValidationResult},
};

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

// === Color Palette ===

/// Success: clean messages (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Warning: rule warnings (yellow).
pub fn warning(s: &str) -> String {
   if colors_enabled() {
      s.yellow().to_string()
   } else {
      s.to_string()
   }
}

/// Error: rule errors and fatal config problems (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Info: neutral notes (cyan).
pub fn info(s: &str) -> String {
   if colors_enabled() {
      s.cyan().to_string()
   } else {
      s.to_string()
   }
}

/// Bold: headers, key values.
pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

/// Print a warning line to stderr.
pub fn warn(msg: &str) {
   eprintln!("{} {}", warning(icons::WARNING), warning(msg));
}

/// Get terminal width, capped at 100 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(100)
}

// === Unicode Box Drawing ===

/// Box drawing characters.
pub mod box_chars {
   pub const TOP_LEFT: char = '\u{256D}';
   pub const TOP_RIGHT: char = '\u{256E}';
   pub const BOTTOM_LEFT: char = '\u{2570}';
   pub const BOTTOM_RIGHT: char = '\u{256F}';
   pub const HORIZONTAL: char = '\u{2500}';
   pub const VERTICAL: char = '\u{2502}';
}

/// Render a box-framed message with word wrapping.
pub fn boxed_message(title: &str, content: &str, width: usize) -> String {
   use box_chars::*;

   let mut out = String::new();
   let inner_width = width.saturating_sub(4).max(1); // Account for "│ " and " │"

   // Top border with title
   let title_len = title.chars().count();
   let border_width = width.saturating_sub(2);
   let padding = border_width.saturating_sub(title_len + 2);
   let left_pad = padding / 2;
   let right_pad = padding - left_pad;

   out.push(TOP_LEFT);
   out.push_str(&HORIZONTAL.to_string().repeat(left_pad));
   out.push(' ');
   out.push_str(&bold(title));
   out.push(' ');
   out.push_str(&HORIZONTAL.to_string().repeat(right_pad));
   out.push(TOP_RIGHT);
   out.push('\n');

   // Blank message lines are kept so the paragraph structure stays visible
   for line in content.lines() {
      let wrapped = if line.trim().is_empty() {
         String::new()
      } else {
         wrap_text(line, inner_width)
      };
      for wrapped_line in wrapped.split('\n') {
         out.push(VERTICAL);
         out.push(' ');
         out.push_str(wrapped_line);
         let pad = inner_width.saturating_sub(wrapped_line.chars().count());
         out.push_str(&" ".repeat(pad));
         out.push(' ');
         out.push(VERTICAL);
         out.push('\n');
      }
   }

   // Bottom border
   out.push(BOTTOM_LEFT);
   out.push_str(&HORIZONTAL.to_string().repeat(border_width));
   out.push(BOTTOM_RIGHT);

   out
}

/// One report line: `<icon> <rule>: <message>`.
pub fn issue_line(issue: &ValidationIssue) -> String {
   let (icon, paint): (&str, fn(&str) -> String) = match issue.level {
      IssueLevel::Error => (icons::ERROR, error),
      IssueLevel::Warning => (icons::WARNING, warning),
   };
   format!("{} {}: {}", paint(icon), paint(issue.rule.as_str()), issue.message)
}

/// Closing line of a lint report.
pub fn summary_line(result: &ValidationResult) -> String {
   let (errors, warnings) = (result.errors.len(), result.warnings.len());
   if errors == 0 && warnings == 0 {
      return format!("{} {}", success(icons::SUCCESS), success("commit message is valid"));
   }
   let text = format!("{errors} error(s), {warnings} warning(s)");
   if errors > 0 {
      format!("{} {}", error(icons::ERROR), error(&text))
   } else {
      format!("{} {}", warning(icons::WARNING), warning(&text))
   }
}

// === Status Icons ===

pub mod icons {
   pub const SUCCESS: &str = "\u{2713}";
   pub const WARNING: &str = "\u{26A0}";
   pub const ERROR: &str = "\u{2717}";
   pub const INFO: &str = "\u{2139}";
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::{config::Config, types::RuleCode, validation::validate_with};

   #[test]
   fn test_boxed_message_frame() {
      let boxed = boxed_message("Suggested fix", "feat: add x\n\nbody", 30);
      let lines: Vec<&str> = boxed.lines().collect();
      assert_eq!(lines.len(), 5);
      assert!(lines[0].starts_with(box_chars::TOP_LEFT));
      assert!(lines[0].contains("Suggested fix"));
      assert!(lines[1].contains("feat: add x"));
      assert_eq!(lines[2].chars().count(), 30);
      assert!(lines[4].starts_with(box_chars::BOTTOM_LEFT));
   }

   #[test]
   fn test_boxed_message_wraps_long_lines() {
      let boxed = boxed_message("t", &"word ".repeat(20), 24);
      // 20 words of 4 chars in a 20 column interior need several rows
      assert!(boxed.lines().count() > 3);
   }

   #[test]
   fn test_issue_line_mentions_rule() {
      let issue = ValidationIssue::new(RuleCode::TypeEmpty, "type may not be empty");
      let line = issue_line(&issue);
      assert!(line.contains("type may not be empty"));
      assert!(line.contains("type-empty"));
      if !colors_enabled() {
         assert_eq!(line, format!("{} type-empty: type may not be empty", icons::ERROR));
      }
   }

   #[test]
   fn test_summary_line_counts() {
      let config = Config::default();
      assert!(summary_line(&validate_with("feat: add x", &config)).contains("valid"));
      assert!(summary_line(&validate_with("Add x.", &config)).contains("3 error(s), 0 warning(s)"));
   }
}
