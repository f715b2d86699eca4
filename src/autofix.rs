//! Heuristic rewriting of non-compliant commit messages.
//!
//! The message is parsed into a `CommitDraft`, each enabled fix edits the
//! draft in place, and the draft is rendered again only when a field changed.

use crate::{
   config::{Config, SubjectCase},
   parser::{CommitDraft, parse},
   types::AutoFixOptions,
   validation::char_matches_case,
};

/// Subjects shorter than this after truncation are left over-length
const MIN_TRUNCATED_SUBJECT: usize = 10;

const ELLIPSIS: &str = "...";

/// Map a lowercased leading verb to the commit type it implies
pub fn type_for_verb(word: &str) -> Option<&'static str> {
   let commit_type = match word {
      "add" | "adding" | "added" | "create" | "creating" | "created" | "implement"
      | "implementing" | "implemented" | "introduce" | "introducing" | "introduced" => "feat",
      "fix" | "fixing" | "fixed" | "resolve" | "resolving" | "resolved" | "correct"
      | "correcting" | "corrected" | "patch" | "patching" | "patched" => "fix",
      "refactor" | "refactoring" | "refactored" | "restructure" | "restructuring"
      | "restructured" => "refactor",
      "update" | "updating" | "updated" | "change" | "changing" | "changed" | "modify"
      | "modifying" | "modified" | "remove" | "removing" | "removed" | "delete" | "deleting"
      | "deleted" => "chore",
      "improve" | "improving" | "improved" | "optimize" | "optimizing" | "optimized" => "perf",
      "document" | "documenting" | "documented" => "docs",
      _ => return None,
   };
   Some(commit_type)
}

fn infer_type(draft: &mut CommitDraft) {
   if draft.commit_type.is_some() {
      return;
   }
   let Some(first_word) = draft.subject.as_deref().and_then(|s| s.split_whitespace().next()) else {
      return;
   };
   if let Some(commit_type) = type_for_verb(&first_word.to_lowercase()) {
      draft.commit_type = Some(commit_type.to_string());
   }
}

fn fix_case(draft: &mut CommitDraft, case: SubjectCase) {
   let Some(subject) = &mut draft.subject else {
      return;
   };
   let Some(first_char) = subject.chars().next() else {
      return;
   };
   if char_matches_case(first_char, case) {
      return;
   }

   let rest = &subject[first_char.len_utf8()..];
   *subject = match case {
      SubjectCase::Lower => format!("{}{rest}", first_char.to_lowercase()),
      SubjectCase::Sentence => format!("{}{rest}", first_char.to_uppercase()),
      SubjectCase::Any => return,
   };
}

fn strip_trailing_period(draft: &mut CommitDraft) {
   if let Some(subject) = &mut draft.subject
      && subject.ends_with('.')
   {
      subject.pop();
      if subject.trim().is_empty() {
         draft.subject = None;
      }
   }
}

/// Split a word into chunks of at most `max` characters
fn split_long_word(word: &str, max: usize) -> Vec<&str> {
   let mut pieces = Vec::new();
   let mut start = 0;
   for (count, (idx, _)) in word.char_indices().enumerate() {
      if count > 0 && count % max == 0 {
         pieces.push(&word[start..idx]);
         start = idx;
      }
   }
   pieces.push(&word[start..]);
   pieces
}

/// Greedy word wrap of one line, keeping its indentation on every piece
fn wrap_line(line: &str, width: usize) -> Vec<String> {
   let content = line.trim_start();
   let mut indent = &line[..line.len() - content.len()];
   if indent.chars().count() >= width {
      indent = "";
   }
   let available = width - indent.chars().count();

   let mut lines = Vec::new();
   let mut current = String::new();
   let mut current_len = 0;

   for word in content.split_whitespace() {
      for piece in split_long_word(word, available) {
         let piece_len = piece.chars().count();
         if current_len == 0 {
            current.push_str(piece);
            current_len = piece_len;
         } else if current_len + 1 + piece_len <= available {
            current.push(' ');
            current.push_str(piece);
            current_len += 1 + piece_len;
         } else {
            lines.push(format!("{indent}{current}"));
            current = piece.to_string();
            current_len = piece_len;
         }
      }
   }

   if current_len > 0 {
      lines.push(format!("{indent}{current}"));
   }
   lines
}

/// Re-wrap text to `width` columns.
///
/// Paragraphs (separated by blank lines) stay apart with exactly one blank
/// line between them. Lines already within `width` are kept as they are.
pub fn wrap_text(text: &str, width: usize) -> String {
   let width = width.max(1);
   let mut paragraphs: Vec<Vec<String>> = Vec::new();
   let mut current: Vec<String> = Vec::new();

   for line in text.lines() {
      if line.trim().is_empty() {
         if !current.is_empty() {
            paragraphs.push(std::mem::take(&mut current));
         }
      } else if line.chars().count() <= width {
         current.push(line.to_string());
      } else {
         current.extend(wrap_line(line, width));
      }
   }
   if !current.is_empty() {
      paragraphs.push(current);
   }

   paragraphs
      .iter()
      .map(|p| p.join("\n"))
      .collect::<Vec<_>>()
      .join("\n\n")
}

fn wrap_body(draft: &mut CommitDraft, width: usize) {
   if let Some(body) = &mut draft.body {
      let wrapped = wrap_text(body, width);
      if wrapped != *body {
         *body = wrapped;
      }
   }
}

fn truncate_header(draft: &mut CommitDraft, max_header_length: usize) {
   if draft.header().chars().count() <= max_header_length {
      return;
   }
   let prefix_len = draft.prefix().chars().count();
   let Some(subject) = &mut draft.subject else {
      return;
   };

   // Too little room left to keep a meaningful subject
   let available = max_header_length.saturating_sub(prefix_len);
   if available <= MIN_TRUNCATED_SUBJECT {
      return;
   }

   let kept: String = subject.chars().take(available - ELLIPSIS.len()).collect();
   *subject = format!("{kept}{ELLIPSIS}");
}

/// Apply the enabled fixes to `message`.
///
/// Returns `None` when no field changed, so callers can tell "already fine"
/// apart from "fixed". Header truncation runs regardless of the toggles.
pub fn autofix(message: &str, options: &AutoFixOptions) -> Option<String> {
   let config = options.config.clone().unwrap_or_default();
   let parsed = parse(message);
   let original = CommitDraft::from(&parsed);
   let mut draft = original.clone();

   if options.infer_type {
      infer_type(&mut draft);
   }
   if options.fix_case {
      fix_case(&mut draft, config.subject_case);
   }
   if options.fix_trailing_period {
      strip_trailing_period(&mut draft);
   }
   if options.wrap_lines {
      wrap_body(&mut draft, config.max_line_length);
   }
   truncate_header(&mut draft, config.max_header_length);

   (draft != original).then(|| draft.render())
}

/// `autofix` with every toggle enabled.
///
/// Takes an already-normalized config; run `normalize_config` on a partial
/// one first. A second pass is a no-op except on a header this function had
/// to truncate: the period fix then trims the appended `...` to `..`.
pub fn suggest_fix(message: &str, config: Option<&Config>) -> Option<String> {
   let mut options = AutoFixOptions::all();
   options.config = config.cloned();
   autofix(message, &options)
}
