//! Segmentation of raw commit messages and the inverse rendering.
//!
//! A message is split into header, body and footer. The footer is the last
//! paragraph of the message when that paragraph ends with a trailer line
//! (`Key: value`); it starts at the earliest trailer in the paragraph.
//! Everything between the header's trailing blank lines and the footer is
//! the body.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ParsedCommit;

/// `type(scope)!: subject`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^()\r\n]+)\))?(?P<bang>!)?:\s+(?P<subject>.*)$")
      .expect("header pattern is valid")
});

/// `Closes: #123`, `Signed-off-by: ...`, plus the spaced breaking-change token
static TRAILER_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(r"^(?:[A-Z][A-Za-z-]+|BREAKING CHANGE):\s+").expect("trailer pattern is valid")
});

static BREAKING_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(r"(?im)^BREAKING[ -]CHANGE:\s*").expect("breaking pattern is valid")
});

/// Whether a line looks like a footer trailer
pub fn is_trailer(line: &str) -> bool {
   TRAILER_RE.is_match(line)
}

/// Line indices of the message sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
   /// First line after the blank lines that follow the header
   pub body_start:   usize,
   /// First footer line; equals `end` when there is no footer
   pub footer_start: usize,
   /// One past the last non-blank line
   pub end:          usize,
}

impl Layout {
   pub const fn has_footer(&self) -> bool {
      self.footer_start < self.end
   }
}

pub(crate) fn split_lines(message: &str) -> Vec<&str> {
   message.lines().collect()
}

pub(crate) fn layout(lines: &[&str]) -> Layout {
   let mut body_start = 1.min(lines.len());
   while body_start < lines.len() && lines[body_start].trim().is_empty() {
      body_start += 1;
   }

   let mut end = lines.len();
   while end > body_start && lines[end - 1].trim().is_empty() {
      end -= 1;
   }

   // Backward scan over the last paragraph. Continuation lines stay in the
   // block; only a blank line ends it. No footer unless the last line is a
   // trailer.
   let mut footer_start = end;
   if end > body_start && is_trailer(lines[end - 1]) {
      for (i, line) in lines.iter().enumerate().take(end).skip(body_start).rev() {
         if line.trim().is_empty() {
            break;
         }
         if is_trailer(line) {
            footer_start = i;
         }
      }
   }

   Layout { body_start, footer_start, end }
}

fn non_empty(text: &str) -> Option<String> {
   let trimmed = text.trim();
   (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_section(lines: &[&str], from: usize, to: usize) -> Option<String> {
   if from >= to {
      return None;
   }
   non_empty(&lines[from..to].join("\n"))
}

/// Split a raw message into its structured form. Never fails.
pub fn parse(message: &str) -> ParsedCommit {
   let lines = split_lines(message);
   let header = lines.first().copied().unwrap_or("").to_string();
   let layout = layout(&lines);

   let body = join_section(&lines, layout.body_start, layout.footer_start);
   let footer = join_section(&lines, layout.footer_start, layout.end);

   let (commit_type, scope, subject, has_breaking_marker) = match HEADER_RE.captures(&header) {
      Some(caps) => (
         caps.name("type").map(|m| m.as_str().to_string()),
         caps.name("scope").and_then(|m| non_empty(m.as_str())),
         caps.name("subject").and_then(|m| non_empty(m.as_str())),
         caps.name("bang").is_some(),
      ),
      None => (None, None, non_empty(&header), false),
   };

   let footer_breaking = footer.as_deref().is_some_and(|f| BREAKING_RE.is_match(f));

   ParsedCommit {
      header,
      commit_type,
      scope,
      subject,
      body,
      footer,
      is_breaking: has_breaking_marker || footer_breaking,
      has_breaking_marker,
      raw: message.to_string(),
   }
}

/// Mutable working copy of a parsed commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDraft {
   pub commit_type:     Option<String>,
   pub scope:           Option<String>,
   pub subject:         Option<String>,
   pub body:            Option<String>,
   pub footer:          Option<String>,
   pub breaking_marker: bool,
}

impl From<&ParsedCommit> for CommitDraft {
   fn from(parsed: &ParsedCommit) -> Self {
      Self {
         commit_type:     parsed.commit_type.clone(),
         scope:           parsed.scope.clone(),
         subject:         parsed.subject.clone(),
         body:            parsed.body.clone(),
         footer:          parsed.footer.clone(),
         breaking_marker: parsed.has_breaking_marker,
      }
   }
}

impl CommitDraft {
   /// `type(scope)!: ` when a type is present, otherwise empty
   pub fn prefix(&self) -> String {
      let Some(commit_type) = &self.commit_type else {
         return String::new();
      };
      let scope_part = self
         .scope
         .as_ref()
         .map(|s| format!("({s})"))
         .unwrap_or_default();
      let bang = if self.breaking_marker { "!" } else { "" };
      format!("{commit_type}{scope_part}{bang}: ")
   }

   pub fn header(&self) -> String {
      match (&self.commit_type, &self.subject) {
         (Some(_), Some(subject)) => format!("{}{subject}", self.prefix()),
         (_, subject) => subject.clone().unwrap_or_default(),
      }
   }

   pub fn render(&self) -> String {
      let mut result = self.header();
      if let Some(body) = &self.body {
         result.push_str("\n\n");
         result.push_str(body);
      }
      if let Some(footer) = &self.footer {
         result.push_str("\n\n");
         result.push_str(footer);
      }
      result
   }
}

/// Render a parsed commit back into message text.
///
/// Left inverse of `parse` for canonical messages (single blank-line
/// separators, no stray whitespace).
pub fn reconstruct(parsed: &ParsedCommit) -> String {
   CommitDraft::from(parsed).render()
}
