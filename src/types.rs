use std::{fmt, path::PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;

/// Structured view of a raw commit message.
///
/// Produced fresh by every `parse` call; the autofixer works on a
/// `CommitDraft` copy instead of mutating this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommit {
   /// First line of the message, possibly empty
   pub header:              String,
   #[serde(rename = "type")]
   pub commit_type:         Option<String>,
   pub scope:               Option<String>,
   pub subject:             Option<String>,
   pub body:                Option<String>,
   pub footer:              Option<String>,
   pub is_breaking:         bool,
   /// Header carried `!` after type/scope
   pub has_breaking_marker: bool,
   pub raw:                 String,
}

/// Severity of a rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
   Error,
   Warning,
}

impl IssueLevel {
   pub const fn as_str(&self) -> &'static str {
      match self {
         Self::Error => "error",
         Self::Warning => "warning",
      }
   }
}

/// Stable rule codes reported in `ValidationIssue::rule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleCode {
   #[serde(rename = "type-empty")]
   TypeEmpty,
   #[serde(rename = "type-enum")]
   TypeEnum,
   #[serde(rename = "scope-empty")]
   ScopeEmpty,
   #[serde(rename = "subject-empty")]
   SubjectEmpty,
   #[serde(rename = "subject-case")]
   SubjectCase,
   #[serde(rename = "subject-full-stop")]
   SubjectFullStop,
   #[serde(rename = "blocked-words")]
   BlockedWords,
   #[serde(rename = "header-max-length")]
   HeaderMaxLength,
   #[serde(rename = "body-leading-blank")]
   BodyLeadingBlank,
   #[serde(rename = "body-max-line-length")]
   BodyMaxLineLength,
   #[serde(rename = "footer-leading-blank")]
   FooterLeadingBlank,
}

impl RuleCode {
   pub const fn as_str(&self) -> &'static str {
      match self {
         Self::TypeEmpty => "type-empty",
         Self::TypeEnum => "type-enum",
         Self::ScopeEmpty => "scope-empty",
         Self::SubjectEmpty => "subject-empty",
         Self::SubjectCase => "subject-case",
         Self::SubjectFullStop => "subject-full-stop",
         Self::BlockedWords => "blocked-words",
         Self::HeaderMaxLength => "header-max-length",
         Self::BodyLeadingBlank => "body-leading-blank",
         Self::BodyMaxLineLength => "body-max-line-length",
         Self::FooterLeadingBlank => "footer-leading-blank",
      }
   }

   /// Level every issue of this rule is reported at
   pub const fn level(&self) -> IssueLevel {
      match self {
         Self::BodyLeadingBlank | Self::BodyMaxLineLength | Self::FooterLeadingBlank => {
            IssueLevel::Warning
         },
         _ => IssueLevel::Error,
      }
   }
}

impl fmt::Display for RuleCode {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
   pub level:   IssueLevel,
   pub rule:    RuleCode,
   pub message: String,
}

impl ValidationIssue {
   pub fn new(rule: RuleCode, message: impl Into<String>) -> Self {
      Self { level: rule.level(), rule, message: message.into() }
   }
}

impl fmt::Display for ValidationIssue {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}: {}", self.rule, self.message)
   }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
   /// True when `errors` is empty; warnings never invalidate
   pub valid:      bool,
   pub errors:     Vec<ValidationIssue>,
   pub warnings:   Vec<ValidationIssue>,
   pub parsed:     ParsedCommit,
   /// Never filled by validation; callers attach `suggest_fix` output
   pub suggestion: Option<String>,
}

impl ValidationResult {
   /// Whether any issue was reported for `rule`
   pub fn has_rule(&self, rule: RuleCode) -> bool {
      self.errors.iter().chain(&self.warnings).any(|i| i.rule == rule)
   }
}

/// Toggles for `autofix`; each fix runs independently of the others
#[derive(Debug, Clone, Default)]
pub struct AutoFixOptions {
   pub infer_type:          bool,
   pub fix_case:            bool,
   pub fix_trailing_period: bool,
   pub wrap_lines:          bool,
   /// Normalized rule configuration (see `normalize_config`); defaults apply
   /// when absent
   pub config:              Option<Config>,
}

impl AutoFixOptions {
   /// Every toggle enabled
   pub fn all() -> Self {
      Self {
         infer_type:          true,
         fix_case:            true,
         fix_trailing_period: true,
         wrap_lines:          true,
         config:              None,
      }
   }

   pub fn with_config(mut self, config: Config) -> Self {
      self.config = Some(config);
      self
   }
}

// === CLI ===

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Lint and fix conventional commit messages", long_about = None)]
pub struct Args {
   /// Config file to use instead of discovery (.commitlyrc.json / package.json)
   #[arg(long, global = true)]
   pub config: Option<PathBuf>,

   /// Directory to search for a config file
   #[arg(long, global = true, default_value = ".")]
   pub dir: PathBuf,

   #[command(subcommand)]
   pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
   /// Validate a commit message and report issues
   Lint {
      /// Message file (reads stdin when omitted)
      file: Option<PathBuf>,

      /// Print the validation result as JSON
      #[arg(long)]
      json: bool,
   },
   /// Print the auto-fixed commit message
   Fix {
      /// Message file (reads stdin when omitted)
      file: Option<PathBuf>,

      /// Do not infer a missing type from the subject's leading verb
      #[arg(long)]
      no_infer_type: bool,

      /// Do not adjust the subject's first character
      #[arg(long)]
      no_fix_case: bool,

      /// Do not strip a trailing period from the subject
      #[arg(long)]
      no_fix_period: bool,

      /// Do not re-wrap long body lines
      #[arg(long)]
      no_wrap: bool,
   },
}
