use crate::{
   config::{Config, PartialConfig, SubjectCase, normalize_config},
   error::Result,
   parser::{self, parse},
   types::{IssueLevel, ParsedCommit, RuleCode, ValidationIssue, ValidationResult},
};

/// Check if `c` is already in the form `case` asks for.
///
/// Characters without case (digits, punctuation) satisfy every style.
pub(crate) fn char_matches_case(c: char, case: SubjectCase) -> bool {
   match case {
      SubjectCase::Lower => c.to_lowercase().eq(std::iter::once(c)),
      SubjectCase::Sentence => c.to_uppercase().eq(std::iter::once(c)),
      SubjectCase::Any => true,
   }
}

fn is_blank(line: Option<&&str>) -> bool {
   line.is_none_or(|l| l.trim().is_empty())
}

/// Run every rule against a parsed commit.
///
/// Rules are independent of each other; issues come back in rule order.
pub fn check_rules(parsed: &ParsedCommit, config: &Config) -> Vec<ValidationIssue> {
   let mut issues = Vec::new();

   match &parsed.commit_type {
      None => issues.push(ValidationIssue::new(RuleCode::TypeEmpty, "type may not be empty")),
      Some(commit_type) if !config.types.iter().any(|t| t == commit_type) => {
         issues.push(ValidationIssue::new(
            RuleCode::TypeEnum,
            format!("type '{commit_type}' must be one of [{}]", config.types.join(", ")),
         ));
      },
      Some(_) => {},
   }

   if config.require_scope && parsed.scope.is_none() {
      issues.push(ValidationIssue::new(RuleCode::ScopeEmpty, "scope may not be empty"));
   }

   let subject = parsed.subject.as_deref().filter(|s| !s.trim().is_empty());

   if subject.is_none() && config.subject_empty_forbidden {
      issues.push(ValidationIssue::new(RuleCode::SubjectEmpty, "subject may not be empty"));
   }

   if let Some(subject) = subject {
      if let Some(first) = subject.chars().next()
         && !char_matches_case(first, config.subject_case)
      {
         let expected = match config.subject_case {
            SubjectCase::Sentence => "an uppercase",
            _ => "a lowercase",
         };
         issues.push(ValidationIssue::new(
            RuleCode::SubjectCase,
            format!("subject must start with {expected} character"),
         ));
      }

      if config.subject_full_stop_forbidden && subject.ends_with('.') {
         issues.push(ValidationIssue::new(
            RuleCode::SubjectFullStop,
            "subject may not end with a full stop",
         ));
      }

      let subject_lower = subject.to_lowercase();
      for word in &config.blocked_words {
         // An empty entry would match everything
         if word.is_empty() {
            continue;
         }
         if subject_lower.contains(&word.to_lowercase()) {
            issues.push(ValidationIssue::new(
               RuleCode::BlockedWords,
               format!("subject contains blocked word '{word}'"),
            ));
         }
      }
   }

   let header_len = parsed.header.chars().count();
   if header_len > config.max_header_length {
      issues.push(ValidationIssue::new(
         RuleCode::HeaderMaxLength,
         format!(
            "header must not be longer than {} characters, current length is {header_len}",
            config.max_header_length
         ),
      ));
   }

   let lines = parser::split_lines(&parsed.raw);

   if parsed.body.is_some() && config.body_leading_blank && !is_blank(lines.get(1)) {
      issues.push(ValidationIssue::new(
         RuleCode::BodyLeadingBlank,
         "body must have a leading blank line",
      ));
   }

   if let Some(body) = &parsed.body {
      for (idx, line) in body.lines().enumerate() {
         let len = line.chars().count();
         if len > config.max_line_length {
            issues.push(ValidationIssue::new(
               RuleCode::BodyMaxLineLength,
               format!(
                  "body line {} must not be longer than {} characters, current length is {len}",
                  idx + 1,
                  config.max_line_length
               ),
            ));
         }
      }
   }

   if parsed.footer.is_some() && config.footer_leading_blank {
      let layout = parser::layout(&lines);
      let preceding = layout.footer_start.checked_sub(1).and_then(|i| lines.get(i));
      if layout.has_footer() && !is_blank(preceding) {
         issues.push(ValidationIssue::new(
            RuleCode::FooterLeadingBlank,
            "footer must have a leading blank line",
         ));
      }
   }

   issues
}

/// Validate a message against an already-normalized configuration
pub fn validate_with(message: &str, config: &Config) -> ValidationResult {
   let parsed = parse(message);
   let (errors, warnings): (Vec<_>, Vec<_>) = check_rules(&parsed, config)
      .into_iter()
      .partition(|issue| issue.level == IssueLevel::Error);

   ValidationResult { valid: errors.is_empty(), errors, warnings, parsed, suggestion: None }
}

/// Validate a message, normalizing the partial configuration first.
///
/// Only a malformed configuration fails; message problems are reported as
/// issues in the result.
pub fn validate(message: &str, partial: Option<&PartialConfig>) -> Result<ValidationResult> {
   let config = match partial {
      Some(partial) => normalize_config(partial)?,
      None => Config::default(),
   };
   Ok(validate_with(message, &config))
}

#[cfg(test)]
mod tests {
   use serde_json::json;

   use super::*;
   use crate::error::CommitlyError;

   fn rules(message: &str, config: &Config) -> Vec<&'static str> {
      check_rules(&parse(message), config)
         .iter()
         .map(|i| i.rule.as_str())
         .collect()
   }

   #[test]
   fn test_validate_valid_commit() {
      let result = validate("feat: add x", None).unwrap();
      assert!(result.valid);
      assert!(result.errors.is_empty());
      assert!(result.warnings.is_empty());
      assert!(result.suggestion.is_none());
      assert_eq!(result.parsed.commit_type.as_deref(), Some("feat"));
   }

   #[test]
   fn test_validate_missing_type() {
      let result = validate("add x", None).unwrap();
      assert!(!result.valid);
      assert!(result.has_rule(RuleCode::TypeEmpty));
      assert!(!result.has_rule(RuleCode::TypeEnum));
   }

   #[test]
   fn test_validate_unknown_type() {
      let result = validate("feature: add x", None).unwrap();
      assert!(result.has_rule(RuleCode::TypeEnum));
      assert!(result.errors[0].message.contains("'feature'"));
   }

   #[test]
   fn test_validate_case_and_full_stop() {
      let result = validate("feat: Add x.", None).unwrap();
      assert!(!result.valid);
      assert!(result.has_rule(RuleCode::SubjectCase));
      assert!(result.has_rule(RuleCode::SubjectFullStop));
   }

   #[test]
   fn test_validate_sentence_case() {
      let config = Config { subject_case: SubjectCase::Sentence, ..Config::default() };
      assert_eq!(rules("feat: add x", &config), vec!["subject-case"]);
      assert!(rules("feat: Add x", &config).is_empty());

      let config = Config { subject_case: SubjectCase::Any, ..Config::default() };
      assert!(rules("feat: Add x", &config).is_empty());
   }

   #[test]
   fn test_validate_case_ignores_uncased_first_char() {
      let config = Config::default();
      assert!(rules("fix: 2fa codes expire", &config).is_empty());
      assert_eq!(rules("fix: Ärger fixed", &config), vec!["subject-case"]);
   }

   #[test]
   fn test_validate_empty_message() {
      let config = Config::default();
      assert_eq!(rules("", &config), vec!["type-empty", "subject-empty"]);
      assert_eq!(rules("   ", &config), vec!["type-empty", "subject-empty"]);
   }

   #[test]
   fn test_validate_subject_empty_allowed() {
      let config = Config { subject_empty_forbidden: false, ..Config::default() };
      assert!(rules("feat: ", &config).is_empty());
   }

   #[test]
   fn test_validate_require_scope() {
      let config = Config { require_scope: true, ..Config::default() };
      assert_eq!(rules("feat: add x", &config), vec!["scope-empty"]);
      assert!(rules("feat(ui): add x", &config).is_empty());
   }

   #[test]
   fn test_validate_blocked_words() {
      let result = validate("feat: wip add x", Some(&json!({ "blockedWords": ["WIP"] }))).unwrap();
      assert!(!result.valid);
      assert_eq!(result.errors.len(), 1);
      assert_eq!(result.errors[0].rule, RuleCode::BlockedWords);
   }

   #[test]
   fn test_validate_blocked_words_one_issue_per_match() {
      let config = Config {
         blocked_words: ["wip", "tmp", "nope", ""].map(String::from).to_vec(),
         ..Config::default()
      };
      assert_eq!(rules("feat: wip tmp hack", &config), vec!["blocked-words", "blocked-words"]);
   }

   #[test]
   fn test_validate_header_length_boundary() {
      let config = Config::default();
      let prefix = "feat: ";
      let exact = format!("{prefix}{}", "a".repeat(72 - prefix.len()));
      assert_eq!(exact.len(), 72);
      assert!(rules(&exact, &config).is_empty());

      let over = format!("{exact}a");
      assert_eq!(rules(&over, &config), vec!["header-max-length"]);
   }

   #[test]
   fn test_validate_header_length_counts_chars() {
      let config = Config { max_header_length: 10, ..Config::default() };
      // 10 characters, more than 10 bytes
      assert!(rules("fix: ééééé", &config).is_empty());
   }

   #[test]
   fn test_validate_body_leading_blank() {
      let result = validate("feat: add x\nbody text", None).unwrap();
      assert!(result.valid);
      assert_eq!(result.warnings.len(), 1);
      assert_eq!(result.warnings[0].rule, RuleCode::BodyLeadingBlank);

      let config = Config { body_leading_blank: false, ..Config::default() };
      assert!(rules("feat: add x\nbody text", &config).is_empty());
      assert!(rules("feat: add x\n\nbody text", &Config::default()).is_empty());
   }

   #[test]
   fn test_validate_body_line_length() {
      let long = "word ".repeat(30);
      let msg = format!("feat: add x\n\nshort line\n{}\n{}", long.trim(), long.trim());
      let result = validate(&msg, None).unwrap();
      assert!(result.valid);
      let long_lines: Vec<_> = result
         .warnings
         .iter()
         .filter(|w| w.rule == RuleCode::BodyMaxLineLength)
         .collect();
      assert_eq!(long_lines.len(), 2);
      assert!(long_lines[0].message.starts_with("body line 2"));
   }

   #[test]
   fn test_validate_footer_leading_blank() {
      let config = Config::default();
      assert_eq!(rules("feat: add x\n\nbody\nCloses: #1", &config), vec!["footer-leading-blank"]);
      assert!(rules("feat: add x\n\nbody\n\nCloses: #1", &config).is_empty());

      let config = Config { footer_leading_blank: false, ..Config::default() };
      assert!(rules("feat: add x\n\nbody\nCloses: #1", &config).is_empty());
   }

   #[test]
   fn test_validate_errors_and_warnings_split() {
      let result = validate("Add x.\nCloses: #1", None).unwrap();
      assert!(!result.valid);
      assert!(result.errors.iter().all(|i| i.level == IssueLevel::Error));
      assert!(result.warnings.iter().all(|i| i.level == IssueLevel::Warning));
      assert!(result.has_rule(RuleCode::FooterLeadingBlank));
   }

   #[test]
   fn test_validate_custom_types() {
      let partial = json!({ "types": ["feature", "bugfix"] });
      assert!(validate("feature: add x", Some(&partial)).unwrap().valid);
      assert!(!validate("feat: add x", Some(&partial)).unwrap().valid);
   }

   #[test]
   fn test_validate_invalid_config_is_error() {
      let err = validate("feat: add x", Some(&json!({ "maxHeaderLength": 0 }))).unwrap_err();
      assert!(matches!(err, CommitlyError::InvalidConfig(_)));
   }

   #[test]
   fn test_char_matches_case() {
      assert!(char_matches_case('a', SubjectCase::Lower));
      assert!(!char_matches_case('A', SubjectCase::Lower));
      assert!(char_matches_case('A', SubjectCase::Sentence));
      assert!(char_matches_case('1', SubjectCase::Sentence));
      assert!(char_matches_case('Z', SubjectCase::Any));
   }
}
