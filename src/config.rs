use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CommitlyError, ConfigErrors, Result};

/// Untyped configuration as handed over by callers (already-parsed JSON)
pub type PartialConfig = Value;

/// Dedicated rc file looked up first during discovery
pub const RC_FILE_NAME: &str = ".commitlyrc.json";

/// Key holding the configuration inside `package.json`
pub const PACKAGE_JSON_KEY: &str = "commitly";

/// Required capitalization of the first subject character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCase {
   #[default]
   Lower,
   Sentence,
   Any,
}

impl SubjectCase {
   pub const ALL: &'static [Self] = &[Self::Lower, Self::Sentence, Self::Any];

   pub const fn as_str(&self) -> &'static str {
      match self {
         Self::Lower => "lower",
         Self::Sentence => "sentence",
         Self::Any => "any",
      }
   }

   pub fn from_name(name: &str) -> Option<Self> {
      Self::ALL.iter().copied().find(|c| c.as_str() == name)
   }
}

impl fmt::Display for SubjectCase {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

/// Fully-populated rule configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
   /// Allowed commit types, in display order (duplicates are harmless)
   pub types: Vec<String>,

   pub require_scope:     bool,
   pub max_header_length: usize,

   /// Applies to body lines only; the header has its own budget
   pub max_line_length: usize,

   pub subject_case:                SubjectCase,
   pub subject_empty_forbidden:     bool,
   pub subject_full_stop_forbidden: bool,
   pub body_leading_blank:          bool,
   pub footer_leading_blank:        bool,

   /// Matched case-insensitively as substrings of the subject
   pub blocked_words: Vec<String>,
}

/// The conventional commit types accepted out of the box
pub const DEFAULT_TYPES: &[&str] = &[
   "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

impl Default for Config {
   fn default() -> Self {
      Self {
         types:                       DEFAULT_TYPES.iter().map(|t| (*t).to_string()).collect(),
         require_scope:               false,
         max_header_length:           72,
         max_line_length:             100,
         subject_case:                SubjectCase::Lower,
         subject_empty_forbidden:     true,
         subject_full_stop_forbidden: true,
         body_leading_blank:          true,
         footer_leading_blank:        true,
         blocked_words:               vec![],
      }
   }
}

const fn kind_name(value: &Value) -> &'static str {
   match value {
      Value::Null => "null",
      Value::Bool(_) => "boolean",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
   }
}

fn read_bool(value: &Value, field: &str, errors: &mut ConfigErrors) -> Option<bool> {
   if let Value::Bool(b) = value {
      Some(*b)
   } else {
      errors.push(field, format!("expected boolean, got {}", kind_name(value)));
      None
   }
}

fn read_positive_int(value: &Value, field: &str, errors: &mut ConfigErrors) -> Option<usize> {
   let Value::Number(n) = value else {
      errors.push(field, format!("expected positive integer, got {}", kind_name(value)));
      return None;
   };

   // 72.0 is an integer for a JSON number, so accept whole floats too
   let parsed = n.as_u64().or_else(|| {
      n.as_f64()
         .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= usize::MAX as f64)
         .map(|f| f as u64)
   });

   match parsed {
      Some(v) if v > 0 => Some(v as usize),
      _ => {
         errors.push(field, format!("expected positive integer, got {n}"));
         None
      },
   }
}

fn read_string_list(value: &Value, field: &str, errors: &mut ConfigErrors) -> Option<Vec<String>> {
   let Value::Array(items) = value else {
      errors.push(field, format!("expected array of strings, got {}", kind_name(value)));
      return None;
   };

   let mut out = Vec::with_capacity(items.len());
   let mut ok = true;
   for (idx, item) in items.iter().enumerate() {
      if let Value::String(s) = item {
         out.push(s.clone());
      } else {
         errors.push(
            format!("{field}[{idx}]"),
            format!("expected string, got {}", kind_name(item)),
         );
         ok = false;
      }
   }
   ok.then_some(out)
}

fn read_subject_case(value: &Value, field: &str, errors: &mut ConfigErrors) -> Option<SubjectCase> {
   let parsed = value.as_str().and_then(SubjectCase::from_name);
   if parsed.is_none() {
      let got = value
         .as_str()
         .map_or_else(|| kind_name(value).to_string(), |s| format!("\"{s}\""));
      errors.push(field, format!("expected one of: lower, sentence, any, got {got}"));
   }
   parsed
}

/// Fill every omitted field with its default and reject malformed ones.
///
/// All offending fields are collected before failing, so the returned
/// `InvalidConfig` lists every problem at once. Unknown keys are ignored.
pub fn normalize_config(partial: &PartialConfig) -> Result<Config> {
   let mut config = Config::default();
   let mut errors = ConfigErrors::default();

   let map = match partial {
      Value::Null => return Ok(config),
      Value::Object(map) => map,
      other => {
         errors.push("<root>", format!("expected object, got {}", kind_name(other)));
         return Err(CommitlyError::InvalidConfig(errors));
      },
   };

   if let Some(v) = map.get("types")
      && let Some(types) = read_string_list(v, "types", &mut errors)
   {
      config.types = types;
   }
   if let Some(v) = map.get("requireScope")
      && let Some(b) = read_bool(v, "requireScope", &mut errors)
   {
      config.require_scope = b;
   }
   if let Some(v) = map.get("maxHeaderLength")
      && let Some(n) = read_positive_int(v, "maxHeaderLength", &mut errors)
   {
      config.max_header_length = n;
   }
   if let Some(v) = map.get("maxLineLength")
      && let Some(n) = read_positive_int(v, "maxLineLength", &mut errors)
   {
      config.max_line_length = n;
   }
   if let Some(v) = map.get("subjectCase")
      && let Some(case) = read_subject_case(v, "subjectCase", &mut errors)
   {
      config.subject_case = case;
   }
   if let Some(v) = map.get("subjectEmptyForbidden")
      && let Some(b) = read_bool(v, "subjectEmptyForbidden", &mut errors)
   {
      config.subject_empty_forbidden = b;
   }
   if let Some(v) = map.get("subjectFullStopForbidden")
      && let Some(b) = read_bool(v, "subjectFullStopForbidden", &mut errors)
   {
      config.subject_full_stop_forbidden = b;
   }
   if let Some(v) = map.get("bodyLeadingBlank")
      && let Some(b) = read_bool(v, "bodyLeadingBlank", &mut errors)
   {
      config.body_leading_blank = b;
   }
   if let Some(v) = map.get("footerLeadingBlank")
      && let Some(b) = read_bool(v, "footerLeadingBlank", &mut errors)
   {
      config.footer_leading_blank = b;
   }
   if let Some(v) = map.get("blockedWords")
      && let Some(words) = read_string_list(v, "blockedWords", &mut errors)
   {
      config.blocked_words = words;
   }

   if errors.is_empty() {
      Ok(config)
   } else {
      Err(CommitlyError::InvalidConfig(errors))
   }
}

impl Config {
   /// Resolve the configuration for the CLI.
   ///
   /// An explicit path wins; otherwise `dir` is searched for
   /// `.commitlyrc.json`, then for a `commitly` key in `package.json`.
   /// Nothing found means defaults.
   pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
      let partial = match explicit {
         Some(path) => read_partial_config(path)?,
         None => discover_partial_config(dir)?.unwrap_or(Value::Null),
      };
      normalize_config(&partial)
   }
}

/// Locate the partial configuration for `dir`, if any
pub fn discover_partial_config(dir: &Path) -> Result<Option<PartialConfig>> {
   let rc_path = dir.join(RC_FILE_NAME);
   if rc_path.is_file() {
      return read_partial_config(&rc_path).map(Some);
   }

   let package_path = dir.join("package.json");
   if package_path.is_file() {
      let partial = read_partial_config(&package_path)?;
      return Ok((!partial.is_null()).then_some(partial));
   }

   Ok(None)
}

/// Read a config file; `package.json` yields only its `commitly` key
pub fn read_partial_config(path: &Path) -> Result<PartialConfig> {
   let contents = std::fs::read_to_string(path).map_err(|e| config_file_error(path, &e))?;
   let value: Value =
      serde_json::from_str(&contents).map_err(|e| config_file_error(path, &e))?;

   let is_package_json = path.file_name().is_some_and(|n| n == "package.json");
   if is_package_json {
      Ok(value.get(PACKAGE_JSON_KEY).cloned().unwrap_or(Value::Null))
   } else {
      Ok(value)
   }
}

fn config_file_error(path: &Path, err: &dyn std::error::Error) -> CommitlyError {
   CommitlyError::ConfigFile { path: path.display().to_string(), reason: err.to_string() }
}
