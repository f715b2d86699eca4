use std::fmt;

use thiserror::Error;

/// One offending field in a partial configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFieldError {
   pub field:   String,
   pub message: String,
}

impl ConfigFieldError {
   pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
      Self { field: field.into(), message: message.into() }
   }
}

impl fmt::Display for ConfigFieldError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}: {}", self.field, self.message)
   }
}

/// Aggregated field-by-field report produced by `normalize_config`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigFieldError>);

impl ConfigErrors {
   pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
      self.0.push(ConfigFieldError::new(field, message));
   }

   pub const fn len(&self) -> usize {
      self.0.len()
   }

   pub const fn is_empty(&self) -> bool {
      self.0.is_empty()
   }

   pub fn iter(&self) -> std::slice::Iter<'_, ConfigFieldError> {
      self.0.iter()
   }

   /// Names of the offending fields, in the order they were checked
   pub fn fields(&self) -> Vec<&str> {
      self.0.iter().map(|e| e.field.as_str()).collect()
   }
}

impl fmt::Display for ConfigErrors {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      for (idx, err) in self.0.iter().enumerate() {
         if idx > 0 {
            writeln!(f)?;
         }
         write!(f, "  {err}")?;
      }
      Ok(())
   }
}

#[derive(Debug, Error)]
pub enum CommitlyError {
   #[error("Invalid configuration ({n} field(s)):\n{0}", n = .0.len())]
   InvalidConfig(ConfigErrors),

   #[error("Failed to load config {path}: {reason}")]
   ConfigFile { path: String, reason: String },

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommitlyError>;
