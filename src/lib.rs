//! Conventional commit message engine
//!
//! Parses free-form commit messages into header/body/footer, validates them
//! against a configurable rule set, and heuristically rewrites non-compliant
//! messages. Every operation is a pure function of its inputs.
pub mod autofix;
pub mod config;
pub mod error;
pub mod parser;
pub mod style;
pub mod types;
pub mod validation;

// Re-export the public surface
pub use autofix::{autofix, suggest_fix};
pub use config::{Config, PartialConfig, SubjectCase, normalize_config};
pub use error::{CommitlyError, ConfigErrors, ConfigFieldError, Result};
pub use parser::{CommitDraft, parse, reconstruct};
pub use types::{
   AutoFixOptions, IssueLevel, ParsedCommit, RuleCode, ValidationIssue, ValidationResult,
};
pub use validation::{check_rules, validate, validate_with};
