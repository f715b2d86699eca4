use std::{
   io::{self, Read},
   path::Path,
   process::ExitCode,
};

use clap::Parser;
use commitly::{
   AutoFixOptions, Config, Result, autofix, style,
   style::icons,
   suggest_fix,
   types::{Args, Command},
   validate_with,
};

/// Read the message from a file, or stdin when no file is given
fn read_message(file: Option<&Path>) -> Result<String> {
   let raw = match file {
      Some(path) => std::fs::read_to_string(path)?,
      None => {
         let mut buf = String::new();
         io::stdin().read_to_string(&mut buf)?;
         buf
      },
   };
   Ok(strip_comments(&raw))
}

/// Drop git's `#` comment lines from an edited commit message
fn strip_comments(message: &str) -> String {
   message
      .lines()
      .filter(|line| !line.starts_with('#'))
      .collect::<Vec<_>>()
      .join("\n")
}

/// Build fix options from the `fix` subcommand's opt-out flags
fn fix_options(
   no_infer_type: bool,
   no_fix_case: bool,
   no_fix_period: bool,
   no_wrap: bool,
) -> AutoFixOptions {
   AutoFixOptions {
      infer_type:          !no_infer_type,
      fix_case:            !no_fix_case,
      fix_trailing_period: !no_fix_period,
      wrap_lines:          !no_wrap,
      config:              None,
   }
}

fn run_lint(message: &str, config: &Config, json: bool) -> Result<ExitCode> {
   let mut result = validate_with(message, config);
   if !result.valid || !result.warnings.is_empty() {
      result.suggestion = suggest_fix(message, Some(config));
   }

   if json {
      println!("{}", serde_json::to_string_pretty(&result)?);
   } else {
      for issue in result.errors.iter().chain(&result.warnings) {
         println!("{}", style::issue_line(issue));
      }
      println!("{}", style::summary_line(&result));

      if let Some(suggestion) = &result.suggestion {
         println!();
         println!("{}", style::boxed_message("Suggested fix", suggestion, style::term_width()));
      }
   }

   Ok(if result.valid {
      ExitCode::SUCCESS
   } else {
      ExitCode::FAILURE
   })
}

fn run_fix(message: &str, config: &Config, options: AutoFixOptions) -> String {
   let options = options.with_config(config.clone());
   if let Some(fixed) = autofix(message, &options) {
      fixed
   } else {
      eprintln!("{} {}", style::info(icons::INFO), style::info("no fix applied"));
      message.to_string()
   }
}

fn run(args: Args) -> Result<ExitCode> {
   let config = Config::load(&args.dir, args.config.as_deref())?;

   let command = args
      .command
      .unwrap_or(Command::Lint { file: None, json: false });

   match command {
      Command::Lint { file, json } => {
         let message = read_message(file.as_deref())?;
         if message.trim().is_empty() {
            style::warn("commit message is empty");
         }
         run_lint(&message, &config, json)
      },
      Command::Fix { file, no_infer_type, no_fix_case, no_fix_period, no_wrap } => {
         let message = read_message(file.as_deref())?;
         let options = fix_options(no_infer_type, no_fix_case, no_fix_period, no_wrap);
         println!("{}", run_fix(&message, &config, options));
         Ok(ExitCode::SUCCESS)
      },
   }
}

fn main() -> ExitCode {
   let args = Args::parse();

   match run(args) {
      Ok(code) => code,
      Err(e) => {
         eprintln!("{} {}", style::error(icons::ERROR), style::error(&e.to_string()));
         ExitCode::from(2)
      },
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_strip_comments() {
      let raw = "feat: add x\n\nbody\n# Please enter the commit message\n#\n# On branch main";
      assert_eq!(strip_comments(raw), "feat: add x\n\nbody");
   }

   #[test]
   fn test_strip_comments_keeps_inline_hash() {
      assert_eq!(strip_comments("fix: handle #123 properly"), "fix: handle #123 properly");
   }

   #[test]
   fn test_fix_options_from_flags() {
      let opts = fix_options(false, true, false, true);
      assert!(opts.infer_type);
      assert!(!opts.fix_case);
      assert!(opts.fix_trailing_period);
      assert!(!opts.wrap_lines);
   }

   #[test]
   fn test_run_fix_falls_back_to_original() {
      let config = Config::default();
      let all = || fix_options(false, false, false, false);
      assert_eq!(run_fix("feat: add x", &config, all()), "feat: add x");
      assert_eq!(run_fix("Add x.", &config, all()), "feat: add x");
   }

   #[test]
   fn test_read_message_from_file() {
      let dir = tempfile::tempdir().unwrap();
      let path = dir.path().join("COMMIT_EDITMSG");
      std::fs::write(&path, "fix: crash\n# comment\n").unwrap();
      assert_eq!(read_message(Some(&path)).unwrap(), "fix: crash");
   }
}
