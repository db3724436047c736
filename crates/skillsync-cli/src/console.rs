//! Console progress output.

use skillsync_core::{ProgressWriter, RuleOutcome};
use std::path::Path;

/// Prints run progress to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleWriter {
    check: bool,
}

impl ConsoleWriter {
    pub fn new(check: bool) -> Self {
        Self { check }
    }
}

impl ProgressWriter for ConsoleWriter {
    fn reading_index(&self, path: &Path) {
        println!("📖 Reading skills index from: {}", path.display());
    }

    fn count_found(&self, count: usize) {
        println!("🔢 Total skills found: {}", count);
    }

    fn updating_document(&self, path: &Path) {
        if self.check {
            println!("🔍 Checking README at: {}", path.display());
        } else {
            println!("📝 Updating README at: {}", path.display());
        }
    }

    fn rule_applied(&self, rule_id: &str, outcome: &RuleOutcome) {
        if let Some(line) = format_outcome(rule_id, outcome) {
            println!("{}", line);
        }
    }

    fn finished(&self, path: &Path, written: bool) {
        if written {
            println!("✅ {} updated successfully.", display_name(path));
        }
    }

    fn check_result(&self, path: &Path, count: usize, changed: &[&str]) {
        println!("{}", format_check_result(path, count, changed));
    }
}

fn format_check_result(path: &Path, count: usize, changed: &[&str]) -> String {
    let name = display_name(path);
    if changed.is_empty() {
        format!("✅ {} is up to date ({} skills).", name, count)
    } else {
        format!("❌ {} is out of date; would update: {}", name, changed.join(", "))
    }
}

/// One line per rewritten envelope; unchanged and missing ones stay quiet
/// (missing envelopes are logged as warnings by the core).
fn format_outcome(rule_id: &str, outcome: &RuleOutcome) -> Option<String> {
    match outcome {
        RuleOutcome::Updated {
            previous,
            count,
            occurrences,
        } => {
            let times = if *occurrences == 1 {
                String::new()
            } else {
                format!(" (x{})", occurrences)
            };
            Some(format!("   ✏️  {}: {} → {}{}", rule_id, previous, count, times))
        }
        RuleOutcome::Unchanged { .. } | RuleOutcome::Missing => None,
    }
}

/// File name for messages, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_updated() {
        let outcome = RuleOutcome::Updated {
            previous: "40".to_string(),
            count: 42,
            occurrences: 1,
        };
        assert_eq!(
            format_outcome("title", &outcome),
            Some("   ✏️  title: 40 → 42".to_string())
        );
    }

    #[test]
    fn test_format_updated_multiple() {
        let outcome = RuleOutcome::Updated {
            previous: "5".to_string(),
            count: 7,
            occurrences: 2,
        };
        assert!(format_outcome("browse-header", &outcome).unwrap().ends_with("5 → 7 (x2)"));
    }

    #[test]
    fn test_quiet_outcomes() {
        assert_eq!(format_outcome("intro", &RuleOutcome::Missing), None);
        assert_eq!(
            format_outcome("intro", &RuleOutcome::Unchanged { occurrences: 1 }),
            None
        );
    }

    #[test]
    fn test_format_check_result() {
        let path = Path::new("/repo/README.md");
        assert_eq!(
            format_check_result(path, 7, &[]),
            "✅ README.md is up to date (7 skills)."
        );
        assert_eq!(
            format_check_result(path, 7, &["title", "intro"]),
            "❌ README.md is out of date; would update: title, intro"
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/repo/README.md")), "README.md");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
