//! The synchronization run: index -> count -> document rewrite.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::index::load_skill_count;
use crate::progress::ProgressWriter;
use crate::rules::{apply_rules, rules, Rule, RuleOutcome};

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Compute everything but leave the document untouched
    pub check: bool,
    /// Treat a missing envelope as an error instead of a warning
    pub strict: bool,
}

/// Result of a synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub document_path: PathBuf,
    /// Number of entries in the skills index
    pub count: usize,
    /// Outcome per rule, in registry order
    pub outcomes: Vec<(&'static str, RuleOutcome)>,
    /// Whether the document was written back
    pub written: bool,
}

impl SyncReport {
    /// Ids of rules that rewrote (or would rewrite) at least one occurrence.
    pub fn changed(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| o.is_updated())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Ids of rules whose envelope was not found.
    pub fn missing(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| o.is_missing())
            .map(|(id, _)| *id)
            .collect()
    }

    /// True when no present envelope needed rewriting.
    pub fn is_in_sync(&self) -> bool {
        self.changed().is_empty()
    }
}

/// Synchronize the document's displayed counts with the index, writing the
/// result back to `document_path`.
pub fn synchronize(
    index_path: &Path,
    document_path: &Path,
    progress: &dyn ProgressWriter,
) -> Result<SyncReport> {
    synchronize_with(index_path, document_path, SyncOptions::default(), progress)
}

/// [`synchronize`] with explicit options.
///
/// The document is written with a single whole-file write after every rule
/// has run, so any failure before that point leaves it untouched.
pub fn synchronize_with(
    index_path: &Path,
    document_path: &Path,
    options: SyncOptions,
    progress: &dyn ProgressWriter,
) -> Result<SyncReport> {
    progress.reading_index(index_path);
    let count = load_skill_count(index_path)?;
    progress.count_found(count);

    progress.updating_document(document_path);
    let content = std::fs::read_to_string(document_path)
        .map_err(|e| SyncError::from_read(document_path, e))?;

    let (updated, outcomes) = apply_rules(&content, count);
    for (id, outcome) in &outcomes {
        progress.rule_applied(id, outcome);
    }

    let missing = missing_rules(&outcomes);
    for rule in &missing {
        warn!(
            "Count envelope '{}' ({}) not found in {}; left unchanged",
            rule.id,
            rule.description,
            document_path.display()
        );
    }
    if options.strict && !missing.is_empty() {
        return Err(SyncError::MissingEnvelopes {
            path: document_path.to_path_buf(),
            rules: missing.iter().map(|r| r.id.to_string()).collect(),
        });
    }

    let written = if options.check {
        debug!("Check mode: not writing {}", document_path.display());
        false
    } else {
        std::fs::write(document_path, &updated).map_err(|source| {
            SyncError::OutputUnwritable {
                path: document_path.to_path_buf(),
                source,
            }
        })?;
        true
    };

    progress.finished(document_path, written);

    Ok(SyncReport {
        document_path: document_path.to_path_buf(),
        count,
        outcomes,
        written,
    })
}

/// Rules whose envelope was absent, in registry order.
fn missing_rules(outcomes: &[(&'static str, RuleOutcome)]) -> Vec<&'static Rule> {
    rules()
        .iter()
        .zip(outcomes)
        .filter(|(_, (_, outcome))| outcome.is_missing())
        .map(|(rule, _)| rule)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullWriter;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Records every progress call as a short string.
    #[derive(Default)]
    struct RecordingWriter {
        events: RefCell<Vec<String>>,
    }

    impl ProgressWriter for RecordingWriter {
        fn reading_index(&self, _path: &Path) {
            self.events.borrow_mut().push("index".to_string());
        }
        fn count_found(&self, count: usize) {
            self.events.borrow_mut().push(format!("count:{}", count));
        }
        fn updating_document(&self, _path: &Path) {
            self.events.borrow_mut().push("document".to_string());
        }
        fn rule_applied(&self, rule_id: &str, _outcome: &RuleOutcome) {
            self.events.borrow_mut().push(format!("rule:{}", rule_id));
        }
        fn finished(&self, _path: &Path, written: bool) {
            self.events.borrow_mut().push(format!("finished:{}", written));
        }
        fn check_result(&self, _path: &Path, _count: usize, changed: &[&str]) {
            self.events.borrow_mut().push(format!("check:{}", changed.len()));
        }
    }

    fn setup(index: &str, readme: &str) -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let index_path = temp.path().join("skills_index.json");
        let readme_path = temp.path().join("README.md");
        fs::write(&index_path, index).unwrap();
        fs::write(&readme_path, readme).unwrap();
        (temp, index_path, readme_path)
    }

    #[test]
    fn test_progress_sequence() {
        let (_temp, index, readme) = setup("[1, 2]", "## Browse 1+ Skills\n");
        let writer = RecordingWriter::default();
        synchronize(&index, &readme, &writer).unwrap();

        let events = writer.events.into_inner();
        assert_eq!(events[0], "index");
        assert_eq!(events[1], "count:2");
        assert_eq!(events[2], "document");
        assert_eq!(events.iter().filter(|e| e.starts_with("rule:")).count(), 5);
        assert_eq!(events.last().unwrap(), "finished:true");
    }

    #[test]
    fn test_report_contents() {
        let (_temp, index, readme) = setup("[1, 2]", "## Browse 1+ Skills\n");
        let report = synchronize(&index, &readme, &NullWriter).unwrap();

        assert_eq!(report.count, 2);
        assert!(report.written);
        assert_eq!(report.changed(), vec!["browse-header"]);
        assert_eq!(report.missing().len(), 4);
        assert!(!report.is_in_sync());
        assert_eq!(fs::read_to_string(&readme).unwrap(), "## Browse 2+ Skills\n");
    }

    #[test]
    fn test_check_mode_does_not_write() {
        let (_temp, index, readme) = setup("[1, 2, 3]", "## Browse 1+ Skills\n");
        let options = SyncOptions { check: true, strict: false };
        let report = synchronize_with(&index, &readme, options, &NullWriter).unwrap();

        assert!(!report.written);
        assert!(!report.is_in_sync());
        assert_eq!(fs::read_to_string(&readme).unwrap(), "## Browse 1+ Skills\n");
    }

    #[test]
    fn test_strict_mode_fails_before_write() {
        let (_temp, index, readme) = setup("[1, 2, 3]", "## Browse 1+ Skills\n");
        let options = SyncOptions { check: false, strict: true };
        let err = synchronize_with(&index, &readme, options, &NullWriter).unwrap_err();

        match err {
            SyncError::MissingEnvelopes { rules, .. } => {
                assert_eq!(rules, vec!["title", "blockquote", "intro", "browse-toc-link"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(&readme).unwrap(), "## Browse 1+ Skills\n");
    }

    #[test]
    fn test_missing_document() {
        let (temp, index, _readme) = setup("[]", "");
        let err = synchronize(&index, &temp.path().join("NOPE.md"), &NullWriter).unwrap_err();
        assert!(matches!(err, SyncError::InputMissing { .. }));
    }

    #[test]
    fn test_document_path_through_a_file() {
        let (temp, index, _readme) = setup("[]", "");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let err = synchronize(&index, &blocker.join("README.md"), &NullWriter).unwrap_err();
        assert!(matches!(err, SyncError::Read { .. } | SyncError::InputMissing { .. }));
    }

    #[test]
    fn test_missing_rules_carry_descriptions() {
        let outcomes = vec![
            ("title", RuleOutcome::Unchanged { occurrences: 1 }),
            ("blockquote", RuleOutcome::Missing),
            ("intro", RuleOutcome::Unchanged { occurrences: 1 }),
            ("browse-header", RuleOutcome::Missing),
            ("browse-toc-link", RuleOutcome::Unchanged { occurrences: 1 }),
        ];
        let missing = missing_rules(&outcomes);
        let ids: Vec<&str> = missing.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["blockquote", "browse-header"]);
        assert_eq!(missing[0].description, "Summary blockquote under the title");
        assert_eq!(missing[1].description, "Browse section header");
    }
}
