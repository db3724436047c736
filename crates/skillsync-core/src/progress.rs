//! Progress reporting seam between the synchronizer and its front end.

use std::path::Path;

use crate::rules::RuleOutcome;

/// Receives human-readable progress from a synchronization run.
///
/// The CLI prints these to the console; tests use [`NullWriter`].
pub trait ProgressWriter {
    /// About to read the skills index
    fn reading_index(&self, path: &Path);

    /// Index parsed
    fn count_found(&self, count: usize);

    /// About to read and rewrite the document
    fn updating_document(&self, path: &Path);

    /// One rule has been applied
    fn rule_applied(&self, rule_id: &str, outcome: &RuleOutcome);

    /// Run finished; `written` is false for check runs
    fn finished(&self, path: &Path, written: bool);

    /// Verdict of a check run; `changed` lists the rules that would rewrite
    fn check_result(&self, path: &Path, count: usize, changed: &[&str]);
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWriter;

impl ProgressWriter for NullWriter {
    fn reading_index(&self, _path: &Path) {}
    fn count_found(&self, _count: usize) {}
    fn updating_document(&self, _path: &Path) {}
    fn rule_applied(&self, _rule_id: &str, _outcome: &RuleOutcome) {}
    fn finished(&self, _path: &Path, _written: bool) {}
    fn check_result(&self, _path: &Path, _count: usize, _changed: &[&str]) {}
}
