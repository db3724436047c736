//! Keeps the skill counts shown in a README in step with a skills index.
//!
//! # Overview
//!
//! The skills index is a JSON array; its length is the skill count. The
//! README embeds that count in a handful of fixed places (the title, the
//! summary blockquote, the intro sentence, the browse header and the
//! table-of-contents link to it). Each place is a [`Rule`]: a literal
//! envelope with the digit run as its only variable part.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use skillsync_core::{synchronize, NullWriter};
//!
//! let report = synchronize(
//!     Path::new("skills_index.json"),
//!     Path::new("README.md"),
//!     &NullWriter,
//! )?;
//! println!("{} skills", report.count);
//! # Ok::<(), skillsync_core::SyncError>(())
//! ```

pub mod error;
pub mod index;
pub mod progress;
pub mod rules;
pub mod sync;

pub use error::{Result, SyncError};
pub use index::{count_entries, load_skill_count};
pub use progress::{NullWriter, ProgressWriter};
pub use rules::{apply_rules, find_rule, rule_ids, rules, Rule, RuleOutcome};
pub use sync::{synchronize, synchronize_with, SyncOptions, SyncReport};
