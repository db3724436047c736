//! Substitution rules - registry of the count envelopes in the README.
//!
//! Each rule pairs a fixed literal envelope (with the digit run as the only
//! variable part) and a template that renders the envelope for a given
//! count. Rules run independently and in registry order.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{Result, SyncError};

/// Static description of a rule, compiled into a [`Rule`] on first use.
struct RuleSpec {
    id: &'static str,
    description: &'static str,
    pattern: &'static str,
    render: fn(usize) -> String,
}

/// Registry of all count envelopes, in the order they appear in the README.
/// Add new envelopes here.
const RULE_SPECS: &[RuleSpec] = &[
    RuleSpec {
        id: "title",
        description: "Document title",
        pattern: r"# 🌌 Antigravity Awesome Skills: (?P<count>\d+)\+ Agentic Skills",
        render: render_title,
    },
    RuleSpec {
        id: "blockquote",
        description: "Summary blockquote under the title",
        pattern: r"Collection of (?P<count>\d+)\+ Universal",
        render: render_blockquote,
    },
    RuleSpec {
        id: "intro",
        description: "Introductory sentence",
        pattern: r"library of \*\*(?P<count>\d+) high-performance skills\*\*",
        render: render_intro,
    },
    RuleSpec {
        id: "browse-header",
        description: "Browse section header",
        pattern: r"## Browse (?P<count>\d+)\+ Skills",
        render: render_browse_header,
    },
    RuleSpec {
        id: "browse-toc-link",
        description: "Table-of-contents link to the browse section",
        pattern: r"\[📚 Browse (?P<count>\d+)\+ Skills\]\(#browse-\d+-skills\)",
        render: render_browse_toc_link,
    },
];

fn render_title(count: usize) -> String {
    format!("# 🌌 Antigravity Awesome Skills: {}+ Agentic Skills", count)
}

fn render_blockquote(count: usize) -> String {
    format!("Collection of {}+ Universal", count)
}

fn render_intro(count: usize) -> String {
    format!("library of **{} high-performance skills**", count)
}

fn render_browse_header(count: usize) -> String {
    format!("## Browse {}+ Skills", count)
}

/// The anchor slug follows the header: `## Browse 7+ Skills` -> `#browse-7-skills`.
fn render_browse_toc_link(count: usize) -> String {
    format!("[📚 Browse {}+ Skills](#browse-{}-skills)", count, count)
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    RULE_SPECS
        .iter()
        .map(|spec| Rule {
            id: spec.id,
            description: spec.description,
            regex: Regex::new(spec.pattern).expect("rule patterns are valid regexes"),
            render: spec.render,
        })
        .collect()
});

/// What a rule did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// At least one occurrence showed a different count and was rewritten
    Updated {
        /// Count shown by the first occurrence before rewriting
        previous: String,
        count: usize,
        occurrences: usize,
    },
    /// Every occurrence already showed the current count
    Unchanged { occurrences: usize },
    /// Envelope not present in the document
    Missing,
}

impl RuleOutcome {
    pub fn is_missing(&self) -> bool {
        matches!(self, RuleOutcome::Missing)
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, RuleOutcome::Updated { .. })
    }
}

/// A compiled substitution rule.
pub struct Rule {
    /// Stable identifier (e.g., "browse-header")
    pub id: &'static str,
    /// Where the envelope lives in the README
    pub description: &'static str,
    regex: Regex,
    render: fn(usize) -> String,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

impl Rule {
    /// Render this rule's envelope for `count`.
    pub fn render(&self, count: usize) -> String {
        (self.render)(count)
    }

    /// Replace every occurrence of the envelope in `text` with the rendering
    /// for `count`. Text outside the envelope is left untouched.
    pub fn apply(&self, text: &str, count: usize) -> (String, RuleOutcome) {
        let replacement = self.render(count);
        let mut occurrences = 0;
        let mut previous: Option<String> = None;
        let mut drifted = false;

        let rewritten = self.regex.replace_all(text, |caps: &Captures| {
            occurrences += 1;
            if previous.is_none() {
                previous = caps.name("count").map(|m| m.as_str().to_string());
            }
            if caps[0] != replacement {
                drifted = true;
            }
            replacement.clone()
        });
        let rewritten = rewritten.into_owned();

        let outcome = if occurrences == 0 {
            RuleOutcome::Missing
        } else if drifted {
            RuleOutcome::Updated {
                previous: previous.unwrap_or_default(),
                count,
                occurrences,
            }
        } else {
            RuleOutcome::Unchanged { occurrences }
        };

        debug!("Rule '{}': {:?}", self.id, outcome);
        (rewritten, outcome)
    }
}

/// All rules, in document order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// List the ids of all rules.
pub fn rule_ids() -> Vec<&'static str> {
    rules().iter().map(|r| r.id).collect()
}

/// Look up a rule by id.
pub fn find_rule(id: &str) -> Result<&'static Rule> {
    let id = id.trim();
    rules()
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| SyncError::UnknownRule {
            id: id.to_string(),
            available: rule_ids().join(", "),
        })
}

/// Run every rule over `text` in order.
///
/// Returns the rewritten text and each rule's outcome keyed by rule id.
pub fn apply_rules(text: &str, count: usize) -> (String, Vec<(&'static str, RuleOutcome)>) {
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(rules().len());

    for rule in rules() {
        let (next, outcome) = rule.apply(&current, count);
        current = next;
        outcomes.push((rule.id, outcome));
    }

    (current, outcomes)
}
