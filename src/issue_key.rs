use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref PATTERN: Regex = Regex::new(r"([A-Z]+-\d+)").unwrap();
    static ref ANCHORED: Regex = Regex::new(r"^[A-Z]+-\d+$").unwrap();
}

/// Warning emitted when neither the branch nor the title names an issue
pub const NO_ISSUE_KEY_WARNING: &str = "No Jira issue key found in branch name or PR title";

/// A Jira issue key such as `TEST-123`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IssueKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if ANCHORED.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::Config(format!(
                "{:?} does not look like a Jira issue key (e.g., TRACK-123)",
                s
            )))
        }
    }
}

/// Extract the first issue key from a string (e.g., "feature/TRACK-123-foo" -> "TRACK-123")
pub fn extract_from_str(text: &str) -> Option<IssueKey> {
    PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| IssueKey(m.as_str().to_string()))
}

/// Extract the issue key for a pull request
///
/// The branch name takes precedence; the title is only consulted when the
/// branch carries no key.
pub fn extract(branch: &str, title: &str) -> Option<IssueKey> {
    extract_from_str(branch).or_else(|| extract_from_str(title))
}
