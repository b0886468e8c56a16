//! # jira-pr-linker
//!
//! A CI step that links a pull request to its Jira issue: the issue key found in
//! the branch name or title is added to the PR title, and a comment with the
//! issue summary and link is created or kept up to date.

pub mod actions;
pub mod app;
pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod issue_key;
pub mod jira;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use event::PullRequestContext;
pub use issue_key::IssueKey;
