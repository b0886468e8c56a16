//! Configuration intake for jira-pr-linker
//!
//! Turns the raw action inputs into a validated [`Config`]. Every required input
//! must be present and non-blank; the first one that is not is reported by its
//! action input name.

use std::fmt;

use url::Url;

use crate::cli::Args;
use crate::error::{Error, Result};

/// Jira connection settings
#[derive(Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira instance, without a trailing slash
    pub base_url: String,
    pub username: String,
    pub api_token: String,
}

/// Validated run configuration
#[derive(Clone)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub jira: JiraConfig,
    pub dry_run: bool,
}

impl Config {
    /// Build the configuration from parsed arguments
    ///
    /// Inputs are checked in the order `github-token`, `jira-base-url`,
    /// `jira-username`, `jira-api-token`.
    pub fn from_args(args: &Args) -> Result<Self> {
        let github_token = required("github-token", &args.github_token)?;
        let jira_base_url = required("jira-base-url", &args.jira_base_url)?;
        let jira_username = required("jira-username", &args.jira_username)?;
        let jira_api_token = required("jira-api-token", &args.jira_api_token)?;

        Ok(Self {
            github_token,
            github_api_url: args.github_api_url.trim().to_string(),
            jira: JiraConfig {
                base_url: normalize_base_url(&jira_base_url)?,
                username: jira_username,
                api_token: jira_api_token,
            },
            dry_run: args.dry_run,
        })
    }
}

fn required(name: &'static str, value: &Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::MissingInput(name)),
    }
}

/// Validate the Jira base URL and strip any trailing slash
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw)?;
    if parsed.host_str().is_none() {
        return Err(Error::Config(format!(
            "jira-base-url has no host: {}",
            raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"***")
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"***")
            .field("github_api_url", &self.github_api_url)
            .field("jira", &self.jira)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
