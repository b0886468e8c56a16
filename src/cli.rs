use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Action inputs and runner context.
///
/// The Actions runner exposes `with:` inputs as `INPUT_<NAME>` variables, so every
/// flag falls back to the variable the runner would set.
#[derive(Parser, Debug, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[clap(long, env = "INPUT_JIRA-BASE-URL")]
    pub jira_base_url: Option<String>,

    #[clap(long, env = "INPUT_JIRA-USERNAME")]
    pub jira_username: Option<String>,

    #[clap(long, env = "INPUT_JIRA-API-TOKEN", hide_env_values = true)]
    pub jira_api_token: Option<String>,

    #[clap(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    #[clap(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    #[clap(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// `owner/repo` of the repository the workflow runs in
    #[clap(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    #[clap(short, long, env = "INPUT_DRY-RUN", action = ArgAction::Set, value_parser = parse_flag, default_value = "false")]
    pub dry_run: bool,

    #[clap(long, env = "RUNNER_DEBUG", action = ArgAction::Set, value_parser = parse_flag, default_value = "false")]
    pub debug: bool,
}

/// Accepts the spellings the runner and workflow authors use for booleans.
fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(format!("expected a boolean, got {:?}", other)),
    }
}
