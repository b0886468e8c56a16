use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::github::parse_repository;

/// Event names that carry a `pull_request` payload
const PULL_REQUEST_EVENTS: &[&str] = &["pull_request", "pull_request_target"];

/// The pull request a run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    pub number: u64,
    pub title: String,
    /// Head branch name (e.g., "feature/TRACK-123-add-feature")
    pub branch_ref: String,
    pub repo_owner: String,
    pub repo_name: String,
}

#[derive(Deserialize)]
struct Head {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    title: String,
    head: Head,
}

#[derive(Deserialize)]
struct Owner {
    login: String,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: Owner,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    repository: Option<RepositoryPayload>,
}

impl PullRequestContext {
    /// Load the pull request from the runner's event payload
    ///
    /// # Arguments
    /// * `event_name` - The triggering event (`GITHUB_EVENT_NAME`)
    /// * `event_path` - Path to the JSON payload (`GITHUB_EVENT_PATH`)
    /// * `repository` - `owner/repo` (`GITHUB_REPOSITORY`), preferred over the payload
    pub fn load(
        event_name: Option<&str>,
        event_path: Option<&Path>,
        repository: Option<&str>,
    ) -> Result<Self> {
        match event_name {
            Some(name) if PULL_REQUEST_EVENTS.contains(&name) => {}
            _ => return Err(Error::NotPullRequestEvent),
        }

        let path = event_path
            .ok_or_else(|| Error::Config("GITHUB_EVENT_PATH is not set".to_string()))?;
        let raw = std::fs::read_to_string(path)?;

        Self::from_payload(&raw, repository)
    }

    /// Parse a pull request event payload
    pub fn from_payload(raw: &str, repository: Option<&str>) -> Result<Self> {
        let payload: EventPayload = serde_json::from_str(raw)?;
        let pr = payload.pull_request.ok_or(Error::NotPullRequestEvent)?;

        let (repo_owner, repo_name) = match (repository, payload.repository) {
            (Some(full_name), _) if !full_name.trim().is_empty() => parse_repository(full_name)?,
            (_, Some(repo)) => (repo.owner.login, repo.name),
            _ => {
                return Err(Error::Config(
                    "Unable to determine the repository owner and name".to_string(),
                ))
            }
        };

        Ok(Self {
            number: pr.number,
            title: pr.title,
            branch_ref: pr.head.ref_field,
            repo_owner,
            repo_name,
        })
    }
}
