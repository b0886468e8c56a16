use async_trait::async_trait;
use octocrab::{Octocrab, Page};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Largest page size the comments endpoint allows
const COMMENTS_PER_PAGE: u8 = 100;

/// A comment on a pull request's conversation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentRecord {
    pub id: u64,
    /// Absent bodies decode as empty strings
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Operations the linker needs from the repository host
///
/// An implementation is bound to a single `owner/repo`.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Replace the title of a pull request
    async fn update_title(&self, number: u64, title: &str) -> Result<()>;

    /// List every comment on a pull request, oldest first
    async fn list_comments(&self, number: u64) -> Result<Vec<CommentRecord>>;

    /// Post a new comment on a pull request
    async fn create_comment(&self, number: u64, body: &str) -> Result<()>;

    /// Replace the body of an existing comment
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()>;
}

/// [`RepoHost`] backed by the GitHub REST API
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a client for `owner/repo`, authenticating with a token
    ///
    /// `api_url` is the REST API root (`https://api.github.com`, or the
    /// `/api/v3` endpoint of a GitHub Enterprise server).
    pub fn new(
        token: &str,
        api_url: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url)?
            .build()?;

        debug!(owner = %owner, repo = %repo, api_url, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
        })
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn update_title(&self, number: u64, title: &str) -> Result<()> {
        info!(owner = %self.owner, repo = %self.repo, number, "Updating PR title");

        let route = format!("/repos/{}/{}/pulls/{}", self.owner, self.repo, number);
        let _: serde_json::Value = self
            .client
            .patch(route, Some(&json!({ "title": title })))
            .await?;
        Ok(())
    }

    async fn list_comments(&self, number: u64) -> Result<Vec<CommentRecord>> {
        debug!(owner = %self.owner, repo = %self.repo, number, "Listing PR comments");

        let route = format!(
            "/repos/{}/{}/issues/{}/comments",
            self.owner, self.repo, number
        );
        let first_page: Page<CommentRecord> = self
            .client
            .get(route, Some(&[("per_page", COMMENTS_PER_PAGE)]))
            .await?;
        let comments = self.client.all_pages(first_page).await?;

        debug!(count = comments.len(), "Fetched PR comments");
        Ok(comments)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        info!(owner = %self.owner, repo = %self.repo, number, "Creating PR comment");

        let route = format!(
            "/repos/{}/{}/issues/{}/comments",
            self.owner, self.repo, number
        );
        let _: serde_json::Value = self
            .client
            .post(route, Some(&json!({ "body": body })))
            .await?;
        Ok(())
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        info!(owner = %self.owner, repo = %self.repo, comment_id, "Updating PR comment");

        let route = format!(
            "/repos/{}/{}/issues/comments/{}",
            self.owner, self.repo, comment_id
        );
        let _: serde_json::Value = self
            .client
            .patch(route, Some(&json!({ "body": body })))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Split `owner/repo` into its parts
pub fn parse_repository(full_name: &str) -> Result<(String, String)> {
    match full_name.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "Invalid repository format: {}. Expected owner/repo",
            full_name
        ))),
    }
}
