use tracing::info;

use crate::actions;
use crate::cli::Args;
use crate::comment::{self, CommentAction};
use crate::config::Config;
use crate::error::Result;
use crate::event::PullRequestContext;
use crate::github::{GitHubClient, RepoHost};
use crate::issue_key::{self, IssueKey, NO_ISSUE_KEY_WARNING};
use crate::jira::{IssueTracker, JiraClient};

/// What happened to the PR title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleAction {
    Updated(String),
    Unchanged,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Neither the branch nor the title names an issue
    NoIssueKey,
    Linked {
        key: IssueKey,
        title: TitleAction,
        comment: CommentAction,
    },
}

/// Main application entry point
pub async fn run(args: Args) -> Result<Outcome> {
    let config = Config::from_args(&args)?;
    let pr = PullRequestContext::load(
        args.event_name.as_deref(),
        args.event_path.as_deref(),
        args.repository.as_deref(),
    )?;

    let host = GitHubClient::new(
        &config.github_token,
        &config.github_api_url,
        pr.repo_owner.clone(),
        pr.repo_name.clone(),
    )?;
    let tracker = JiraClient::new(&config.jira)?;

    Linker::new(&host, &tracker, &config.jira.base_url)
        .dry_run(config.dry_run)
        .run(&pr)
        .await
}

/// Links one pull request to its Jira issue
pub struct Linker<'a> {
    host: &'a dyn RepoHost,
    tracker: &'a dyn IssueTracker,
    jira_base_url: &'a str,
    dry_run: bool,
}

impl<'a> Linker<'a> {
    pub fn new(
        host: &'a dyn RepoHost,
        tracker: &'a dyn IssueTracker,
        jira_base_url: &'a str,
    ) -> Self {
        Self {
            host,
            tracker,
            jira_base_url,
            dry_run: false,
        }
    }

    /// Plan and log writes without performing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Extract the key, then sync the title and the link comment, in that order
    ///
    /// A failure after the title was updated leaves the new title in place.
    pub async fn run(&self, pr: &PullRequestContext) -> Result<Outcome> {
        let Some(key) = issue_key::extract(&pr.branch_ref, &pr.title) else {
            actions::warning(NO_ISSUE_KEY_WARNING);
            return Ok(Outcome::NoIssueKey);
        };
        actions::step("Jira issue", key.as_str());
        info!(key = %key, number = pr.number, "Found Jira issue key");

        let title = self.sync_title(pr, &key).await?;

        let issue = self.tracker.find_issue(&key).await?;
        actions::step("Issue summary", &issue.summary);

        let comment = self.sync_comment(pr.number, &key, &issue.summary).await?;

        Ok(Outcome::Linked {
            key,
            title,
            comment,
        })
    }

    /// Prefix the title with `[KEY] ` unless the key already appears anywhere in it
    async fn sync_title(&self, pr: &PullRequestContext, key: &IssueKey) -> Result<TitleAction> {
        if pr.title.contains(key.as_str()) {
            return Ok(TitleAction::Unchanged);
        }

        let new_title = format!("[{}] {}", key, pr.title);
        if !self.dry_run {
            self.host.update_title(pr.number, &new_title).await?;
        }
        actions::changed(&format!("Updated PR title: {}", new_title), self.dry_run);

        Ok(TitleAction::Updated(new_title))
    }

    /// Create the link comment, or refresh the existing one in place
    async fn sync_comment(
        &self,
        number: u64,
        key: &IssueKey,
        summary: &str,
    ) -> Result<CommentAction> {
        let body = comment::make_body(key, summary, self.jira_base_url);
        let existing = self.host.list_comments(number).await?;
        let action = comment::plan_upsert(&existing, key, &body);

        match &action {
            CommentAction::Create => {
                if !self.dry_run {
                    self.host.create_comment(number, &body).await?;
                }
                actions::changed(&format!("Commented on #{}", number), self.dry_run);
            }
            CommentAction::Update { id } => {
                if !self.dry_run {
                    self.host.update_comment(*id, &body).await?;
                }
                actions::changed(&format!("Updated comment {}", id), self.dry_run);
            }
            CommentAction::Unchanged { id } => {
                actions::debug(&format!("Link comment {} is up to date", id));
            }
        }

        Ok(action)
    }
}
