//! Jira integration for jira-pr-linker
//!
//! Looks up the summary of the issue a pull request is linked to.
//!
//! Requests go to the Jira REST API version 2 over HTTPS, authenticated with
//! basic auth (username + API token). Only the host (and port) of the
//! configured base URL is used to reach the API.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::issue_key::IssueKey;

/// REST API version the lookups are made against
const API_VERSION: &str = "2";

/// The parts of a Jira issue the linker uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDetails {
    pub key: IssueKey,
    pub summary: String,
}

/// Operations the linker needs from the issue tracker
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch the current details of an issue
    async fn find_issue(&self, key: &IssueKey) -> Result<IssueDetails>;
}

#[derive(Deserialize)]
struct IssueFields {
    summary: String,
}

#[derive(Deserialize)]
struct IssueResponse {
    fields: IssueFields,
}

/// [`IssueTracker`] backed by the Jira REST API
pub struct JiraClient {
    http: reqwest::Client,
    api_root: String,
    username: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Self::with_api_root(
            api_root(&config.base_url)?,
            &config.username,
            &config.api_token,
        )
    }

    /// Create a client against an explicit REST root (e.g. `https://host/rest/api/2`)
    pub(crate) fn with_api_root(api_root: String, username: &str, api_token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(api_root = %api_root, "Created Jira client");

        Ok(Self {
            http,
            api_root,
            username: username.to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn issue_endpoint(&self, key: &IssueKey) -> String {
        format!("{}/issue/{}", self.api_root, key)
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn find_issue(&self, key: &IssueKey) -> Result<IssueDetails> {
        let endpoint = self.issue_endpoint(key);
        debug!(key = %key, endpoint = %endpoint, "Fetching Jira issue");

        let response = self
            .http
            .get(&endpoint)
            .query(&[("fields", "summary")])
            .basic_auth(&self.username, Some(&self.api_token))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(key = %key, error = %err, "Could not read Jira error body");
                    String::new()
                }
            };
            return Err(lookup_error(key, status, &body));
        }

        let issue: IssueResponse = response.json().await?;
        Ok(IssueDetails {
            key: key.clone(),
            summary: issue.fields.summary,
        })
    }
}

/// Build `https://<host>[:port]/rest/api/2` from the configured base URL
fn api_root(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url)?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::Config(format!("jira-base-url has no host: {}", base_url)))?;

    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(format!("https://{}/rest/api/{}", authority, API_VERSION))
}

fn lookup_error(key: &IssueKey, status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::IssueNotFound(key.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Jira(format!(
            "Jira rejected the credentials while looking up {} (status {})",
            key,
            status.as_u16()
        )),
        _ => Error::Jira(format!(
            "Jira lookup for {} failed with status {}: {}",
            key,
            status.as_u16(),
            truncate(body, 300)
        )),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn key(s: &str) -> IssueKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_api_root_uses_https_and_host() {
        assert_eq!(
            api_root("https://company.atlassian.net").unwrap(),
            "https://company.atlassian.net/rest/api/2"
        );
        assert_eq!(
            api_root("http://jira.internal:8443/jira").unwrap(),
            "https://jira.internal:8443/rest/api/2"
        );
    }

    #[test]
    fn test_issue_endpoint() {
        let client = JiraClient::new(&JiraConfig {
            base_url: "https://company.atlassian.net".into(),
            username: "bot".into(),
            api_token: "token".into(),
        })
        .unwrap();

        assert_eq!(
            client.issue_endpoint(&key("TEST-123")),
            "https://company.atlassian.net/rest/api/2/issue/TEST-123"
        );
    }

    #[test]
    fn test_lookup_error_not_found() {
        let err = lookup_error(&key("TEST-1"), StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "Jira issue TEST-1 not found");
    }

    #[test]
    fn test_lookup_error_auth() {
        let err = lookup_error(&key("TEST-1"), StatusCode::UNAUTHORIZED, "nope");
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn test_lookup_error_includes_body_excerpt() {
        let body = "x".repeat(1000);
        let err = lookup_error(&key("TEST-1"), StatusCode::INTERNAL_SERVER_ERROR, &body);
        let message = err.to_string();
        assert!(message.starts_with("Jira lookup for TEST-1 failed with status 500: "));
        assert!(message.ends_with("..."));
        assert!(message.len() < 400);
    }

    #[test]
    fn test_issue_response_deserializes_summary() {
        let json = r#"{"id":"1","key":"TEST-123","fields":{"summary":"Test Jira Issue"}}"#;
        let issue: IssueResponse = serde_json::from_str(json).unwrap();
        assert_eq!(issue.fields.summary, "Test Jira Issue");
    }

    fn client_for(server: &MockServer) -> JiraClient {
        JiraClient::with_api_root(server.url("/rest/api/2"), "bot@example.com", "jira-token")
            .unwrap()
    }

    #[tokio::test]
    async fn test_find_issue_decodes_summary() {
        let server = MockServer::start();
        let lookup = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/api/2/issue/TEST-123")
                .query_param("fields", "summary")
                // base64("bot@example.com:jira-token")
                .header(
                    "authorization",
                    "Basic Ym90QGV4YW1wbGUuY29tOmppcmEtdG9rZW4=",
                )
                .header("accept", "application/json");
            then.status(200).json_body(json!({
                "id": "10001",
                "key": "TEST-123",
                "fields": { "summary": "Test Jira Issue" }
            }));
        });

        let issue = client_for(&server).find_issue(&key("TEST-123")).await.unwrap();

        assert_eq!(
            issue,
            IssueDetails {
                key: key("TEST-123"),
                summary: "Test Jira Issue".into(),
            }
        );
        lookup.assert_calls(1);
    }

    #[tokio::test]
    async fn test_find_issue_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/issue/TEST-404");
            then.status(404).json_body(json!({
                "errorMessages": ["Issue does not exist or you do not have permission to see it."],
                "errors": {}
            }));
        });

        let err = client_for(&server)
            .find_issue(&key("TEST-404"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::IssueNotFound(ref k) if k == "TEST-404"));
    }

    #[tokio::test]
    async fn test_find_issue_rejected_credentials() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/issue/TEST-1");
            then.status(401).body("Unauthorized");
        });

        let err = client_for(&server).find_issue(&key("TEST-1")).await.unwrap_err();

        assert!(matches!(err, Error::Jira(_)));
        assert!(err.to_string().contains("credentials"));
    }

    #[tokio::test]
    async fn test_find_issue_undecodable_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/issue/TEST-1");
            then.status(200).json_body(json!({ "fields": {} }));
        });

        let err = client_for(&server).find_issue(&key("TEST-1")).await.unwrap_err();

        assert!(matches!(err, Error::Jira(_)));
    }
}
