//! Link comment rendering and lookup
//!
//! Each pull request carries at most one link comment per issue. The comment is
//! found again on later runs through its marker, `Related Jira issue: [<KEY>]`,
//! which [`make_body`] always places at the very start of the body. Any change
//! to the body layout must keep that marker intact, or re-runs will post a
//! second comment instead of updating the first.

use crate::github::CommentRecord;
use crate::issue_key::IssueKey;

/// Leading text of every link comment
pub const MARKER_PREFIX: &str = "Related Jira issue: [";

/// The marker identifying the link comment for `key`
pub fn marker(key: &IssueKey) -> String {
    format!("{}{}]", MARKER_PREFIX, key)
}

/// Browse URL of an issue (`<base>/browse/<KEY>`)
pub fn issue_url(base_url: &str, key: &IssueKey) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

/// Render the link comment body
///
/// ```text
/// Related Jira issue: [TEST-123](https://jira.example.com/browse/TEST-123)
///
/// <issue summary>
/// ```
pub fn make_body(key: &IssueKey, summary: &str, base_url: &str) -> String {
    format!("{}({})\n\n{}", marker(key), issue_url(base_url, key), summary)
}

/// Find the link comment for `key`
///
/// A comment that starts with the marker wins over one that merely contains
/// it (a quoting reply, say); among equals the oldest is chosen.
pub fn find_link_comment<'a>(
    comments: &'a [CommentRecord],
    key: &IssueKey,
) -> Option<&'a CommentRecord> {
    let marker = marker(key);
    comments
        .iter()
        .find(|c| c.body.starts_with(&marker))
        .or_else(|| comments.iter().find(|c| c.body.contains(&marker)))
}

/// What the comment step has to do to bring the PR up to date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    /// No link comment exists yet
    Create,
    /// The link comment exists but its body is stale
    Update { id: u64 },
    /// The link comment already has the wanted body
    Unchanged { id: u64 },
}

/// Decide between create, update and no-op for the wanted body
pub fn plan_upsert(comments: &[CommentRecord], key: &IssueKey, body: &str) -> CommentAction {
    match find_link_comment(comments, key) {
        None => CommentAction::Create,
        Some(existing) if existing.body == body => CommentAction::Unchanged { id: existing.id },
        Some(existing) => CommentAction::Update { id: existing.id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://jira.example.com";

    fn key(s: &str) -> IssueKey {
        s.parse().unwrap()
    }

    fn comment(id: u64, body: &str) -> CommentRecord {
        CommentRecord {
            id,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_issue_url() {
        assert_eq!(
            issue_url(BASE, &key("TEST-123")),
            "https://jira.example.com/browse/TEST-123"
        );
        assert_eq!(
            issue_url("https://jira.example.com/", &key("TEST-123")),
            "https://jira.example.com/browse/TEST-123"
        );
    }

    #[test]
    fn test_make_body_starts_with_marker() {
        let k = key("TEST-123");
        let body = make_body(&k, "Test Jira Issue", BASE);

        assert!(body.starts_with(&marker(&k)));
        assert_eq!(
            body,
            "Related Jira issue: [TEST-123](https://jira.example.com/browse/TEST-123)\n\nTest Jira Issue"
        );
    }

    #[test]
    fn test_find_link_comment_picks_first_with_marker() {
        let k = key("TEST-123");
        let comments = vec![
            comment(1, "LGTM"),
            comment(2, "Related Jira issue: [TEST-123](old)\n\nOld summary"),
            comment(3, "Related Jira issue: [TEST-123](dup)"),
        ];

        assert_eq!(find_link_comment(&comments, &k).map(|c| c.id), Some(2));
    }

    #[test]
    fn test_find_link_comment_prefers_body_starting_with_marker() {
        let k = key("TEST-123");
        let comments = vec![
            comment(4, "> Related Jira issue: [TEST-123](old)\n\nIs this the right ticket?"),
            comment(8, "Related Jira issue: [TEST-123](url)\n\nSummary"),
        ];

        assert_eq!(find_link_comment(&comments, &k).map(|c| c.id), Some(8));
    }

    #[test]
    fn test_find_link_comment_falls_back_to_containing_comment() {
        let k = key("TEST-123");
        let comments = vec![
            comment(1, "LGTM"),
            comment(4, "> Related Jira issue: [TEST-123](old)"),
        ];

        assert_eq!(find_link_comment(&comments, &k).map(|c| c.id), Some(4));
    }

    #[test]
    fn test_find_link_comment_ignores_other_keys() {
        let comments = vec![comment(1, "Related Jira issue: [TEST-12](x)")];
        assert!(find_link_comment(&comments, &key("TEST-123")).is_none());
        assert!(find_link_comment(&comments, &key("TEST-1")).is_none());
    }

    #[test]
    fn test_plan_upsert() {
        let k = key("TEST-123");
        let body = make_body(&k, "Summary", BASE);

        assert_eq!(plan_upsert(&[], &k, &body), CommentAction::Create);
        assert_eq!(
            plan_upsert(&[comment(7, &body)], &k, &body),
            CommentAction::Unchanged { id: 7 }
        );
        assert_eq!(
            plan_upsert(&[comment(7, &make_body(&k, "Old", BASE))], &k, &body),
            CommentAction::Update { id: 7 }
        );
    }
}
