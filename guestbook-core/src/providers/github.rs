// guestbook-core/src/providers/github.rs
//! GitHub GraphQL implementation of [`CommentSource`] and [`CommentRemover`].
//!
//! One client is scoped to one repository; the guestbook issue number comes
//! from the same [`RepositoryConfig`].

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::RepositoryConfig;
use crate::errors::GuestbookError;
use crate::model::{Author, Comment, CommentId};
use crate::moderation::CommentRemover;
use crate::source::CommentSource;

const USER_AGENT: &str = concat!("guestbook/", env!("CARGO_PKG_VERSION"));
const PROVIDER_NAME: &str = "github";

const RECENT_COMMENTS_QUERY: &str = r#"query($owner: String!, $name: String!, $issue_number: Int!, $count: Int!) {
  repository(owner: $owner, name: $name) {
    issue(number: $issue_number) {
      comments(first: $count, orderBy: {direction: DESC, field: UPDATED_AT}) {
        nodes {
          id
          author {
            avatarUrl(size: 24)
            login
            url
          }
          bodyText
          updatedAt
        }
      }
    }
  }
}"#;

const DELETE_COMMENT_MUTATION: &str = r#"mutation($id: ID!) {
  deleteIssueComment(input: {id: $id}) {
    clientMutationId
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
struct CommentConnection {
    #[serde(default)]
    nodes: Vec<Option<CommentNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    id: String,
    author: Option<AuthorNode>,
    body_text: String,
    updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorNode {
    avatar_url: String,
    login: String,
    url: String,
}

impl From<CommentNode> for Comment {
    fn from(node: CommentNode) -> Self {
        let author = node
            .author
            .map(|a| Author { avatar_url: a.avatar_url, login: a.login, url: a.url })
            .unwrap_or_else(Author::ghost);
        Comment {
            id: CommentId::new(node.id),
            author,
            body_text: node.body_text,
            updated_at: node.updated_at,
        }
    }
}

/// A GitHub GraphQL client scoped to the guestbook repository.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
    repository: RepositoryConfig,
}

impl GitHubClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        repository: RepositoryConfig,
    ) -> Result<Self, GuestbookError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GuestbookError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
            repository,
        })
    }

    /// Posts one GraphQL document. Transport failures, non-2xx statuses and
    /// GraphQL `errors` all come back as a plain message.
    async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, String> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body.trim()));
        }

        let envelope: GraphQlResponse<T> = resp
            .json()
            .await
            .map_err(|e| format!("unexpected response body: {}", e))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(messages.join("; "));
        }
        envelope.data.ok_or_else(|| "response carried no data".to_string())
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommentSource for GitHubClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_recent(&self, count: usize) -> Result<Vec<Comment>, GuestbookError> {
        let fetch_error = |message: String| GuestbookError::SourceFetch {
            provider: PROVIDER_NAME.to_string(),
            message,
        };
        let RepositoryConfig { owner, name, issue_number } = &self.repository;
        debug!("Fetching {} comment(s) from {}/{}#{}.", count, owner, name, issue_number);

        let variables = json!({
            "owner": owner,
            "name": name,
            "issue_number": issue_number,
            "count": count,
        });
        let data: RepositoryData = self
            .graphql(RECENT_COMMENTS_QUERY, variables)
            .await
            .map_err(fetch_error)?;

        let issue = data
            .repository
            .and_then(|r| r.issue)
            .ok_or_else(|| fetch_error(format!("issue {}/{}#{} not found", owner, name, issue_number)))?;

        let comments: Vec<Comment> = issue
            .comments
            .nodes
            .into_iter()
            .flatten()
            .map(Comment::from)
            .collect();
        debug!("Fetched {} comment(s).", comments.len());
        Ok(comments)
    }
}

#[async_trait]
impl CommentRemover for GitHubClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn remove(&self, id: &CommentId) -> Result<(), GuestbookError> {
        debug!("Deleting comment {}.", id);
        self.graphql::<Value>(DELETE_COMMENT_MUTATION, json!({ "id": id.as_str() }))
            .await
            .map(|_| ())
            .map_err(|reason| GuestbookError::Removal { id: id.to_string(), reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_author_becomes_ghost() {
        let node: CommentNode = serde_json::from_value(json!({
            "id": "IC_1",
            "author": null,
            "bodyText": "hi",
            "updatedAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap();
        let comment = Comment::from(node);
        assert_eq!(comment.author.login, "ghost");
        assert_eq!(comment.id.as_str(), "IC_1");
    }

    #[test]
    fn test_debug_output_hides_token() {
        let client = GitHubClient::new("http://localhost/graphql", "secret-token", RepositoryConfig::default())
            .unwrap();
        assert!(!format!("{:?}", client).contains("secret-token"));
    }
}
