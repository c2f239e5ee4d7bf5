//! Tests of the GitHub GraphQL provider against a local mock server.

use mockito::Matcher;
use serde_json::json;

use guestbook_core::{
    CommentId, CommentRemover, CommentSource, GitHubClient, GuestbookError, RepositoryConfig,
};

fn repository() -> RepositoryConfig {
    RepositoryConfig {
        owner: "JamesIves".to_string(),
        name: "JamesIves".to_string(),
        issue_number: 1,
    }
}

fn client(server: &mockito::Server) -> GitHubClient {
    GitHubClient::new(format!("{}/graphql", server.url()), "test-token", repository()).unwrap()
}

#[tokio::test]
async fn test_fetch_recent_maps_nodes_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({
            "variables": {"owner": "JamesIves", "name": "JamesIves", "issue_number": 1, "count": 20}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {"repository": {"issue": {"comments": {"nodes": [
                    {
                        "id": "IC_new",
                        "author": {"avatarUrl": "https://a/1", "login": "octocat", "url": "https://github.com/octocat"},
                        "bodyText": "newest",
                        "updatedAt": "2024-01-05T10:00:00Z"
                    },
                    {
                        "id": "IC_old",
                        "author": null,
                        "bodyText": "older",
                        "updatedAt": "2024-01-04T10:00:00Z"
                    }
                ]}}}}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let comments = client(&server).fetch_recent(20).await.unwrap();

    mock.assert_async().await;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, CommentId::new("IC_new"));
    assert_eq!(comments[0].author.login, "octocat");
    assert_eq!(comments[0].body_text, "newest");
    assert_eq!(comments[1].author.login, "ghost");
}

#[tokio::test]
async fn test_fetch_recent_reports_graphql_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": null, "errors": [{"message": "Bad credentials"}]}).to_string())
        .create_async()
        .await;

    let err = client(&server).fetch_recent(3).await.unwrap_err();

    match err {
        GuestbookError::SourceFetch { provider, message } => {
            assert_eq!(provider, "github");
            assert!(message.contains("Bad credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_recent_reports_http_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = client(&server).fetch_recent(3).await.unwrap_err();
    assert!(matches!(err, GuestbookError::SourceFetch { ref message, .. } if message.contains("502")));
}

#[tokio::test]
async fn test_fetch_recent_reports_missing_issue() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": {"repository": {"issue": null}}}).to_string())
        .create_async()
        .await;

    let err = client(&server).fetch_recent(3).await.unwrap_err();
    assert!(matches!(err, GuestbookError::SourceFetch { ref message, .. } if message.contains("JamesIves/JamesIves#1")));
}

#[tokio::test]
async fn test_remove_sends_delete_mutation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("deleteIssueComment".to_string()),
            Matcher::PartialJson(json!({"variables": {"id": "IC_bad"}})),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": {"deleteIssueComment": {"clientMutationId": null}}}).to_string())
        .create_async()
        .await;

    client(&server).remove(&CommentId::new("IC_bad")).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remove_failure_is_a_removal_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"data": {"deleteIssueComment": null}, "errors": [{"message": "Resource not accessible by integration"}]})
                .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).remove(&CommentId::new("IC_bad")).await.unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        GuestbookError::Removal { ref id, ref reason } if id == "IC_bad" && reason.contains("not accessible")
    ));
}
