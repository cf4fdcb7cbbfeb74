//! Integration tests for the resource facades.

#[cfg(test)]
mod services_tests {
    use integrations_github_api::mocks::{MockResponse, MockTransport};
    use integrations_github_api::services::{CreatePullRequest, CreateRepositoryRequest, IssueState};
    use integrations_github_api::{GitHubClient, HttpMethod};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map};
    use std::sync::Arc;

    const BASE: &str = "https://github.com/api/v2/json/";

    fn mock_client() -> (GitHubClient, MockTransport) {
        let mock = MockTransport::new();
        let client = GitHubClient::builder()
            .transport(Arc::new(mock.clone()))
            .build()
            .unwrap();
        (client, mock)
    }

    fn last_url(mock: &MockTransport) -> String {
        mock.last_request().unwrap().url
    }

    #[tokio::test]
    async fn test_users_paths() {
        let (client, mock) = mock_client();
        mock.on_get("user/search/chris+wanstrath", MockResponse::ok(r#"{"users":[]}"#));
        mock.on_get("user/show/octocat/followers", MockResponse::ok(r#"{"users":["a"]}"#));
        mock.on_post("user/follow/defunkt", MockResponse::ok(r#"{"users":["defunkt"]}"#));
        mock.on_get("repos/watched/octocat", MockResponse::ok(r#"{"repositories":[]}"#));

        let users = client.users();
        assert_eq!(users.search("chris wanstrath").await.unwrap(), json!([]));
        assert_eq!(users.followers("octocat").await.unwrap(), json!(["a"]));
        assert_eq!(users.follow("defunkt").await.unwrap(), json!(["defunkt"]));
        assert_eq!(users.watched_repos("octocat").await.unwrap(), json!([]));
        assert!(mock.verify_request(HttpMethod::Post, "user/follow/defunkt"));
    }

    #[tokio::test]
    async fn test_user_update_nests_values() {
        let (client, mock) = mock_client();
        mock.on_post("user/show/octocat", MockResponse::ok(r#"{"user":{"name":"Mona"}}"#));

        let mut values = Map::new();
        values.insert("name".to_string(), json!("Mona"));
        client.users().update("octocat", values).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.parameters["values"], json!({"name": "Mona"}));
    }

    #[tokio::test]
    async fn test_issues_paths() {
        let (client, mock) = mock_client();
        mock.on_get("issues/list/octocat/Hello-World/closed", MockResponse::ok(r#"{"issues":[]}"#));
        mock.on_get(
            "issues/show/octocat/Hello-World/3",
            MockResponse::ok(r#"{"issue":{"number":3}}"#),
        );
        mock.on_post(
            "issues/close/octocat/Hello-World/3",
            MockResponse::ok(r#"{"issue":{"state":"closed"}}"#),
        );
        mock.on_post(
            "issues/label/add/octocat/Hello-World/needs+review/3",
            MockResponse::ok(r#"{"labels":["needs review"]}"#),
        );

        let issues = client.issues();
        assert_eq!(
            issues.list("octocat", "Hello-World", IssueState::Closed).await.unwrap(),
            json!([])
        );
        assert_eq!(issues.show("octocat", "Hello-World", 3).await.unwrap()["number"], 3);
        assert_eq!(
            issues.close("octocat", "Hello-World", 3).await.unwrap()["state"],
            "closed"
        );
        assert_eq!(
            issues.add_label("octocat", "Hello-World", "needs review", 3).await.unwrap(),
            json!(["needs review"])
        );
    }

    #[tokio::test]
    async fn test_add_comment_sends_comment() {
        let (client, mock) = mock_client();
        mock.on_post(
            "issues/comment/octocat/Hello-World/3",
            MockResponse::ok(r#"{"comment":{"body":"Thanks"}}"#),
        );

        client
            .issues()
            .add_comment("octocat", "Hello-World", 3, "Thanks")
            .await
            .unwrap();

        assert_eq!(mock.last_request().unwrap().parameters["comment"], "Thanks");
    }

    #[tokio::test]
    async fn test_commits_paths() {
        let (client, mock) = mock_client();
        mock.on_get(
            "commits/list/octocat/Hello-World/master",
            MockResponse::ok(r#"{"commits":[1]}"#),
        );
        mock.on_get(
            "commits/list/octocat/Hello-World/master/README",
            MockResponse::ok(r#"{"commits":[2]}"#),
        );
        mock.on_get(
            "commits/show/octocat/Hello-World/6dcb09b",
            MockResponse::ok(r#"{"commit":{}}"#),
        );

        let commits = client.commits();
        assert_eq!(
            commits.branch_commits("octocat", "Hello-World", "master").await.unwrap(),
            json!([1])
        );
        assert_eq!(
            commits
                .file_commits("octocat", "Hello-World", "master", "README")
                .await
                .unwrap(),
            json!([2])
        );
        commits.commit("octocat", "Hello-World", "6dcb09b").await.unwrap();
        assert_eq!(
            last_url(&mock),
            format!("{}commits/show/octocat/Hello-World/6dcb09b", BASE)
        );
    }

    #[tokio::test]
    async fn test_repository_create_and_delete() {
        let (client, mock) = mock_client();
        mock.on_post("repos/create", MockResponse::ok(r#"{"repository":{"name":"demo"}}"#));
        mock.on_post("repos/delete/demo", MockResponse::ok(r#"{"delete_token":"abc"}"#));
        mock.on_post("repos/delete/demo", MockResponse::ok(r#"{"status":"deleted"}"#));

        let repos = client.repos();
        repos.create(CreateRepositoryRequest::new("demo")).await.unwrap();
        assert_eq!(mock.last_request().unwrap().parameters["public"], true);

        let first = repos.delete("demo", None).await.unwrap();
        assert_eq!(first["delete_token"], "abc");
        let second = repos.delete("demo", Some("abc")).await.unwrap();
        assert_eq!(second["status"], "deleted");
        assert_eq!(mock.last_request().unwrap().parameters["delete_token"], "abc");
    }

    #[tokio::test]
    async fn test_repository_listings() {
        let (client, mock) = mock_client();
        mock.on_get(
            "repos/show/octocat/Hello-World/languages",
            MockResponse::ok(r#"{"languages":{"Rust":1024}}"#),
        );
        mock.on_get(
            "repos/show/octocat/Hello-World/branches",
            MockResponse::ok(r#"{"branches":{"master":"6dcb09b"}}"#),
        );

        let repos = client.repos();
        assert_eq!(
            repos.languages("octocat", "Hello-World").await.unwrap(),
            json!({"Rust": 1024})
        );
        assert_eq!(
            repos.branches("octocat", "Hello-World").await.unwrap()["master"],
            "6dcb09b"
        );
    }

    #[tokio::test]
    async fn test_organization_paths() {
        let (client, mock) = mock_client();
        mock.on_get(
            "organizations/github",
            MockResponse::ok(r#"{"organization":{"login":"github"}}"#),
        );
        mock.on_get(
            "organizations/github/public_repositories",
            MockResponse::ok(r#"{"repositories":[]}"#),
        );

        let orgs = client.organizations();
        assert_eq!(orgs.show("github").await.unwrap()["login"], "github");
        assert_eq!(orgs.repositories("github").await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_pull_request_create_nests_fields() {
        let (client, mock) = mock_client();
        mock.on_post("pulls/octocat/Hello-World", MockResponse::ok(r#"{"pull":{"number":1}}"#));

        let pull = client
            .pull_requests()
            .create(
                "octocat",
                "Hello-World",
                CreatePullRequest {
                    base: "master".to_string(),
                    head: "octocat:feature".to_string(),
                    title: "Add feature".to_string(),
                    body: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(pull["number"], 1);
        let parameters = mock.last_request().unwrap().parameters;
        assert_eq!(parameters["pull"]["head"], "octocat:feature");
    }

    #[tokio::test]
    async fn test_objects_tree_and_raw() {
        let (client, mock) = mock_client();
        mock.on_get("tree/show/octocat/Hello-World/abc", MockResponse::ok(r#"{"tree":[]}"#));
        mock.on_get("blob/show/octocat/Hello-World/def", MockResponse::ok("raw bytes"));

        let objects = client.objects();
        assert_eq!(objects.tree("octocat", "Hello-World", "abc").await.unwrap(), json!([]));
        assert_eq!(
            objects.raw("octocat", "Hello-World", "def").await.unwrap(),
            "raw bytes"
        );

        let request = mock.last_request().unwrap();
        assert_eq!(request.options.format, "text");
        assert_eq!(
            request.url,
            "https://github.com/api/v2/text/blob/show/octocat/Hello-World/def"
        );
    }

    #[tokio::test]
    async fn test_missing_wrapper_field_is_decode_error() {
        let (client, mock) = mock_client();
        mock.on_get("user/show/octocat", MockResponse::ok(r#"{"users":[]}"#));

        let error = client.users().show("octocat").await.unwrap_err();
        assert!(error.is_decode());
    }
}
