#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use trending_repos::github::ClientConfig;
use trending_repos::ProjectService;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test_token";
pub const REPO: &str = "octocat/Hello-World";
pub const REPO_ID: u64 = 1296269;

pub fn service(server: &MockServer) -> ProjectService {
    ProjectService::new(ClientConfig::new(TOKEN).with_base_url(server.uri()))
        .expect("Failed to create service")
}

pub fn service_with_timeout(server: &MockServer, timeout: Duration) -> ProjectService {
    service(server).with_operation_timeout(timeout)
}

/// Primary repository record whose canonical URL is `{base}{canonical_path}`.
pub fn primary_repo(base: &str, canonical_path: &str) -> Value {
    json!({
        "id": REPO_ID,
        "name": "Hello-World",
        "full_name": REPO,
        "owner": {
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "html_url": "https://github.com/octocat"
        },
        "url": format!("{}{}", base, canonical_path),
        "html_url": "https://github.com/octocat/Hello-World",
        "events_url": format!("{}/repos/octocat/Hello-World/events", base),
        "contributors_url": format!("{}/repos/octocat/Hello-World/contributors", base),
        "description": "My first repository on GitHub!",
        "language": "Rust",
        "stargazers_count": 80,
        "forks_count": 9,
        "open_issues_count": 0,
        "default_branch": "master"
    })
}

pub fn events(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": format!("{}", 22249084947u64 + i as u64),
                    "type": "WatchEvent",
                    "created_at": "2024-03-14T10:00:00Z",
                    "actor": { "login": format!("user{}", i) }
                })
            })
            .collect(),
    )
}

pub fn contributors() -> Value {
    json!([
        { "login": "octocat", "id": 1, "contributions": 32 },
        { "login": "hubot", "id": 2, "contributions": 4 }
    ])
}

pub fn issues() -> Value {
    json!([
        { "id": 1, "number": 1347, "title": "Found a bug", "state": "open", "comments": 0 }
    ])
}

pub fn labels() -> Value {
    json!([
        { "id": 208045946, "name": "bug", "color": "f29513", "default": true },
        { "id": 208045947, "name": "enhancement", "color": "a2eeef", "default": false }
    ])
}

pub fn commits() -> Value {
    json!([
        { "sha": "7fd1a60b01f91b314f59955a4e4d4e80d8edf11d", "commit": { "message": "Merge pull request #6" } },
        { "sha": "762941318ee16e59dabbacb1b4049eec22f0d303", "commit": { "message": "New line at end of file." } },
        { "sha": "553c2077f0edc3d5dc5d17262f6aa498e69d6f8e", "commit": { "message": "first commit" } }
    ])
}

/// Mount a GET mock answering `route` with `body`, requiring the token.
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_primary(server: &MockServer) {
    let body = primary_repo(&server.uri(), "/repos/octocat/Hello-World");
    mount_json(server, "/repos/octocat/Hello-World", body).await;
}

/// Mount all five dependents under `canonical_path`, with `delay` on each.
pub async fn mount_dependents(server: &MockServer, canonical_path: &str, delay: Duration) {
    let routes = [
        ("/repos/octocat/Hello-World/events".to_string(), events(3)),
        ("/repos/octocat/Hello-World/contributors".to_string(), contributors()),
        (format!("{}/issues", canonical_path), issues()),
        (format!("{}/labels", canonical_path), labels()),
        (format!("{}/commits", canonical_path), commits()),
    ];

    for (route, body) in routes {
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .and(query_param("access_token", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .expect(1)
            .mount(server)
            .await;
    }
}

pub fn search_item(id: u64, full_name: &str, stars: u64) -> Value {
    let (owner, name) = full_name.split_once('/').unwrap_or(("owner", full_name));
    json!({
        "id": id,
        "name": name,
        "full_name": full_name,
        "owner": { "login": owner, "id": id + 1000 },
        "html_url": format!("https://github.com/{}", full_name),
        "description": "A trending project",
        "language": "Rust",
        "stargazers_count": stars,
        "created_at": "2024-03-10T12:00:00Z"
    })
}
