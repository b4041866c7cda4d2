use crate::error::{Result, VisibilityError};
use crate::github::RepoSource;
use crate::types::repo::{CommunityFiles, RepoSummary};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

pub const PER_PAGE: u32 = 100;
const USER_AGENT: &str = "gh-visibility";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";

/// Blocking GitHub REST client authenticated with a personal access token.
/// One agent per client so a scan reuses connections.
pub struct GitHubClient {
    agent: ureq::Agent,
    api_root: String,
    token: String,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_root", &self.api_root)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_root: &str) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent, token, api_root)
    }

    pub(crate) fn with_agent(agent: ureq::Agent, token: impl Into<String>, api_root: &str) -> Self {
        Self {
            agent,
            api_root: api_root.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Pages of the user's repositories, starting at `page` (1-based).
    pub fn repos_from_page(&self, username: &str, page: u32) -> RepoPages<'_> {
        RepoPages {
            client: self,
            username: username.to_string(),
            page: page.max(1),
            buffer: VecDeque::new(),
            done: false,
        }
    }

    pub fn list_page(&self, username: &str, page: u32) -> Result<Vec<RepoSummary>> {
        let path = format!("users/{username}/repos");
        let query = [
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
            ("sort", "pushed".to_string()),
        ];
        match self.get(&path, &query, ACCEPT_JSON)? {
            Some(body) => parse_repo_page(&body),
            None => Err(VisibilityError::Api {
                status: 404,
                url: self.url(&path),
            }),
        }
    }

    pub fn readme_markdown(&self, full_name: &str) -> Result<Option<String>> {
        self.get(&format!("repos/{full_name}/readme"), &[], ACCEPT_RAW)
    }

    pub fn community_files(&self, full_name: &str) -> Result<Option<CommunityFiles>> {
        self.get(&format!("repos/{full_name}/community/profile"), &[], ACCEPT_JSON)?
            .map(|body| parse_community_profile(&body))
            .transpose()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Single-shot GET. 404 is `None`; any other status >= 400 is an error.
    fn get(&self, path: &str, query: &[(&str, String)], accept: &str) -> Result<Option<String>> {
        let url = self.url(path);
        debug!(%url, "github request");

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &format!("token {}", self.token))
            .header("Accept", accept)
            .header("User-Agent", USER_AGENT);
        for (key, value) in query {
            request = request.query(*key, value);
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        if status == 404 {
            debug!(%url, "not found");
            return Ok(None);
        }
        if status >= 400 {
            return Err(VisibilityError::Api { status, url });
        }
        let bytes = response.into_body().read_to_vec()?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

impl RepoSource for GitHubClient {
    fn list_repos<'a>(
        &'a self,
        username: &str,
    ) -> Box<dyn Iterator<Item = Result<RepoSummary>> + 'a> {
        Box::new(self.repos_from_page(username, 1))
    }

    fn readme(&self, full_name: &str) -> Result<Option<String>> {
        self.readme_markdown(full_name)
    }

    fn community_profile(&self, full_name: &str) -> Result<Option<CommunityFiles>> {
        self.community_files(full_name)
    }
}

/// Lazy listing: fetches the next page only when the previous one is
/// drained, and stops at the first empty page or the first error.
pub struct RepoPages<'a> {
    client: &'a GitHubClient,
    username: String,
    page: u32,
    buffer: VecDeque<RepoSummary>,
    done: bool,
}

impl RepoPages<'_> {
    /// The page the next fetch will request.
    #[cfg(test)]
    pub fn next_page(&self) -> u32 {
        self.page
    }
}

impl Iterator for RepoPages<'_> {
    type Item = Result<RepoSummary>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(repo) = self.buffer.pop_front() {
                return Some(Ok(repo));
            }
            if self.done {
                return None;
            }
            match self.client.list_page(&self.username, self.page) {
                Ok(repos) if repos.is_empty() => {
                    self.done = true;
                }
                Ok(repos) => {
                    debug!(page = self.page, count = repos.len(), "fetched repo page");
                    self.page += 1;
                    self.buffer.extend(repos);
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRepo {
    id: u64,
    name: String,
    full_name: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    private: bool,
    description: Option<String>,
    topics: Option<Vec<String>>,
    #[serde(default)]
    archived: bool,
    pushed_at: Option<String>,
    default_branch: Option<String>,
}

impl From<WireRepo> for RepoSummary {
    fn from(wire: WireRepo) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            full_name: wire.full_name,
            html_url: wire.html_url,
            private: wire.private,
            description: wire.description,
            topics: wire.topics.unwrap_or_default(),
            archived: wire.archived,
            pushed_at: wire.pushed_at,
            default_branch: wire
                .default_branch
                .filter(|branch| !branch.is_empty())
                .unwrap_or_else(|| "main".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireProfile {
    #[serde(default)]
    files: WireProfileFiles,
}

#[derive(Debug, Default, Deserialize)]
struct WireProfileFiles {
    license: Option<serde_json::Value>,
    contributing: Option<serde_json::Value>,
    issue_template: Option<serde_json::Value>,
    pull_request_template: Option<serde_json::Value>,
}

pub(crate) fn parse_repo_page(body: &str) -> Result<Vec<RepoSummary>> {
    let wire: Vec<WireRepo> = serde_json::from_str(body)?;
    Ok(wire.into_iter().map(RepoSummary::from).collect())
}

pub(crate) fn parse_community_profile(body: &str) -> Result<CommunityFiles> {
    let profile: WireProfile = serde_json::from_str(body)?;
    let files = profile.files;
    Ok(CommunityFiles {
        license: files.license.is_some(),
        contributing: files.contributing.is_some(),
        issue_template: files.issue_template.is_some(),
        pull_request_template: files.pull_request_template.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn serve(responses: Vec<(u16, String)>) -> (String, mpsc::Receiver<String>) {
        serve_bytes(
            responses
                .into_iter()
                .map(|(status, body)| (status, body.into_bytes()))
                .collect(),
        )
    }

    /// Serves the canned `(status, body)` responses in order, one per
    /// connection, and reports each request head it received.
    fn serve_bytes(responses: Vec<(u16, Vec<u8>)>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let addr = listener.local_addr().expect("listener has address");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
                let mut head = String::new();
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line);
                }
                let _ = tx.send(head);
                let reply_head = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(reply_head.as_bytes());
                let _ = stream.write_all(&body);
            }
        });
        (format!("http://{addr}"), rx)
    }

    fn local_client(token: &str, base: &str) -> GitHubClient {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .proxy(None)
            .build()
            .new_agent();
        GitHubClient::with_agent(agent, token, base)
    }

    fn repo_json(id: u64, name: &str) -> String {
        format!(
            r#"{{"id": {id}, "name": "{name}", "full_name": "octo/{name}", "html_url": "https://github.com/octo/{name}", "private": false, "description": null, "topics": ["cli"], "archived": false, "pushed_at": "2025-01-01T00:00:00Z", "default_branch": "main"}}"#
        )
    }

    #[test]
    fn parse_repo_page_maps_wire_fields() {
        let body = r#"[{"id": 9, "name": "tool", "full_name": "octo/tool", "html_url": "u",
            "description": "A tool", "topics": null, "pushed_at": null, "default_branch": null}]"#;
        let repos = parse_repo_page(body).expect("page should parse");
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].full_name, "octo/tool");
        assert_eq!(repos[0].description.as_deref(), Some("A tool"));
        assert!(repos[0].topics.is_empty());
        assert!(!repos[0].private);
        assert_eq!(repos[0].default_branch, "main");
    }

    #[test]
    fn parse_community_profile_reads_present_files() {
        let body = r#"{"health_percentage": 50, "files": {
            "license": {"name": "MIT"}, "contributing": null,
            "issue_template": null, "pull_request_template": {"url": "x"}}}"#;
        let files = parse_community_profile(body).expect("profile should parse");
        assert!(files.license);
        assert!(!files.contributing);
        assert!(!files.issue_template);
        assert!(files.pull_request_template);
        assert_eq!(
            parse_community_profile("{}").expect("empty profile"),
            CommunityFiles::default()
        );
    }

    #[test]
    fn debug_output_redacts_token() {
        let client = GitHubClient::new("ghp_secret", "https://api.github.com/");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("https://api.github.com"));
    }

    #[test]
    fn listing_pages_until_empty_and_sends_token_header() {
        let page_one = format!("[{},{}]", repo_json(1, "a"), repo_json(2, "b"));
        let (base, requests) = serve(vec![(200, page_one), (200, "[]".to_string())]);
        let client = local_client("abc123", &base);

        let names: Vec<String> = client
            .list_repos("octo")
            .map(|repo| repo.expect("repo should load").name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        let first = requests.recv().expect("first request").to_lowercase();
        assert!(first.starts_with("get /users/octo/repos?"));
        assert!(first.contains("per_page=100"));
        assert!(first.contains("page=1"));
        assert!(first.contains("sort=pushed"));
        assert!(first.contains("authorization: token abc123"));
        let second = requests.recv().expect("second request");
        assert!(second.contains("page=2"));
    }

    #[test]
    fn readme_not_found_is_none() {
        let (base, requests) = serve(vec![(404, r#"{"message": "Not Found"}"#.to_string())]);
        let client = local_client("t", &base);
        assert_eq!(client.readme("octo/a").expect("404 is not an error"), None);
        let head = requests.recv().expect("request").to_lowercase();
        assert!(head.contains("accept: application/vnd.github.raw"));
    }

    #[test]
    fn readme_with_invalid_utf8_is_decoded_lossily() {
        let body = b"# Caf\xe9 tool\n\nWhat it does.".to_vec();
        let (base, _requests) = serve_bytes(vec![(200, body)]);
        let client = local_client("t", &base);
        let readme = client
            .readme("octo/a")
            .expect("undecodable bytes are not an error")
            .expect("readme present");
        assert!(readme.starts_with("# Caf\u{FFFD} tool"));
        assert!(readme.ends_with("What it does."));
    }

    #[test]
    fn server_error_is_fatal_and_stops_listing() {
        let (base, _requests) = serve(vec![(500, "{}".to_string())]);
        let client = local_client("t", &base);
        let mut repos = client.list_repos("octo");
        match repos.next() {
            Some(Err(VisibilityError::Api { status, url })) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/users/octo/repos"));
            }
            other => panic!("unexpected item: {other:?}"),
        }
        assert!(repos.next().is_none());
    }

    #[test]
    fn listing_can_resume_from_a_later_page() {
        let (base, requests) = serve(vec![(200, "[]".to_string())]);
        let client = local_client("t", &base);
        let mut pages = client.repos_from_page("octo", 3);
        assert_eq!(pages.next_page(), 3);
        assert!(pages.next().is_none());
        let head = requests.recv().expect("request");
        assert!(head.contains("&page=3"));
    }
}
