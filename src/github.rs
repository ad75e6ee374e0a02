//! GitHub REST API client.
//!
//! Only the handful of endpoints the reports need: user profiles, org
//! repository listing, commits by author, and code search. All calls are
//! blocking and unretried; callers decide whether a failure is fatal.

use crate::domain::constants::SEARCH_PAGE_SIZE;
use crate::domain::models::{CodeSearchPage, CommitEmail, UserProfile};
use crate::services::credentials::Credential;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// The slice of the GitHub API the services depend on. Implemented by
/// [`GitHubClient`] and by fakes in tests.
pub trait GitHubApi {
    fn user(&self, login: &str) -> anyhow::Result<UserProfile>;
    /// Full names (`owner/repo`) of every repository in `org`.
    fn org_repos(&self, org: &str) -> anyhow::Result<Vec<String>>;
    fn latest_commit_by(&self, repo: &str, author: &str) -> anyhow::Result<Option<CommitEmail>>;
    fn search_code(&self, query: &str, page: u32) -> anyhow::Result<CodeSearchPage>;
}

pub struct GitHubClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: Option<Credential>,
}

#[derive(Deserialize)]
struct RepoItem {
    full_name: String,
}

#[derive(Deserialize)]
struct CommitItem {
    commit: CommitBody,
}

#[derive(Deserialize)]
struct CommitBody {
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base: &str, token: Option<Credential>, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("govroles/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{}", self.api_base, path);
        debug!(%url, "github api request");
        let mut req = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.secret());
        }
        let resp = req.send()?.error_for_status()?;
        Ok(resp.json()?)
    }
}

impl GitHubApi for GitHubClient {
    fn user(&self, login: &str) -> anyhow::Result<UserProfile> {
        self.get_json(&format!("/users/{}", login), &[])
    }

    fn org_repos(&self, org: &str) -> anyhow::Result<Vec<String>> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let items: Vec<RepoItem> = self.get_json(
                &format!("/orgs/{}/repos", org),
                &[
                    ("per_page", SEARCH_PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let n = items.len();
            out.extend(items.into_iter().map(|r| r.full_name));
            if n < SEARCH_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }
        Ok(out)
    }

    fn latest_commit_by(&self, repo: &str, author: &str) -> anyhow::Result<Option<CommitEmail>> {
        let items: Vec<CommitItem> = self.get_json(
            &format!("/repos/{}/commits", repo),
            &[("author", author.to_string()), ("per_page", "1".to_string())],
        )?;
        Ok(items.into_iter().next().and_then(|c| {
            let author = c.commit.author?;
            Some(CommitEmail {
                email: author.email?,
                date: author.date.unwrap_or_default(),
                repo: repo.to_string(),
            })
        }))
    }

    fn search_code(&self, query: &str, page: u32) -> anyhow::Result<CodeSearchPage> {
        self.get_json(
            "/search/code",
            &[
                ("q", query.to_string()),
                ("order", "asc".to_string()),
                ("per_page", SEARCH_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ],
        )
    }
}
