//! GitHub backend: fetches the issues of a repository.
//!
//! One blocking request against the REST API per run; the issue listing
//! endpoint also returns pull requests, which are filtered out. One JSON
//! document per issue goes to stdout.

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::backends::{Backend, BackendDescriptor, backend_argv};
use crate::error::{QuarryError, Result};
use crate::project_identity;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

// The REST API caps page size at 100.
const MAX_PER_PAGE: u32 = 100;

pub fn descriptor() -> BackendDescriptor {
    BackendDescriptor {
        name: "github",
        summary: "Fetch issues from a GitHub repository",
        factory: build,
    }
}

fn build(forwarded: &[String]) -> Result<Box<dyn Backend>> {
    let args = match GithubArgs::try_parse_from(backend_argv("github", forwarded)) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    Ok(Box::new(GithubBackend { args }))
}

/// Arguments owned by the github backend. The launcher never sees these.
#[derive(Parser, Debug)]
#[command(name = "github", about = "Fetch issues from a GitHub repository")]
struct GithubArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    owner: String,

    /// Repository name
    #[arg(long)]
    repo: String,

    /// Personal access token for authenticated requests
    #[arg(long)]
    token: Option<String>,

    /// Maximum number of issues to fetch
    #[arg(long, default_value_t = 30)]
    limit: u32,

    /// Base URL of the API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

struct GithubBackend {
    args: GithubArgs,
}

#[derive(Serialize, Deserialize, Debug)]
struct Issue {
    number: u64,
    title: String,
    state: String,
    user: Author,
    #[serde(rename = "html_url")]
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    // Present on entries that are really pull requests; used as a filter
    // marker and never emitted.
    #[serde(default, skip_serializing)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Author {
    login: String,
}

impl Backend for GithubBackend {
    fn run(&mut self) -> Result<()> {
        let args = &self.args;
        let url = format!(
            "{}/repos/{}/{}/issues",
            args.api_url.trim_end_matches('/'),
            args.owner,
            args.repo
        );

        tracing::info!(owner = %args.owner, repo = %args.repo, "fetching issues");
        tracing::debug!(%url, limit = args.limit, "issue request");

        let client = reqwest::blocking::Client::builder()
            .user_agent(project_identity::USER_AGENT)
            .build()
            .map_err(|e| QuarryError::RemoteFetchError(e.to_string()))?;

        let per_page = args.limit.min(MAX_PER_PAGE).to_string();
        let mut request = client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .query(&[("state", "all"), ("per_page", per_page.as_str())]);
        if let Some(token) = &args.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| QuarryError::RemoteFetchError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuarryError::RemoteFetchError(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }
        let body = response
            .text()
            .map_err(|e| QuarryError::RemoteFetchError(e.to_string()))?;

        let issues = parse_issues(&body)?;
        for issue in &issues {
            println!("{}", serde_json::to_string(issue)?);
        }

        tracing::info!(count = issues.len(), "fetch complete");
        Ok(())
    }
}

/// Decode an issue listing payload, dropping the pull-request entries the
/// endpoint mixes in.
fn parse_issues(raw: &str) -> Result<Vec<Issue>> {
    let issues: Vec<Issue> = serde_json::from_str(raw)?;
    Ok(issues
        .into_iter()
        .filter(|issue| issue.pull_request.is_none())
        .collect())
}
