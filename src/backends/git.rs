//! Git backend: fetches the commit history of a repository.
//!
//! The repository is mirror-cloned into the quarry cache directory (or
//! updated in place when the mirror already exists) and its history is read
//! with `git log` using a control-character delimited pretty format. One
//! JSON document per commit goes to stdout.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use chrono::{DateTime, FixedOffset};
use clap::Parser;
use directories::ProjectDirs;
use serde::Serialize;

use crate::backends::{Backend, BackendDescriptor, backend_argv};
use crate::error::{QuarryError, Result};

// %x1f / %x1e keep fields and records apart without guessing at the
// characters a commit summary may contain.
const LOG_FORMAT: &str = "%H%x1f%an <%ae>%x1f%aI%x1f%s%x1e";

pub fn descriptor() -> BackendDescriptor {
    BackendDescriptor {
        name: "git",
        summary: "Fetch commits from a Git repository",
        factory: build,
    }
}

fn build(forwarded: &[String]) -> Result<Box<dyn Backend>> {
    let args = match GitArgs::try_parse_from(backend_argv("git", forwarded)) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    Ok(Box::new(GitBackend { args }))
}

/// Arguments owned by the git backend. The launcher never sees these.
#[derive(Parser, Debug)]
#[command(name = "git", about = "Fetch commits from a Git repository")]
struct GitArgs {
    /// URL or local path of the repository
    #[arg(long)]
    uri: String,

    /// Branch or rev to read (defaults to the mirror's HEAD)
    #[arg(long)]
    branch: Option<String>,

    /// Maximum number of commits to emit
    #[arg(long)]
    limit: Option<usize>,
}

struct GitBackend {
    args: GitArgs,
}

#[derive(Serialize, Debug, PartialEq)]
struct Commit {
    hash: String,
    author: String,
    date: DateTime<FixedOffset>,
    summary: String,
}

impl Backend for GitBackend {
    fn run(&mut self) -> Result<()> {
        if which::which("git").is_err() {
            return Err(QuarryError::DependencyMissing("git".to_string()));
        }

        tracing::info!(uri = %self.args.uri, "fetching commit history");

        let mirror = self.ensure_mirror()?;
        let commits = self.read_log(&mirror)?;
        for commit in &commits {
            println!("{}", serde_json::to_string(commit)?);
        }

        tracing::info!(count = commits.len(), uri = %self.args.uri, "fetch complete");
        Ok(())
    }
}

impl GitBackend {
    /// Clone the repository as a mirror into the cache, or refresh the
    /// mirror when it is already there.
    fn ensure_mirror(&self) -> Result<PathBuf> {
        let root = cache_dir()?;
        std::fs::create_dir_all(&root)?;

        let mirror = root.join(format!("{}.git", sanitize_uri(&self.args.uri)));
        let mirror_arg = mirror.display().to_string();

        if mirror.exists() {
            tracing::debug!(path = %mirror.display(), "updating existing mirror");
            run_git(&["--git-dir", mirror_arg.as_str(), "remote", "update", "--prune"])?;
        } else {
            tracing::debug!(path = %mirror.display(), "cloning mirror");
            run_git(&["clone", "--mirror", self.args.uri.as_str(), mirror_arg.as_str()])?;
        }

        Ok(mirror)
    }

    fn read_log(&self, mirror: &Path) -> Result<Vec<Commit>> {
        let mirror_arg = mirror.display().to_string();
        let pretty = format!("--pretty=format:{}", LOG_FORMAT);

        let mut argv = vec!["--git-dir", mirror_arg.as_str(), "log", pretty.as_str()];
        let max_count;
        if let Some(limit) = self.args.limit {
            max_count = format!("--max-count={}", limit);
            argv.push(max_count.as_str());
        }
        let rev = self.args.branch.as_deref().unwrap_or("HEAD");
        argv.push(rev);

        let output = run_git(&argv)?;
        parse_log(&String::from_utf8_lossy(&output.stdout))
    }
}

fn cache_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "quarry", "quarry")
        .ok_or_else(|| QuarryError::Other("Could not determine cache directory".to_string()))?;
    Ok(proj.cache_dir().join("git"))
}

/// Flatten a URI into a single path component for the mirror directory.
fn sanitize_uri(uri: &str) -> String {
    uri.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn run_git(args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let cmd_debug = format!("{:?}", cmd);

    let output = cmd.output().map_err(|e| QuarryError::SystemCommandFailed {
        command: cmd_debug.clone(),
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(QuarryError::SystemCommandFailed {
            command: cmd_debug,
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

fn parse_log(raw: &str) -> Result<Vec<Commit>> {
    let mut commits = Vec::new();

    for record in raw.split('\x1e') {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }

        let mut fields = record.split('\x1f');
        let (Some(hash), Some(author), Some(date), Some(summary)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(QuarryError::Other(format!(
                "Malformed git log record: {:?}",
                record
            )));
        };

        let date = DateTime::parse_from_rfc3339(date)
            .map_err(|e| QuarryError::Other(format!("Invalid commit date '{}': {}", date, e)))?;

        commits.push(Commit {
            hash: hash.to_string(),
            author: author.to_string(),
            date,
            summary: summary.to_string(),
        });
    }

    Ok(commits)
}
