use crate::error::{ChangesetError, Result};
use crate::git::{RawCommit, Repository, RECORD_DELIMITER};
use std::path::PathBuf;
use std::process::Command;

/// `git log` format: hash, subject and body separated by U+001F, records
/// terminated by U+001E.
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%s%x1f%b%x1e";

/// Answers history queries by running the `git` executable
pub struct GitCliRepository {
    working_dir: PathBuf,
}

impl GitCliRepository {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        GitCliRepository {
            working_dir: working_dir.into(),
        }
    }

    /// Run `git <args>` in the working directory and return its stdout.
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| ChangesetError::command(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChangesetError::command(format!(
                "git {} exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Repository for GitCliRepository {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        let tag = self.git(&["describe", "--tags", "--abbrev=0"])?;
        let tag = tag.trim();

        if tag.is_empty() {
            Ok(None)
        } else {
            Ok(Some(tag.to_string()))
        }
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<RawCommit>> {
        let range = match since_tag {
            Some(tag) => format!("{}..HEAD", tag),
            None => "HEAD".to_string(),
        };

        let output = self.git(&["log", &range, "--no-merges", LOG_FORMAT])?;
        Ok(parse_log_output(&output))
    }
}

/// Decode `git log` output produced with [LOG_FORMAT].
pub fn parse_log_output(output: &str) -> Vec<RawCommit> {
    output
        .split(RECORD_DELIMITER)
        .map(|record| record.trim_start_matches('\n'))
        .filter(|record| !record.trim().is_empty())
        .map(|record| {
            let mut commit = RawCommit::from_delimited(record);
            commit.body = commit.body.trim_end().to_string();
            commit
        })
        .collect()
}
