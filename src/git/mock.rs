use crate::error::{ChangesetError, Result};
use crate::git::{RawCommit, Repository};
use std::cell::Cell;

/// Mock repository for testing without actual git operations
///
/// Commits form a linear history in the order they are pushed; tags point at
/// the most recently pushed commit.
pub struct MockRepository {
    commits: Vec<RawCommit>,
    /// Tag name and the number of commits it covers
    tags: Vec<(String, usize)>,
    failure: Option<String>,
    queries: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            failure: None,
            queries: Cell::new(0),
        }
    }

    /// Append a commit on top of history
    pub fn push_commit(&mut self, commit: RawCommit) {
        self.commits.push(commit);
    }

    /// Tag the current tip of history
    pub fn tag_head(&mut self, name: impl Into<String>) {
        self.tags.push((name.into(), self.commits.len()));
    }

    /// Make every query fail with the given message
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Number of queries answered so far
    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn record_query(&self) -> Result<()> {
        self.queries.set(self.queries.get() + 1);
        match &self.failure {
            Some(message) => Err(ChangesetError::command(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        self.record_query()?;
        Ok(self.tags.last().map(|(name, _)| name.clone()))
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<RawCommit>> {
        self.record_query()?;

        let start = match since_tag {
            Some(tag) => self
                .tags
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, covered)| *covered)
                .ok_or_else(|| ChangesetError::command(format!("unknown revision '{}'", tag)))?,
            None => 0,
        };

        Ok(self.commits[start..].iter().rev().cloned().collect())
    }
}
