//! Version-control queries behind a trait
//!
//! The pipeline needs exactly two answers from history: the most recent
//! release tag reachable from `HEAD`, and the non-merge commits made since
//! that tag. The [Repository] trait captures those two queries so the
//! harvester can run against:
//!
//! - [repository::Git2Repository]: libgit2 via the `git2` crate
//! - [cli::GitCliRepository]: the `git` executable
//! - [mock::MockRepository]: in-memory fixtures for tests
//!
//! ```rust
//! # use auto_changeset::git::{harvest, MockRepository, RawCommit};
//! let mut repo = MockRepository::new();
//! repo.push_commit(RawCommit::new("1234567890", "feat: add login", ""));
//! let harvest = harvest(&repo).unwrap();
//! assert_eq!(harvest.commits.len(), 1);
//! ```

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCliRepository;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Separates hash, subject and body in a serialized commit.
///
/// ASCII unit separator; not something that ends up in a typed commit message.
pub const FIELD_DELIMITER: char = '\u{1f}';

/// Separates serialized commits from each other.
pub const RECORD_DELIMITER: char = '\u{1e}';

/// A commit exactly as history reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Full commit hash
    pub hash: String,
    /// First line of the message
    pub subject: String,
    /// Everything after the subject, possibly empty
    pub body: String,
}

impl RawCommit {
    pub fn new(hash: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        RawCommit {
            hash: hash.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Serialize as `hash␟subject␟body`.
    pub fn to_delimited(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.hash,
            self.subject,
            self.body,
            d = FIELD_DELIMITER
        )
    }

    /// Split a `hash␟subject␟body` line. Missing fields come back empty.
    pub fn from_delimited(line: &str) -> Self {
        let mut fields = line.splitn(3, FIELD_DELIMITER);
        let hash = fields.next().unwrap_or_default();
        let subject = fields.next().unwrap_or_default();
        let body = fields.next().unwrap_or_default();
        RawCommit::new(hash, subject, body)
    }
}

/// Version-control queries used by the commit harvester
///
/// An `Ok` with no data and an `Err` are different answers: the former means
/// history was read and had nothing to offer, the latter that it could not be
/// read at all.
pub trait Repository {
    /// Most recent tag reachable from `HEAD`
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - Nearest tag name
    /// * `Ok(None)` - No tag is reachable
    /// * `Err` - The lookup itself failed
    fn latest_release_tag(&self) -> Result<Option<String>>;

    /// Non-merge commits reachable from `HEAD` but not from `since_tag`
    ///
    /// With `since_tag == None` every non-merge commit reachable from `HEAD`
    /// is returned. Commits come most-recent-first.
    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<RawCommit>>;
}

impl<R: Repository + ?Sized> Repository for Box<R> {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        (**self).latest_release_tag()
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<RawCommit>> {
        (**self).commits_since(since_tag)
    }
}

/// Commits collected for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    /// Tag the range starts after, if any
    pub since_tag: Option<String>,
    pub commits: Vec<RawCommit>,
}

/// Collect the commits made since the last release.
///
/// A failed tag lookup counts as "no release yet": a repository without tags
/// is the normal state before a first release. A failed commit query is
/// returned as an error.
pub fn harvest<R: Repository + ?Sized>(repo: &R) -> Result<Harvest> {
    let since_tag = match repo.latest_release_tag() {
        Ok(tag) => tag,
        Err(e) => {
            log::debug!("No release tag found ({}), reading full history", e);
            None
        }
    };

    match &since_tag {
        Some(tag) => log::debug!("Collecting commits since tag {}", tag),
        None => log::debug!("Collecting all commits reachable from HEAD"),
    }

    let commits = repo.commits_since(since_tag.as_deref())?;
    log::debug!("Harvested {} commits", commits.len());

    Ok(Harvest { since_tag, commits })
}
