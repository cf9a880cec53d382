use crate::error::Result;
use crate::git::RawCommit;
use git2::{
    DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Repository as Git2Repo, Sort,
};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn latest_release_tag(&self) -> Result<Option<String>> {
        if self.repo.tag_names(None)?.is_empty() {
            return Ok(None);
        }

        let mut describe_options = DescribeOptions::new();
        describe_options.describe_tags();

        let describe = match self.repo.describe(&describe_options) {
            Ok(describe) => describe,
            // tags exist, but none is reachable from HEAD
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        // abbreviated_size(0) prints the bare tag, like `git describe --abbrev=0`
        let mut format_options = DescribeFormatOptions::new();
        format_options.abbreviated_size(0);

        Ok(Some(describe.format(Some(&format_options))?))
    }

    fn commits_since(&self, since_tag: Option<&str>) -> Result<Vec<RawCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = since_tag {
            let tagged = self.repo.revparse_single(tag)?.peel_to_commit()?;
            revwalk.hide(tagged.id())?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;

            if commit.parent_count() > 1 {
                continue;
            }

            commits.push(RawCommit {
                hash: commit.id().to_string(),
                subject: commit.summary().unwrap_or_default().to_string(),
                body: commit.body().unwrap_or_default().trim_end().to_string(),
            });
        }

        Ok(commits)
    }
}
