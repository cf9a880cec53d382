//! Main workflow orchestration logic
//!
//! Runs the pipeline once:
//!
//! `CheckExisting → Harvest → Parse → Resolve → Render → Write`
//!
//! Every early exit is a [RunOutcome::Skipped] carrying a [BoundaryNotice];
//! nothing is written on those paths. Errors are reserved for faults outside
//! that contract: unreadable package metadata or a failed write.

use std::path::PathBuf;

use crate::boundary::BoundaryNotice;
use crate::changeset_dir;
use crate::config::{Config, Workspace};
use crate::domain::{BumpCategory, ChangesetDocument, ParsedCommit};
use crate::error::Result;
use crate::git::{self, Repository};
use crate::package;

/// Arguments for the changeset workflow
///
/// Decoupled from the clap arguments so the workflow can be driven
/// programmatically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunOptions {
    /// Render the document but do not write it
    pub dry_run: bool,
}

/// A changeset produced by a run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedChangeset {
    /// Written file, `None` on a dry run
    pub path: Option<PathBuf>,
    pub document: ChangesetDocument,
    /// Rendered document text
    pub contents: String,
    /// Commits harvested from history, conventional or not
    pub harvested: usize,
}

impl GeneratedChangeset {
    pub fn bump(&self) -> BumpCategory {
        self.document.bump()
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Skipped(BoundaryNotice),
    Generated(GeneratedChangeset),
}

/// Run the changeset workflow
///
/// `open_repo` is only called once the changeset directory check has passed,
/// so a pending manual changeset stops the run before history is touched.
///
/// # Arguments
/// * `workspace` - Working directory and changeset directory
/// * `config` - Loaded configuration
/// * `options` - Run options
/// * `open_repo` - Opens the repository to harvest from
pub fn run_pipeline<R, F>(
    workspace: &Workspace,
    config: &Config,
    options: &RunOptions,
    open_repo: F,
) -> Result<RunOutcome>
where
    R: Repository,
    F: FnOnce() -> Result<R>,
{
    let existing = changeset_dir::existing_changesets(&workspace.changeset_dir, &config.changeset)?;
    if !existing.is_empty() {
        return Ok(RunOutcome::Skipped(BoundaryNotice::ExistingChangesets {
            files: existing,
        }));
    }

    let harvest = match open_repo().and_then(|repo| git::harvest(&repo)) {
        Ok(harvest) => harvest,
        Err(e) => {
            log::warn!("Commit harvest failed: {}", e);
            return Ok(RunOutcome::Skipped(BoundaryNotice::HarvestFailed {
                reason: e.to_string(),
            }));
        }
    };

    if harvest.commits.is_empty() {
        return Ok(RunOutcome::Skipped(BoundaryNotice::NoCommits {
            since_tag: harvest.since_tag,
        }));
    }

    log::info!("Analyzing {} commits", harvest.commits.len());

    let parsed: Vec<ParsedCommit> = harvest
        .commits
        .iter()
        .filter_map(ParsedCommit::from_raw)
        .collect();

    if parsed.is_empty() {
        return Ok(RunOutcome::Skipped(BoundaryNotice::NoConventionalCommits {
            total: harvest.commits.len(),
        }));
    }

    let package_name = match &config.package.name {
        Some(name) => name.clone(),
        None => package::read_package_name(&workspace.working_dir)?,
    };

    let bump = BumpCategory::resolve(&parsed);
    let document = ChangesetDocument::new(package_name, bump, &parsed);
    let contents = document.render();

    let path = if options.dry_run {
        None
    } else {
        Some(changeset_dir::write_changeset(
            &workspace.changeset_dir,
            &config.changeset,
            &contents,
        )?)
    };

    Ok(RunOutcome::Generated(GeneratedChangeset {
        path,
        document,
        contents,
        harvested: harvest.commits.len(),
    }))
}
