use std::fmt;

/// Reasons a run ends without writing a changeset.
/// None of these is a failure of the run; they are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryNotice {
    /// Manually authored changesets are already pending
    ExistingChangesets { files: Vec<String> },
    /// History was read and holds no commits since the last release
    NoCommits { since_tag: Option<String> },
    /// History could not be read
    HarvestFailed { reason: String },
    /// Commits exist but none follows the conventional commit format
    NoConventionalCommits { total: usize },
}

impl fmt::Display for BoundaryNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryNotice::ExistingChangesets { files } => {
                write!(
                    f,
                    "Existing changesets found ({}), skipping auto-generation",
                    files.join(", ")
                )
            }
            BoundaryNotice::NoCommits { since_tag } => match since_tag {
                Some(tag) => write!(f, "No commits found since release '{}'", tag),
                None => write!(f, "No commits found since last release"),
            },
            BoundaryNotice::HarvestFailed { reason } => {
                write!(f, "Could not read commit history: {}", reason)
            }
            BoundaryNotice::NoConventionalCommits { total } => {
                write!(f, "No conventional commits found among {} commits", total)
            }
        }
    }
}
