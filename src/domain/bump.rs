use std::fmt;
use std::str::FromStr;

use crate::domain::ParsedCommit;

/// Semantic-version bump recorded in a changeset.
///
/// `Major` exists so documents written by hand can be read back, but
/// [BumpCategory::resolve] never produces it: the project stays below 1.0
/// and breaking changes bump the minor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpCategory {
    Patch,
    Minor,
    Major,
}

impl BumpCategory {
    /// Bump for a set of commits: `Minor` if any is breaking, else `Patch`.
    pub fn resolve<'a, I>(commits: I) -> Self
    where
        I: IntoIterator<Item = &'a ParsedCommit>,
    {
        if commits.into_iter().any(|commit| commit.breaking) {
            BumpCategory::Minor
        } else {
            BumpCategory::Patch
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpCategory::Major => "major",
            BumpCategory::Minor => "minor",
            BumpCategory::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpCategory::Major),
            "minor" => Ok(BumpCategory::Minor),
            "patch" => Ok(BumpCategory::Patch),
            other => Err(format!("unknown bump category '{}'", other)),
        }
    }
}
