//! Domain logic - pure rules independent of git and the file system

pub mod bump;
pub mod changeset;
pub mod commit;

pub use bump::BumpCategory;
pub use changeset::{Bucket, ChangesetDocument};
pub use commit::ParsedCommit;
