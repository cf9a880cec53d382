pub mod boundary;
pub mod changeset_dir;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod package;
pub mod ui;

pub use error::{ChangesetError, Result};
