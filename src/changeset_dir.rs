//! Reading and writing the changeset directory.

use rand::RngCore;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::ChangesetConfig;
use crate::error::Result;

/// Random bytes in a generated file identifier.
pub const ID_BYTES: usize = 8;

/// Names of manually authored changesets in `dir`, sorted.
///
/// A changeset is a file with the configured extension that is not one of
/// the reserved files. A missing directory holds no changesets.
pub fn existing_changesets(dir: &Path, config: &ChangesetConfig) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let suffix = format!(".{}", config.extension);
    let mut names = Vec::new();

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(&suffix) && !config.reserved_files.contains(&name) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Hex encoding of [ID_BYTES] random bytes.
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// File name for a generated changeset with the given identifier.
pub fn changeset_file_name(config: &ChangesetConfig, id: &str) -> String {
    format!("{}{}.{}", config.file_prefix, id, config.extension)
}

/// Write `contents` to a new, uniquely named file in `dir`.
///
/// The directory is created when missing. The file is opened with
/// create-new semantics, so an existing file is never overwritten.
pub fn write_changeset(dir: &Path, config: &ChangesetConfig, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(changeset_file_name(config, &generate_id()));
    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(contents.as_bytes())?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}
