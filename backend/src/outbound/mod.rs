//! Outbound adapters implementing domain ports.
//!
//! - **ledger**: credit ledger implementations
//! - **config**: OrthoConfig-backed credits settings and feature flag
//! - **localization**: resource-string message formatter
//!
//! Adapters translate between domain types and their backing
//! representation. They contain no business logic.

pub mod config;
pub mod ledger;
pub mod localization;

use std::io::{self, Read};
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

/// Read a UTF-8 file through a capability handle on its parent directory.
pub(crate) fn read_ambient_file(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path must name a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut file = directory.open(Path::new(file_name))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}
