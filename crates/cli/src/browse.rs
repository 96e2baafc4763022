//! Directory listing for the browse command.
//!
//! The store never touches the file system; browsing is purely a shell
//! concern used to discover candidate paths.

use anyhow::{Context, Result};
use std::path::Path;

/// Kind of a directory entry, labeled the way the listing renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Folder => "Folder",
            EntryKind::File => "File",
        }
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// List a directory's entries sorted by name.
pub async fn list_directory(path: &Path) -> Result<Vec<DirEntry>> {
    let mut read_dir = tokio::fs::read_dir(path)
        .await
        .with_context(|| format!("failed to read directory: {}", path.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .with_context(|| format!("failed to read directory: {}", path.display()))?
    {
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("failed to stat: {}", entry.path().display()))?;
        let kind = if file_type.is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
