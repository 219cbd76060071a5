//! Merging translated subtrees into destination catalogs.

use crate::document::{Document, DocumentError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Replace the addressed part of `destination` with `translated`.
///
/// With a key, only that top-level entry is replaced (or appended when
/// absent). Without one, every top-level entry of `translated` is applied the
/// same way. All other entries keep their value and position.
pub fn merge_subtree(destination: Document, subtree_key: Option<&str>, translated: Document) -> Document {
    let mut entries = match destination {
        Document::Mapping(entries) => entries,
        Document::String(_) | Document::Scalar(_) => Vec::new(),
    };

    match (subtree_key, translated) {
        (Some(key), subtree) => upsert(&mut entries, key.to_string(), subtree),
        (None, Document::Mapping(translated_entries)) => {
            for (key, value) in translated_entries {
                upsert(&mut entries, key, value);
            }
        }
        (None, other) => return other,
    }

    Document::Mapping(entries)
}

fn upsert(entries: &mut Vec<(String, Document)>, key: String, value: Document) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, slot)) => *slot = value,
        None => entries.push((key, value)),
    }
}

/// Load `destination_path`, merge `translated` into it and write it back.
///
/// The write goes to a temporary file in the same directory which is then
/// renamed over the destination, so a crash leaves either the old or the
/// new catalog on disk. Returns the merged document.
pub fn merge_and_write(
    destination_path: &Path,
    subtree_key: Option<&str>,
    translated: Document,
) -> Result<Document, DocumentError> {
    let destination = Document::load(destination_path)?;
    let merged = merge_subtree(destination, subtree_key, translated);
    write_atomic(destination_path, &merged)?;

    debug!(
        "Merged {} into {}",
        subtree_key.unwrap_or("<all keys>"),
        destination_path.display()
    );
    Ok(merged)
}

/// Write a document as pretty JSON via temp file + rename.
pub fn write_atomic(path: &Path, document: &Document) -> Result<(), DocumentError> {
    let write_error = |reason: String| DocumentError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let contents = document
        .to_json_pretty()
        .map_err(|e| write_error(format!("serialization failed: {}", e)))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&directory).map_err(|e| write_error(e.to_string()))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| write_error(e.to_string()))?;
    // Temp files are created 0600; the rename must not narrow an existing catalog's mode
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| write_error(e.to_string()))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| write_error(e.to_string()))?;
    temp.persist(path).map_err(|e| write_error(e.error.to_string()))?;

    Ok(())
}
