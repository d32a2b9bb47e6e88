//! Extracts repository content into an in-memory map of relative path to
//! decoded text, applying the ignore rules from [`crate::ignore`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::ignore::{should_ignore_dir, should_ignore_path};

/// Relative forward-slash path -> decoded file content.
///
/// Built fresh per acquisition and handed to the prompt builder; the sorted
/// key order makes context construction deterministic.
pub type FileContentMap = BTreeMap<String, String>;

/// Walks a directory tree and returns the content of every retained file.
///
/// Ignored directories are pruned before descent. Individual unreadable
/// entries are skipped, never failing the walk as a whole, so the result is
/// whatever subset of the tree could be read (possibly empty).
pub fn extract_dir(root: &Path) -> FileContentMap {
    let mut contents = FileContentMap::new();
    visit_dir(root, root, &mut contents);
    contents
}

fn visit_dir(dir: &Path, root: &Path, contents: &mut FileContentMap) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = ?e, path = %dir.display(), "Skipping unreadable directory");
            return;
        }
    };

    for entry_res in entries {
        let entry = match entry_res {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = ?e, path = %dir.display(), "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            let dir_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if should_ignore_dir(dir_name) {
                debug!(path = %path.display(), "Skipping ignored directory");
                continue;
            }
            visit_dir(&path, root, contents);
        } else if path.is_file() {
            let relative_path = match relative_key(&path, root) {
                Some(rel) => rel,
                None => continue,
            };
            if should_ignore_path(&relative_path) {
                debug!(path = %relative_path, "Skipping ignored file");
                continue;
            }
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    debug!(path = %relative_path, size = text.len(), "Extracted file");
                    contents.insert(relative_path, text);
                }
                Err(e) => {
                    debug!(error = ?e, path = %path.display(), "Skipping unreadable file");
                }
            }
        }
    }
}

/// Relative path with forward-slash separators, independent of platform.
fn relative_key(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

/// Extracts file contents from an in-memory ZIP archive.
///
/// Archives of the `<repo>/archive/refs/heads/<branch>.zip` form wrap all
/// content in a single synthetic top-level folder; exactly that first path
/// segment is stripped from every entry. Entries with nothing left after
/// stripping are dropped. Per-entry read failures skip the entry; only a
/// structurally unreadable archive is an error.
pub fn extract_zip(bytes: &[u8]) -> Result<FileContentMap, zip::result::ZipError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut contents = FileContentMap::new();
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = ?e, index = i, "Skipping unreadable archive entry");
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_owned();
        let relative_path = match name.split_once('/') {
            Some((_root_segment, rest)) if !rest.is_empty() => rest.to_owned(),
            _ => continue,
        };
        if should_ignore_path(&relative_path) {
            debug!(path = %relative_path, "Skipping ignored archive entry");
            continue;
        }

        let mut buf = Vec::new();
        match entry.read_to_end(&mut buf) {
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf).into_owned();
                debug!(path = %relative_path, size = text.len(), "Extracted archive entry");
                contents.insert(relative_path, text);
            }
            Err(e) => {
                debug!(error = ?e, path = %relative_path, "Skipping undecodable archive entry");
            }
        }
    }

    Ok(contents)
}
