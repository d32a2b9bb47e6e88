//! Static ignore rules deciding which repository paths are excluded from
//! the documentation context.

/// Directory names that are never descended into (VCS metadata, dependency
/// trees, build output, editor state).
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    "venv",
    "env",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    "lib",
];

/// Exact filenames excluded regardless of location.
pub const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    ".gitignore",
    ".gitattributes",
    ".DS_Store",
];

/// Extensions (without the leading dot, lowercase) for binary and media
/// files that carry no value as LLM context: images, video, audio,
/// documents, archives, compiled artifacts.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico",
    "mp4", "mov", "avi",
    "mp3", "wav",
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    "zip", "tar", "gz", "7z", "rar",
    "exe", "dll", "so", "dylib", "bin", "pkl", "pyc",
    "jar", "class", "war",
];

/// Returns true if a directory with this name must not be traversed.
pub fn should_ignore_dir(dir_name: &str) -> bool {
    IGNORED_DIRS.contains(&dir_name)
}

/// Returns true if the file at this (forward-slash, repo-relative) path is
/// excluded from the content set, either by exact filename or by extension.
/// Extension matching is case-insensitive.
pub fn should_ignore_path(relative_path: &str) -> bool {
    let filename = relative_path.rsplit('/').next().unwrap_or(relative_path);

    if IGNORED_FILES.contains(&filename) {
        return true;
    }

    // Dotfiles like ".gitignore" are a filename match, not an extension
    // match, so only the portion after a non-leading dot counts.
    if let Some((stem, ext)) = filename.rsplit_once('.') {
        if !stem.is_empty() {
            let ext = ext.to_ascii_lowercase();
            return IGNORED_EXTENSIONS.contains(&ext.as_str());
        }
    }

    false
}
