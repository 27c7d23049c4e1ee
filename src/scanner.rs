use crate::langs::LanguageProfile;
use anyhow::{Context, Result, bail};
use log::debug;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Drops `.` components so that `./Dockerfile` and `Dockerfile` compare equal.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref()
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Lists the file names directly inside `dir` (relative to `root`), sorted,
/// without subdirectories and without entries listed in `exclude`.
pub fn list_files(root: impl AsRef<Path>, dir: impl AsRef<Path>, exclude: &[PathBuf]) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let path = root.as_ref().join(dir);
    let metadata = std::fs::metadata(&path).with_context(|| format!("open {}", dir.display()))?;
    if !metadata.is_dir() {
        bail!("open {}: not a directory", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.file_name().to_string_lossy().to_string());
    }

    let files = exclude_files(dir, files, exclude);
    debug!("Found files in '{}': {:?}", dir.display(), files);
    Ok(files)
}

/// Removes every name whose joined `dir/name` path equals an `exclude` entry.
pub fn exclude_files(dir: impl AsRef<Path>, files: Vec<String>, exclude: &[PathBuf]) -> Vec<String> {
    let dir = dir.as_ref();
    let exclude: Vec<PathBuf> = exclude.iter().map(normalize).collect();
    files
        .into_iter()
        .filter(|name| !exclude.contains(&normalize(dir.join(name))))
        .collect()
}

/// Narrows a listing to the names the language profile cares about.
pub fn filter_files(profile: &LanguageProfile, files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter(|name| profile.matches_file(name))
        .cloned()
        .collect()
}
