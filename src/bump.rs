use crate::config::{Configuration, LanguageSettings};
use crate::error::BumpError;
use crate::git::{self, CommitGateway};
use crate::langs::{Language, LanguageProfile};
use crate::scanner;
use crate::version::Level;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use semver::Version;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a successful bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpResult {
    /// Rewritten files, relative to the scan root.
    pub files: Vec<PathBuf>,
    pub version: Version,
    /// Directories that had candidate files of a language but no version in any of them.
    pub unidentified: Vec<(Language, PathBuf)>,
}

/// Accumulator threaded through every language and directory of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    /// Old version string -> number of files declaring it.
    pub tally: BTreeMap<String, usize>,
    pub files: Vec<PathBuf>,
    pub version: Option<Version>,
    pub unidentified: Vec<(Language, PathBuf)>,
    pub languages: usize,
}

impl Progress {
    pub fn language(mut self) -> Self {
        self.languages += 1;
        self
    }

    pub fn record(mut self, old: &Version, new: Version) -> Self {
        *self.tally.entry(old.to_string()).or_default() += 1;
        self.version = Some(new);
        self
    }

    pub fn modified(mut self, path: PathBuf) -> Self {
        if !self.files.contains(&path) {
            self.files.push(path);
        }
        self
    }

    pub fn unidentified(mut self, language: Language, dir: PathBuf) -> Self {
        self.unidentified.push((language, dir));
        self
    }

    /// The consistency gate: exactly one old version across the whole run.
    pub fn decide(self) -> Result<BumpResult, BumpError> {
        if self.tally.len() > 1 {
            for (version, count) in &self.tally {
                warn!("Found version {} in {} file(s)", version, count);
            }
            return Err(BumpError::InconsistentVersioning);
        }
        if self.languages == 0 {
            return Err(BumpError::NothingUpdated);
        }
        let Some(version) = self.version else {
            return Err(BumpError::VersionNotFound);
        };

        Ok(BumpResult {
            files: self.files,
            version,
            unidentified: self.unidentified,
        })
    }
}

/// Drives scan, extract, rewrite and commit for every enabled language.
pub struct Bump<G: CommitGateway> {
    root: PathBuf,
    config: Configuration,
    gateway: G,
}

impl<G: CommitGateway> Bump<G> {
    pub fn new(root: impl AsRef<Path>, config: Configuration, gateway: G) -> Self {
        Bump {
            root: root.as_ref().to_path_buf(),
            config,
            gateway,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// Increments the project version by `level` and commits the rewritten files.
    ///
    /// Files are rewritten language by language before the consistency gate
    /// runs, so a failed gate leaves them modified on disk but uncommitted.
    pub fn run(&mut self, level: Level) -> Result<BumpResult> {
        info!("Incrementing project version...");

        let mut progress = Progress::default();
        for language in Language::ALL {
            let settings = self.config.settings(language);
            if !settings.enabled {
                debug!("{} is disabled", language);
                continue;
            }
            progress = self
                .bump_language(language, settings, level, progress)
                .with_context(|| format!("error incrementing version in {} project", language))?;
        }

        let result = progress.decide()?;
        if result.files.is_empty() {
            info!("No files were modified, nothing to commit");
            return Ok(result);
        }

        info!("Committing changes...");
        git::save(&mut self.gateway, &result.files, &result.version.to_string())
            .context("error committing changes")?;

        Ok(result)
    }

    fn bump_language(
        &self,
        language: Language,
        settings: &LanguageSettings,
        level: Level,
        progress: Progress,
    ) -> Result<Progress> {
        info!("Updating {} files:", language);
        let profile = language.profile()?;

        let mut progress = progress.language();
        for dir in &settings.directories {
            let files = scanner::list_files(&self.root, dir, &settings.exclude_files)
                .context("error listing directory files")?;
            let candidates = scanner::filter_files(&profile, &files);
            progress = self.bump_files(&profile, dir, &candidates, level, progress)?;
        }
        Ok(progress)
    }

    fn bump_files(
        &self,
        profile: &LanguageProfile,
        dir: &Path,
        candidates: &[String],
        level: Level,
        mut progress: Progress,
    ) -> Result<Progress> {
        let mut identified = false;

        for name in candidates {
            let path = scanner::normalize(dir.join(name));
            let absolute = self.root.join(&path);
            let content = fs::read_to_string(&absolute)
                .with_context(|| format!("error reading a file {}", path.display()))?;

            let Some(old) = profile.extract(&content, &path)? else {
                debug!("No version in '{}'", path.display());
                continue;
            };
            identified = true;

            let new = level.increment(&old)?;
            info!("    {} -> {} {}", old, new, path.display());

            if let Some(rewritten) = profile.rewrite(&content, &old, &new)? {
                fs::write(&absolute, rewritten)
                    .with_context(|| format!("error writing to file {}", path.display()))?;
                progress = progress.modified(path);
            }
            progress = progress.record(&old, new);
        }

        if !candidates.is_empty() && !identified {
            warn!("{} version was not identified in '{}'", profile.language, dir.display());
            progress = progress.unidentified(profile.language, dir.to_path_buf());
        }
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_decide_single_version() {
        let progress = Progress::default()
            .language()
            .record(&v("1.2.3"), v("2.0.0"))
            .modified(PathBuf::from("Dockerfile"))
            .record(&v("1.2.3"), v("2.0.0"))
            .modified(PathBuf::from("main.go"));
        assert_eq!(progress.tally.get("1.2.3"), Some(&2));

        let result = progress.decide().unwrap();
        assert_eq!(result.version, v("2.0.0"));
        assert_eq!(result.files, vec![PathBuf::from("Dockerfile"), PathBuf::from("main.go")]);
    }

    #[test]
    fn test_decide_inconsistent() {
        let progress = Progress::default()
            .language()
            .record(&v("1.2.3"), v("2.0.0"))
            .record(&v("1.3.0"), v("2.0.0"));
        assert!(matches!(progress.decide(), Err(BumpError::InconsistentVersioning)));
    }

    #[test]
    fn test_decide_nothing_scanned() {
        assert!(matches!(Progress::default().decide(), Err(BumpError::NothingUpdated)));
    }

    #[test]
    fn test_decide_version_not_found() {
        let progress = Progress::default().language();
        assert!(matches!(progress.decide(), Err(BumpError::VersionNotFound)));
    }

    #[test]
    fn test_modified_deduplicates() {
        let progress = Progress::default()
            .modified(PathBuf::from("package-lock.json"))
            .modified(PathBuf::from("package-lock.json"));
        assert_eq!(progress.files.len(), 1);
    }
}
