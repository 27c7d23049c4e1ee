use crate::version::Level;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal conditions of a bump run.
///
/// Everything else (I/O, git, config) travels as an `anyhow` chain; these are
/// the cases callers need to tell apart.
#[derive(Debug, Error)]
pub enum BumpError {
    #[error("inconsistent versioning")]
    InconsistentVersioning,
    #[error("0 files updated")]
    NothingUpdated,
    #[error("version not found anywhere")]
    VersionNotFound,
    #[error("not supported language: {0}")]
    UnsupportedLanguage(String),
    #[error("error parsing semantic version '{value}' at file {} ({location})", .path.display())]
    InvalidVersion {
        path: PathBuf,
        /// Where in the file the value sits, e.g. `line 3` or `packages[""].version`.
        location: String,
        value: String,
        #[source]
        source: semver::Error,
    },
    #[error("cannot increment {level} version of {version}")]
    VersionOverflow { version: String, level: Level },
}
