use crate::error::BumpError;
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Which component of the version gets incremented.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Major,
    Minor,
    Patch,
}

impl Level {
    /// Returns the next version for this level. Lower components reset to zero,
    /// pre-release and build metadata are dropped.
    pub fn increment(self, current: &Version) -> Result<Version, BumpError> {
        let overflow = || BumpError::VersionOverflow {
            version: current.to_string(),
            level: self,
        };
        let (major, minor, patch) = match self {
            Level::Major => (current.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            Level::Minor => (current.major, current.minor.checked_add(1).ok_or_else(overflow)?, 0),
            Level::Patch => (current.major, current.minor, current.patch.checked_add(1).ok_or_else(overflow)?),
        };
        Ok(Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Major => write!(f, "major"),
            Level::Minor => write!(f, "minor"),
            Level::Patch => write!(f, "patch"),
        }
    }
}
