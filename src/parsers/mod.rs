use crate::error::BumpError;
use anyhow::Result;
use log::debug;
use semver::Version;
use std::fmt;
use std::path::Path;

pub mod field_parser;
pub mod line_parser;

use field_parser::FieldParser;
use line_parser::LineParser;

/// A raw version token found in a file, before semantic version parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub value: String,
    /// Human readable position, e.g. `line 3` or `packages[""].version`.
    pub location: String,
}

pub trait Parser {
    /// Finds the first version token in `content`.
    fn locate(&self, content: &str) -> Result<Option<Located>>;

    /// Replaces `old` with `new` at every recognised position. Returns `None`
    /// when nothing was substituted.
    fn replace(&self, content: &str, old: &Version, new: &Version) -> Result<Option<String>>;
}

/// How a language finds its version: line patterns over free text, or field
/// paths into a JSON document.
#[derive(Debug)]
pub enum Strategy {
    Lines(LineParser),
    Fields(FieldParser),
}

impl Strategy {
    fn parser(&self) -> &dyn Parser {
        match self {
            Strategy::Lines(parser) => parser,
            Strategy::Fields(parser) => parser,
        }
    }

    /// Returns the version of the file at `path`, if it declares one.
    ///
    /// A token that is found but is not a strict semantic version is an error,
    /// never a miss.
    pub fn extract(&self, content: &str, path: &Path) -> Result<Option<Version>> {
        let Some(located) = self.parser().locate(content)? else {
            return Ok(None);
        };
        debug!("Found version '{}' at {} of '{}'", located.value, located.location, path.display());

        let version = Version::parse(&located.value).map_err(|source| BumpError::InvalidVersion {
            path: path.to_path_buf(),
            location: located.location.clone(),
            value: located.value.clone(),
            source,
        })?;
        Ok(Some(version))
    }

    pub fn rewrite(&self, content: &str, old: &Version, new: &Version) -> Result<Option<String>> {
        self.parser().replace(content, old, new)
    }
}

/// Dot/bracket addressable path of object keys into a JSON document.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldPath(pub &'static [&'static str]);

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.0.iter().enumerate() {
            let plain = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            match (index, plain) {
                (0, true) => write!(f, "{key}")?,
                (_, true) => write!(f, ".{key}")?,
                (_, false) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}
