use crate::parsers::{Located, Parser};
use anyhow::{Context, Result};
use regex::Regex;
use semver::Version;

/// Ordered line patterns, each capturing the version in a `version` group.
///
/// Order matters: a more specific pattern is listed before a more general
/// fallback, and the first hit ends the search.
#[derive(Debug)]
pub struct LineParser {
    patterns: Vec<Regex>,
}

impl LineParser {
    pub fn new(patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(pattern).with_context(|| format!("invalid version pattern '{pattern}'")))
            .collect::<Result<Vec<_>>>()?;
        Ok(LineParser { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(line))
    }
}

impl Parser for LineParser {
    fn locate(&self, content: &str) -> Result<Option<Located>> {
        for (number, line) in content.lines().enumerate() {
            for pattern in &self.patterns {
                if let Some(version) = pattern.captures(line).and_then(|captures| captures.name("version")) {
                    return Ok(Some(Located {
                        value: version.as_str().to_string(),
                        location: format!("line {}", number + 1),
                    }));
                }
            }
        }
        Ok(None)
    }

    /// Substitutes the literal old version string on matching lines only, so
    /// quotes and `v` prefixes around it stay untouched. The result always
    /// ends with a newline.
    fn replace(&self, content: &str, old: &Version, new: &Version) -> Result<Option<String>> {
        let old = old.to_string();
        let new = new.to_string();
        let mut substituted = false;

        let mut lines = Vec::new();
        for line in content.lines() {
            if self.matches(line) && line.contains(&old) {
                substituted = true;
                lines.push(line.replace(&old, &new));
            } else {
                lines.push(line.to_string());
            }
        }

        if !substituted {
            return Ok(None);
        }
        lines.push(String::new());
        Ok(Some(lines.join("\n")))
    }
}
