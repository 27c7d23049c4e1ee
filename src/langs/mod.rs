use crate::error::BumpError;
use crate::parsers::{Strategy, field_parser::FieldParser, line_parser::LineParser};
use anyhow::Result;
use semver::Version;
use std::fmt;
use std::path::Path;

/// Strict semantic version grammar, without capture groups of its own so that
/// the surrounding pattern decides what gets captured.
macro_rules! semver_grammar {
    () => {
        r"(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*)?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?"
    };
}

mod docker;
mod go;
mod javascript;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Docker,
    Go,
    JavaScript,
}

impl Language {
    /// Processing order of a bump run.
    pub const ALL: [Language; 3] = [Language::Docker, Language::Go, Language::JavaScript];

    pub fn name(self) -> &'static str {
        match self {
            Language::Docker => "Docker",
            Language::Go => "Go",
            Language::JavaScript => "JavaScript",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.name().eq_ignore_ascii_case(name))
    }

    pub fn profile(self) -> Result<LanguageProfile> {
        let (files, strategy) = match self {
            Language::Docker => (docker::FILES, Strategy::Lines(LineParser::new(docker::PATTERNS)?)),
            Language::Go => (go::FILES, Strategy::Lines(LineParser::new(go::PATTERNS)?)),
            Language::JavaScript => (javascript::FILES, Strategy::Fields(FieldParser::new(javascript::FIELDS))),
        };
        Ok(LanguageProfile { language: self, files, strategy })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the profile registered under `name`.
pub fn profile_for(name: &str) -> Result<LanguageProfile> {
    match Language::from_name(name) {
        Some(language) => language.profile(),
        None => Err(BumpError::UnsupportedLanguage(name.to_string()).into()),
    }
}

/// File matchers and version location rules of one supported ecosystem.
#[derive(Debug)]
pub struct LanguageProfile {
    pub language: Language,
    /// Exact file names, or `*.ext` globs matched by suffix.
    pub files: &'static [&'static str],
    pub strategy: Strategy,
}

impl LanguageProfile {
    pub fn matches_file(&self, name: &str) -> bool {
        self.files.iter().any(|matcher| match matcher.strip_prefix('*') {
            Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
            _ => name == *matcher,
        })
    }

    pub fn extract(&self, content: &str, path: &Path) -> Result<Option<Version>> {
        self.strategy.extract(content, path)
    }

    pub fn rewrite(&self, content: &str, old: &Version, new: &Version) -> Result<Option<String>> {
        self.strategy.rewrite(content, old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(Language::from_name("Docker"), Some(Language::Docker));
        assert_eq!(Language::from_name("go"), Some(Language::Go));
        assert_eq!(Language::from_name("JAVASCRIPT"), Some(Language::JavaScript));
        assert_eq!(Language::from_name("rust"), None);
    }

    #[test]
    fn test_profile_for_unsupported() {
        let err = profile_for("not-supported-language").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BumpError>(),
            Some(BumpError::UnsupportedLanguage(name)) if name == "not-supported-language"
        ));
    }

    #[test]
    fn test_profiles_compile() {
        for language in Language::ALL {
            let profile = language.profile().unwrap();
            assert_eq!(profile.language, language);
            assert!(!profile.files.is_empty());
        }
    }

    #[test]
    fn test_strategy_kinds() {
        assert!(matches!(profile_for("Docker").unwrap().strategy, Strategy::Lines(ref p) if p.len() == 2));
        assert!(matches!(profile_for("Go").unwrap().strategy, Strategy::Lines(ref p) if p.len() == 3));
        assert!(matches!(profile_for("JavaScript").unwrap().strategy, Strategy::Fields(_)));
    }

    #[test]
    fn test_matches_file_exact() {
        let docker = Language::Docker.profile().unwrap();
        assert!(docker.matches_file("Dockerfile"));
        assert!(!docker.matches_file("Dockerfile.dev"));
        assert!(!docker.matches_file("my.Dockerfile"));

        let javascript = Language::JavaScript.profile().unwrap();
        assert!(javascript.matches_file("package.json"));
        assert!(javascript.matches_file("package-lock.json"));
        assert!(!javascript.matches_file("my-package.json"));
        assert!(!javascript.matches_file("tsconfig.json"));
    }

    #[test]
    fn test_matches_file_glob() {
        let go = Language::Go.profile().unwrap();
        assert!(go.matches_file("main.go"));
        assert!(go.matches_file("lib_test.go"));
        assert!(!go.matches_file("go.mod"));
        assert!(!go.matches_file("main.go.bak"));
    }
}
