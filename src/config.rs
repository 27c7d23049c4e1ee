use crate::langs::Language;
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project configuration file, looked up in the scan root.
pub const CONFIG_FILE: &str = ".bump";

/// Per-language settings of a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default)]
    pub exclude_files: Vec<PathBuf>,
}

impl LanguageSettings {
    fn enabled() -> Self {
        LanguageSettings {
            enabled: true,
            directories: vec![PathBuf::from(".")],
            exclude_files: Vec::new(),
        }
    }
}

impl Default for LanguageSettings {
    /// A language left out of a config file is disabled.
    fn default() -> Self {
        LanguageSettings {
            enabled: false,
            directories: vec![PathBuf::from(".")],
            exclude_files: Vec::new(),
        }
    }
}

/// Unknown sections are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    #[serde(default, alias = "Docker", alias = "DOCKER")]
    pub docker: LanguageSettings,
    #[serde(default, alias = "Go", alias = "GO")]
    pub go: LanguageSettings,
    #[serde(default, alias = "JavaScript", alias = "Javascript", alias = "JAVASCRIPT")]
    pub javascript: LanguageSettings,
}

impl Default for Configuration {
    /// Every language enabled, scanning the root directory only.
    fn default() -> Self {
        Configuration {
            docker: LanguageSettings::enabled(),
            go: LanguageSettings::enabled(),
            javascript: LanguageSettings::enabled(),
        }
    }
}

impl Configuration {
    /// Reads `.bump` from `root`, falling back to the defaults when it does not exist.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            debug!("No {} file found, using defaults", CONFIG_FILE);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).context("error reading project config file")?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Configuration = toml::from_str(contents).context("error parsing project config file")?;
        for language in Language::ALL {
            let settings = config.settings_mut(language);
            if settings.directories.is_empty() {
                settings.directories.push(PathBuf::from("."));
            }
        }
        Ok(config)
    }

    pub fn settings(&self, language: Language) -> &LanguageSettings {
        match language {
            Language::Docker => &self.docker,
            Language::Go => &self.go,
            Language::JavaScript => &self.javascript,
        }
    }

    pub fn settings_mut(&mut self, language: Language) -> &mut LanguageSettings {
        match language {
            Language::Docker => &mut self.docker,
            Language::Go => &mut self.go,
            Language::JavaScript => &mut self.javascript,
        }
    }
}
