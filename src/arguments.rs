use crate::version::Level;
use clap::{Parser, Subcommand};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Increment a major version
    Major,
    /// Increment a minor version
    Minor,
    /// Increment a patch version
    Patch,
}

impl Command {
    pub fn level(self) -> Level {
        match self {
            Command::Major => Level::Major,
            Command::Minor => Level::Minor,
            Command::Patch => Level::Patch,
        }
    }
}

/// Bump a semantic version of the project.
///
/// Increments the version in multiple different files at once, for example in
/// package.json and a Dockerfile, then commits and tags the change.
#[derive(Debug, Parser)]
#[command(author, version, bin_name = "bump")]
pub struct Arguments {
    /// Project root: where files are scanned and `.bump` is read from
    #[arg(long, short, default_value = "./", global = true)]
    pub path: String,
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = Arguments::parse_from(["bump", "patch"]);
        assert_eq!(args.command, Command::Patch);
        assert_eq!(args.path, "./");
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!(Arguments::parse_from(["bump", "major"]).command.level(), Level::Major);
        assert_eq!(Arguments::parse_from(["bump", "minor"]).command.level(), Level::Minor);
        assert_eq!(Arguments::parse_from(["bump", "patch"]).command.level(), Level::Patch);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Arguments::try_parse_from(["bump"]).is_err());
    }

    #[test]
    fn test_subcommands_are_exclusive() {
        assert!(Arguments::try_parse_from(["bump", "major", "minor"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Arguments::try_parse_from(["bump", "micro"]).is_err());
    }

    #[test]
    fn test_parse_path() {
        let args = Arguments::parse_from(["bump", "-p", "/some/path", "minor"]);
        assert_eq!(args.path, "/some/path");
    }

    #[test]
    fn test_parse_long_flags_after_subcommand() {
        let args = Arguments::parse_from(["bump", "major", "--path", "/test", "--verbose"]);
        assert_eq!(args.command, Command::Major);
        assert_eq!(args.path, "/test");
        assert!(args.verbose);
    }
}
