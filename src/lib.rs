pub mod arguments;
pub mod bump;
pub mod config;
pub mod error;
pub mod git;
pub mod langs;
pub mod parsers;
pub mod scanner;
pub mod update;
pub mod version;
