pub const FILES: &[&str] = &["Dockerfile"];

/// `LABEL` instructions first, then indented continuation lines of a
/// multi-line `LABEL`.
pub const PATTERNS: &[&str] = &[
    concat!(r#"^LABEL .*[vV]ersion['"]?=['"]?[vV]?(?P<version>"#, semver_grammar!(), r#")['"]?.*"#),
    concat!(r#"^\s+.*[vV]ersion['"]?=['"]?[vV]?(?P<version>"#, semver_grammar!(), r#")['"]?.*"#),
];
