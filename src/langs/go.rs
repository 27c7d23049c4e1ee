pub const FILES: &[&str] = &["*.go"];

pub const PATTERNS: &[&str] = &[
    concat!(r#"^const [vV]ersion\s*string = "[vV]?(?P<version>"#, semver_grammar!(), r#")""#),
    concat!(r#"^const [vV]ersion := "[vV]?(?P<version>"#, semver_grammar!(), r#")""#),
    // member of a `const ( ... )` block
    concat!(r#"^\s*[vV]ersion\s*string = "[vV]?(?P<version>"#, semver_grammar!(), r#")""#),
];
