use crate::parsers::FieldPath;

pub const FILES: &[&str] = &["package.json", "package-lock.json"];

/// `package-lock.json` repeats the project version under its own entry in
/// `packages`, keyed by the empty string.
pub const FIELDS: &[FieldPath] = &[
    FieldPath(&["version"]),
    FieldPath(&["packages", "", "version"]),
];
