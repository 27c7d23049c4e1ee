use crate::parsers::{FieldPath, Located, Parser};
use anyhow::{Context, Result};
use semver::Version;
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::ops::Range;

/// Ordered field paths into a JSON document.
///
/// Values are located as byte spans of the original text, so a rewrite only
/// touches the version literals and keeps the document layout as it was.
#[derive(Debug)]
pub struct FieldParser {
    fields: &'static [FieldPath],
}

impl FieldParser {
    pub fn new(fields: &'static [FieldPath]) -> Self {
        FieldParser { fields }
    }
}

/// Resolves `path` inside `document`. A missing key or a non-object on the
/// way yields `None`.
fn resolve<'a>(document: &'a str, path: &FieldPath) -> Result<Option<&'a RawValue>> {
    let mut current: &'a RawValue = serde_json::from_str(document).context("error parsing JSON document")?;
    for key in path.0 {
        let Ok(object) = serde_json::from_str::<BTreeMap<String, &'a RawValue>>(current.get()) else {
            return Ok(None);
        };
        match object.get(*key) {
            Some(value) => current = *value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Byte range of `value` within `document`; `value` must be borrowed from it.
fn span(document: &str, value: &RawValue) -> Range<usize> {
    let start = value.get().as_ptr() as usize - document.as_ptr() as usize;
    start..start + value.get().len()
}

impl Parser for FieldParser {
    fn locate(&self, content: &str) -> Result<Option<Located>> {
        for field in self.fields {
            let Some(raw) = resolve(content, field)? else {
                continue;
            };
            // non-string values are handed on verbatim and fail version parsing
            let value = serde_json::from_str::<String>(raw.get()).unwrap_or_else(|_| raw.get().to_string());
            return Ok(Some(Located {
                value,
                location: field.to_string(),
            }));
        }
        Ok(None)
    }

    /// Sets every field that exists in the document, not just the first one.
    fn replace(&self, content: &str, _old: &Version, new: &Version) -> Result<Option<String>> {
        let mut spans = Vec::new();
        for field in self.fields {
            if let Some(raw) = resolve(content, field)? {
                spans.push(span(content, raw));
            }
        }
        if spans.is_empty() {
            return Ok(None);
        }

        // back to front, so earlier offsets stay valid
        spans.sort_by_key(|range| std::cmp::Reverse(range.start));
        spans.dedup();

        let literal = serde_json::to_string(&new.to_string())?;
        let mut rewritten = content.to_string();
        for range in spans {
            rewritten.replace_range(range, &literal);
        }
        Ok(Some(rewritten))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::langs::Language;
    use crate::parsers::Strategy;
    use pretty_assertions::assert_eq;

    const PACKAGE_LOCK: &str = "{\n\t\"name\": \"app\",\n\t\"version\": \"1.2.3\",\n\t\"lockfileVersion\": 2,\n\t\"requires\": true,\n\t\"packages\": {\n\t  \"\": {\n\t\t\"version\": \"1.2.3\",\n\t\t\"license\": \"MIT\"\n\t  },\n\t  \"node_modules/left-pad\": {\n\t\t\"version\": \"1.3.0\"\n\t  }\n\t},\n\t\"dependencies\": {\n\t  \"left-pad\": {\n\t\t\"version\": \"1.3.0\"\n\t  }\n\t}\n}\n";

    fn parser() -> FieldParser {
        match Language::JavaScript.profile().unwrap().strategy {
            Strategy::Fields(parser) => parser,
            Strategy::Lines(_) => panic!("JavaScript is not field based"),
        }
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_locate_top_level_version() {
        let located = parser().locate(PACKAGE_LOCK).unwrap().unwrap();
        assert_eq!(located.value, "1.2.3");
        assert_eq!(located.location, "version");
    }

    #[test]
    fn test_locate_falls_through_missing_path() {
        let content = r#"{"name": "app", "packages": {"": {"version": "0.3.1"}}}"#;
        let located = parser().locate(content).unwrap().unwrap();
        assert_eq!(located.value, "0.3.1");
        assert_eq!(located.location, r#"packages[""].version"#);
    }

    #[test]
    fn test_locate_without_version() {
        assert_eq!(parser().locate(r#"{"name": "app", "private": true}"#).unwrap(), None);
    }

    #[test]
    fn test_locate_non_string_value_is_passed_verbatim() {
        let located = parser().locate(r#"{"version": 1}"#).unwrap().unwrap();
        assert_eq!(located.value, "1");
    }

    #[test]
    fn test_locate_invalid_document() {
        assert!(parser().locate("{\"version\": ").is_err());
    }

    #[test]
    fn test_replace_every_existing_path() {
        let rewritten = parser().replace(PACKAGE_LOCK, &v("1.2.3"), &v("2.0.0")).unwrap().unwrap();
        let expected = PACKAGE_LOCK
            .replacen("\"version\": \"1.2.3\"", "\"version\": \"2.0.0\"", 2);
        assert_eq!(rewritten, expected);
        assert!(rewritten.contains("\"version\": \"1.3.0\""));
    }

    #[test]
    fn test_replace_skips_missing_paths() {
        let content = "{\n  \"name\": \"app\",\n  \"version\": \"0.1.0\"\n}";
        let rewritten = parser().replace(content, &v("0.1.0"), &v("0.2.0")).unwrap();
        assert_eq!(rewritten.as_deref(), Some("{\n  \"name\": \"app\",\n  \"version\": \"0.2.0\"\n}"));
    }

    #[test]
    fn test_replace_without_fields_is_none() {
        let content = "{\n  \"name\": \"app\"\n}\n";
        assert_eq!(parser().replace(content, &v("1.0.0"), &v("2.0.0")).unwrap(), None);
    }

    #[test]
    fn test_span_points_into_document() {
        let document = r#"{ "a": { "b": "x" } }"#;
        let raw = resolve(document, &FieldPath(&["a", "b"])).unwrap().unwrap();
        assert_eq!(&document[span(document, raw)], r#""x""#);
    }
}
