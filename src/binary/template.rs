//! Template resolution for origin URLs and archive mappings.
//!
//! Origins describe where a binary lives with parameterized strings such as
//!
//! ```text
//! https://example.com/releases/v{{ version }}/tool_{{ os }}_{{ arch }}{{ archive_extension }}
//! ```
//!
//! which are rendered against the [`Template`] of the binary being
//! provisioned.
//!
//! # Syntax
//!
//! - `{{ field }}` - replaced with the value of `field` (whitespace inside
//!   the braces is optional)
//! - everything else is copied verbatim, including a lone `}}`

use crate::error::{BintoolError, Result};
use std::collections::BTreeSet;

/// Fields a template may reference.
pub const FIELDS: &[&str] = &[
    "os",
    "arch",
    "directory",
    "name",
    "path",
    "version",
    "extension",
    "archive_extension",
];

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Field reference: {{ name }}
    Field(String),
}

/// Parse a string containing `{{ field }}` placeholders.
///
/// Field names are validated against [`FIELDS`].
///
/// # Errors
///
/// Returns `Template` if a placeholder is unterminated, empty, or names a
/// field that does not exist.
pub fn parse_template(input: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }

        let after_open = &rest[start + 2..];
        let end = after_open.find("}}").ok_or_else(|| BintoolError::Template {
            template: input.to_string(),
            message: format!("unterminated placeholder at byte {}", input.len() - rest.len() + start),
        })?;

        let field = after_open[..end].trim();
        if field.is_empty() {
            return Err(BintoolError::Template {
                template: input.to_string(),
                message: "empty placeholder".to_string(),
            });
        }
        if !FIELDS.contains(&field) {
            return Err(BintoolError::Template {
                template: input.to_string(),
                message: format!("unknown field '{}'", field),
            });
        }

        segments.push(Segment::Field(field.to_string()));
        rest = &after_open[end + 2..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(segments)
}

/// Extract all field names referenced by a template.
pub fn extract_fields(input: &str) -> Result<BTreeSet<String>> {
    Ok(parse_template(input)?
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Field(name) => Some(name),
            _ => None,
        })
        .collect())
}

/// Environment and version information used to resolve templates.
///
/// All fields are plain strings. `os` and `arch` start out as the values of
/// the running platform and may be remapped while the owning binary is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    /// Target operating system (e.g. "linux", "macos", "windows")
    pub os: String,
    /// Target architecture (e.g. "x86_64", "aarch64")
    pub arch: String,
    /// Directory the binary is installed to
    pub directory: String,
    /// Name of the binary
    pub name: String,
    /// Qualified path to the executable
    pub path: String,
    /// Requested version
    pub version: String,
    /// Executable suffix, empty on unix and ".exe" on windows
    pub extension: String,
    /// Archive suffix, ".tar.gz" unless remapped
    pub archive_extension: String,
}

impl Template {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "os" => &self.os,
            "arch" => &self.arch,
            "directory" => &self.directory,
            "name" => &self.name,
            "path" => &self.path,
            "version" => &self.version,
            "extension" => &self.extension,
            "archive_extension" => &self.archive_extension,
            _ => return None,
        };
        Some(value)
    }

    /// Resolve every placeholder of `format` against this template.
    ///
    /// # Errors
    ///
    /// Returns `Template` if the string is malformed or references an
    /// unknown field. No partially substituted string is ever returned.
    pub fn resolve(&self, format: &str) -> Result<String> {
        let mut result = String::with_capacity(format.len());

        for segment in parse_template(format)? {
            match segment {
                Segment::Literal(text) => result.push_str(&text),
                Segment::Field(name) => {
                    let value = self.field(&name).ok_or_else(|| BintoolError::Template {
                        template: format.to_string(),
                        message: format!("unknown field '{}'", name),
                    })?;
                    result.push_str(value);
                }
            }
        }

        Ok(result)
    }

    /// Resolve `format` into a command line, one string per argument.
    ///
    /// Literal text is split on whitespace. Substituted values are never
    /// split, so a `{{ path }}` containing spaces stays a single argument.
    ///
    /// # Errors
    ///
    /// Same as [`Template::resolve`].
    pub fn resolve_args(&self, format: &str) -> Result<Vec<String>> {
        let mut args = Vec::new();
        let mut current: Option<String> = None;

        for segment in parse_template(format)? {
            match segment {
                Segment::Literal(text) => {
                    for c in text.chars() {
                        if c.is_whitespace() {
                            args.extend(current.take());
                        } else {
                            current.get_or_insert_with(String::new).push(c);
                        }
                    }
                }
                Segment::Field(name) => {
                    let value = self.field(&name).ok_or_else(|| BintoolError::Template {
                        template: format.to_string(),
                        message: format!("unknown field '{}'", name),
                    })?;
                    current.get_or_insert_with(String::new).push_str(value);
                }
            }
        }
        args.extend(current);

        Ok(args)
    }

    /// Resolve a template that is known to be well-formed.
    ///
    /// # Panics
    ///
    /// Panics if the template cannot be resolved.
    pub fn must_resolve(&self, format: &str) -> String {
        match self.resolve(format) {
            Ok(resolved) => resolved,
            Err(err) => panic!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template {
            os: "linux".into(),
            arch: "amd64".into(),
            directory: "/tmp/bin".into(),
            name: "example".into(),
            path: "/tmp/bin/example".into(),
            version: "v1.0.0".into(),
            extension: String::new(),
            archive_extension: ".tar.gz".into(),
        }
    }

    #[test]
    fn resolves_os_and_arch() {
        assert_eq!(
            template().resolve("{{os}}-{{arch}}").unwrap(),
            "linux-amd64"
        );
    }

    #[test]
    fn resolves_with_whitespace_in_braces() {
        assert_eq!(template().resolve("{{ version }}").unwrap(), "v1.0.0");
    }

    #[test]
    fn resolves_release_url() {
        let url = template()
            .resolve("https://github.com/foo/bar/releases/download/{{ version }}/bin_{{ version }}_{{ os }}_{{ arch }}{{ extension }}")
            .unwrap();
        assert_eq!(
            url,
            "https://github.com/foo/bar/releases/download/v1.0.0/bin_v1.0.0_linux_amd64"
        );
    }

    #[test]
    fn resolves_archive_url() {
        let url = template()
            .resolve("https://example.com/{{ name }}_{{ version }}_{{ os }}_{{ arch }}{{ archive_extension }}")
            .unwrap();
        assert_eq!(url, "https://example.com/example_v1.0.0_linux_amd64.tar.gz");
    }

    #[test]
    fn resolves_paths() {
        assert_eq!(
            template().resolve("{{ directory }}|{{ path }}").unwrap(),
            "/tmp/bin|/tmp/bin/example"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(template().resolve("no placeholders").unwrap(), "no placeholders");
        assert_eq!(template().resolve("").unwrap(), "");
    }

    #[test]
    fn lone_closing_braces_are_literal() {
        assert_eq!(template().resolve("a }} b").unwrap(), "a }} b");
    }

    #[test]
    fn unknown_field_fails() {
        let err = template().resolve("{{ InvalidField }}").unwrap_err();
        assert!(matches!(err, BintoolError::Template { .. }));
        assert!(err.to_string().contains("InvalidField"));
    }

    #[test]
    fn unknown_field_never_partially_substitutes() {
        let result = template().resolve("{{ os }}-{{ nope }}");
        assert!(result.is_err());
    }

    #[test]
    fn unterminated_placeholder_fails() {
        let err = template().resolve("{{ os").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn empty_placeholder_fails() {
        assert!(template().resolve("{{ }}").is_err());
    }

    #[test]
    fn parse_splits_segments() {
        let segments = parse_template("a{{ os }}b").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("a".into()),
                Segment::Field("os".into()),
                Segment::Literal("b".into()),
            ]
        );
    }

    #[test]
    fn extract_fields_is_unique() {
        let fields = extract_fields("{{ os }}/{{ os }}/{{ version }}").unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains("os"));
        assert!(fields.contains("version"));
    }

    #[test]
    fn resolve_args_keeps_substituted_values_whole() {
        let t = Template {
            path: "/home/me/My Project/bin/example".into(),
            ..template()
        };

        let args = t.resolve_args("{{ path }}  --version").unwrap();

        assert_eq!(args, vec!["/home/me/My Project/bin/example", "--version"]);
    }

    #[test]
    fn resolve_args_joins_adjacent_text() {
        let args = template()
            .resolve_args("sh -c echo-{{ name }}-{{version}}")
            .unwrap();
        assert_eq!(args, vec!["sh", "-c", "echo-example-v1.0.0"]);
    }

    #[test]
    fn resolve_args_of_blank_string_is_empty() {
        assert!(template().resolve_args("   ").unwrap().is_empty());
    }

    #[test]
    fn resolve_args_rejects_unknown_field() {
        assert!(template().resolve_args("{{ path }} {{ bogus }}").is_err());
    }

    #[test]
    fn must_resolve_returns_value() {
        assert_eq!(template().must_resolve("{{ name }}"), "example");
    }

    #[test]
    #[should_panic(expected = "unknown field")]
    fn must_resolve_panics_on_bad_template() {
        template().must_resolve("{{ bogus }}");
    }

    #[test]
    fn field_lookup_covers_all_fields() {
        let t = template();
        for name in FIELDS {
            assert!(t.field(name).is_some(), "missing field {}", name);
        }
        assert!(t.field("bogus").is_none());
    }
}
