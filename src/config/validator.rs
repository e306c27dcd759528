//! Manifest validation rules.
//!
//! Everything that would otherwise fail halfway through provisioning is
//! checked up front:
//! - every tool sets a version
//! - package origins name a package, download origins a URL
//! - every template only references known fields

use crate::binary::template::extract_fields;
use crate::config::schema::{ManifestConfig, OriginConfig};
use crate::error::{BintoolError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Tool the error concerns
    pub tool: String,
}

/// Validate a manifest and return all errors.
pub fn validate_config(config: &ManifestConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, tool) in &config.tools {
        let mut push = |rule: &str, message: String| {
            errors.push(ValidationError {
                rule: rule.to_string(),
                message,
                tool: name.clone(),
            })
        };

        if tool.version.trim().is_empty() {
            push("missing-version", format!("Tool '{}' must set a version", name));
        }

        match &tool.origin {
            OriginConfig::Go { package } | OriginConfig::Cargo { package }
                if package.trim().is_empty() =>
            {
                push("missing-package", format!("Tool '{}' must name a package", name));
            }
            OriginConfig::Download { url } | OriginConfig::Archive { url, .. }
                if url.trim().is_empty() =>
            {
                push("missing-url", format!("Tool '{}' must set a url", name));
            }
            _ => {}
        }

        let templates = tool
            .origin
            .templates()
            .into_iter()
            .chain(tool.version_cmd.as_deref());
        for template in templates {
            if let Err(err) = extract_fields(template) {
                push("invalid-template", format!("Tool '{}': {}", name, err));
            }
        }
    }

    errors
}

/// Validate a manifest, joining all problems into one `Config` error.
pub fn validate(config: &ManifestConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BintoolError::Config {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ManifestConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn accepts_valid_manifest() {
        let config = parse(
            r#"
tools:
  jq:
    version: "1.7.1"
    origin: { kind: download, url: "https://example.com/jq-{{ version }}-{{ os }}" }
    version_cmd: "{{ path }} --version"
"#,
        );
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn empty_manifest_is_valid() {
        assert!(validate(&ManifestConfig::default()).is_ok());
    }

    #[test]
    fn reports_missing_version() {
        let config = parse("tools:\n  jq:\n    origin: { kind: go, package: example.com/jq }\n");

        let errors = validate_config(&config);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "missing-version");
        assert_eq!(errors[0].tool, "jq");
    }

    #[test]
    fn reports_missing_package_and_url() {
        let config = parse(
            r#"
tools:
  a:
    version: "1"
    origin: { kind: cargo, package: "" }
  b:
    version: "1"
    origin: { kind: archive, url: "" }
"#,
        );

        let rules: Vec<_> = validate_config(&config)
            .into_iter()
            .map(|e| e.rule)
            .collect();

        assert_eq!(rules, vec!["missing-package", "missing-url"]);
    }

    #[test]
    fn reports_unknown_template_fields() {
        let config = parse(
            r#"
tools:
  tool:
    version: "1"
    origin:
      kind: archive
      url: "https://example.com/{{ platform }}.tar.gz"
      files:
        "{{ name }}": "{{ nme }}"
    version_cmd: "{{ path }} --version"
"#,
        );

        let errors = validate_config(&config);

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.rule == "invalid-template"));
        assert!(errors[0].message.contains("platform"));
        assert!(errors[1].message.contains("nme"));
    }

    #[test]
    fn validate_joins_messages() {
        let config = parse(
            r#"
tools:
  a:
    origin: { kind: go, package: example.com/a }
  b:
    origin: { kind: go, package: example.com/b }
"#,
        );

        let err = validate(&config).unwrap_err().to_string();

        assert!(err.contains("Tool 'a' must set a version"));
        assert!(err.contains("; Tool 'b' must set a version"));
    }
}
