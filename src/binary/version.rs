//! Installed-version confirmation.
//!
//! Policy, in priority order:
//!
//! 1. the requested version [`LATEST`] is always confirmed, since there is
//!    no reliable way to tell whether an installed binary is the latest
//! 2. a disabled version check ([`SKIP_VERSION_CHECK`]) is confirmed
//! 3. otherwise the version command runs and its combined output must
//!    contain the requested version, without its leading `v`
//!
//! A version command that cannot be resolved, spawned, or that exits
//! non-zero means "not confirmed", which triggers a reinstall.

use crate::binary::template::Template;
use crate::shell::{execute, CommandOptions};

/// Version sentinel that disables verification.
pub const LATEST: &str = "latest";

/// Version command sentinel that disables verification.
pub const SKIP_VERSION_CHECK: &str = "";

/// Version command used unless overridden.
pub const DEFAULT_VERSION_CMD: &str = "{{ path }} --version";

/// Check whether `output` reports the `requested` version.
pub fn version_matches(output: &str, requested: &str) -> bool {
    let expected = requested.strip_prefix('v').unwrap_or(requested);
    output.contains(expected)
}

/// Decide whether the installed binary is at the requested version.
///
/// `version_cmd` is a template resolved against `template`; `None` means
/// the check is disabled.
pub fn is_expected_version(requested: &str, version_cmd: Option<&str>, template: &Template) -> bool {
    if requested == LATEST {
        return true;
    }

    let Some(version_cmd) = version_cmd else {
        return true;
    };

    let args = match template.resolve_args(version_cmd) {
        Ok(args) => args,
        Err(err) => {
            tracing::warn!("cannot resolve version command for {}: {}", template.name, err);
            return false;
        }
    };
    let Some((program, args)) = args.split_first() else {
        tracing::warn!("empty version command for {}", template.name);
        return false;
    };

    let expected = requested.strip_prefix('v').unwrap_or(requested);
    tracing::debug!("running {} {:?} looking for {}", program, args, expected);

    match execute(program, args, &CommandOptions::captured()) {
        Ok(result) if result.success => version_matches(&result.combined_output(), requested),
        Ok(result) => {
            tracing::debug!(
                "version command for {} exited with {:?}",
                template.name,
                result.exit_code
            );
            false
        }
        Err(err) => {
            tracing::debug!("version command for {} failed: {}", template.name, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template {
            name: "tool".into(),
            path: "/nonexistent/bin/tool".into(),
            version: "v1.2.3".into(),
            ..Default::default()
        }
    }

    #[test]
    fn matches_with_v_prefix_stripped() {
        assert!(version_matches("tool version 1.2.3 (abc)", "v1.2.3"));
        assert!(version_matches("tool version 1.2.3", "1.2.3"));
    }

    #[test]
    fn output_prefix_is_not_stripped() {
        assert!(version_matches("v1.2.3", "1.2.3"));
        assert!(!version_matches("1.2.3", "vv1.2.3"));
    }

    #[test]
    fn mismatch_is_not_confirmed() {
        assert!(!version_matches("tool version 1.0.0", "v1.2.3"));
    }

    #[test]
    fn latest_is_always_confirmed() {
        assert!(is_expected_version(
            LATEST,
            Some("definitely-not-a-real-program --version"),
            &template()
        ));
    }

    #[test]
    fn disabled_check_is_confirmed() {
        assert!(is_expected_version("v1.2.3", None, &template()));
    }

    #[test]
    fn missing_program_is_not_confirmed() {
        assert!(!is_expected_version(
            "v1.2.3",
            Some(DEFAULT_VERSION_CMD),
            &template()
        ));
    }

    #[test]
    fn unresolvable_command_is_not_confirmed() {
        assert!(!is_expected_version(
            "v1.2.3",
            Some("{{ bogus }} --version"),
            &template()
        ));
    }

    #[cfg(unix)]
    #[test]
    fn runs_command_and_matches_output() {
        assert!(is_expected_version("v1.2.3", Some("echo tool 1.2.3"), &template()));
        assert!(!is_expected_version("v1.2.3", Some("echo tool 1.0.0"), &template()));
    }

    #[cfg(unix)]
    #[test]
    fn path_with_spaces_is_one_argument() {
        use std::fs;

        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("My Project").join("bin");
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("tool");
        fs::write(&script, "echo tool 1.2.3\n").unwrap();
        let template = Template {
            path: script.display().to_string(),
            ..template()
        };

        assert!(is_expected_version("v1.2.3", Some("sh {{ path }}"), &template));
    }

    #[test]
    fn blank_command_is_not_confirmed() {
        assert!(!is_expected_version("v1.2.3", Some("   "), &template()));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_not_confirmed() {
        // `false` prints nothing and exits 1
        assert!(!is_expected_version("v1.2.3", Some("false"), &template()));
    }
}
