//! Package-manager origins with no package manager available.
//!
//! Kept in its own test binary because it empties `PATH` for the whole
//! process.

use bintool::binary::{Binary, PackageInstall};
use bintool::BintoolError;
use tempfile::TempDir;

#[test]
fn missing_package_manager_is_an_install_error() {
    let temp = TempDir::new().unwrap();
    std::env::set_var("PATH", temp.path());

    for origin in [
        PackageInstall::go("example.com/tool"),
        PackageInstall::cargo("tool"),
    ] {
        let binary = Binary::new("tool", "1.0.0", origin).with_directory(temp.path().join("bin"));

        let err = binary.ensure().unwrap_err();

        assert!(matches!(err, BintoolError::Provision { .. }));
        match err.root_cause() {
            BintoolError::Install { message } => assert!(message.starts_with("cannot run")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
