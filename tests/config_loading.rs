// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;

use postgen::config::{ConfigOverrides, load_and_validate, load_or_default};
use postgen::errors::PostgenError;
use postgen::types::{FailurePolicy, ReleaseBump};
use postgen_test_utils::builders::ConfigFileBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn full_config_is_loaded() {
    let file = write_config(
        r#"
[project]
module_name = "my_package"

[git]
author_username = "jane"
author_email = "jane@example.com"
default_branch = "trunk"

[install]
command = "uv sync --all-extras"

[release]
bump = "patch"
pypi_token = "pypi-abc"

[behaviour]
failure_policy = "abort"

[[step]]
message = "Say hi"
cmd = "echo 'hi there'"
cwd = "docs"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.project.module_name.as_deref(), Some("my_package"));
    assert_eq!(cfg.git.author_username.as_deref(), Some("jane"));
    assert_eq!(cfg.git.default_branch, "trunk");
    assert_eq!(cfg.git.commit_message, "Initial commit");
    assert_eq!(cfg.install.command, "uv sync --all-extras");
    assert_eq!(cfg.install.export_script, "scripts/export_requirements.sh");
    assert_eq!(cfg.release.bump, ReleaseBump::Patch);
    assert_eq!(cfg.release.pypi_token.as_deref(), Some("pypi-abc"));
    assert_eq!(cfg.behaviour.failure_policy, FailurePolicy::Abort);
    assert_eq!(cfg.step.len(), 1);
    assert_eq!(cfg.step[0].cwd.as_deref(), Some(std::path::Path::new("docs")));
}

#[test]
fn unknown_enum_value_is_a_toml_error() {
    let file = write_config(
        r#"
[behaviour]
failure_policy = "retry"
"#,
    );

    match load_and_validate(file.path()) {
        Err(PostgenError::TomlError(e)) => assert!(e.to_string().contains("retry")),
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn invalid_module_name_in_config_is_reported() {
    let file = write_config(
        r#"
[project]
module_name = "my-package"
"#,
    );

    match load_and_validate(file.path()) {
        Err(e @ PostgenError::InvalidModuleName(_)) => {
            assert!(e.to_string().starts_with("ERROR: 'my-package'"));
        }
        other => panic!("expected InvalidModuleName, got {other:?}"),
    }
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(dir.path().join("postgen.toml")).unwrap();
    assert_eq!(cfg.install.command, "poetry install");
    assert_eq!(cfg.release.bump, ReleaseBump::Minor);
    assert!(cfg.step.is_empty());
}

#[test]
fn missing_explicit_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_and_validate(dir.path().join("nope.toml")),
        Err(PostgenError::IoError(_))
    ));
}

#[test]
fn overrides_win_and_are_revalidated() {
    let cfg = ConfigFileBuilder::new().author("jane", "jane@example.com").build();

    let cfg = ConfigOverrides {
        author_username: Some("joe".into()),
        pypi_token: Some("from-cli".into()),
        skip_release: true,
        abort_on_failure: true,
        ..ConfigOverrides::default()
    }
    .apply(cfg)
    .unwrap();

    assert_eq!(cfg.git.author_username.as_deref(), Some("joe"));
    assert_eq!(cfg.git.author_email.as_deref(), Some("jane@example.com"));
    assert_eq!(cfg.release.pypi_token.as_deref(), Some("from-cli"));
    assert!(cfg.release.skip);
    assert_eq!(cfg.behaviour.failure_policy, FailurePolicy::Abort);

    let bad = ConfigOverrides {
        author_email: Some("nobody".into()),
        pypi_token: Some("x".into()),
        ..ConfigOverrides::default()
    }
    .apply(cfg);
    assert!(matches!(bad, Err(PostgenError::ConfigError(_))));
}
