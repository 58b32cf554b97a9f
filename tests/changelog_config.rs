// tests/changelog_config.rs

mod common;

use std::error::Error;

use common::changelog_dir;
use shellstep::config::{load_and_validate, load_from_path, validate_changelog};
use shellstep::errors::ShellstepError;
use shellstep::types::{ExecutionMode, OutputEncoding};
use shellstep_test_utils::builders::{ChangeLogBuilder, ChangeSetBuilder, CommandConfigBuilder};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_changelog_loads() -> TestResult {
    let dir = changelog_dir(
        r#"
[config]
output_encoding = "ISO-8859-1"
execution_mode = "log-only"

[[changeset]]
id = "1"
author = "ops"
comment = "dump schema"
files = ["sql/seed.sql"]

[changeset.execute_command]
executable = "pg_dump"
args = ["--schema-only", "app"]
os = "Linux, Mac OS X"
timeout = "10m"

[[changeset]]
id = "2"
author = "ops"
"#,
    );

    let changelog = load_and_validate(dir.path().join("Changelog.toml"))?;
    assert_eq!(changelog.config.output_encoding, OutputEncoding::Latin1);
    assert_eq!(changelog.config.execution_mode, ExecutionMode::LogOnly);

    let sets = changelog.change_sets(dir.path());
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].key(), "1::ops");
    assert_eq!(sets[0].comment.as_deref(), Some("dump schema"));
    assert_eq!(sets[0].files, [dir.path().join("sql/seed.sql")]);

    let command = sets[0].command.as_ref().expect("command declared");
    assert_eq!(command.command_string(), "pg_dump --schema-only app");
    assert_eq!(
        command.os(),
        Some(&["Linux".to_string(), "Mac OS X".to_string()][..])
    );
    assert_eq!(command.resolved_timeout().millis(), 600_000);

    assert!(sets[1].command.is_none());
    Ok(())
}

#[test]
fn defaults_apply_when_config_is_missing() -> TestResult {
    let dir = changelog_dir(
        r#"
[[changeset]]
id = "1"
author = "ops"

[changeset.execute_command]
executable = "true"
"#,
    );

    let changelog = load_and_validate(dir.path().join("Changelog.toml"))?;
    assert_eq!(changelog.config.output_encoding, OutputEncoding::Utf8);
    assert_eq!(changelog.config.execution_mode, ExecutionMode::Live);
    Ok(())
}

#[test]
fn validation_collects_every_problem() {
    let dir = changelog_dir(
        r#"
[[changeset]]
id = "1"
author = "ops"

[changeset.execute_command]
timeout = "10x"

[[changeset]]
id = "1"
author = "ops"

[[changeset]]
author = "ops"
"#,
    );

    let err = load_and_validate(dir.path().join("Changelog.toml")).expect_err("invalid changelog");
    let ShellstepError::Validation(errors) = &err else {
        panic!("expected validation errors, got {err:?}");
    };

    assert_eq!(
        errors.errors(),
        [
            "changeset '1::ops': executable is required".to_string(),
            "changeset '1::ops': Invalid value specified for timeout: 10x".to_string(),
            "changeset '1::ops': duplicate changeset identifier".to_string(),
            "changeset '::ops': id is required".to_string(),
        ]
    );
}

#[test]
fn empty_changelog_is_rejected() {
    let raw = ChangeLogBuilder::new().build_raw();
    let errors = validate_changelog(&raw);
    assert_eq!(errors.len(), 1);
    assert!(errors.errors()[0].contains("at least one"));
}

#[test]
fn anonymous_changesets_are_numbered() {
    let raw = ChangeLogBuilder::new()
        .with_changeset(ChangeSetBuilder::new("1", "ops").build())
        .with_changeset(ChangeSetBuilder::new("", "").build())
        .build_raw();

    let errors = validate_changelog(&raw);
    assert_eq!(
        errors.errors(),
        [
            "changeset #2: id is required".to_string(),
            "changeset #2: author is required".to_string(),
        ]
    );
}

#[test]
fn builder_produces_a_valid_changelog() {
    let changelog = ChangeLogBuilder::new()
        .execution_mode(ExecutionMode::LogOnly)
        .output_encoding(OutputEncoding::Ascii)
        .with_changeset(
            ChangeSetBuilder::new("1", "ops")
                .comment("list files")
                .command(
                    CommandConfigBuilder::new("ls")
                        .arg("-la")
                        .os("Linux")
                        .timeout("30s")
                        .build(),
                )
                .build(),
        )
        .build();

    let sets = changelog.change_sets(std::path::Path::new("."));
    let command = sets[0].command.as_ref().expect("command");
    assert_eq!(command.command_string(), "ls -la");
    assert_eq!(command.timeout(), Some("30s"));
}

#[test]
fn missing_executable_from_builder_is_reported() {
    let raw = ChangeLogBuilder::new()
        .with_changeset(
            ChangeSetBuilder::new("1", "ops")
                .command(CommandConfigBuilder::missing_executable().timeout("1h").build())
                .build(),
        )
        .build_raw();

    let errors = validate_changelog(&raw);
    assert_eq!(
        errors.errors(),
        ["changeset '1::ops': executable is required".to_string()]
    );
}

#[test]
fn unknown_encoding_is_a_parse_error() {
    let dir = changelog_dir(
        r#"
[config]
output_encoding = "EBCDIC"

[[changeset]]
id = "1"
author = "ops"
"#,
    );

    let err = load_from_path(dir.path().join("Changelog.toml")).expect_err("bad encoding");
    assert!(matches!(err, ShellstepError::TomlError(_)));
    assert!(err.to_string().contains("unsupported output_encoding"));
}

#[test]
fn unknown_execution_mode_is_a_parse_error() {
    let dir = changelog_dir(
        r#"
[config]
execution_mode = "dry"

[[changeset]]
id = "1"
author = "ops"
"#,
    );

    let err = load_from_path(dir.path().join("Changelog.toml")).expect_err("bad mode");
    assert!(matches!(err, ShellstepError::TomlError(_)));
    assert!(err.to_string().contains("invalid execution_mode"));
}

#[test]
fn execution_mode_accepts_the_same_spellings_as_the_cli() -> TestResult {
    for spelling in ["log-only", "log_only", "LOG_ONLY", " Log-Only "] {
        let dir = changelog_dir(&format!(
            r#"
[config]
execution_mode = "{spelling}"

[[changeset]]
id = "1"
author = "ops"
"#
        ));

        let changelog = load_and_validate(dir.path().join("Changelog.toml"))?;
        assert_eq!(
            changelog.config.execution_mode,
            ExecutionMode::LogOnly,
            "{spelling:?}"
        );
        assert_eq!(spelling.parse::<ExecutionMode>(), Ok(ExecutionMode::LogOnly));
    }
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_from_path(dir.path().join("nope.toml")).expect_err("missing file");
    assert!(matches!(err, ShellstepError::IoError(_)));
}

#[test]
fn encoding_and_mode_names_parse_leniently() {
    for name in ["UTF-8", "utf8", " Utf_8 "] {
        assert_eq!(name.parse::<OutputEncoding>(), Ok(OutputEncoding::Utf8));
    }
    for name in ["ISO-8859-1", "iso_8859_1", "latin1", "Latin-1"] {
        assert_eq!(name.parse::<OutputEncoding>(), Ok(OutputEncoding::Latin1));
    }
    for name in ["US-ASCII", "ascii"] {
        assert_eq!(name.parse::<OutputEncoding>(), Ok(OutputEncoding::Ascii));
    }
    assert!("UTF-16".parse::<OutputEncoding>().is_err());
    assert_eq!(OutputEncoding::Latin1.to_string(), "ISO-8859-1");

    assert_eq!("live".parse::<ExecutionMode>(), Ok(ExecutionMode::Live));
    assert_eq!("LOG_ONLY".parse::<ExecutionMode>(), Ok(ExecutionMode::LogOnly));
    assert!("dry".parse::<ExecutionMode>().is_err());
}

#[test]
fn decoding_never_fails() {
    let bytes = [b'o', b'k', 0xff, 0xe9];
    assert_eq!(OutputEncoding::Utf8.decode(&bytes), "ok\u{FFFD}\u{FFFD}");
    assert_eq!(OutputEncoding::Latin1.decode(&bytes), "ok\u{ff}\u{e9}");
    assert_eq!(OutputEncoding::Ascii.decode(&bytes), "ok\u{FFFD}\u{FFFD}");
}
