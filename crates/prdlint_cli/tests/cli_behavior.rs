//! Integration tests for general CLI behavior
//!
//! Help output, argument validation and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn prdlint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_prdlint"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

mod help_command {
    use super::*;

    #[test]
    fn shows_subcommands() {
        prdlint_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("lint"))
            .stdout(predicate::str::contains("init"))
            .stdout(predicate::str::contains("rules"));
    }

    #[test]
    fn shows_version() {
        prdlint_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn lint_help_lists_options() {
        prdlint_cmd()
            .args(["lint", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--min-score"))
            .stdout(predicate::str::contains("--disable-category"))
            .stdout(predicate::str::contains("--dry-run"));
    }
}

mod argument_validation {
    use super::*;

    #[test]
    fn lint_requires_a_pattern() {
        prdlint_cmd().arg("lint").assert().failure();
    }

    #[test]
    fn dry_run_requires_fix() {
        prdlint_cmd()
            .args(["lint", "--dry-run"])
            .arg(fixture("checkout.md"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("--fix"));
    }

    #[test]
    fn rejects_min_score_above_100() {
        prdlint_cmd()
            .args(["lint", "--min-score", "101"])
            .arg(fixture("checkout.md"))
            .assert()
            .failure();
    }

    #[test]
    fn rejects_unknown_category() {
        prdlint_cmd()
            .args(["lint", "--disable-category", "style"])
            .arg(fixture("checkout.md"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("style"));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn zero_without_errors() {
        prdlint_cmd()
            .arg("lint")
            .arg(fixture("checkout.md"))
            .assert()
            .code(0);
    }

    #[test]
    fn one_when_errors_found() {
        prdlint_cmd()
            .arg("lint")
            .arg(fixture("draft.md"))
            .assert()
            .code(1);
    }

    #[test]
    fn one_when_below_min_score() {
        prdlint_cmd()
            .args(["lint", "--min-score", "95"])
            .arg(fixture("checkout.md"))
            .assert()
            .code(1);
    }

    #[test]
    fn zero_when_at_or_above_min_score() {
        prdlint_cmd()
            .args(["lint", "--min-score", "93"])
            .arg(fixture("checkout.md"))
            .assert()
            .code(0);
    }

    #[test]
    fn zero_when_nothing_matches() {
        let temp_dir = TempDir::new().unwrap();

        prdlint_cmd()
            .current_dir(temp_dir.path())
            .args(["lint", "missing.md"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Checked 0 files"));
    }

    #[test]
    fn two_on_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.json");
        fs::write(&config_path, r#"{"parallel": "yes"}"#).unwrap();

        prdlint_cmd()
            .arg("--config")
            .arg(&config_path)
            .arg("lint")
            .arg(fixture("checkout.md"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }

    #[test]
    fn two_on_unknown_rule() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, r#"{"rules": {"no-such-rule": true}}"#).unwrap();

        prdlint_cmd()
            .arg("--config")
            .arg(&config_path)
            .arg("lint")
            .arg(fixture("checkout.md"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no-such-rule"));
    }

    #[test]
    fn two_on_missing_config_file() {
        prdlint_cmd()
            .args(["--config", "does-not-exist.json", "lint"])
            .arg(fixture("checkout.md"))
            .assert()
            .code(2);
    }
}
