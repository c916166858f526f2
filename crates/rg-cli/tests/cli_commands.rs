//! Integration tests for the `rg` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command pointed at a scratch database in its own working directory,
/// with no API keys configured.
fn rg(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rg").unwrap();
    cmd.current_dir(dir.path())
        .env("RG_DATABASE_PATH", dir.path().join("reality.db"))
        .env("RG_SAVE_DIR", dir.path().join("saves"))
        .env_remove("COINMARKETCAP_API_KEY")
        .env_remove("FMP_API_KEY")
        .env_remove("WEATHER_API_KEY")
        .env_remove("GROQ_API_KEY");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("play")
                .and(predicate::str::contains("poll"))
                .and(predicate::str::contains("sync"))
                .and(predicate::str::contains("saves")),
        );
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rg"));
}

// ---------------------------------------------------------------------------
// sync
// ---------------------------------------------------------------------------

#[test]
fn sync_without_keys_skips_every_source() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 skipped").and(predicate::str::contains("hint")));
}

// ---------------------------------------------------------------------------
// readings on an empty database
// ---------------------------------------------------------------------------

#[test]
fn btc_reports_missing_reading() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("btc")
        .assert()
        .success()
        .stdout(predicate::str::contains("REALITY DISTORTION"));
}

#[test]
fn stocks_reports_missing_reading() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("stocks")
        .assert()
        .success()
        .stdout(predicate::str::contains("REALITY DISTORTION"));
}

#[test]
fn weather_reports_missing_reading() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("weather")
        .assert()
        .success()
        .stdout(predicate::str::contains("REALITY DISTORTION"));
}

// ---------------------------------------------------------------------------
// saves
// ---------------------------------------------------------------------------

#[test]
fn saves_lists_nothing_on_fresh_directory() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("saves")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved games"));
}

// ---------------------------------------------------------------------------
// poll
// ---------------------------------------------------------------------------

#[test]
fn poll_rejects_zero_interval() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .args(["poll", "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one second"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_requires_an_llm_key() {
    let dir = TempDir::new().unwrap();
    rg(&dir)
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}
