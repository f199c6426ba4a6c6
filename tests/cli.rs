use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("seismap").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("seismap"));
}

#[test]
fn events_requires_a_time_window() {
    let mut cmd = Command::cargo_bin("seismap").unwrap();
    cmd.arg("events");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--start"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_stations() {
    let mut cmd = Command::cargo_bin("seismap").unwrap();
    cmd.args([
        "stations",
        "--network",
        "IU",
        "--station",
        "ANMO",
        "--location",
        "00",
        "--channel",
        "BHZ",
    ]);
    cmd.assert().success();
}
