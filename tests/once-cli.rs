use std::fs;
use std::path::Path;

use assert_cmd::{assert::Assert, Command};
use mockito::Server;
use predicates::str::contains;

mod stubs;

use stubs::config::{API_KEY, DEVICES_FILE_ONE_PLUG};
use stubs::responses;

fn cmd_assert(workdir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Assert {
    let mut cmd = Command::cargo_bin("hwlogger").unwrap();
    cmd.env_clear()
        .current_dir(workdir)
        .envs(envs.iter().copied())
        .args(args)
        .assert()
}

#[test]
fn unknown_subcommand_fails() {
    let tempdir = tempfile::tempdir().unwrap();

    cmd_assert(tempdir.path(), &[], &[])
        .failure()
        .stderr(contains("Subcommand must be one of"));
    cmd_assert(tempdir.path(), &["poll"], &[])
        .failure()
        .stderr(contains("Subcommand must be one of"));
}

#[test]
fn missing_api_key_fails_before_polling() {
    let tempdir = tempfile::tempdir().unwrap();

    cmd_assert(tempdir.path(), &["once"], &[])
        .failure()
        .stderr(contains("PVOUTPUT_API_KEY"));
    assert!(!tempdir.path().join("logs").exists());
}

#[test]
fn invalid_polling_interval_fails() {
    let tempdir = tempfile::tempdir().unwrap();

    cmd_assert(
        tempdir.path(),
        &["once"],
        &[("PVOUTPUT_API_KEY", API_KEY), ("POLLING_INTERVAL", "0")],
    )
    .failure()
    .stderr(contains("POLLING_INTERVAL"));
}

#[test]
fn once_polls_configured_devices() {
    let tempdir = tempfile::tempdir().unwrap();
    let output_folder = tempdir.path().join("out");

    let mut plug = Server::new();
    let m_data = plug
        .mock("GET", "/api/v1/data")
        .with_body(responses::SMART_PLUG)
        .expect(1)
        .create();

    let devices_file = tempdir.path().join("devices.json");
    fs::write(
        &devices_file,
        DEVICES_FILE_ONE_PLUG.replace("{ADDRESS}", &plug.host_with_port()),
    )
    .unwrap();

    cmd_assert(
        tempdir.path(),
        &["once"],
        &[
            ("PVOUTPUT_API_KEY", API_KEY),
            ("DEVICES_FILE", devices_file.to_str().unwrap()),
            ("OUTPUT_FOLDER", output_folder.to_str().unwrap()),
            ("PVOUTPUT_URL", "http://127.0.0.1:1/service/r2/addstatus.jsp"),
        ],
    )
    .success();

    m_data.assert();
    let written: Vec<String> = fs::read_dir(&output_folder)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("hw-garage-"));
    assert!(written[0].ends_with(".csv"));
}
