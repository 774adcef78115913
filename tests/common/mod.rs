//! Common test helpers for the binary tests
//!
//! - Config file helpers: create temporary templink config files
//! - Binary helpers: run templink isolated from the user's home and environment

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

/// Create a temporary config.yml file for templink
pub fn create_config_file(server_url: &str, access_key: &str, expire: u64) -> NamedTempFile {
    let config_content = format!(
        r"---
server_url: {}
access_key: {}
expire: {}
",
        server_url, access_key, expire
    );

    let mut config_file = NamedTempFile::new().expect("Failed to create temp config file");
    config_file
        .write_all(config_content.as_bytes())
        .expect("Failed to write config");
    config_file.flush().expect("Failed to flush config");
    config_file
}

pub fn get_templink_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_templink"))
}

/// Run templink with an empty HOME and no `TEMPLINK_*` variables
pub fn run_templink(args: &[&str]) -> Output {
    run_templink_with_env(args, &[])
}

pub fn run_templink_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    let home = TempDir::new().expect("Failed to create temp home");

    let mut cmd = Command::new(get_templink_binary());
    cmd.env("HOME", home.path())
        .env_remove("TEMPLINK_SERVER_URL")
        .env_remove("TEMPLINK_ACCESS_KEY")
        .env_remove("RUST_LOG")
        .args(args);

    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to execute templink");

    // Keep home alive until command completes
    drop(home);

    output
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Value of a `Name: value` line in the bordered output
pub fn field<'a>(stdout: &'a str, name: &str) -> Option<&'a str> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(": "))
}
