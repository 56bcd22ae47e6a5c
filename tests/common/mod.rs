// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

pub const ALL_CLUSTERS_APP: &str = "out/app/chip-all-clusters-app";

/// Environment file in the YAML layout used by CI.
pub const ENV_YAML: &str = r#"
ALL_CLUSTERS_APP: out/app/chip-all-clusters-app
LOCK_APP: out/app/chip-lock-app
TRACE_APP: out/trace_data/app-{SCRIPT_BASE_NAME}
TRACE_TEST_JSON: json:out/trace_data/test-{SCRIPT_BASE_NAME}
TRACE_TEST_PERFETTO: perfetto:out/trace_data/test-{SCRIPT_BASE_NAME}
TRACE_BASE: out/trace_data/base
DISCRIMINATOR: 1234
PASSCODE: 20202021
"#;

/// Single run with an app placeholder, app args and a factory reset.
pub const SCENARIO_A: &str = r#"#!/usr/bin/env python3
# test-runner-runs: run1
# test-runner-run/run1/app: ${ALL_CLUSTERS_APP}
# test-runner-run/run1/app-args: --discriminator 1234
# test-runner-run/run1/factoryreset: True

import sys
"#;

/// Two runs sharing one app with distinct script args.
pub const SCENARIO_B: &str = r#"
# test-runner-runs: run1 run2
# test-runner-run/run1/app: ${ALL_CLUSTERS_APP}
# test-runner-run/run1/script-args: --storage-path admin_storage.json --PICS first
# test-runner-run/run2/app: ${ALL_CLUSTERS_APP}
# test-runner-run/run2/script-args: --storage-path admin_storage.json --PICS second
"#;

/// Creates a temporary directory holding `env_test.yaml`.
pub fn setup_env_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let env_path = temp_dir.path().join("env_test.yaml");
    fs::write(&env_path, ENV_YAML).expect("Failed to write environment file");
    (temp_dir, env_path)
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// The wrapper around the argument tokens, for building expected strings.
pub fn wrapped(args: &str) -> String {
    format!("scripts/run_in_python_env.sh out/venv './scripts/tests/run_python_test.py {args}'")
}
