use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

/// Neighborhood adjacency table with one disconnected pair
pub const RECIFE_EDGES: &str = "\
from,to,weight
Boa Viagem,Pina,2
Boa Viagem,Imbiribeira,1
Pina,Recife,3
Imbiribeira,Afogados,2
Afogados,Recife,4
Recife,Santo Amaro,1.5
Santo Amaro,Casa Amarela,5
Casa Amarela,Nova Descoberta,2
Ilha,Itamaracá,1
";

/// Get a Command for malha running inside `dir`, isolated from any user
/// configuration or log filter in the environment
pub fn malha(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("malha");
    cmd.current_dir(dir)
        .env("MALHA_CONFIG_DIR", dir.join(".config"))
        .env_remove("MALHA_CONFIG")
        .env_remove("MALHA_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a fixture file and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run with `--format json` and parse stdout
#[allow(dead_code)]
pub fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--format").arg("json").output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Parse the last stderr line, where the JSON error envelope is written
#[allow(dead_code)]
pub fn last_stderr_json(output: &Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    serde_json::from_str(line).unwrap()
}
