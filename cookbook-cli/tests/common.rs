#![allow(dead_code)]
use assert_cmd::Command;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestEnv {
    _dir: TempDir,
    pub home: PathBuf,
    pub cfg: PathBuf,
    pub state: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let home = dir.path().join("home");
        let cfg = dir.path().join("config");
        let state = dir.path().join("state");
        for d in [&home, &cfg, &state] {
            std::fs::create_dir_all(d).expect("test dir");
        }
        Self {
            _dir: dir,
            home,
            cfg,
            state,
        }
    }

    /// The binary with config and session isolated under the temp dir.
    pub fn bin(&self) -> Command {
        let mut cmd = Command::cargo_bin("cookbook").unwrap();
        cmd.env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", &self.cfg)
            .env("XDG_STATE_HOME", &self.state)
            .env_remove("COOKBOOK_LOG");
        cmd
    }

    /// The binary pointed at `server`.
    pub fn at(&self, server: &MockServer) -> Command {
        let mut cmd = self.bin();
        cmd.arg("--server").arg(server.uri());
        cmd
    }

    /// Logs in against `server`, which answers `/login` with `tok <admin>`.
    pub async fn login(&self, server: &MockServer, admin: bool) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("tok {admin}")))
            .mount(server)
            .await;
        self.at(server)
            .args(["login", "--username", "chef", "--password", "pw"])
            .assert()
            .success();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Serves a fixed recipe list on `GET /recipes`.
pub async fn serve_recipes(server: &MockServer, names: &[&str], expected_fetches: u64) {
    let body: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, n)| json!({"id": i + 1, "name": n, "instructions": format!("cook {n}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_fetches)
        .mount(server)
        .await;
}

pub fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}
