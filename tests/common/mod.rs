#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME plus a local copy of every upstream source, so runs never
/// touch the network unless a test points `api_base` somewhere on purpose.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub data: PathBuf,
    pub output: PathBuf,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_general("live_lookup = false\n")
    }

    /// `general` is spliced into the `[general]` section of the config.
    pub fn with_general(general: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let data = make_fixture_sources(tmp.path());
        let output = tmp.path().join("output");
        let config = tmp.path().join("config.toml");
        fs::write(&config, config_toml(&data, &output, general)).expect("write config");

        Self {
            _tmp: tmp,
            home,
            data,
            output,
            config,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("govroles");
        cmd.env("HOME", &self.home)
            .env("RUST_LOG", "warn")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn fail_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.data.join(name)
    }
}

pub fn read_csv_lines(path: &str) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read report")
        .lines()
        .map(str::to_string)
        .collect()
}

fn config_toml(data: &Path, output: &Path, general: &str) -> String {
    let p = |name: &str| data.join(name).display().to_string();
    format!(
        r#"[general]
output_dir = "{output}"
token_file = "{token}"
http_timeout_ms = 2000
{general}
[sources]
affiliations = "{aff}"
sigs = "{sigs}"
community_aliases = "{community}"
core_aliases = "{core}"
istio_teams = "{teams}"

[pacing]
item_delay_ms = 0
page_delay_ms = 0
"#,
        output = output.display(),
        token = p("gh_key"),
        general = general,
        aff = p("github_users.json"),
        sigs = p("sigs.yaml"),
        community = p("OWNERS_ALIASES.community"),
        core = p("OWNERS_ALIASES.core"),
        teams = p("teams.yaml"),
    )
}

fn make_fixture_sources(base: &Path) -> PathBuf {
    let data = base.join("data");
    fs::create_dir_all(data.join("auth")).expect("create fixture dirs");
    fs::create_dir_all(data.join("extra")).expect("create fixture dirs");

    let users = json!([
        {"login": "alice", "affiliation": "OldCo, Acme"},
        {"login": "Bob", "affiliation": "Globex"},
        {"login": "carol", "affiliation": "?"},
        {"login": "k8s-ci-robot", "affiliation": "(Robots)"},
        {"login": "erin", "affiliation": "Initech"}
    ]);
    fs::write(
        data.join("github_users.json"),
        serde_json::to_string_pretty(&users).expect("users json"),
    )
    .expect("write users");

    fs::write(
        data.join("auth/OWNERS"),
        "approvers:\n  - alice\n  - sig-auth-approvers\nreviewers:\n  - bob\n",
    )
    .expect("write OWNERS");
    fs::write(
        data.join("extra/OWNERS"),
        "approvers:\n  - erin\nlabels:\n  - sig/node\n  - area/kubelet\n",
    )
    .expect("write extra OWNERS");

    let sigs = format!(
        r#"sigs:
  - dir: sig-auth
    name: Auth
    leadership:
      chairs:
        - github: alice
          name: Alice A
          company: Acme
    meetings:
      - description: Regular SIG Meeting
        day: Wednesday
        time: "11:00"
        tz: PT
        frequency: biweekly
    subprojects:
      - name: audit-logging
        owners:
          - {auth}
          - {missing}
  - dir: sig-node
    name: Node
workinggroups:
  - dir: wg-batch
    name: Batch
"#,
        auth = data.join("auth/OWNERS").display(),
        missing = data.join("nope/OWNERS").display(),
    );
    fs::write(data.join("sigs.yaml"), sigs).expect("write sigs");

    fs::write(
        data.join("OWNERS_ALIASES.community"),
        "aliases:\n  sig-auth-leads:\n    - alice\n  wg-batch-leads:\n    - dan\n  code-of-conduct-committee:\n    - erin\n",
    )
    .expect("write community aliases");
    fs::write(
        data.join("OWNERS_ALIASES.core"),
        "aliases:\n  sig-node-approvers:\n    - carol\n  sig-auth-audit-reviewers:\n    - bob\n  random-team:\n    - dan\n",
    )
    .expect("write core aliases");

    fs::write(
        data.join("teams.yaml"),
        "teams:\n  Maintainers:\n    members:\n      - alice\n    teams:\n      Networking:\n        members:\n          - erin\n          - istio-release-bot\n",
    )
    .expect("write teams");

    data
}
