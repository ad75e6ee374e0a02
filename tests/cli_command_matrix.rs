use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("govroles");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    // top-level
    run_help(&home, &[]);

    // reports
    run_help(&home, &["owners"]);
    run_help(&home, &["kk-aliases"]);
    run_help(&home, &["istio"]);
    run_help(&home, &["merge-owners"]);

    // lookups
    run_help(&home, &["find-files"]);
    run_help(&home, &["voter-emails"]);
    run_help(&home, &["voter-case"]);

    // grouped subcommands
    run_help(&home, &["sigs"]);
    run_help(&home, &["sigs", "list"]);
    run_help(&home, &["sigs", "leaders"]);
    run_help(&home, &["sigs", "meetings"]);
}

#[test]
fn unknown_command_is_a_usage_error() {
    let home = TempDir::new().expect("temp home");
    cargo_bin_cmd!("govroles")
        .env("HOME", home.path())
        .arg("bogus")
        .assert()
        .failure();
}
