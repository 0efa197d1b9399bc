//! Account management and session tests

mod common;

use common::{setup, sit};
use predicates::prelude::*;

#[test]
fn test_default_admin_can_log_in_and_out() {
    let tmp = tempfile::TempDir::new().unwrap();

    sit(&tmp)
        .args(["login", "--username", "admin", "--password", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"))
        .stdout(predicate::str::contains("admin"));

    sit(&tmp)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin (Admin)"));

    sit(&tmp).args(["logout"]).assert().success();
    sit(&tmp)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_wrong_credentials_are_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();

    sit(&tmp)
        .args(["login", "--username", "admin", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid username or password"));
}

#[test]
fn test_admin_can_add_list_and_remove_users() {
    let tmp = setup();

    sit(&tmp)
        .args(["user", "add", "-u", "dara", "-p", "secret", "--role", "user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user"));

    sit(&tmp)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dara"))
        .stdout(predicate::str::contains("admin"));

    sit(&tmp)
        .args(["user", "remove", "dara", "--yes"])
        .assert()
        .success();

    sit(&tmp)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dara").not());
}

#[test]
fn test_duplicate_usernames_are_rejected() {
    let tmp = setup();

    sit(&tmp)
        .args(["user", "add", "-u", "dara", "-p", "secret"])
        .assert()
        .success();
    sit(&tmp)
        .args(["user", "add", "-u", "DARA", "-p", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_user_management_requires_the_admin_role() {
    let tmp = setup();
    sit(&tmp)
        .args(["user", "add", "-u", "dara", "-p", "secret", "--role", "user"])
        .assert()
        .success();

    sit(&tmp)
        .args(["login", "--username", "dara", "--password", "secret"])
        .assert()
        .success();

    sit(&tmp)
        .args(["user", "add", "-u", "other", "-p", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Admin role"));

    // A regular session can still work with reports.
    sit(&tmp)
        .args([
            "report", "new", "--requester", "Dara", "--campus", "Campus1",
            "--import-date", "2026-03-01", "--export-date", "2026-03-02",
            "--item", "Mouse=1",
        ])
        .assert()
        .success();
}

#[test]
fn test_primary_admin_cannot_be_removed() {
    let tmp = setup();

    sit(&tmp)
        .args(["user", "remove", "admin", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("primary admin"));
}
