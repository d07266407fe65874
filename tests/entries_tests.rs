use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, rwl, setup_test_db};

#[test]
fn test_add_then_list_today() {
    let db_path = setup_test_db("add_list_today");
    init_db(&db_path);

    rwl()
        .args([
            "--db", &db_path, "add", "Fix login", "--for", "Ana", "--hours", "1.5", "--tags",
            "bug, web",
        ])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved"));

    rwl()
        .args(["--db", &db_path, "list", "--preset", "today"])
        .assert()
        .success()
        .stdout(contains("Fix login"))
        .stdout(contains("Ana"))
        .stdout(contains("1.50"))
        .stdout(contains("bug, web"));
}

#[test]
fn test_add_rejects_negative_hours() {
    let db_path = setup_test_db("add_negative");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "add", "Oops", "--for", "Ana", "--hours", "-2"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No entries found"));
}

#[test]
fn test_add_rejects_blank_requestor() {
    let db_path = setup_test_db("add_blank_requestor");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "add", "Task", "--for", "  ", "--hours", "1"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn test_edit_changes_only_given_fields() {
    let db_path = setup_test_db("edit_fields");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "add", "Draft", "--for", "Ana", "--hours", "2"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "edit", "1", "--hours", "3.25", "--tags", "docs"])
        .assert()
        .success()
        .stdout(contains("duration, tags"));

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Draft"))
        .stdout(contains("3.25"))
        .stdout(contains("docs"));
}

#[test]
fn test_edit_unknown_id_fails() {
    let db_path = setup_test_db("edit_unknown");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "edit", "42", "--task", "x"])
        .assert()
        .failure()
        .stderr(contains("Entry not found: #42"));
}

#[test]
fn test_delete_is_idempotent() {
    let db_path = setup_test_db("delete_idempotent");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "add", "Gone soon", "--for", "Ana", "--hours", "1"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    rwl()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("does not exist"));

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Gone soon").not());
}

#[test]
fn test_delete_cancelled_without_confirmation() {
    let db_path = setup_test_db("delete_cancelled");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "add", "Keep me", "--for", "Ana", "--hours", "1"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    rwl()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Keep me"));
}

#[test]
fn test_ids_are_not_reused() {
    let db_path = setup_test_db("ids_not_reused");
    init_db(&db_path);

    for task in ["A", "B"] {
        rwl()
            .args(["--db", &db_path, "add", task, "--for", "R", "--hours", "1"])
            .assert()
            .success();
    }
    rwl()
        .args(["--db", &db_path, "del", "2", "--yes"])
        .assert()
        .success();

    rwl()
        .args(["--db", &db_path, "add", "C", "--for", "R", "--hours", "1"])
        .assert()
        .success()
        .stdout(contains("Entry #3 saved"));
}

#[test]
fn test_list_with_invalid_range_fails() {
    let db_path = setup_test_db("list_invalid_range");
    init_db(&db_path);

    rwl()
        .args(["--db", &db_path, "list", "--from", "2025-02-10", "--to", "2025-02-01"])
        .assert()
        .failure()
        .stderr(contains("start date must be before end date"));
}
