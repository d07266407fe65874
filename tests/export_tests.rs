use predicates::str::contains;
use std::fs;

mod common;
use common::{LEGACY_DOC, init_db, init_db_with_data, rwl, setup_test_db, temp_out};

#[test]
fn test_export_csv_all() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_data(&db_path, "export_csv_all");
    let out = temp_out("export_csv_all", "csv");

    rwl()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,date,time,task,requestor,duration,tags,timestamp"));
    assert!(content.contains("Fix login"));
    assert!(content.contains("Planning"));
    assert!(content.contains("\"t1, t2\""));
}

#[test]
fn test_export_json_range() {
    let db_path = setup_test_db("export_json_range");
    init_db_with_data(&db_path, "export_json_range");
    let out = temp_out("export_json_range", "json");

    rwl()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2025-02",
        ])
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["task"], "Planning");
    assert_eq!(rows[0]["timestamp"], "2025-02-03T12:00:00.000Z");
}

#[test]
fn test_export_xlsx_and_pdf_are_written() {
    let db_path = setup_test_db("export_binary");
    init_db_with_data(&db_path, "export_binary");

    let xlsx = temp_out("export_binary", "xlsx");
    rwl()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    assert!(fs::read(&xlsx).unwrap().starts_with(b"PK"));

    let pdf = temp_out("export_binary", "pdf");
    rwl()
        .args(["--db", &db_path, "export", "--format", "pdf", "--file", &pdf, "--range", "2025-01"])
        .assert()
        .success();
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_export_relative_path_fails() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path, "export_relative");

    rwl()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    init_db_with_data(&db_path, "export_empty");
    let out = temp_out("export_empty", "csv");

    rwl()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2019"])
        .assert()
        .success()
        .stdout(contains("No entries found"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_import_twice_skips_existing() {
    let db_path = setup_test_db("import_twice");
    init_db(&db_path);
    let doc = temp_out("import_twice", "json");
    fs::write(&doc, LEGACY_DOC).unwrap();

    rwl()
        .args(["--db", &db_path, "import", &doc])
        .assert()
        .success()
        .stdout(contains("Imported 4 entries"));

    rwl()
        .args(["--db", &db_path, "import", &doc])
        .assert()
        .success()
        .stdout(contains("Imported 0 entries"))
        .stdout(contains("4 entries were already present"));
}

#[test]
fn test_import_rejects_malformed_document() {
    let db_path = setup_test_db("import_malformed");
    init_db(&db_path);
    let doc = temp_out("import_malformed", "json");
    fs::write(&doc, "{ not json").unwrap();

    rwl()
        .args(["--db", &db_path, "import", &doc])
        .assert()
        .failure()
        .stderr(contains("Invalid import document"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_compressed");
    init_db_with_data(&db_path, "backup_compressed");
    let dest = temp_out("backup_compressed", "sqlite");
    let zip = dest.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    rwl()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress", "--force"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(std::path::Path::new(&zip).exists());
    assert!(!std::path::Path::new(&dest).exists());
}
