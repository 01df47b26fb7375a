use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{bic_db, init_db, init_db_with_data, log_entry, setup_test_db, temp_file};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    bic_db(&db_path)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_summary_json_counts_every_level() {
    let db_path = setup_test_db("summary_json");
    init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalRecords\": 3"))
        .stdout(contains("\"totalMonths\": 2"))
        .stdout(contains("\"Março\""))
        .stdout(contains("\"Abril\""))
        .stdout(contains("\"05\": 2"));
}

#[test]
fn test_summary_on_empty_database() {
    let db_path = setup_test_db("summary_empty");
    init_db(&db_path);

    bic_db(&db_path)
        .args(["summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalRecords\": 0"))
        .stdout(contains("\"years\": {}"));
}

#[test]
fn test_list_by_month_and_day() {
    let db_path = setup_test_db("list_by_period");
    init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["list", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(contains("2024-03-05 10:00"))
        .stdout(contains("2024-03-05 22:00"))
        .stdout(contains("2024-04-01").not());

    bic_db(&db_path)
        .args(["list", "--period", "2024-04-01"])
        .assert()
        .success()
        .stdout(contains("2024-04-01 09:00"))
        .stdout(contains("2024-03-05").not());

    bic_db(&db_path)
        .args(["list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("3 record(s)"));
}

#[test]
fn test_list_rejects_bad_period() {
    let db_path = setup_test_db("list_bad_period");
    init_db(&db_path);

    bic_db(&db_path)
        .args(["list", "--period", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid period: 2024-13"));
}

#[test]
fn test_exit_next_day_is_overnight() {
    let db_path = setup_test_db("exit_overnight");
    let ids = init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["exit", &ids[1], "--at", "2024-03-06T08:00:00"])
        .assert()
        .success()
        .stdout(contains("Exit logged for bike b2"))
        .stdout(contains("overnight"));

    bic_db(&db_path)
        .args(["list", "--period", "2024-03", "--open"])
        .assert()
        .success()
        .stdout(contains("2024-03-05 10:00"))
        .stdout(contains("2024-03-05 22:00").not());

    bic_db(&db_path)
        .args(["stats", "--report", "--period", "2024"])
        .assert()
        .success()
        .stdout(contains("Overnights:     1"))
        .stdout(contains("Unique clients: 2"));
}

#[test]
fn test_exit_by_prefix_and_exit_rules() {
    let db_path = setup_test_db("exit_rules");
    init_db(&db_path);
    let id = log_entry(&db_path, "c1", "b1", "2024-03-05T10:00:00");
    let prefix: String = id.chars().take(8).collect();

    bic_db(&db_path)
        .args(["exit", &prefix, "--at", "2024-03-05T09:00:00"])
        .assert()
        .failure()
        .stderr(contains("before entry"));

    bic_db(&db_path)
        .args(["exit", &prefix, "--at", "2024-03-05T18:30:00"])
        .assert()
        .success()
        .stdout(contains("Stay: 08h 30m"))
        .stdout(contains("overnight").not());

    bic_db(&db_path)
        .args(["exit", &id, "--at", "2024-03-05T19:00:00"])
        .assert()
        .failure()
        .stderr(contains("already has an exit"));

    bic_db(&db_path)
        .args(["exit", "does-not-exist"])
        .assert()
        .failure()
        .stderr(contains("Record not found"));
}

#[test]
fn test_entry_rejects_invalid_timestamp() {
    let db_path = setup_test_db("entry_bad_ts");
    init_db(&db_path);

    bic_db(&db_path)
        .args(["entry", "c1", "b1", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(contains("Invalid timestamp: yesterday"));
}

#[test]
fn test_entry_with_category_shows_emoji() {
    let db_path = setup_test_db("entry_category");
    init_db(&db_path);

    bic_db(&db_path)
        .args([
            "entry",
            "c9",
            "b9",
            "--at",
            "2024-05-10T07:15:00",
            "--category",
            "vip",
        ])
        .assert()
        .success();

    bic_db(&db_path)
        .args(["list", "--period", "2024-05"])
        .assert()
        .success()
        .stdout(contains("⭐ VIP"));
}

#[test]
fn test_import_csv_both_layouts() {
    let db_path = setup_test_db("import_csv");
    init_db(&db_path);

    let csv = temp_file(
        "import_csv",
        "csv",
        "\
ID,Cliente,Bicicleta,Entrada,Saida,Pernoite,Removido,Original
r1,c1,b1,2024-03-05T10:00:00,,Sim,Não,
r2,c1,b1,VIP,2024-03-06T10:00:00,2024-03-06T12:00:00,Não,Não,r0,
r3,c1,b1,x,y
",
    );

    bic_db(&db_path)
        .args(["import", "--file", &csv])
        .assert()
        .success()
        .stdout(contains("line 4"))
        .stdout(contains("Imported 2 record(s)"));

    bic_db(&db_path)
        .args(["summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalRecords\": 2"));

    // importing again updates instead of duplicating
    bic_db(&db_path)
        .args(["import", "--file", &csv])
        .assert()
        .success()
        .stdout(contains("0 new, 2 updated"));
}

#[test]
fn test_import_legacy_document() {
    let db_path = setup_test_db("import_legacy");
    init_db(&db_path);

    let json = temp_file(
        "import_legacy",
        "json",
        r#"[
  { "id": "c1", "bicicletas": [
      { "id": "b1", "registros": [
          { "id": "r1", "dataHoraEntrada": "2023-05-01T08:00:00", "dataHoraSaida": "2023-05-01T18:00:00" },
          { "id": "r2", "dataHoraEntrada": "2023-05-02T08:00:00", "pernoite": true }
      ] }
  ] }
]"#,
    );

    bic_db(&db_path)
        .args(["import", "--file", &json, "--legacy"])
        .assert()
        .success()
        .stdout(contains("Imported 2 record(s)"));

    bic_db(&db_path)
        .args(["list", "--period", "2023-05"])
        .assert()
        .success()
        .stdout(contains("2 record(s), 1 bike(s) still parked"));

    bic_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migrate_legacy"));
}

#[test]
fn test_import_missing_file_fails() {
    let db_path = setup_test_db("import_missing");
    init_db(&db_path);

    bic_db(&db_path)
        .args(["import", "--file", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(contains("file not found"));
}

#[test]
fn test_category_add_and_remove() {
    let db_path = setup_test_db("category_edit");
    init_db(&db_path);

    bic_db(&db_path)
        .args(["category", "--add", "estudante", "--emoji", "🎓"])
        .assert()
        .success()
        .stdout(contains("🎓 ESTUDANTE"))
        .stdout(contains("👤 CLIENTE"));

    bic_db(&db_path)
        .args(["category", "--remove", "estudante"])
        .assert()
        .success()
        .stdout(contains("Category ESTUDANTE removed"))
        .stdout(contains("🎓").not());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    let ids = init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["exit", &ids[0], "--at", "2024-03-05T12:00:00"])
        .assert()
        .success();

    bic_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("migration_applied"))
        .stdout(contains("entry"))
        .stdout(contains("exit"))
        .stdout(contains(format!("({})", ids[2])))
        .stdout(contains(format!("({})", ids[0])));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total records:"))
        .stdout(contains("Integrity check passed"));

    bic_db(&db_path)
        .args(["db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_del_confirmed_removes_record() {
    let db_path = setup_test_db("del_confirmed");
    let ids = init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["del", &ids[2]])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    bic_db(&db_path)
        .args(["summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalRecords\": 2"))
        .stdout(contains("\"Abril\"").not());

    bic_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("record deleted"));
}

#[test]
fn test_del_cancelled_keeps_record() {
    let db_path = setup_test_db("del_cancelled");
    let ids = init_db_with_data(&db_path);

    bic_db(&db_path)
        .args(["del", &ids[0]])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    bic_db(&db_path)
        .args(["summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalRecords\": 3"));
}

#[test]
fn test_import_legacy_with_nested_references() {
    let db_path = setup_test_db("import_legacy_refs");
    init_db(&db_path);

    let json = temp_file(
        "import_legacy_refs",
        "json",
        r#"[{ "id": "c1", "bicicletas": [ { "id": "b1", "registros": [
    { "id": "r1", "clienteId": "c1", "bicicletaId": "b1", "dataHoraEntrada": "2023-07-01T08:00:00" },
    { "dataHoraEntrada": "2023-07-02T08:00:00" }
] } ] }]"#,
    );

    bic_db(&db_path)
        .args(["import", "--file", &json, "--legacy"])
        .assert()
        .success()
        .stdout(contains("Imported 2 record(s)"));
}
