use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn tcof_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tcof").expect("Failed to find tcof binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_create_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tcof_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Zone: not set"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tcof_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_list_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plans"))
        .stdout(predicate::str::contains("## Plan 1"));
}

#[test]
fn test_cli_zone_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "zone", "set", "1", "B2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone set to B2"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone: B2"));
}

#[test]
fn test_cli_unknown_zone_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "zone", "set", "1", "Z9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Unknown zone 'Z9'"));
}

#[test]
fn test_cli_framework_toggle_expands_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "framework", "toggle", "1", "AGILEPM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Framework AGILEPM selected"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frameworks: AGILEPM"))
        .stdout(predicate::str::contains("[AGILEPM]"));

    // Deselecting keeps the expanded tasks
    tcof_cmd()
        .args(["--database-file", db_arg, "framework", "toggle", "1", "AGILEPM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deselected, tasks kept"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frameworks: none"))
        .stdout(predicate::str::contains("[AGILEPM]"));
}

#[test]
fn test_cli_task_toggle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "toggle",
            "1",
            "delivery",
            "SCRUM",
            "Run retrospective",
            "Hold daily standup",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toggled 2 tasks (2 on, 0 off)"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run retrospective"))
        .stdout(predicate::str::contains("Hold daily standup"));
}

#[test]
fn test_cli_task_toggle_rejects_blank_text() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "toggle",
            "1",
            "delivery",
            "SCRUM",
            "   ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Task text must not be empty"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[SCRUM]").not());
}

#[test]
fn test_cli_custom_framework_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "custom", "create", "1", "Team rituals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: cf-1"));

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "custom",
            "add-task",
            "1",
            "cf-1",
            "delivery",
            "Weekly demo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added"));

    // Out-of-range removal reports an error without failing the process
    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "custom",
            "remove-task",
            "1",
            "cf-1",
            "delivery",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: No task at index 5"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "delete", "1"])
        .assert()
        .failure();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan with ID: 1"));

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Plan 1 not found"));
}

#[test]
fn test_cli_factor_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "factor",
            "upsert",
            "1.3",
            "Plan for benefits",
            "--tasks",
            r#"{"delivery": ["Track benefits"]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved success factor: 1.3"));

    tcof_cmd()
        .args(["--database-file", db_arg, "factor", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.3 Plan for benefits"));

    tcof_cmd()
        .args(["--database-file", db_arg, "factor", "show", "1.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Track benefits"));

    tcof_cmd()
        .args(["--database-file", db_arg, "factor", "delete", "1.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted success factor"));
}

#[test]
fn test_cli_factor_export_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "factor",
            "upsert",
            "1.3",
            "Plan for benefits",
            "--tasks",
            r#"{"delivery": ["Track benefits"]}"#,
        ])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "factor", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"1.3\""))
        .stdout(predicate::str::contains("Track benefits"));
}

#[test]
fn test_cli_factor_rejects_bad_id() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    tcof_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "factor",
            "upsert",
            "benefits",
            "Plan for benefits",
        ])
        .assert()
        .failure();
}

#[test]
fn test_cli_checklist_export_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "framework", "toggle", "1", "PRINCE2"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "checklist", "export", "1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"plan_id\": 1"))
        .stdout(predicate::str::contains("\"framework\""));
}

#[test]
fn test_cli_checklist_export_csv_to_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let out_path = temp_dir.path().join("checklist.csv");

    tcof_cmd()
        .args(["--database-file", db_arg, "plan", "new"])
        .assert()
        .success();

    tcof_cmd()
        .args(["--database-file", db_arg, "framework", "toggle", "1", "KANBAN"])
        .assert()
        .success();

    tcof_cmd()
        .args([
            "--database-file",
            db_arg,
            "checklist",
            "export",
            "1",
            "--format",
            "csv",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checklist written to"));

    let csv = std::fs::read_to_string(&out_path).expect("CSV file should exist");
    assert!(csv.starts_with("stage,source,framework,text,done"));
    assert!(csv.contains("KANBAN"));
}
