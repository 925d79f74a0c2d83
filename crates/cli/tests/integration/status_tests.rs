//! Status and list command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn status_reports_modified_and_deleted_files() {
  let env = TestEnv::new();
  env.tailkit_cmd().args(["add", "--names", "button"]).assert().success();
  env.write_project("src/app/ui/button/button.ts", "// edited\n");
  std::fs::remove_file(env.project_path().join("src/app/ui/utils/cx.ts")).unwrap();

  env
    .tailkit_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("Components generated into /src/app/ui"))
    .stdout(predicate::str::contains("/src/app/ui/button/button.ts (modified, button)"))
    .stdout(predicate::str::contains("/src/app/ui/utils/cx.ts (deleted, shared)"))
    .stdout(predicate::str::contains("Recent runs:"));
}

#[test]
fn status_json_output() {
  let env = TestEnv::new();
  env.tailkit_cmd().args(["add", "--names", "button"]).assert().success();

  let output = env.tailkit_cmd().args(["status", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["dest"], "/src/app/ui");
  assert_eq!(report["libVersion"], "1.4.0");
  assert_eq!(report["files"].as_array().unwrap().len(), 2);
  assert_eq!(report["runs"].as_array().unwrap().len(), 1);
}

#[test]
fn list_shows_components_and_groups() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("@practices/ui-tailwind 1.4.0"))
    .stdout(predicate::str::contains("button (1 file)"))
    .stdout(predicate::str::contains("Depends on: button"))
    .stdout(predicate::str::contains("overlays: dialog"));
}
