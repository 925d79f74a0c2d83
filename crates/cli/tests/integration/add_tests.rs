//! Add command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn add_copies_component_and_shared_files() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .args(["add", "--names", "button"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Added 1 component to /src/app/ui"))
    .stdout(predicate::str::contains("Created: 2"));

  assert!(env.project_has("src/app/ui/button/button.ts"));
  assert!(env.project_has("src/app/ui/utils/cx.ts"));
  assert!(env.project_has(".tailkit/hashes.json"));
}

#[test]
fn add_group_rewrites_package_imports() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .args(["add", "--groups", "overlays", "--dest", "src/components"])
    .assert()
    .success();

  let dialog = env.read_project("src/components/dialog/dialog.ts");
  assert!(dialog.starts_with("import { Button } from '../button/button';"));
}

#[test]
fn add_patches_package_json() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .args(["add", "--names", "button"])
    .assert()
    .success()
    .stdout(predicate::str::contains("@angular/cdk@^20.0.0"));

  let package: serde_json::Value = serde_json::from_str(&env.read_project("package.json")).unwrap();
  assert_eq!(package["dependencies"]["@angular/cdk"], "^20.0.0");
}

#[test]
fn add_dry_run_writes_nothing() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .args(["add", "--all", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(!env.project_has("src/app/ui/button/button.ts"));
  assert!(!env.project_has(".tailkit/hashes.json"));
}

#[test]
fn add_keeps_existing_files_with_different_content() {
  let env = TestEnv::new();
  env.write_project("src/app/ui/button/button.ts", "// mine\n");

  env
    .tailkit_cmd()
    .args(["add", "--names", "button"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Conflicts: 1"));

  assert_eq!(env.read_project("src/app/ui/button/button.ts"), "// mine\n");
}

#[test]
fn add_json_output() {
  let env = TestEnv::new();

  let output = env
    .tailkit_cmd()
    .args(["add", "--names", "dialog", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(result["components"], serde_json::json!(["button", "dialog"]));
  assert_eq!(result["summary"]["created"], 3);
  assert_eq!(result["dest"], "/src/app/ui");
}

#[test]
fn add_unknown_component_warns() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .args(["add", "--names", "carousel"])
    .assert()
    .success()
    .stderr(predicate::str::contains("No components matched"));
}
