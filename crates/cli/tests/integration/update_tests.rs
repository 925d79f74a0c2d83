//! Update command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn added() -> TestEnv {
  let env = TestEnv::new();
  env.tailkit_cmd().args(["add", "--names", "button"]).assert().success();
  env
}

#[test]
fn update_after_add_is_noop() {
  let env = added();

  env
    .tailkit_cmd()
    .arg("update")
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));
}

#[test]
fn update_auto_refreshes_untouched_files() {
  let env = added();
  env.write_library("src/lib/button/button.ts", "export class Button { v2 = true; }\n");

  env
    .tailkit_cmd()
    .arg("update")
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated: 1"));

  assert_eq!(
    env.read_project("src/app/ui/button/button.ts"),
    "export class Button { v2 = true; }\n"
  );
}

#[test]
fn update_auto_keeps_edits_and_conflicts_replaces_them() {
  let env = added();
  env.write_project("src/app/ui/button/button.ts", "// edited\n");

  env
    .tailkit_cmd()
    .arg("update")
    .assert()
    .success()
    .stdout(predicate::str::contains("Conflicts: 1"))
    .stdout(predicate::str::contains("--mode conflicts"));
  assert_eq!(env.read_project("src/app/ui/button/button.ts"), "// edited\n");

  env
    .tailkit_cmd()
    .args(["update", "--mode", "conflicts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated: 1"));
  assert!(env.read_project("src/app/ui/button/button.ts").contains("export class Button"));
}

#[test]
fn update_regenerates_deleted_files() {
  let env = added();
  std::fs::remove_file(env.project_path().join("src/app/ui/utils/cx.ts")).unwrap();

  env
    .tailkit_cmd()
    .arg("update")
    .assert()
    .success()
    .stdout(predicate::str::contains("Created: 1"));

  assert!(env.project_has("src/app/ui/utils/cx.ts"));
}

#[test]
fn update_all_with_force_overwrites_edits() {
  let env = added();
  env.write_project("src/app/ui/button/button.ts", "// edited\n");

  env
    .tailkit_cmd()
    .args(["update", "--mode", "all", "--force"])
    .assert()
    .success();

  assert!(env.read_project("src/app/ui/button/button.ts").contains("export class Button"));
}

#[test]
fn update_dry_run_leaves_edits() {
  let env = added();
  env.write_project("src/app/ui/button/button.ts", "// edited\n");

  env
    .tailkit_cmd()
    .args(["update", "--mode", "conflicts", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert_eq!(env.read_project("src/app/ui/button/button.ts"), "// edited\n");
}
