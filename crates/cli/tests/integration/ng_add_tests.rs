//! ng-add command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const MAIN_TS: &str = "import { bootstrapApplication } from '@angular/platform-browser';\nimport { App } from './app/app';\n\nbootstrapApplication(App);\n";

#[test]
fn ng_add_registers_provider_once() {
  let env = TestEnv::new();
  env.write_project("src/main.ts", MAIN_TS);

  env
    .tailkit_cmd()
    .arg("ng-add")
    .assert()
    .success()
    .stdout(predicate::str::contains("Registered provider in /src/main.ts"));

  let main = env.read_project("src/main.ts");
  assert!(main.contains("import { provideTailkit } from './app/ui/core/provider';"));
  assert!(main.contains("bootstrapApplication(App, { providers: [provideTailkit()] });"));

  env
    .tailkit_cmd()
    .arg("ng-add")
    .assert()
    .success()
    .stdout(predicate::str::contains("already registered"));
  assert_eq!(env.read_project("src/main.ts"), main);
}

#[test]
fn ng_add_without_entry_fails() {
  let env = TestEnv::new();

  env
    .tailkit_cmd()
    .arg("ng-add")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to register provider"));
}
