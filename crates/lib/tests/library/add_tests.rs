//! End-to-end `add` runs.

use tailkit_lib::add::{AddOptions, add_components};
use tailkit_lib::hashdb::{HashDbStore, RunAction};
use tailkit_lib::manifest::Selection;
use tailkit_lib::plan::FileStatus;

use super::common::{Fixture, run_ids};

fn add(fixture: &Fixture, selection: Selection) -> tailkit_lib::add::AddResult {
  let options = AddOptions {
    selection,
    ..Default::default()
  };
  add_components(&fixture.library(), &mut fixture.host(), &mut run_ids(), &options).unwrap()
}

#[test]
fn fresh_add_of_single_component() {
  let fixture = Fixture::with_manifest(r#"{ "components": { "button": { "files": ["src/lib/button/button.ts"] } } }"#);
  fixture.write_library("src/lib/button/button.ts", "export class Button {}\n");
  let result = add(&fixture, Selection::names(["button"]));

  assert_eq!(result.summary.created, 1);
  assert_eq!(result.files.len(), 1);
  assert_eq!(
    fixture.read_project("src/app/ui/button/button.ts").as_deref(),
    Some("export class Button {}\n")
  );

  let db = HashDbStore::default().read(&fixture.host()).unwrap();
  assert_eq!(db.files.len(), 1);
  assert!(db.file("/src/app/ui/button/button.ts").is_some());
  assert_eq!(db.runs.len(), 1);
  assert_eq!(db.runs[0].action, RunAction::Add);
  assert_eq!(db.runs[0].selection, Selection::names(["button"]));
}

#[test]
fn shared_files_are_discovered_through_imports() {
  let fixture = Fixture::new();
  let result = add(&fixture, Selection::names(["button"]));

  assert_eq!(result.summary.created, 3);
  let cx = result
    .files
    .iter()
    .find(|f| f.path == "/src/app/ui/utils/cx.ts")
    .unwrap();
  assert_eq!(cx.component, "shared");
  assert_eq!(cx.status, FileStatus::Created);

  let button = fixture.read_project("src/app/ui/button/button.ts").unwrap();
  assert!(button.contains("from '../utils/cx'"));
  assert!(button.contains("from '@angular/core'"));
}

#[test]
fn group_selection_pulls_dependencies_and_rewrites_package_imports() {
  let fixture = Fixture::new();
  let result = add(&fixture, Selection::groups(["overlays"]));

  assert_eq!(result.components, vec!["button".to_string(), "dialog".to_string()]);
  let dialog = fixture.read_project("src/app/ui/dialog/dialog.ts").unwrap();
  assert_eq!(dialog, "import { Button } from '../button/button';\n\nexport class Dialog {}\n");
}

#[test]
fn style_references_point_at_host_stylesheet() {
  let fixture = Fixture::new();
  fixture.write_project(
    "angular.json",
    r#"{ "projects": { "host": { "architect": { "build": { "options": { "styles": ["src/global.css"] } } } } } }"#,
  );
  add(&fixture, Selection::names(["button"]));

  let css = fixture.read_project("src/app/ui/button/button.css").unwrap();
  assert!(css.starts_with("@reference \"../../../global.css\";"));

  let db = HashDbStore::default().read(&fixture.host()).unwrap();
  assert_eq!(db.global_styles_entry.as_deref(), Some("/src/global.css"));
}

#[test]
fn external_dependencies_are_added_to_package_json() {
  let fixture = Fixture::new();
  let result = add(&fixture, Selection::names(["button"]));

  assert_eq!(result.dependencies.added.len(), 1);
  let package = fixture.read_project("package.json").unwrap();
  assert!(package.contains("\"@angular/cdk\": \"^20.0.0\""));
  assert!(package.find("\"name\"").unwrap() < package.find("\"dependencies\"").unwrap());
}

#[test]
fn staged_snapshot_takes_precedence() {
  let fixture = Fixture::new();
  fixture.write_library("schematics/files/src/lib/card/card.ts", "export class StagedCard {}\n");
  add(&fixture, Selection::names(["card"]));

  assert_eq!(
    fixture.read_project("src/app/ui/card/card.ts").as_deref(),
    Some("export class StagedCard {}\n")
  );
}

#[test]
fn missing_library_file_is_counted_not_fatal() {
  let fixture = Fixture::with_manifest(
    r#"{ "components": { "card": { "files": ["src/lib/card/card.ts", "src/lib/card/gone.ts"] } } }"#,
  );
  let result = add(&fixture, Selection::names(["card"]));

  assert_eq!(result.summary.created, 1);
  assert_eq!(result.summary.missing_source, 1);
}

#[test]
fn dependency_cycle_terminates() {
  let fixture = Fixture::with_manifest(
    r#"{ "components": {
      "a": { "files": ["src/lib/card/card.ts"], "deps": ["b"] },
      "b": { "files": ["src/lib/utils/cx.ts"], "deps": ["a"] }
    } }"#,
  );
  let result = add(&fixture, Selection::names(["a"]));

  assert_eq!(result.components, vec!["a".to_string(), "b".to_string()]);
  assert_eq!(result.summary.created, 2);
}
