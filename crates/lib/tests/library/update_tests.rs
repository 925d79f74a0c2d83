//! End-to-end `update` runs, including the reconciliation matrix.

use tailkit_lib::add::{AddOptions, add_components};
use tailkit_lib::hashdb::{HashDbStore, RunAction};
use tailkit_lib::manifest::Selection;
use tailkit_lib::update::{UpdateError, UpdateMode, UpdateOptions, UpdateResult, update_components};

use super::common::{Fixture, run_ids};

const CARD: &str = "src/app/ui/card/card.ts";
const GENERATED: &str = "export class Card {}\n";
const EDITED: &str = "export class Card { edited = true; }\n";

fn added() -> Fixture {
  let fixture = Fixture::new();
  let options = AddOptions {
    selection: Selection::names(["card"]),
    ..Default::default()
  };
  add_components(&fixture.library(), &mut fixture.host(), &mut run_ids(), &options).unwrap();
  fixture
}

fn update(fixture: &Fixture, mode: UpdateMode) -> UpdateResult {
  let options = UpdateOptions {
    selection: Selection::names(["card"]),
    mode,
    ..Default::default()
  };
  update_components(&fixture.library(), &mut fixture.host(), &mut || "update-run".to_string(), &options).unwrap()
}

/// Change the library so an update has something new to write.
fn bump_library(fixture: &Fixture) {
  fixture.write_library("src/lib/card/card.ts", "export class Card { v2 = true; }\n");
}

#[test]
fn noop_update_after_add() {
  let fixture = added();
  let result = update(&fixture, UpdateMode::Auto);

  assert_eq!(result.summary.written(), 0);
  assert_eq!(result.summary.skipped_identical, 1);
  let db = HashDbStore::default().read(&fixture.host()).unwrap();
  assert_eq!(db.runs.len(), 2);
  assert_eq!(db.runs[1].action, RunAction::Update);
}

#[test]
fn user_edit_survives_auto_then_conflicts_restores() {
  let fixture = added();
  fixture.write_project(CARD, EDITED);

  let result = update(&fixture, UpdateMode::Auto);
  assert_eq!(result.summary.skipped_conflict, 1);
  assert_eq!(fixture.read_project(CARD).as_deref(), Some(EDITED));

  let result = update(&fixture, UpdateMode::Conflicts);
  assert_eq!(result.summary.updated, 1);
  assert_eq!(fixture.read_project(CARD).as_deref(), Some(GENERATED));
}

#[test]
fn update_without_recorded_destination_fails() {
  let fixture = Fixture::new();
  let err = update_components(
    &fixture.library(),
    &mut fixture.host(),
    &mut run_ids(),
    &UpdateOptions::default(),
  )
  .unwrap_err();

  assert!(matches!(err, UpdateError::NoDestination));
  assert!(fixture.read_project(".tailkit/hashes.json").is_none());
}

#[test]
fn file_without_record_is_left_in_auto_mode() {
  let fixture = added();
  fixture.write_project("src/app/ui/button/button.css", "/* mine */\n");
  let options = UpdateOptions {
    selection: Selection::names(["button"]),
    ..Default::default()
  };
  let result = update_components(&fixture.library(), &mut fixture.host(), &mut run_ids(), &options).unwrap();

  assert_eq!(result.summary.skipped_no_record, 1);
  assert_eq!(fixture.read_project("src/app/ui/button/button.css").as_deref(), Some("/* mine */\n"));
}

mod matrix {
  //! Every combination of file state and mode, after the library changed.

  use super::*;

  enum State {
    Missing,
    Untouched,
    Modified,
  }

  fn scenario(state: State, mode: UpdateMode) -> (UpdateResult, Option<String>) {
    let fixture = added();
    match state {
      State::Missing => std::fs::remove_file(fixture.project_dir().join(CARD)).unwrap(),
      State::Untouched => {}
      State::Modified => fixture.write_project(CARD, EDITED),
    }
    bump_library(&fixture);
    let result = update(&fixture, mode);
    (result, fixture.read_project(CARD))
  }

  const NEW: &str = "export class Card { v2 = true; }\n";

  #[test]
  fn missing_auto() {
    let (result, content) = scenario(State::Missing, UpdateMode::Auto);
    assert_eq!(result.summary.created, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn missing_conflicts() {
    let (result, content) = scenario(State::Missing, UpdateMode::Conflicts);
    assert_eq!(result.summary.created, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn missing_all() {
    let (result, content) = scenario(State::Missing, UpdateMode::All);
    assert_eq!(result.summary.created, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn untouched_auto() {
    let (result, content) = scenario(State::Untouched, UpdateMode::Auto);
    assert_eq!(result.summary.updated, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn untouched_conflicts() {
    let (result, content) = scenario(State::Untouched, UpdateMode::Conflicts);
    assert_eq!(result.summary.skipped_conflict, 1);
    assert_eq!(content.as_deref(), Some(GENERATED));
  }

  #[test]
  fn untouched_all() {
    let (result, content) = scenario(State::Untouched, UpdateMode::All);
    assert_eq!(result.summary.updated, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn modified_auto() {
    let (result, content) = scenario(State::Modified, UpdateMode::Auto);
    assert_eq!(result.summary.skipped_conflict, 1);
    assert_eq!(content.as_deref(), Some(EDITED));
  }

  #[test]
  fn modified_conflicts() {
    let (result, content) = scenario(State::Modified, UpdateMode::Conflicts);
    assert_eq!(result.summary.updated, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }

  #[test]
  fn modified_all() {
    let (result, content) = scenario(State::Modified, UpdateMode::All);
    assert_eq!(result.summary.updated, 1);
    assert_eq!(content.as_deref(), Some(NEW));
  }
}
