//! Hash database persistence on disk.

use tailkit_lib::hashdb::{HashDb, HashDbError, HashDbStore, compute_hash};

use super::common::Fixture;

#[test]
fn missing_database_reads_as_fresh_document() {
  let fixture = Fixture::new();
  let db = HashDbStore::default().read(&fixture.host()).unwrap();
  assert_eq!(db, HashDb::new());
}

#[test]
fn written_database_reads_back_equal() {
  let fixture = Fixture::new();
  let mut host = fixture.host();
  let store = HashDbStore::default();

  let mut db = HashDb::new();
  db.dest = Some("/src/app/ui".to_string());
  db.record_file("/src/app/ui/card/card.ts", compute_hash(b"card"), "card", Some("2.1.0"), "run-1");
  store.write(&mut host, &db).unwrap();

  assert!(fixture.read_project(".tailkit/hashes.json").unwrap().ends_with("}\n"));
  assert_eq!(store.read(&host).unwrap(), db);
}

#[test]
fn corrupt_database_is_an_error() {
  let fixture = Fixture::new();
  fixture.write_project(".tailkit/hashes.json", "{ truncated");
  let err = HashDbStore::default().read(&fixture.host()).unwrap_err();
  assert!(matches!(err, HashDbError::Parse { .. }));
}
