//! Library integration tests: whole runs against projects on disk.

mod common;

mod add_tests;
mod bootstrap_tests;
mod hashdb_tests;
mod update_tests;
