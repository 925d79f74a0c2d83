//! End-to-end tests that drive the `tailkit` binary against a temporary
//! project and component library.

mod add_tests;
mod common;
mod ng_add_tests;
mod status_tests;
mod update_tests;
