//! tailkit-lib: component schematics engine
//!
//! Copies components of a UI library into a host project and keeps them up
//! to date without discarding user edits:
//! - `manifest`: the component catalog and selection closure
//! - `plan`: discovery of shared files and rendering for the new layout
//! - `hashdb`: the per-project record of generated files
//! - `add` / `update`: the orchestrators
//! - `bootstrap`: provider registration in the host's entry file

pub mod add;
pub mod bootstrap;
pub mod consts;
pub mod context;
pub mod hashdb;
pub mod host;
pub mod imports;
pub mod library;
pub mod manifest;
pub mod plan;
pub mod run;
pub mod status;
pub mod styles;
pub mod tree;
pub mod update;
pub mod util;
pub mod whitelist;
