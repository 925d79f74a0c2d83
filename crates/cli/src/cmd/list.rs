//! Implementation of the `tailkit list` command.

use std::collections::BTreeMap;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use tailkit_lib::manifest::ComponentDef;

use super::Workspace;
use crate::output::{OutputFormat, plural, print_json, print_stat, symbols};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing<'a> {
  package_name: &'a str,
  version: Option<&'a str>,
  components: &'a BTreeMap<String, ComponentDef>,
  groups: &'a BTreeMap<String, Vec<String>>,
}

pub fn cmd_list(workspace: &Workspace, output: OutputFormat) -> Result<()> {
  let library = workspace.open_library()?;
  let manifest = &library.manifest;

  if output.is_json() {
    return print_json(&Listing {
      package_name: &library.package_name,
      version: library.version.as_deref(),
      components: &manifest.components,
      groups: &manifest.groups,
    });
  }

  let title = match &library.version {
    Some(version) => format!("{} {}", library.package_name, version),
    None => library.package_name.clone(),
  };
  println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
  println!();

  for (name, component) in &manifest.components {
    println!(
      "{} {} {}",
      symbols::INFO,
      name.if_supports_color(Stream::Stdout, |s| s.cyan()),
      format!("({})", plural(component.files.len(), "file")).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
    if !component.deps.is_empty() {
      print_stat("  Depends on", &component.deps.join(", "));
    }
    if !component.external_dependencies.is_empty() {
      print_stat("  Packages", &component.external_dependencies.join(", "));
    }
  }

  if !manifest.groups.is_empty() {
    println!();
    println!("Groups:");
    for (group, members) in &manifest.groups {
      print_stat(group, &members.join(", "));
    }
  }

  Ok(())
}
