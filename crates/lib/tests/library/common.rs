//! Shared fixtures for library integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tailkit_lib::library::Library;
use tailkit_lib::tree::DiskTree;
use tempfile::TempDir;

/// Manifest used by most scenarios.
///
/// `dialog` depends on `button`; `button` imports a whitelisted shared file.
pub const MANIFEST: &str = r#"{
  "version": "2.1.0",
  "components": {
    "button": {
      "files": ["src/lib/button/button.ts", "src/lib/button/button.css"],
      "externalDependencies": ["@angular/cdk"]
    },
    "dialog": {
      "files": ["src/lib/dialog/dialog.ts"],
      "deps": ["button"]
    },
    "card": { "files": ["src/lib/card/card.ts"] }
  },
  "groups": { "overlays": ["dialog"] },
  "externalDependencyVersions": { "@angular/cdk": "^20.0.0" }
}"#;

pub const LIBRARY_FILES: &[(&str, &str)] = &[
  (
    "src/lib/button/button.ts",
    "import { Component } from '@angular/core';\nimport { cx } from '../utils/cx';\n\nexport class Button {}\n",
  ),
  ("src/lib/button/button.css", "@reference \"../../styles.css\";\n.btn { @apply px-4; }\n"),
  (
    "src/lib/dialog/dialog.ts",
    "import { Button } from '@practices/ui-tailwind/button/button';\n\nexport class Dialog {}\n",
  ),
  ("src/lib/utils/cx.ts", "export function cx(...c: string[]) { return c.join(' '); }\n"),
  ("src/lib/card/card.ts", "export class Card {}\n"),
];

/// A component library and an empty host project in one temp directory.
pub struct Fixture {
  pub temp: TempDir,
}

impl Fixture {
  pub fn new() -> Self {
    Self::with_manifest(MANIFEST)
  }

  pub fn with_manifest(manifest: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let fixture = Self { temp };
    fixture.write_library("schematics/manifest.json", manifest);
    fixture.write_library("package.json", r#"{ "name": "@practices/ui-tailwind", "version": "2.1.0" }"#);
    for (path, content) in LIBRARY_FILES {
      fixture.write_library(path, content);
    }
    fixture.write_project("package.json", "{\n  \"name\": \"host\",\n  \"dependencies\": {}\n}\n");
    fixture
  }

  pub fn library_dir(&self) -> PathBuf {
    self.temp.path().join("library")
  }

  pub fn project_dir(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn write_library(&self, relative: &str, content: &str) {
    write(&self.library_dir(), relative, content);
  }

  pub fn write_project(&self, relative: &str, content: &str) {
    write(&self.project_dir(), relative, content);
  }

  pub fn read_project(&self, relative: &str) -> Option<String> {
    fs::read_to_string(self.project_dir().join(relative)).ok()
  }

  pub fn library(&self) -> Library {
    Library::open(&self.library_dir()).unwrap()
  }

  pub fn host(&self) -> DiskTree {
    DiskTree::new(self.project_dir())
  }
}

fn write(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, content).unwrap();
}

/// Deterministic run ids: `run-1`, `run-2`, ...
pub fn run_ids() -> impl FnMut() -> String {
  let mut n = 0;
  move || {
    n += 1;
    format!("run-{n}")
  }
}
