//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "version": "1.4.0",
  "components": {
    "button": {
      "files": ["src/lib/button/button.ts"],
      "externalDependencies": ["@angular/cdk"]
    },
    "dialog": {
      "files": ["src/lib/dialog/dialog.ts"],
      "deps": ["button"]
    }
  },
  "groups": { "overlays": ["dialog"] },
  "externalDependencyVersions": { "@angular/cdk": "^20.0.0" }
}"#;

const LIBRARY_FILES: &[(&str, &str)] = &[
  (
    "src/lib/button/button.ts",
    "import { cx } from '../utils/cx';\n\nexport class Button {}\n",
  ),
  (
    "src/lib/dialog/dialog.ts",
    "import { Button } from '@practices/ui-tailwind/button/button';\n\nexport class Dialog {}\n",
  ),
  ("src/lib/utils/cx.ts", "export const cx = (...c: string[]) => c.join(' ');\n"),
];

/// Isolated project and library.
///
/// The library lives in `library/`, the host project in `project/`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_library("schematics/manifest.json", MANIFEST);
    env.write_library("package.json", r#"{ "name": "@practices/ui-tailwind", "version": "1.4.0" }"#);
    for (path, content) in LIBRARY_FILES {
      env.write_library(path, content);
    }
    env.write_project("package.json", "{\n  \"name\": \"host\",\n  \"dependencies\": {}\n}\n");
    env
  }

  pub fn library_path(&self) -> PathBuf {
    self.temp.path().join("library")
  }

  pub fn project_path(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn write_library(&self, relative: &str, content: &str) {
    write(&self.library_path(), relative, content);
  }

  pub fn write_project(&self, relative: &str, content: &str) {
    write(&self.project_path(), relative, content);
  }

  pub fn read_project(&self, relative: &str) -> String {
    std::fs::read_to_string(self.project_path().join(relative))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
  }

  pub fn project_has(&self, relative: &str) -> bool {
    self.project_path().join(relative).exists()
  }

  /// Get a pre-configured Command for the tailkit binary.
  ///
  /// Points `--project` and `--library` at the isolated directories and
  /// clears `TAILKIT_LIBRARY` so the host environment cannot leak in.
  pub fn tailkit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("tailkit");
    cmd.env_remove("TAILKIT_LIBRARY");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--project").arg(self.project_path());
    cmd.arg("--library").arg(self.library_path());
    cmd
  }
}

fn write(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, content).unwrap();
}
