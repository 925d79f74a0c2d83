//! Provider registration against entry files on disk.

use tailkit_lib::bootstrap::{BootstrapOptions, register_provider};

use super::common::Fixture;

const MAIN: &str = "import { bootstrapApplication } from '@angular/platform-browser';\nimport { appConfig } from './app/app.config';\nimport { App } from './app/app';\n\nbootstrapApplication(App, appConfig)\n  .catch((err) => console.error(err));\n";

const APP_CONFIG: &str = "import { ApplicationConfig } from '@angular/core';\nimport { provideRouter } from '@angular/router';\n\nexport const appConfig: ApplicationConfig = {\n  providers: [provideRouter([])]\n};\n";

fn fixture() -> Fixture {
  let fixture = Fixture::new();
  fixture.write_project("src/main.ts", MAIN);
  fixture.write_project("src/app/app.config.ts", APP_CONFIG);
  fixture
}

#[test]
fn registers_provider_in_imported_config() {
  let fixture = fixture();
  let outcome = register_provider(&mut fixture.host(), &BootstrapOptions::default()).unwrap();

  assert_eq!(outcome.config_file, "/src/app/app.config.ts");
  let config = fixture.read_project("src/app/app.config.ts").unwrap();
  assert!(config.contains("providers: [provideRouter([]), provideTailkit()]"));
  assert!(config.contains("import { provideTailkit } from './ui/core/provider';\n"));
  assert_eq!(fixture.read_project("src/main.ts").as_deref(), Some(MAIN));
}

#[test]
fn second_registration_is_a_noop() {
  let fixture = fixture();
  register_provider(&mut fixture.host(), &BootstrapOptions::default()).unwrap();
  let once = fixture.read_project("src/app/app.config.ts").unwrap();

  let outcome = register_provider(&mut fixture.host(), &BootstrapOptions::default()).unwrap();
  assert!(!outcome.changed());
  assert_eq!(fixture.read_project("src/app/app.config.ts").unwrap(), once);
}

#[test]
fn commented_providers_survive_repeated_registration() {
  let fixture = fixture();
  fixture.write_project(
    "src/app/app.config.ts",
    "export const appConfig: ApplicationConfig = {\n  \"providers\": [\n    provideRouter(routes), // routing\n    /* animations later */\n  ],\n};\n",
  );

  let first = register_provider(&mut fixture.host(), &BootstrapOptions::default()).unwrap();
  assert!(first.provider_inserted);
  let once = fixture.read_project("src/app/app.config.ts").unwrap();
  assert!(once.contains("provideRouter(routes), provideTailkit() // routing\n"));
  assert_eq!(once.matches("providers").count(), 1);

  let second = register_provider(&mut fixture.host(), &BootstrapOptions::default()).unwrap();
  assert!(!second.changed());
  assert_eq!(fixture.read_project("src/app/app.config.ts").unwrap(), once);
}
