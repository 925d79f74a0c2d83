//! Fixed names and locations shared across the engine.
//!
//! All tree paths are POSIX, absolute within their tree (leading `/`).

pub const APP_NAME: &str = "tailkit";

/// Package name used for internal imports when neither the manifest nor the
/// library's `package.json` declares one.
pub const DEFAULT_PACKAGE_NAME: &str = "@practices/ui-tailwind";

/// Conventional source prefix inside the library.
pub const SOURCE_PREFIX: &str = "/src/";

/// Root of the component sources inside the library.
pub const LIB_ROOT: &str = "/src/lib";

/// Destination root used when neither the caller nor the hash database names one.
pub const DEFAULT_DEST: &str = "/src/app/ui";

/// Staged snapshot of the library sources, relative to the library directory.
pub const STAGED_FILES_DIR: &str = "schematics/files";

/// Manifest locations relative to the library directory, in lookup order.
pub const MANIFEST_CANDIDATES: &[&str] = &["schematics/manifest.json", "manifest.json"];

/// Hash database location inside the host project.
pub const HASH_DB_PATH: &str = "/.tailkit/hashes.json";

pub const HASH_DB_SCHEMA_VERSION: u32 = 1;

/// Owner recorded for files pulled in by import discovery rather than a manifest entry.
pub const SHARED_COMPONENT: &str = "shared";

pub const PACKAGE_JSON_PATH: &str = "/package.json";
pub const ANGULAR_JSON_PATH: &str = "/angular.json";
pub const DEFAULT_ENTRY_PATH: &str = "/src/main.ts";

pub const BOOTSTRAP_CALL: &str = "bootstrapApplication";
pub const PROVIDER_FACTORY: &str = "provideTailkit";

/// Provider module location relative to the destination root.
pub const PROVIDER_MODULE: &str = "core/provider.ts";

/// Environment variable overriding the library directory.
pub const LIBRARY_ENV: &str = "TAILKIT_LIBRARY";
