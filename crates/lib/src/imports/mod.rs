//! Import statement handling: classification, scanning, and relocation.

mod resolve;
mod scan;
mod specifier;

pub use resolve::ImportResolver;
pub use scan::{is_source_file, is_style_file, rewrite_imports, scan_imports};
pub use specifier::{DEFAULT_EXTENSION, ImportTarget, KNOWN_EXTENSIONS, parse_specifier};
