//! Terminal output for tailkit commands.
//!
//! Status lines go to stdout, problems to stderr. Colors are only applied
//! when the stream supports them, so piped output stays plain.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{AnsiColors, OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Line markers shared by file listings and status messages.
pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const REMOVE: &str = "-";
}

#[derive(Clone, Copy)]
enum Tone {
  Success,
  Info,
  Warning,
  Error,
}

impl Tone {
  fn symbol(self) -> &'static str {
    match self {
      Tone::Success => symbols::SUCCESS,
      Tone::Info => symbols::INFO,
      Tone::Warning => symbols::WARNING,
      Tone::Error => symbols::ERROR,
    }
  }

  fn color(self) -> AnsiColors {
    match self {
      Tone::Success => AnsiColors::Green,
      Tone::Info => AnsiColors::Blue,
      Tone::Warning => AnsiColors::Yellow,
      Tone::Error => AnsiColors::Red,
    }
  }

  fn stream(self) -> Stream {
    match self {
      Tone::Success | Tone::Info => Stream::Stdout,
      Tone::Warning | Tone::Error => Stream::Stderr,
    }
  }
}

/// Symbol in the tone's color; warnings and errors color the message too.
fn print_line(tone: Tone, message: &str) {
  let stream = tone.stream();
  let symbol_text = tone.symbol();
  let symbol = symbol_text.if_supports_color(stream, |s| s.color(tone.color()));
  match stream {
    Stream::Stderr => eprintln!("{} {}", symbol, message.if_supports_color(stream, |s| s.color(tone.color()))),
    _ => println!("{} {}", symbol, message),
  }
}

pub fn print_success(message: &str) {
  print_line(Tone::Success, message);
}

pub fn print_info(message: &str) {
  print_line(Tone::Info, message);
}

pub fn print_warning(message: &str) {
  print_line(Tone::Warning, message);
}

pub fn print_error(message: &str) {
  print_line(Tone::Error, message);
}

/// Indented `label: value` line with a dimmed label.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// `1 file`, `3 files`.
pub fn plural(count: usize, noun: &str) -> String {
  if count == 1 {
    format!("{count} {noun}")
  } else {
    format!("{count} {noun}s")
  }
}

/// Elapsed run time, rounded to milliseconds.
pub fn format_duration(elapsed: Duration) -> String {
  let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
  humantime::format_duration(Duration::from_millis(millis)).to_string()
}
