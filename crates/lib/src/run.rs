//! Run identifiers.
//!
//! Orchestrators take their identifier source as an argument, so tests can
//! supply deterministic ids and no global counter exists.

use std::time::{SystemTime, UNIX_EPOCH};

/// Produces a fresh identifier for each orchestrator run.
pub trait RunIdSource {
  fn next_run_id(&mut self) -> String;
}

impl<F> RunIdSource for F
where
  F: FnMut() -> String,
{
  fn next_run_id(&mut self) -> String {
    self()
  }
}

/// Millisecond timestamp plus a per-source counter, e.g. `1760781600123-0001`.
#[derive(Debug, Default)]
pub struct TimestampRunIds {
  counter: u32,
}

impl TimestampRunIds {
  pub fn new() -> Self {
    Self::default()
  }
}

impl RunIdSource for TimestampRunIds {
  fn next_run_id(&mut self) -> String {
    self.counter += 1;
    let millis = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_millis())
      .unwrap_or(0);
    format!("{}-{:04}", millis, self.counter)
  }
}

/// Current Unix time in seconds.
pub fn unix_timestamp() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_secs())
    .unwrap_or(0)
}
