//! Interactive confirmation for destructive updates.

use std::io::{self, IsTerminal, Write};

use anyhow::{Result, bail};

/// Ask a yes/no question on stderr. `force` answers yes without asking.
///
/// Fails when stdin or stderr is not a terminal, so scripted runs must pass
/// `--force` explicitly.
pub fn confirm(message: &str, force: bool) -> Result<bool> {
  if force {
    return Ok(true);
  }

  if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
    bail!("Refusing to overwrite edited files without confirmation. Pass --force to proceed.");
  }

  let mut stderr = io::stderr();
  write!(stderr, "{} [y/N] ", message)?;
  stderr.flush()?;

  let mut answer = String::new();
  io::stdin().read_line(&mut answer)?;

  Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
