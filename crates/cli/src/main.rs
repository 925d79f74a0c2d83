mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tailkit_lib::consts::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::cmd::{AddArgs, NgAddArgs, UpdateArgs, Workspace};
use crate::output::{OutputFormat, print_error};

/// tailkit - copy UI library components into an Angular project and keep them current
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Host project directory
  #[arg(long, global = true, default_value = ".")]
  project: PathBuf,

  /// Component library directory (default: $TAILKIT_LIBRARY, then node_modules)
  #[arg(long, global = true)]
  library: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Copy components into the project
  Add(AddArgs),

  /// Regenerate previously added components
  Update(UpdateArgs),

  /// Register the library provider in the application bootstrap
  NgAdd(NgAddArgs),

  /// List the components and groups the library offers
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show generated files and whether they were edited
  Status {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let workspace = Workspace::resolve(&cli.project, cli.library.as_deref())?;

  match cli.command {
    Commands::Add(args) => cmd::cmd_add(&workspace, args),
    Commands::Update(args) => cmd::cmd_update(&workspace, args),
    Commands::NgAdd(args) => cmd::cmd_ng_add(&workspace, args),
    Commands::List { output } => cmd::cmd_list(&workspace, output),
    Commands::Status { output } => cmd::cmd_status(&workspace, cli.verbose, output),
  }
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}
