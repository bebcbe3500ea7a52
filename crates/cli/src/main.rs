use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// rulebind - inspect rule and target bindings of a build description
#[derive(Parser)]
#[command(name = "rulebind")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text", global = true)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List modules, rules and targets of a build description
  Inspect {
    /// Path to the build description (default: build.json)
    #[arg(default_value = "build.json")]
    file: PathBuf,
  },

  /// Show which rule slot a name resolves to from a module
  Resolve {
    /// Path to the build description
    file: PathBuf,

    /// Rule name to resolve
    rule: String,

    /// Module to resolve from (default: the root module)
    #[arg(short, long, default_value = "")]
    module: String,
  },

  /// Show the variables in effect while a target's settings are pushed
  Settings {
    /// Path to the build description
    file: PathBuf,

    /// Target whose settings to apply
    target: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Inspect { file } => cmd::cmd_inspect(&file, cli.verbose, cli.output),
    Commands::Resolve { file, rule, module } => cmd::cmd_resolve(&file, &rule, &module, cli.output),
    Commands::Settings { file, target } => cmd::cmd_settings(&file, &target, cli.output),
  }
}
