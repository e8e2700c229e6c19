//! # Command Line Interface
//!
//! Flag definitions and the top-level pipeline: query branches, pick one,
//! check it out. All fatal conditions are turned into exit codes here.

use std::env;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use grecent_core::{
  BranchName, ColorMode, GrecentError, candidate_branches, print_branch, print_error, print_failure, switch_branch,
};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::selector::{self, SelectionMode};

/// Top-level CLI command for grecent
#[derive(Debug, Parser)]
#[command(name = "grecent")]
#[command(about = "Switch to a recently used git branch")]
#[command(
  long_about = "Lists the local branches of the current repository, most recently committed first,\n\
        and checks out the one you pick. The branch you are on is left out of the list."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Filter the branch list as you type
  #[arg(short, long)]
  pub fuzzy: bool,

  /// Print the candidate branches, one per line, instead of prompting
  #[arg(short, long, conflicts_with = "fuzzy")]
  pub list: bool,
}

impl Cli {
  fn selection_mode(&self) -> SelectionMode {
    if self.fuzzy {
      SelectionMode::Fuzzy
    } else {
      SelectionMode::Plain
    }
  }
}

/// Run grecent with parsed arguments and return the process exit code.
pub fn handle_cli(cli: Cli) -> ExitCode {
  cli.colors.apply();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      report(&err);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let workdir = env::current_dir().context("Failed to determine the current directory")?;
  let runtime = build_runtime()?;

  let branches = runtime.block_on(candidate_branches(&workdir))?;

  if cli.list {
    for branch in &branches {
      print_branch(branch.as_str());
    }
    return Ok(());
  }

  if !io::stdin().is_terminal() {
    bail!("Cannot prompt for a branch in non-interactive mode. Use --list to print the candidates.");
  }

  let selection = selector::select_branch(&branches, cli.selection_mode())?;
  apply_selection(&runtime, &workdir, selection)
}

/// Check out the chosen branch; a cancelled prompt (`None`) touches nothing.
fn apply_selection(runtime: &Runtime, workdir: &Path, selection: Option<BranchName>) -> Result<()> {
  let Some(branch) = selection else {
    debug!("Selection cancelled");
    return Ok(());
  };

  info!(%branch, "Switching branch");
  runtime.block_on(switch_branch(workdir, &branch))?;
  Ok(())
}

fn build_runtime() -> Result<Runtime> {
  Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to start the async runtime")
}

/// Fixed conditions print their message verbatim on stdout; anything else is
/// an unexpected error for stderr.
fn report(err: &anyhow::Error) {
  match err.downcast_ref::<GrecentError>() {
    Some(known) if known.is_user_facing() => print_failure(&known.to_string()),
    _ => print_error(&format!("{err:#}")),
  }
}
