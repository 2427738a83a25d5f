mod prompt;

use clap::Parser;
use crossterm::tty::IsTty;
use prompt::TerminalPrompter;
use std::io;
use tmwizard::{write_machine, Session, WizardError};
use tracing::Level;

/// Interactively define a single-tape Turing machine and save it as JSON.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Print diagnostic logs to stderr (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the stderr log subscriber at the level chosen by `-v` flags.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Runs the session on the process's terminal, then appends the machine to the chosen file.
fn run() -> Result<(), WizardError> {
    let stdout = io::stdout();
    let styled = stdout.is_tty();
    let prompter = TerminalPrompter::new(io::stdin().lock(), stdout.lock(), styled);

    let outcome = Session::new(prompter).run()?;
    write_machine(&outcome.output, &outcome.machine)?;

    println!(
        "Successfully wrote Turing Machine to {}.",
        outcome.output.display()
    );
    Ok(())
}
