mod cli;

use clap::{Parser, Subcommand};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify contacts against a ligand or chains and rank the interacting residues
    Contacts(cli::contacts::Args),

    /// Summarize all contacts in an Arpeggio output file
    Summary(cli::summary::Args),

    /// Compare two sets of contacts, e.g. predicted vs experimental
    Compare(cli::compare::Args),
}

fn main() {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let res = match &args.command {
        Commands::Contacts(args) => cli::contacts::run(args),
        Commands::Summary(args) => cli::summary::run(args),
        Commands::Compare(args) => cli::compare::run(args),
    };

    if let Err(e) = res {
        error!("{e}");
        std::process::exit(1);
    }
}
