use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use transport_catalogue::{AppError, logging, make_base, process_requests};

#[derive(Parser, Debug)]
#[command(
    name = "transport_catalogue",
    version,
    about = "Build a transit routing index and answer queries against it",
    long_about = "Reads a JSON document from stdin.\n\n\
                  make_base builds the stop and bus catalogue together with the \
                  routing index and writes it to serialization_settings.file.\n\
                  process_requests loads that index and prints one JSON response \
                  per stat request to stdout."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index from base_requests
    #[command(name = "make_base")]
    MakeBase,
    /// Answer stat_requests from a previously built index
    #[command(name = "process_requests")]
    ProcessRequests,
}

fn run(command: &Command) -> Result<(), AppError> {
    let stdin = io::stdin().lock();
    match command {
        Command::MakeBase => make_base(stdin).map(|_| ()),
        Command::ProcessRequests => process_requests(stdin, io::stdout().lock()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logger();

    match run(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
