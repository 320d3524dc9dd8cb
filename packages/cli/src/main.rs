mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, layouts, normalize, stats, submit, upload, ApplyArgs, NormalizeArgs, StatsArgs,
    SubmitArgs, UploadArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - Section/column page documents from the command line
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load stored page content and print it in canonical form
    Normalize(NormalizeArgs),

    /// List the section layout templates
    Layouts,

    /// Apply a JSON list of mutations to a document
    Apply(ApplyArgs),

    /// Upload an image and write its URL into an element
    Upload(UploadArgs),

    /// Send a page record to the backend
    Submit(SubmitArgs),

    /// Count sections, columns and elements
    Stats(StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Documents go to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Normalize(args) => normalize(args),
        Command::Layouts => layouts(),
        Command::Apply(args) => apply(args),
        Command::Upload(args) => upload(args, &cwd).await,
        Command::Submit(args) => submit(args, &cwd).await,
        Command::Stats(args) => stats(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
