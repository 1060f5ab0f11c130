//! chatmd CLI - chat message markdown renderer.
//!
//! Provides commands for:
//! - `render`: Render chat markdown to an HTML fragment
//! - `reply`: Wrap a bot answer in the JSON response envelope
//! - `show`: Turn a JSON response envelope into the HTML shown to the user
//! - `suggestions`: Clean a list of suggested questions
//! - `history`: Render a stored conversation

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{HistoryArgs, RenderArgs, ReplyArgs, ShowArgs, SuggestionsArgs};
use output::Output;

/// chatmd - safe HTML for chat-message markdown.
#[derive(Parser)]
#[command(name = "chatmd", version, about)]
struct Cli {
    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render chat markdown to HTML.
    Render(RenderArgs),
    /// Render a bot answer and print the JSON response envelope.
    Reply(ReplyArgs),
    /// Print the bot message HTML for a JSON response envelope.
    Show(ShowArgs),
    /// Print one cleaned suggested question per line.
    Suggestions(SuggestionsArgs),
    /// Print a stored conversation as user and bot message blocks.
    History(HistoryArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG (errors only when unset)
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Reply(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Suggestions(args) => args.execute(),
        Commands::History(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
