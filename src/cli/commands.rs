use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lexrelay", version, about = "Streaming LLM relay for Lexile-graded text rewrites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay server
    Serve(ServeArgs),
    /// Print the reading-level catalog
    Levels,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port (falls back to $PORT, then 8080)
    #[arg(short, long)]
    pub port: Option<u16>,
}
