use clap::Parser;
use tracing_subscriber::EnvFilter;

use lexrelay::cli::{self, Cli, Commands};
use lexrelay::errors::RelayError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
        Commands::Levels => {
            cli::levels::handle_levels();
            Ok(())
        }
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                RelayError::Config(_) => 2,
                RelayError::Io(_) => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
