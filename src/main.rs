use clap::Parser;

use hempboard::adapter::inbound::cli::command::{Cli, Commands};
use hempboard::adapter::inbound::cli::{check, load, output, show};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Load(args) => load::run(args).await,
        Commands::Show(args) => show::run(args).await,
        Commands::Check(args) => check::run(args).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
