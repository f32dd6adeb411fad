//! Aware CLI binary.
//!
//! - `aware run` connects to Discord and protects every guild the bot is in
//! - `aware policy ...` inspects and edits guild policies
//! - `aware exempt ...` manages the per-guild whitelist

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_exempt_command, handle_policy_command, run_bot};

    // Load .env before reading DISCORD_TOKEN or AWARE__ overrides
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    aware::init_tracing(cli.json_logs).map_err(|e| -> Box<dyn std::error::Error> { e })?;

    let config = cli.load_config()?;

    match cli.command {
        Commands::Run { token } => run_bot(&config, &token).await?,
        Commands::Policy(policy_cmd) => handle_policy_command(&config, policy_cmd).await?,
        Commands::Exempt(exempt_cmd) => handle_exempt_command(&config, exempt_cmd).await?,
    }

    Ok(())
}
