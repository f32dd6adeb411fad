//! Whitelist command handlers.

use super::commands::{ExemptCommands, OutputFormat};
use aware::{AwareConfig, AwareResult, ConfigError, ExemptionRegistry, SqliteExemptionStore};
use std::sync::Arc;

/// Handle whitelist commands.
pub async fn handle_exempt_command(config: &AwareConfig, cmd: ExemptCommands) -> AwareResult<()> {
    let store = SqliteExemptionStore::from_arc(aware::open(&config.database.url)?);
    let registry = ExemptionRegistry::new(Arc::new(store));

    match cmd {
        ExemptCommands::Add { guild, user, by } => {
            registry.grant(guild, user, by).await?;
            println!("Added {} to the whitelist.", user.mention());
        }

        ExemptCommands::Remove { guild, user } => {
            if registry.revoke(guild, user).await? {
                println!("Removed {} from the whitelist.", user.mention());
            } else {
                println!("{} was not whitelisted.", user.mention());
            }
        }

        ExemptCommands::List { guild, format } => {
            let entries = registry.list(guild).await?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&entries)
                        .map_err(|e| ConfigError::new(e.to_string()))?;
                    println!("{}", json);
                }
                OutputFormat::Human if entries.is_empty() => {
                    println!("No users are whitelisted.");
                }
                OutputFormat::Human => {
                    println!("Whitelisted users:");
                    println!("{:-<60}", "");
                    for entry in &entries {
                        println!(
                            "{}  added by {} on {}",
                            entry.user_id().mention(),
                            entry.granted_by().mention(),
                            entry.granted_at().format("%Y-%m-%d %H:%M UTC")
                        );
                    }
                    println!("Total: {} users", entries.len());
                }
            }
        }
    }

    Ok(())
}
