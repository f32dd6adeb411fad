//! Guild policy command handlers.

use super::commands::{OutputFormat, PolicyCommands};
use aware::{AwareConfig, AwareResult, ConfigError, GuildPolicyManager, LogSetup, SqlitePolicyStore};
use std::sync::Arc;

/// Handle guild policy commands.
pub async fn handle_policy_command(config: &AwareConfig, cmd: PolicyCommands) -> AwareResult<()> {
    let store = SqlitePolicyStore::from_arc(aware::open(&config.database.url)?);
    let manager = GuildPolicyManager::new(Arc::new(store));

    match cmd {
        PolicyCommands::Show { guild, format } => {
            let status = manager.status(guild).await?;
            let policy = manager.view(guild).await?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::json!({ "status": status, "policy": policy });
                    let json = serde_json::to_string_pretty(&json)
                        .map_err(|e| ConfigError::new(e.to_string()))?;
                    println!("{}", json);
                }
                OutputFormat::Human => {
                    println!("Anti-nuke status: {}", status);
                    match policy {
                        Some(policy) => {
                            println!("{:-<60}", "");
                            println!("Actions per minute: {}", policy.actions_per_minute());
                            println!("Actions per hour:   {}", policy.actions_per_hour());
                            println!("Punishment:         {}", policy.punishment());
                            println!("Quarantine role:    {}", display(policy.quarantine_role()));
                            println!("Log channel:        {}", display(policy.log_channel()));
                            println!("Mod log channel:    {}", display(policy.mod_log_channel()));
                            println!("Log webhook:        {}", configured(policy.log_webhook()));
                            println!("Mod log webhook:    {}", configured(policy.mod_log_webhook()));
                        }
                        None => println!("Fallback limits apply until the guild is set up."),
                    }
                }
            }
        }

        PolicyCommands::Setup {
            guild,
            log_channel,
            mod_log_channel,
            log_webhook,
            mod_log_webhook,
            quarantine_role,
        } => {
            let setup = LogSetup {
                log_channel,
                mod_log_channel,
                log_webhook,
                mod_log_webhook,
                quarantine_role,
            };
            manager.setup(guild, setup).await?;
            println!("Anti-nuke system has been set up for guild {}.", guild);
        }

        PolicyCommands::SetLimits {
            guild,
            per_minute,
            per_hour,
        } => {
            manager.set_limits(guild, per_minute, per_hour).await?;
            println!(
                "Action limits updated: {} per minute, {} per hour.",
                per_minute, per_hour
            );
        }

        PolicyCommands::SetPunishment { guild, punishment } => {
            manager.set_punishment(guild, punishment).await?;
            println!("Punishment type set to {}.", punishment);
        }

        PolicyCommands::Enable { guild } => {
            manager.set_enabled(guild, true).await?;
            println!("Anti-nuke enabled for guild {}.", guild);
        }

        PolicyCommands::Disable { guild } => {
            manager.set_enabled(guild, false).await?;
            println!("Anti-nuke disabled for guild {}.", guild);
        }

        PolicyCommands::Teardown { guild } => {
            if manager.teardown(guild).await? {
                println!("Anti-nuke configuration deleted for guild {}.", guild);
            } else {
                println!("Guild {} had no anti-nuke configuration.", guild);
            }
        }
    }

    Ok(())
}

fn display<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "not set".to_string(), |v| v.to_string())
}

fn configured(value: &Option<String>) -> &'static str {
    if value.is_some() { "configured" } else { "not set" }
}
