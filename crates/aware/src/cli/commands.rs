//! CLI command definitions.

use aware::{AwareConfig, AwareResult, ChannelId, GuildId, PunishmentType, RoleId, UserId};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Aware - anti-nuke protection for Discord guilds
#[derive(Parser, Debug)]
#[command(name = "aware")]
#[command(about = "Anti-nuke protection for Discord guilds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file replacing the user and working-directory files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl Cli {
    /// Configuration from `--config` or the standard sources.
    pub fn load_config(&self) -> AwareResult<AwareConfig> {
        let config = match &self.config {
            Some(path) => AwareConfig::from_file(path)?,
            None => AwareConfig::load()?,
        };
        Ok(config)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and start protecting guilds
    Run {
        /// Discord bot token
        #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Guild policy commands
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Whitelist commands
    #[command(subcommand)]
    Exempt(ExemptCommands),
}

/// Guild policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// Show the stored policy and its status
    Show {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Record log destinations and the quarantine role, and enable detection
    Setup {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// Detection log channel ID
        #[arg(long)]
        log_channel: Option<ChannelId>,

        /// Moderation log channel ID
        #[arg(long)]
        mod_log_channel: Option<ChannelId>,

        /// Detection log webhook URL
        #[arg(long)]
        log_webhook: Option<String>,

        /// Moderation log webhook URL
        #[arg(long)]
        mod_log_webhook: Option<String>,

        /// Quarantine role ID
        #[arg(long)]
        quarantine_role: Option<RoleId>,
    },

    /// Set the per-minute and per-hour action limits
    SetLimits {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// Actions allowed per minute
        #[arg(long)]
        per_minute: u32,

        /// Actions allowed per hour
        #[arg(long)]
        per_hour: u32,
    },

    /// Set the punishment: kick, ban or quarantine
    SetPunishment {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// Punishment type
        punishment: PunishmentType,
    },

    /// Turn detection on
    Enable {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,
    },

    /// Turn detection off
    Disable {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,
    },

    /// Delete the guild's policy
    Teardown {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,
    },
}

/// Whitelist subcommands
#[derive(Subcommand, Debug)]
pub enum ExemptCommands {
    /// Whitelist a user
    Add {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// User mention (<@id>) or ID
        #[arg(long, value_parser = parse_user)]
        user: UserId,

        /// ID of the administrator granting the exemption
        #[arg(long)]
        by: UserId,
    },

    /// Remove a user from the whitelist
    Remove {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// User mention (<@id>) or ID
        #[arg(long, value_parser = parse_user)]
        user: UserId,
    },

    /// List whitelisted users
    List {
        /// Guild ID
        #[arg(long)]
        guild: GuildId,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

fn parse_user(input: &str) -> Result<UserId, String> {
    UserId::parse_mention(input).ok_or_else(|| format!("Invalid user mention or ID: {}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exempt_add_accepts_mentions() {
        let cli = Cli::try_parse_from([
            "aware", "exempt", "add", "--guild", "10", "--user", "<@!42>", "--by", "7",
        ])
        .expect("parses");

        match cli.command {
            Commands::Exempt(ExemptCommands::Add { guild, user, by }) => {
                assert_eq!(guild, GuildId::new(10));
                assert_eq!(user, UserId::new(42));
                assert_eq!(by, UserId::new(7));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_punishment_is_case_insensitive() {
        let cli = Cli::try_parse_from([
            "aware",
            "policy",
            "set-punishment",
            "--guild",
            "10",
            "BAN",
        ])
        .expect("parses");

        assert!(matches!(
            cli.command,
            Commands::Policy(PolicyCommands::SetPunishment {
                punishment: PunishmentType::Ban,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_user() {
        assert!(
            Cli::try_parse_from([
                "aware", "exempt", "remove", "--guild", "10", "--user", "<#42>",
            ])
            .is_err()
        );
    }
}
