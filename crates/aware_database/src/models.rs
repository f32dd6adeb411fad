//! Diesel models for the anti-nuke tables.

use crate::schema::{antinuke_config, antinuke_whitelist};
use aware_core::{ChannelId, ExemptionEntry, GuildId, GuildPolicy, PunishmentType, RoleId, UserId};
use aware_error::{DatabaseError, DatabaseErrorKind};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

/// Database row for the antinuke_config table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = antinuke_config)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PolicyRow {
    /// Guild snowflake.
    pub guild_id: String,
    /// Detection log channel.
    pub logs_channel_id: Option<String>,
    /// Moderation log channel.
    pub mod_logs_channel_id: Option<String>,
    /// Per-minute threshold.
    pub actions_per_minute: i32,
    /// Per-hour threshold.
    pub actions_per_hour: i32,
    /// `kick`, `ban` or `quarantine`.
    pub punishment_type: String,
    /// Quarantine role snowflake.
    pub quarantine_role_id: Option<String>,
    /// Detection log webhook URL.
    pub webhook_id: Option<String>,
    /// Moderation log webhook URL.
    pub mod_webhook_id: Option<String>,
    /// Detection switch.
    pub enabled: bool,
}

/// Database row for the antinuke_whitelist table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = antinuke_whitelist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExemptionRow {
    /// Guild snowflake.
    pub guild_id: String,
    /// Exempt user snowflake.
    pub user_id: String,
    /// Granting user snowflake.
    pub added_by: String,
    /// Grant time (UTC).
    pub added_at: NaiveDateTime,
}

#[track_caller]
fn parse_id<T: FromStr>(column: &str, raw: &str) -> Result<T, DatabaseError> {
    raw.parse().map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::InvalidData(format!(
            "{} is not a snowflake: {:?}",
            column, raw
        )))
    })
}

#[track_caller]
fn parse_optional_id<T: FromStr>(column: &str, raw: Option<&str>) -> Result<Option<T>, DatabaseError> {
    raw.map(|raw| parse_id(column, raw)).transpose()
}

#[track_caller]
fn threshold(column: &str, raw: i32) -> Result<u32, DatabaseError> {
    match u32::try_from(raw) {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(DatabaseError::new(DatabaseErrorKind::InvalidData(format!(
            "{} must be at least 1: {}",
            column, raw
        )))),
    }
}

#[track_caller]
fn threshold_column(column: &str, value: u32) -> Result<i32, DatabaseError> {
    i32::try_from(value).map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::InvalidData(format!(
            "{} does not fit the column: {}",
            column, value
        )))
    })
}

impl TryFrom<&GuildPolicy> for PolicyRow {
    type Error = DatabaseError;

    fn try_from(policy: &GuildPolicy) -> Result<Self, Self::Error> {
        Ok(Self {
            guild_id: policy.guild_id().to_string(),
            logs_channel_id: policy.log_channel().map(|id| id.to_string()),
            mod_logs_channel_id: policy.mod_log_channel().map(|id| id.to_string()),
            actions_per_minute: threshold_column("actions_per_minute", *policy.actions_per_minute())?,
            actions_per_hour: threshold_column("actions_per_hour", *policy.actions_per_hour())?,
            punishment_type: policy.punishment().to_string(),
            quarantine_role_id: policy.quarantine_role().map(|id| id.to_string()),
            webhook_id: policy.log_webhook().clone(),
            mod_webhook_id: policy.mod_log_webhook().clone(),
            enabled: *policy.enabled(),
        })
    }
}

impl TryFrom<PolicyRow> for GuildPolicy {
    type Error = DatabaseError;

    fn try_from(row: PolicyRow) -> Result<Self, Self::Error> {
        let punishment = PunishmentType::from_str(&row.punishment_type).map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::InvalidData(format!(
                "unknown punishment type: {:?}",
                row.punishment_type
            )))
        })?;

        GuildPolicy::builder()
            .guild_id(parse_id::<GuildId>("guild_id", &row.guild_id)?)
            .actions_per_minute(threshold("actions_per_minute", row.actions_per_minute)?)
            .actions_per_hour(threshold("actions_per_hour", row.actions_per_hour)?)
            .punishment(punishment)
            .quarantine_role(parse_optional_id::<RoleId>("quarantine_role_id", row.quarantine_role_id.as_deref())?)
            .log_channel(parse_optional_id::<ChannelId>("logs_channel_id", row.logs_channel_id.as_deref())?)
            .mod_log_channel(parse_optional_id::<ChannelId>(
                "mod_logs_channel_id",
                row.mod_logs_channel_id.as_deref(),
            )?)
            .log_webhook(row.webhook_id)
            .mod_log_webhook(row.mod_webhook_id)
            .enabled(row.enabled)
            .build()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::InvalidData(e.to_string())))
    }
}

impl From<&ExemptionEntry> for ExemptionRow {
    fn from(entry: &ExemptionEntry) -> Self {
        Self {
            guild_id: entry.guild_id().to_string(),
            user_id: entry.user_id().to_string(),
            added_by: entry.granted_by().to_string(),
            added_at: entry.granted_at().naive_utc(),
        }
    }
}

impl TryFrom<ExemptionRow> for ExemptionEntry {
    type Error = DatabaseError;

    fn try_from(row: ExemptionRow) -> Result<Self, Self::Error> {
        Ok(ExemptionEntry::new(
            parse_id::<GuildId>("guild_id", &row.guild_id)?,
            parse_id::<UserId>("user_id", &row.user_id)?,
            parse_id::<UserId>("added_by", &row.added_by)?,
            row.added_at.and_utc(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aware_core::ActionLimits;

    #[test]
    fn test_policy_row_round_trip() {
        let policy = GuildPolicy::new(GuildId::new(1))
            .with_punishment(PunishmentType::Kick)
            .with_quarantine_role(RoleId::new(2))
            .with_log_channel(ChannelId::new(3))
            .with_log_webhook("https://discord.com/api/webhooks/4/t");
        let row = PolicyRow::try_from(&policy).unwrap();
        assert_eq!(row.punishment_type, "kick");
        assert_eq!(GuildPolicy::try_from(row).unwrap(), policy);
    }

    #[test]
    fn test_corrupt_row_is_invalid_data() {
        let mut row = PolicyRow::try_from(&GuildPolicy::new(GuildId::new(1))).unwrap();
        row.punishment_type = "mute".to_string();
        let err = GuildPolicy::try_from(row).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::InvalidData(_)));

        let mut row = PolicyRow::try_from(&GuildPolicy::new(GuildId::new(1))).unwrap();
        row.actions_per_hour = -1;
        assert!(GuildPolicy::try_from(row).is_err());
    }

    #[test]
    fn test_zero_threshold_row_is_invalid_data() {
        let mut row = PolicyRow::try_from(&GuildPolicy::new(GuildId::new(1))).unwrap();
        row.actions_per_minute = 0;
        let err = GuildPolicy::try_from(row).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::InvalidData(_)));
    }

    #[test]
    fn test_oversized_threshold_is_rejected() {
        let policy = GuildPolicy::new(GuildId::new(1))
            .with_limits(ActionLimits::new(u32::MAX, u32::MAX).unwrap());
        let err = PolicyRow::try_from(&policy).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::InvalidData(_)));
    }
}
