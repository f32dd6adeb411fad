//! Per-guild detection policy.

use crate::{ChannelId, GuildId, RoleId};
use aware_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Per-minute threshold used when a guild has no stored policy.
pub const FALLBACK_ACTIONS_PER_MINUTE: u32 = 2;
/// Per-hour threshold used when a guild has no stored policy.
pub const FALLBACK_ACTIONS_PER_HOUR: u32 = 10;
/// Per-minute threshold written by `EnsureDefault`.
pub const DEFAULT_ACTIONS_PER_MINUTE: u32 = 5;
/// Per-hour threshold written by `EnsureDefault`.
pub const DEFAULT_ACTIONS_PER_HOUR: u32 = 20;

/// Sanction applied once a user exceeds a threshold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PunishmentType {
    /// Remove the member from the guild.
    Kick,
    /// Ban the member.
    Ban,
    /// Strip every role and assign the quarantine role.
    #[default]
    Quarantine,
}

/// Action-rate thresholds for one guild. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActionLimits {
    per_minute: u32,
    per_hour: u32,
}

impl ActionLimits {
    /// Thresholds in effect when no policy row exists.
    pub const FALLBACK: Self = Self {
        per_minute: FALLBACK_ACTIONS_PER_MINUTE,
        per_hour: FALLBACK_ACTIONS_PER_HOUR,
    };

    /// Thresholds written for a freshly configured guild.
    pub const DEFAULT: Self = Self {
        per_minute: DEFAULT_ACTIONS_PER_MINUTE,
        per_hour: DEFAULT_ACTIONS_PER_HOUR,
    };

    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if either threshold is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use aware_core::ActionLimits;
    ///
    /// assert!(ActionLimits::new(3, 12).is_ok());
    /// assert!(ActionLimits::new(0, 12).is_err());
    /// ```
    #[track_caller]
    pub fn new(per_minute: u32, per_hour: u32) -> Result<Self, ConfigError> {
        if per_minute == 0 || per_hour == 0 {
            return Err(ConfigError::new("Values must be greater than 0"));
        }
        Ok(Self {
            per_minute,
            per_hour,
        })
    }

    /// Maximum admitted actions per 60 second window.
    pub fn per_minute(&self) -> u32 {
        self.per_minute
    }

    /// Maximum admitted actions per 3600 second window.
    pub fn per_hour(&self) -> u32 {
        self.per_hour
    }
}

/// Durable configuration for one guild.
///
/// Thresholds only change through [`GuildPolicy::with_limits`] or a builder
/// that rejects zero, so a stored policy always admits a first action.
///
/// # Examples
///
/// ```
/// use aware_core::{GuildId, GuildPolicy, PunishmentType};
///
/// let policy = GuildPolicy::new(GuildId::new(1));
/// assert_eq!(*policy.actions_per_minute(), 5);
/// assert_eq!(*policy.punishment(), PunishmentType::Quarantine);
/// assert!(*policy.enabled());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GuildPolicy {
    /// Guild this policy belongs to.
    #[setters(skip)]
    guild_id: GuildId,
    /// Per-minute threshold.
    #[builder(default = "DEFAULT_ACTIONS_PER_MINUTE")]
    #[setters(skip)]
    actions_per_minute: u32,
    /// Per-hour threshold.
    #[builder(default = "DEFAULT_ACTIONS_PER_HOUR")]
    #[setters(skip)]
    actions_per_hour: u32,
    /// Sanction for violators.
    #[builder(default)]
    punishment: PunishmentType,
    /// Role assigned on quarantine.
    #[builder(default)]
    #[setters(strip_option)]
    quarantine_role: Option<RoleId>,
    /// Channel the detection log is shown in.
    #[builder(default)]
    #[setters(strip_option)]
    log_channel: Option<ChannelId>,
    /// Channel the moderation log is shown in.
    #[builder(default)]
    #[setters(strip_option)]
    mod_log_channel: Option<ChannelId>,
    /// Webhook URL receiving detection logs.
    #[builder(default)]
    #[setters(strip_option, into)]
    log_webhook: Option<String>,
    /// Webhook URL receiving moderation logs.
    #[builder(default)]
    #[setters(strip_option, into)]
    mod_log_webhook: Option<String>,
    /// Whether detection runs for this guild.
    #[builder(default = "true")]
    enabled: bool,
}

impl GuildPolicy {
    /// Default row for a guild: 5/20, quarantine, enabled, nothing wired up.
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            actions_per_minute: DEFAULT_ACTIONS_PER_MINUTE,
            actions_per_hour: DEFAULT_ACTIONS_PER_HOUR,
            punishment: PunishmentType::default(),
            quarantine_role: None,
            log_channel: None,
            mod_log_channel: None,
            log_webhook: None,
            mod_log_webhook: None,
            enabled: true,
        }
    }

    /// Builder starting from the defaults.
    pub fn builder() -> GuildPolicyBuilder {
        GuildPolicyBuilder::default()
    }

    /// Thresholds as a pair.
    pub fn limits(&self) -> ActionLimits {
        ActionLimits {
            per_minute: self.actions_per_minute,
            per_hour: self.actions_per_hour,
        }
    }

    /// Replace both thresholds at once.
    pub fn with_limits(self, limits: ActionLimits) -> Self {
        Self {
            actions_per_minute: limits.per_minute,
            actions_per_hour: limits.per_hour,
            ..self
        }
    }
}

impl GuildPolicyBuilder {
    fn validate(&self) -> Result<(), String> {
        let per_minute = self.actions_per_minute.unwrap_or(DEFAULT_ACTIONS_PER_MINUTE);
        let per_hour = self.actions_per_hour.unwrap_or(DEFAULT_ACTIONS_PER_HOUR);
        ActionLimits::new(per_minute, per_hour)
            .map(|_| ())
            .map_err(|e| e.message)
    }
}
