//! Snowflake identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw snowflake.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Raw snowflake value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

snowflake!(
    /// Guild (server) identifier.
    GuildId
);
snowflake!(
    /// User identifier.
    UserId
);
snowflake!(
    /// Role identifier.
    RoleId
);
snowflake!(
    /// Channel identifier.
    ChannelId
);

impl UserId {
    /// Mention markup for this user, e.g. `<@123>`.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }

    /// Parses `<@123>`, `<@!123>` or a bare `123`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aware_core::UserId;
    ///
    /// assert_eq!(UserId::parse_mention("<@!42>"), Some(UserId::new(42)));
    /// assert_eq!(UserId::parse_mention("42"), Some(UserId::new(42)));
    /// assert_eq!(UserId::parse_mention("<#42>"), None);
    /// ```
    pub fn parse_mention(input: &str) -> Option<Self> {
        let input = input.trim();
        let raw = match input.strip_prefix("<@") {
            Some(rest) => rest.strip_suffix('>')?.trim_start_matches('!'),
            None => input,
        };
        raw.parse().ok()
    }
}

impl RoleId {
    /// Mention markup for this role, e.g. `<@&123>`.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl ChannelId {
    /// Mention markup for this channel, e.g. `<#123>`.
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}
