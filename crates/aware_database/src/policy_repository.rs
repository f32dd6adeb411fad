//! SQLite-backed policy store.

use crate::schema::antinuke_config;
use crate::{PolicyRow, SharedConnection};
use async_trait::async_trait;
use aware_core::{GuildId, GuildPolicy};
use aware_error::{AwareResult, DatabaseError};
use aware_interface::PolicyStore;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Policy store over the antinuke_config table.
#[derive(Clone)]
pub struct SqlitePolicyStore {
    conn: SharedConnection,
}

impl SqlitePolicyStore {
    /// Wrap a dedicated connection.
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Share an existing connection.
    pub fn from_arc(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl PolicyStore for SqlitePolicyStore {
    #[instrument(skip(self), fields(guild = %guild))]
    async fn get_policy(&self, guild: GuildId) -> AwareResult<Option<GuildPolicy>> {
        let mut conn = self.conn.lock().await;

        let row = antinuke_config::table
            .find(guild.to_string())
            .select(PolicyRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        Ok(row.map(GuildPolicy::try_from).transpose()?)
    }

    #[instrument(skip(self, policy), fields(guild = %policy.guild_id()))]
    async fn set_policy(&self, policy: &GuildPolicy) -> AwareResult<()> {
        let mut conn = self.conn.lock().await;
        let row = PolicyRow::try_from(policy)?;

        diesel::insert_into(antinuke_config::table)
            .values(&row)
            .on_conflict(antinuke_config::guild_id)
            .do_update()
            .set(&row)
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        debug!("Policy stored");
        Ok(())
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn ensure_default(&self, guild: GuildId) -> AwareResult<GuildPolicy> {
        let mut conn = self.conn.lock().await;

        let inserted = diesel::insert_into(antinuke_config::table)
            .values(&PolicyRow::try_from(&GuildPolicy::new(guild))?)
            .on_conflict_do_nothing()
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;
        if inserted > 0 {
            debug!("Inserted default policy");
        }

        let row = antinuke_config::table
            .find(guild.to_string())
            .select(PolicyRow::as_select())
            .first(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(GuildPolicy::try_from(row)?)
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn delete_policy(&self, guild: GuildId) -> AwareResult<bool> {
        let mut conn = self.conn.lock().await;

        let deleted = diesel::delete(antinuke_config::table.find(guild.to_string()))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(deleted > 0)
    }
}
