//! SQLite-backed exemption store.

use crate::schema::antinuke_whitelist;
use crate::{ExemptionRow, SharedConnection};
use async_trait::async_trait;
use aware_core::{ExemptionEntry, GuildId, UserId};
use aware_error::{AwareResult, DatabaseError};
use aware_interface::ExemptionStore;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

/// Exemption store over the antinuke_whitelist table.
#[derive(Clone)]
pub struct SqliteExemptionStore {
    conn: SharedConnection,
}

impl SqliteExemptionStore {
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
impl ExemptionStore for SqliteExemptionStore {
    #[instrument(skip(self), fields(guild = %guild, user = %user))]
    async fn is_exempt(&self, guild: GuildId, user: UserId) -> AwareResult<bool> {
        let mut conn = self.conn.lock().await;

        let exists = diesel::select(diesel::dsl::exists(
            antinuke_whitelist::table.find((guild.to_string(), user.to_string())),
        ))
        .get_result::<bool>(&mut *conn)
        .map_err(DatabaseError::from)?;

        Ok(exists)
    }

    #[instrument(skip(self, entry), fields(guild = %entry.guild_id(), user = %entry.user_id()))]
    async fn add(&self, entry: &ExemptionEntry) -> AwareResult<()> {
        let mut conn = self.conn.lock().await;
        let row = ExemptionRow::from(entry);

        diesel::insert_into(antinuke_whitelist::table)
            .values(&row)
            .on_conflict((antinuke_whitelist::guild_id, antinuke_whitelist::user_id))
            .do_update()
            .set((
                antinuke_whitelist::added_by.eq(&row.added_by),
                antinuke_whitelist::added_at.eq(row.added_at),
            ))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self), fields(guild = %guild, user = %user))]
    async fn remove(&self, guild: GuildId, user: UserId) -> AwareResult<bool> {
        let mut conn = self.conn.lock().await;

        let deleted = diesel::delete(
            antinuke_whitelist::table.find((guild.to_string(), user.to_string())),
        )
        .execute(&mut *conn)
        .map_err(DatabaseError::from)?;

        Ok(deleted > 0)
    }

    #[instrument(skip(self), fields(guild = %guild))]
    async fn list(&self, guild: GuildId) -> AwareResult<Vec<ExemptionEntry>> {
        let mut conn = self.conn.lock().await;

        let rows = antinuke_whitelist::table
            .filter(antinuke_whitelist::guild_id.eq(guild.to_string()))
            .order(antinuke_whitelist::added_at.asc())
            .select(ExemptionRow::as_select())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(rows
            .into_iter()
            .map(ExemptionEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
