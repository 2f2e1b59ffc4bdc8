//! SQL handle held by the bot.
//!
//! The handle is opened and verified at startup and kept in the bot context.
//! Nothing reads or writes through it yet, so there is no schema.

use redditcord_core::{CoreError, DatabaseError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};


const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct Database {
    connection_string: String,
    pool: Option<SqlitePool>,
}

impl Database {
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            pool: None,
        }
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub async fn connect(&mut self) -> Result<(), CoreError> {
        let options = SqliteConnectOptions::from_str(&self.connection_string)
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!("Connected to database at {}", self.connection_string);
        self.pool = Some(pool);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.pool.as_ref().is_some_and(|pool| !pool.is_closed())
    }

    pub fn pool(&self) -> Result<&SqlitePool, CoreError> {
        self.pool
            .as_ref()
            .filter(|pool| !pool.is_closed())
            .ok_or_else(|| DatabaseError::NotConnected.into())
    }

    /// Round-trips a trivial query to prove the handle is usable.
    pub async fn ping(&self) -> Result<(), CoreError> {
        let pool = self.pool()?;
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(DatabaseError::from)?;
        debug!("Database ping succeeded");
        Ok(())
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Database connection closed");
        }
    }
}
