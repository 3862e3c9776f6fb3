//! Database CRUD operations

use crate::utils::config::AppSettings;
use anyhow::Result;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, warn};

/// Key the serialized [`AppSettings`] are stored under
pub const APP_SETTINGS_KEY: &str = "app_settings";

/// Database manager
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    pool: Pool<Sqlite>,
}

impl DatabaseManager {
    /// Create new database manager
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Save setting
    pub async fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;

        debug!("Saved setting: {} = {}", key, value);
        Ok(())
    }

    /// Get setting
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Load the application settings.
    ///
    /// Missing or unreadable stored settings fall back to the defaults;
    /// only database errors are reported.
    pub async fn load_app_settings(&self) -> Result<AppSettings> {
        let Some(json) = self.get_setting(APP_SETTINGS_KEY).await? else {
            debug!("No stored settings, using defaults");
            return Ok(AppSettings::default());
        };

        match serde_json::from_str(&json) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Stored settings are unreadable ({}), using defaults", e);
                Ok(AppSettings::default())
            }
        }
    }

    /// Persist the application settings
    pub async fn save_app_settings(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.save_setting(APP_SETTINGS_KEY, &json).await
    }
}
