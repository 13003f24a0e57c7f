use chrono::{FixedOffset, NaiveDate, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Offset (minutes east of UTC) whose calendar date is "today" for
    /// Lead IDs. Server local time when unset.
    pub utc_offset_minutes: Option<i32>,
    /// File of existing Lead IDs, one per line, used to restore the daily
    /// sequence at startup.
    pub seed_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            utc_offset_minutes: None,
            seed_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            utc_offset_minutes: std::env::var("LEAD_ID_UTC_OFFSET_MINUTES")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|raw| -> anyhow::Result<i32> {
                    let minutes: i32 = raw.trim().parse().map_err(|_| {
                        anyhow::anyhow!("LEAD_ID_UTC_OFFSET_MINUTES must be an integer")
                    })?;
                    if !(-1439..=1439).contains(&minutes) {
                        anyhow::bail!("LEAD_ID_UTC_OFFSET_MINUTES must be between -1439 and 1439");
                    }
                    Ok(minutes)
                })
                .transpose()?,
            seed_file: std::env::var("LEAD_ID_SEED_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        match config.utc_offset_minutes {
            Some(minutes) => tracing::info!("Lead ID dates use UTC offset {} min", minutes),
            None => tracing::debug!("Lead ID dates use server local time"),
        }
        if let Some(ref path) = config.seed_file {
            tracing::info!("Lead ID seed file configured: {}", path);
        }

        Ok(config)
    }

    /// Fixed offset for "today", if one is configured.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }

    /// Current calendar date used for Lead ID date stamps.
    pub fn today(&self) -> NaiveDate {
        match self.offset() {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => chrono::Local::now().date_naive(),
        }
    }
}
