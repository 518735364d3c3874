mod file_config;

pub use file_config::{AuthConfig, FileConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// Values coming from the command line (or their env fallbacks).
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub hash_cost: u32,
    pub jwt_secret: Option<String>,
    pub jwt_refresh_secret: Option<String>,
    pub token_expire_time: String,
    pub token_refresh_expire_time: String,
    pub log_dir: PathBuf,
    pub log_max_file_size_kb: u64,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: PathBuf,
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// When absent the stores live in memory.
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub hash_cost: u32,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file.db_dir.map(PathBuf::from).or_else(|| cli.db_dir.clone());
        if let Some(dir) = &db_dir {
            if !dir.exists() {
                bail!("Database directory does not exist: {:?}", dir);
            }
            if !dir.is_dir() {
                bail!("db_dir is not a directory: {:?}", dir);
            }
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => parse_logging_level(&s)
                .ok_or_else(|| anyhow!("Invalid logging_level in config file: {}", s))?,
            None => cli.logging_level.clone(),
        };

        let hash_cost = file.hash_cost.unwrap_or(cli.hash_cost);
        if hash_cost == 0 {
            bail!("hash_cost must be at least 1");
        }

        let auth_file = file.auth.unwrap_or_default();
        let access_secret = auth_file
            .jwt_secret
            .or_else(|| cli.jwt_secret.clone())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow!("JWT secret must be specified via --jwt-secret, JWT_SECRET_KEY or in config file")
            })?;
        let refresh_secret = auth_file
            .jwt_refresh_secret
            .or_else(|| cli.jwt_refresh_secret.clone())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow!("JWT refresh secret must be specified via --jwt-refresh-secret, JWT_SECRET_REFRESH_KEY or in config file")
            })?;
        let access_ttl = auth_file
            .token_expire_time
            .unwrap_or_else(|| cli.token_expire_time.clone());
        let refresh_ttl = auth_file
            .token_refresh_expire_time
            .unwrap_or_else(|| cli.token_refresh_expire_time.clone());
        let auth = AuthSettings {
            access_secret,
            refresh_secret,
            access_token_ttl: parse_duration(&access_ttl)
                .with_context(|| "Invalid token expire time")?,
            refresh_token_ttl: parse_duration(&refresh_ttl)
                .with_context(|| "Invalid refresh token expire time")?,
        };

        let log = LogSettings {
            dir: file
                .log_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| cli.log_dir.clone()),
            max_file_size_bytes: file
                .log_max_file_size_kb
                .unwrap_or(cli.log_max_file_size_kb)
                * 1024,
        };

        Ok(Self {
            db_dir,
            port,
            logging_level,
            hash_cost,
            auth,
            log,
        })
    }

    pub fn library_db_path(&self) -> Option<PathBuf> {
        self.db_dir.as_ref().map(|dir| dir.join("library.db"))
    }

    pub fn user_db_path(&self) -> Option<PathBuf> {
        self.db_dir.as_ref().map(|dir| dir.join("user.db"))
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

/// Accepts `<n>s`, `<n>m`, `<n>h`, `<n>d` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    let (digits, multiplier) = match s.char_indices().last() {
        Some((i, 's')) => (&s[..i], 1),
        Some((i, 'm')) => (&s[..i], 60),
        Some((i, 'h')) => (&s[..i], 60 * 60),
        Some((i, 'd')) => (&s[..i], 24 * 60 * 60),
        Some(_) => (s, 1),
        None => bail!("Empty duration"),
    };
    let amount: u64 = digits
        .parse()
        .with_context(|| format!("Unparsable duration '{}'", s))?;
    if amount == 0 {
        bail!("Duration '{}' must be positive", s);
    }
    Ok(Duration::from_secs(amount * multiplier))
}
