//! Configuration module
//!
//! Application configuration is read from the environment (optionally seeded from a
//! `.env` file). Required variables that are missing are collected and reported
//! together so a misconfigured deployment fails with one complete message.

use std::env;
use std::path::PathBuf;

const DEFAULT_STORAGE_PATH: &str = "storage";
const DB_MAX_CONNECTIONS: u32 = 5;
const MAX_FILE_SIZE_MB: usize = 16;
const THUMBNAIL_WIDTH: u32 = 240;
const THUMBNAIL_QUALITY: u8 = 90;
const DOWNSAMPLE_FACTOR: u32 = 8;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpg,jpeg,png,gif,webp,bmp";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app_port: u16,
    pub database_path: String,
    pub storage_path: PathBuf,
    pub environment: String,
    pub db_max_connections: u32,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
    pub downsample_factor: u32,
}

impl Config {
    /// Load configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing_vars: Vec<&str> = Vec::new();
        let mut required = |key: &'static str| -> Option<String> {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => Some(value),
                None => {
                    missing_vars.push(key);
                    None
                }
            }
        };

        let app_port = required("APP_PORT");
        let database_path = required("DB_PATH");

        if !missing_vars.is_empty() {
            return Err(anyhow::anyhow!(
                "missing required environment variables: {:?}",
                missing_vars
            ));
        }

        let app_port = app_port
            .unwrap_or_default()
            .trim()
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid APP_PORT value: {}", e))?;

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let storage_path = lookup("STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());

        let max_file_size_mb: usize =
            parse_or_default(&lookup, "MAX_FILE_SIZE_MB", MAX_FILE_SIZE_MB)?;
        let max_file_size_bytes = max_file_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB too large: {}", max_file_size_mb))?;

        let allowed_extensions = lookup("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_EXTENSIONS.to_string())
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            app_port,
            database_path: database_path.unwrap_or_default(),
            storage_path: PathBuf::from(storage_path),
            environment,
            db_max_connections: parse_or_default(
                &lookup,
                "DB_MAX_CONNECTIONS",
                DB_MAX_CONNECTIONS,
            )?,
            max_file_size_bytes,
            allowed_extensions,
            thumbnail_width: parse_or_default(&lookup, "THUMBNAIL_WIDTH", THUMBNAIL_WIDTH)?,
            thumbnail_quality: parse_or_default(&lookup, "THUMBNAIL_QUALITY", THUMBNAIL_QUALITY)?,
            downsample_factor: parse_or_default(&lookup, "DOWNSAMPLE_FACTOR", DOWNSAMPLE_FACTOR)?,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Directory holding original uploads.
    pub fn wallpapers_dir(&self) -> PathBuf {
        self.storage_path.join("wallpapers")
    }

    /// Directory holding generated thumbnails.
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.storage_path.join("thumbnails")
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.app_port == 0 {
            return Err(anyhow::anyhow!("APP_PORT cannot be 0"));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB cannot be 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS cannot be empty"));
        }

        if self.thumbnail_width == 0 {
            return Err(anyhow::anyhow!("THUMBNAIL_WIDTH cannot be 0"));
        }

        if !(1..=100).contains(&self.thumbnail_quality) {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_QUALITY must be between 1 and 100, got {}",
                self.thumbnail_quality
            ));
        }

        if self.downsample_factor == 0 {
            return Err(anyhow::anyhow!("DOWNSAMPLE_FACTOR cannot be 0"));
        }

        Ok(())
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {} value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("APP_PORT", "8080"), ("DB_PATH", "db.sqlite")]))
                .unwrap();

        assert_eq!(config.app_port, 8080);
        assert_eq!(config.database_path, "db.sqlite");
        assert_eq!(config.storage_path, PathBuf::from("storage"));
        assert_eq!(config.environment, "development");
        assert_eq!(config.max_file_size_bytes, 16 * 1024 * 1024);
        assert_eq!(config.thumbnail_width, 240);
        assert_eq!(config.thumbnail_quality, 90);
        assert_eq!(config.downsample_factor, 8);
        assert!(config.allowed_extensions.contains(&"png".to_string()));
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_vars_reported_together() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("APP_PORT"));
        assert!(msg.contains("DB_PATH"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("APP_PORT", "http"), ("DB_PATH", "x")]))
            .unwrap_err();
        assert!(err.to_string().contains("invalid APP_PORT value"));
    }

    #[test]
    fn test_overrides_and_directories() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_PORT", "3000"),
            ("DB_PATH", ":memory:"),
            ("STORAGE_PATH", "/srv/papes"),
            ("ENVIRONMENT", "Production"),
            ("ALLOWED_EXTENSIONS", ".PNG, jpg"),
            ("DOWNSAMPLE_FACTOR", "4"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.allowed_extensions, vec!["png", "jpg"]);
        assert_eq!(config.downsample_factor, 4);
        assert_eq!(config.wallpapers_dir(), PathBuf::from("/srv/papes/wallpapers"));
        assert_eq!(config.thumbnails_dir(), PathBuf::from("/srv/papes/thumbnails"));
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("APP_PORT", "3000"),
            ("DB_PATH", "x"),
            ("THUMBNAIL_WIDTH", "wide"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("THUMBNAIL_WIDTH"));
    }

    #[test]
    fn test_oversized_file_limit_is_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("APP_PORT", "3000"),
            ("DB_PATH", "x"),
            ("MAX_FILE_SIZE_MB", &usize::MAX.to_string()),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE_MB too large"));
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let mut config =
            Config::from_lookup(lookup_from(&[("APP_PORT", "3000"), ("DB_PATH", "x")])).unwrap();
        config.thumbnail_quality = 0;
        assert!(config.validate().is_err());

        config.thumbnail_quality = 90;
        config.downsample_factor = 0;
        assert!(config.validate().is_err());
    }
}
