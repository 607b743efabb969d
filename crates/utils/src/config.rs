//! Site configuration read from the process environment.

use std::{env, str::FromStr};

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Result-count caps for the listing read paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimits {
    pub guide: i64,
    pub related: i64,
    pub cross_category: i64,
    pub search: i64,
    pub featured: i64,
    pub related_guides: usize,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            guide: 15,
            related: 4,
            cross_category: 3,
            search: 12,
            featured: 6,
            related_guides: 3,
        }
    }
}

/// Where new-lead notifications go.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Without a key, notifications are only logged.
    pub resend_api_key: Option<SecretString>,
    pub from: String,
    pub to: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from: "Best Sea to Sky <noreply@bestseatosky.com>".to_string(),
            to: "listings@bestseatosky.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Production host every other host is redirected to.
    pub canonical_host: String,
    /// Host allowed alongside the canonical one during local development.
    pub dev_host: String,
    pub limits: ListingLimits,
    pub notification: NotificationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bestseatosky.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            canonical_host: "bestseatosky.com".to_string(),
            dev_host: "localhost:3000".to_string(),
            limits: ListingLimits::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Build the config from environment variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let limits = defaults.limits;

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            canonical_host: lookup("CANONICAL_HOST").unwrap_or(defaults.canonical_host),
            dev_host: lookup("DEV_HOST").unwrap_or(defaults.dev_host),
            limits: ListingLimits {
                guide: parse_cap(&lookup, "GUIDE_LISTING_LIMIT", limits.guide)?,
                related: parse_cap(&lookup, "RELATED_LISTING_LIMIT", limits.related)?,
                cross_category: parse_cap(
                    &lookup,
                    "CROSS_CATEGORY_LISTING_LIMIT",
                    limits.cross_category,
                )?,
                search: parse_cap(&lookup, "SEARCH_RESULT_LIMIT", limits.search)?,
                featured: parse_cap(&lookup, "FEATURED_LISTING_LIMIT", limits.featured)?,
                related_guides: parse_cap(&lookup, "RELATED_GUIDE_LIMIT", limits.related_guides)?,
            },
            notification: NotificationConfig {
                resend_api_key: lookup("RESEND_API_KEY")
                    .filter(|k| !k.trim().is_empty())
                    .map(SecretString::from),
                from: lookup("LEAD_NOTIFY_FROM").unwrap_or(defaults.notification.from),
                to: lookup("LEAD_NOTIFY_TO").unwrap_or(defaults.notification.to),
            },
        })
    }

    /// `https://{canonical_host}`, used for absolute links in sitemaps and JSON-LD.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.canonical_host)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

/// Result caps must be at least 1; SQLite reads a negative `LIMIT` as unbounded.
fn parse_cap<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + From<u8>,
{
    let cap = parse_or(lookup, key, default)?;
    if cap < T::from(1) {
        return Err(ConfigError::Invalid {
            key,
            value: lookup(key).unwrap_or_default(),
        });
    }
    Ok(cap)
}
