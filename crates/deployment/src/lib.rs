use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use services::services::{
    category_style::CategoryStyles,
    notification::{LeadNotifier, NotificationError},
};
use thiserror::Error;
use utils::config::{ConfigError, SiteConfig};

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Everything a request handler can reach: the database, site configuration,
/// the category presentation registry and the lead notification sink.
#[async_trait]
pub trait Deployment: Clone + Send + Sync + 'static {
    /// Build from the process environment.
    async fn new() -> Result<Self, DeploymentError>;

    fn db(&self) -> &DBService;

    fn config(&self) -> &SiteConfig;

    fn category_styles(&self) -> &CategoryStyles;

    fn lead_notifier(&self) -> Arc<dyn LeadNotifier>;
}
