use std::sync::Arc;

use async_trait::async_trait;
use db::DBService;
use deployment::{Deployment, DeploymentError};
use services::services::{
    category_style::CategoryStyles,
    notification::{LeadNotifier, notifier_from_config},
};
use tracing::info;
use utils::config::SiteConfig;

#[derive(Clone)]
pub struct LocalDeployment {
    db: DBService,
    config: Arc<SiteConfig>,
    category_styles: Arc<CategoryStyles>,
    lead_notifier: Arc<dyn LeadNotifier>,
}

impl LocalDeployment {
    /// Assemble a deployment from already-built parts.
    pub fn with_parts(
        db: DBService,
        config: SiteConfig,
        category_styles: CategoryStyles,
        lead_notifier: Arc<dyn LeadNotifier>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            category_styles: Arc::new(category_styles),
            lead_notifier,
        }
    }
}

#[async_trait]
impl Deployment for LocalDeployment {
    async fn new() -> Result<Self, DeploymentError> {
        let config = SiteConfig::from_env()?;
        let db = DBService::new(&config.database_url).await?;
        let lead_notifier = notifier_from_config(&config.notification)?;
        info!(
            canonical_host = %config.canonical_host,
            limits = ?config.limits,
            "Deployment configured"
        );

        Ok(Self::with_parts(
            db,
            config,
            CategoryStyles::default(),
            lead_notifier,
        ))
    }

    fn db(&self) -> &DBService {
        &self.db
    }

    fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn category_styles(&self) -> &CategoryStyles {
        &self.category_styles
    }

    fn lead_notifier(&self) -> Arc<dyn LeadNotifier> {
        self.lead_notifier.clone()
    }
}
