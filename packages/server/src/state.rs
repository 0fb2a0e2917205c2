use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::IdentityProvider;
use crate::config::AppConfig;
use crate::services::RecommendationClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub identity: Arc<dyn IdentityProvider>,
    pub recommendations: RecommendationClient,
}
