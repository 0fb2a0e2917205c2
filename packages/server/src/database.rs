use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{rating, recipe};

/// Connect with the configured pool settings and bring the schema up to date.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    sync_schema(&db).await?;
    ensure_indexes(&db).await;

    Ok(db)
}

/// Create or alter tables to match the entity definitions.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.get_schema_registry("pantry_server::entity::*")
        .sync(db)
        .await
}

/// Secondary indexes for the owner and recipe lookups. Failures are logged, not fatal.
pub async fn ensure_indexes(db: &DatabaseConnection) {
    let builder = db.get_database_backend();

    let indexes = [
        (
            "idx_recipe_owner_email",
            Index::create()
                .if_not_exists()
                .name("idx_recipe_owner_email")
                .table(recipe::Entity)
                .col(recipe::Column::OwnerEmail)
                .to_owned(),
        ),
        (
            "idx_rating_recipe_id",
            Index::create()
                .if_not_exists()
                .name("idx_rating_recipe_id")
                .table(rating::Entity)
                .col(rating::Column::RecipeId)
                .to_owned(),
        ),
    ];

    for (name, stmt) in indexes {
        match db.execute_raw(builder.build(&stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }
}
