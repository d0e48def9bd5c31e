//! User Directory Service entry point
//!
//! REST API for the user directory. Reads configuration from a TOML
//! file (~/.config/user-directory/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use user_directory::application::UserDirectory;
use user_directory::config::AppConfig;
use user_directory::infrastructure::cache::RedisDetailCache;
use user_directory::infrastructure::crypto::jwt::JwtConfig;
use user_directory::infrastructure::database::migrator::Migrator;
use user_directory::infrastructure::database::repositories::{
    SeaOrmReferenceStore, SeaOrmUserStore,
};
use user_directory::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("USER_DIRECTORY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting User Directory Service...");

    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "user-directory".to_string(),
    };

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Create default admin user if not exists
    create_default_admin(&db, &app_cfg).await;

    // ── Cache ──────────────────────────────────────────────────
    let cache = match RedisDetailCache::connect(&app_cfg.redis.url).await {
        Ok(cache) => cache,
        Err(e) => {
            error!("Failed to connect to Redis at {}: {}", app_cfg.redis.url, e);
            return Err(e.into());
        }
    };
    info!("Redis cache connected: {}", app_cfg.redis.url);

    // ── Stores and directory service ───────────────────────────
    let users = Arc::new(SeaOrmUserStore::new(db.clone()));
    let reference = Arc::new(SeaOrmReferenceStore::new(db.clone()));
    let directory = Arc::new(UserDirectory::new(
        Arc::clone(&users),
        reference,
        Arc::new(cache),
    ));

    // ── REST API server with graceful shutdown ─────────────────
    let router = create_api_router(db.clone(), users, directory, jwt_config);

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }

    info!("User Directory Service shutdown complete");
    Ok(())
}

/// Seed a bootstrap admin when the users table is empty. The account
/// gets the root role and an active status so it can approve the first
/// real registrations.
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, PaginatorTrait, Set};
    use user_directory::infrastructure::crypto::password::hash_password;
    use user_directory::infrastructure::database::entities::user;

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);

    if users_count == 0 {
        info!("Creating default admin user...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let admin = user::ActiveModel {
            id: NotSet,
            username: Set(app_cfg.admin.username.clone()),
            first_name: Set("System".to_string()),
            last_name: Set("Administrator".to_string()),
            email: Set(app_cfg.admin.email.clone()),
            phone: Set(String::new()),
            role_id: Set(1),
            address_id: Set(None),
            agent_id: Set(None),
            company_id: Set(None),
            agent_permission: Set(false),
            status: Set(0),
            password_hash: Set(password_hash),
        };

        match admin.insert(db).await {
            Ok(_) => {
                info!("Default admin created: {}", app_cfg.admin.email);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
