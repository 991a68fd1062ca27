use crate::config::DatabaseConfig;
use crate::error::Error;
use anyhow::{anyhow, Result};
use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = Object<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Connection pool owned by the composition root and shared by the stores.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create the pool, verify connectivity and apply pending migrations.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

        let pool = Pool::builder(manager)
            .max_size(config.max_connections as usize)
            .build()?;

        let db = Self { pool };
        db.initialize(config).await?;

        Ok(db)
    }

    async fn initialize(&self, config: &DatabaseConfig) -> Result<()> {
        let _conn = self
            .conn()
            .await
            .map_err(|e| anyhow!("failed to reach database: {e}"))?;
        info!("Successfully connected to the database");

        self.run_migrations(config)?;

        Ok(())
    }

    /// Migrations run over a synchronous connection at startup only.
    fn run_migrations(&self, config: &DatabaseConfig) -> Result<()> {
        let mut conn = PgConnection::establish(&config.url)?;

        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("failed to run migrations: {e}"))?;
        info!("Database migrations applied successfully");

        Ok(())
    }

    /// Get a database connection from the pool.
    pub async fn conn(&self) -> Result<DbConnection, Error> {
        self.pool
            .get()
            .await
            .map_err(|e| Error::Unavailable(e.to_string()))
    }

    /// Get the database connection pool reference.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
