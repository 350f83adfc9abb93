use std::path::Path;

use sqlx::{Sqlite, migrate::Migrator, sqlite::SqlitePoolOptions};

static MIGRATOR: Migrator = sqlx::migrate!(); // defaults to "./migrations"

/// Handle to the payment store.
///
/// Cheap to clone; operations receive it explicitly instead of reaching for
/// process-wide state, so tests can hand them an in-memory store.
#[derive(Debug, Clone)]
pub struct Db(sqlx::Pool<Sqlite>);

/// A recorded payment. Rows are written exactly once and never updated or
/// deleted.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: i64,
    pub name: String,
    /// Amount in minor units of `currency` (cents for USD).
    pub amount_minor: i64,
    pub currency: String,
    /// Always true for stored rows; a payment that fails card validation is
    /// never inserted.
    pub valid: bool,
}

impl Db {
    pub async fn connect() -> sqlx::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").expect("database url to be defined");
        tracing::debug!(%database_url);
        let path = Path::new(
            database_url
                .strip_prefix("sqlite://")
                .expect("url sqlite prefix"),
        );
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .expect("directory is initialized");
        }
        tokio::fs::OpenOptions::new()
            .write(true)
            .truncate(false)
            .create(true)
            .open(path)
            .await
            .expect("open database file");
        let pool = sqlx::Pool::connect(&database_url).await?;
        MIGRATOR.run(&pool).await?;
        tracing::info!("Connected to database");
        Ok(Self(pool))
    }

    /// Open a fresh in-memory store with migrations applied.
    ///
    /// Every pooled `:memory:` connection opens its own database, so the
    /// pool is capped at a single connection.
    pub async fn in_memory() -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self(pool))
    }

    /// Insert a payment row and return its generated identifier in one
    /// statement.
    ///
    /// Recovering the id by re-querying business fields is ambiguous when
    /// two identical payments land at the same time.
    pub async fn insert_payment(
        &self,
        name: &str,
        amount_minor: i64,
        currency: &str,
        valid: bool,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            "INSERT INTO payments (name, amount_minor, currency, valid) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(amount_minor)
        .bind(currency)
        .bind(valid)
        .fetch_one(&self.0)
        .await
    }

    pub async fn payment_by_id(&self, id: i64) -> sqlx::Result<Option<PaymentRecord>> {
        sqlx::query_as("SELECT id, name, amount_minor, currency, valid FROM payments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.0)
            .await
    }
}
