//! PostgreSQL tip repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::PgPool;
use tipline_core::{NewTip, NotificationTarget, Tip};

use crate::error::StorageError;
use crate::seed::SeedTip;
use crate::traits::{RegistrationStore, TipStore};

type TipRow = (String, String, String, DateTime<Utc>);

/// Tip repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTipStore {
    pool: PgPool,
}

impl PgTipStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url).await?;
        crate::migrations::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

fn row_to_tip(row: TipRow) -> Tip {
    let (text, url, category, created_at) = row;
    Tip { text, url, category, created_at }
}

async fn fetch_matching_tips(
    pool: &PgPool,
    category: Option<&str>,
) -> Result<Vec<Tip>, StorageError> {
    let rows = match category {
        Some(cat) => {
            sqlx::query_as::<_, TipRow>(
                "SELECT tip, url, category, created_at FROM tips WHERE category = $1",
            )
            .bind(cat)
            .fetch_all(pool)
            .await?
        },
        None => {
            sqlx::query_as::<_, TipRow>("SELECT tip, url, category, created_at FROM tips")
                .fetch_all(pool)
                .await?
        },
    };
    Ok(rows.into_iter().map(row_to_tip).collect())
}

#[async_trait]
impl TipStore for PgTipStore {
    async fn random_tip(&self, category: Option<&str>) -> Result<Option<Tip>, StorageError> {
        let tips = fetch_matching_tips(&self.pool, category).await?;
        if tips.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..tips.len());
        Ok(tips.into_iter().nth(index))
    }

    async fn latest_tip(&self) -> Result<Option<Tip>, StorageError> {
        let row = sqlx::query_as::<_, TipRow>(
            "SELECT tip, url, category, created_at FROM tips ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(row_to_tip))
    }

    async fn categories(&self) -> Result<Vec<String>, StorageError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM tips").fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    async fn add_tip(&self, tip: NewTip) -> Result<Tip, StorageError> {
        let row = sqlx::query_as::<_, TipRow>(
            r#"
            INSERT INTO tips (tip, url, category)
            VALUES ($1, $2, $3)
            RETURNING tip, url, category, created_at
            "#,
        )
        .bind(&tip.text)
        .bind(&tip.url)
        .bind(&tip.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_tip(row))
    }

    async fn restore(&self, seed: &[SeedTip]) -> Result<usize, StorageError> {
        // Delete-then-reseed without a transaction: a concurrent read may
        // observe an empty or partial collection (accepted race).
        sqlx::query("DELETE FROM tips").execute(&self.pool).await?;
        for tip in seed {
            sqlx::query("INSERT INTO tips (tip, url, category) VALUES ($1, $2, $3)")
                .bind(&tip.tip)
                .bind(&tip.url)
                .bind(&tip.category)
                .execute(&self.pool)
                .await?;
        }
        tracing::info!(count = seed.len(), "tips DB restored from seed set");
        Ok(seed.len())
    }
}

#[async_trait]
impl RegistrationStore for PgTipStore {
    async fn register_for_update(
        &self,
        user_id: &str,
        intent: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, intent)
            VALUES ($1, $2)
            ON CONFLICT (user_id, intent) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(intent)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn registered_targets(
        &self,
        intent: &str,
    ) -> Result<Vec<NotificationTarget>, StorageError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT user_id, intent FROM users WHERE intent = $1")
                .bind(intent)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(user_id, intent)| NotificationTarget { user_id, intent })
            .collect())
    }
}
