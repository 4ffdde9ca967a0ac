//! Postgres-backed mention storage.
//!
//! One table, three queries: insert, exact-text lookup (the dedup check),
//! and the reverse-chronological listing for the dashboard.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use mentionwatch_common::{Mention, MentionWatchError, NewMention, Sentiment};
use mentionwatch_ingest::MentionStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS mentions (
    id UUID PRIMARY KEY,
    keyword TEXT NOT NULL,
    author TEXT NOT NULL,
    text TEXT NOT NULL,
    sentiment TEXT NOT NULL,
    url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS mentions_text_idx ON mentions (text);
CREATE INDEX IF NOT EXISTS mentions_created_at_idx ON mentions (created_at DESC);
"#;

#[derive(Clone)]
pub struct PgMentionStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct MentionRow {
    id: Uuid,
    keyword: String,
    author: String,
    text: String,
    sentiment: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<MentionRow> for Mention {
    fn from(row: MentionRow) -> Self {
        Mention {
            id: row.id,
            keyword: row.keyword,
            author: row.author,
            text: row.text,
            // Rows predating the closed enum may carry arbitrary labels;
            // parsing coerces them the same way ingestion does.
            sentiment: Sentiment::parse(Some(&row.sentiment)),
            url: row.url,
            created_at: row.created_at,
        }
    }
}

impl PgMentionStore {
    /// Connect to Postgres and make sure the mentions table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&pool).await?;
        }

        tracing::info!("Connected to Postgres, mentions schema ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl MentionStore for PgMentionStore {
    async fn find_by_text(&self, text: &str) -> Result<Option<Mention>> {
        let row: Option<MentionRow> = sqlx::query_as(
            r#"
            SELECT id, keyword, author, text, sentiment, url, created_at
            FROM mentions
            WHERE text = $1
            LIMIT 1
            "#,
        )
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Mention::from))
    }

    async fn insert(&self, mention: &NewMention) -> Result<Mention> {
        let stored = Mention {
            id: Uuid::new_v4(),
            keyword: mention.keyword.clone(),
            author: mention.author.clone(),
            text: mention.text.clone(),
            sentiment: mention.sentiment,
            url: mention.url.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO mentions (id, keyword, author, text, sentiment, url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(stored.id)
        .bind(&stored.keyword)
        .bind(&stored.author)
        .bind(&stored.text)
        .bind(stored.sentiment.as_str())
        .bind(&stored.url)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(stored)
    }

    async fn list_recent(&self) -> Result<Vec<Mention>> {
        let rows: Vec<MentionRow> = sqlx::query_as(
            r#"
            SELECT id, keyword, author, text, sentiment, url, created_at
            FROM mentions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Mention::from).collect())
    }
}

fn db_err(e: sqlx::Error) -> anyhow::Error {
    MentionWatchError::Database(e.to_string()).into()
}
