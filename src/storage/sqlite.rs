use chrono::SecondsFormat;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::error::Result;
use crate::models::{FeedbackRecord, NewFeedback, Theme, ThemeSet};

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self { conn };
        storage.init_db()?;
        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                body TEXT,
                category TEXT,
                contact TEXT,
                tags TEXT,
                sentiment REAL,
                created_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_feedback_created_at ON feedback(created_at);
            "#,
        )?;

        Ok(())
    }

    /// Timestamps are written fixed-width so text ordering matches time ordering.
    pub fn insert_feedback(&self, feedback: &NewFeedback) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO feedback (title, body, category, contact, tags, sentiment, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                feedback.title,
                feedback.body,
                feedback.category,
                feedback.contact,
                join_tags(&feedback.tags),
                feedback.sentiment,
                feedback.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a batch in one transaction; ids come back in input order.
    pub fn insert_many(&self, batch: &[NewFeedback]) -> Result<Vec<i64>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(batch.len());
        for feedback in batch {
            ids.push(self.insert_feedback(feedback)?);
        }
        tx.commit()?;
        Ok(ids)
    }

    /// All records, newest first.
    pub fn list_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        self.query_records(
            r#"
            SELECT id, title, body, category, contact, tags, sentiment, created_at
            FROM feedback
            ORDER BY created_at DESC, id DESC
            "#,
        )
    }

    /// All records in submission order, oldest first.
    pub fn list_feedback_oldest_first(&self) -> Result<Vec<FeedbackRecord>> {
        self.query_records(
            r#"
            SELECT id, title, body, category, contact, tags, sentiment, created_at
            FROM feedback
            ORDER BY created_at ASC, id ASC
            "#,
        )
    }

    fn query_records(&self, sql: &str) -> Result<Vec<FeedbackRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt.query_map([], row_to_record)?;
        records.collect::<std::result::Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FeedbackRecord> {
    let tags_str: Option<String> = row.get(5)?;
    let created_at_str: String = row.get(7)?;

    let tags = split_tags(tags_str.as_deref().unwrap_or(""))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

    Ok(FeedbackRecord {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        body: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        category: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        contact: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        tags,
        sentiment: row.get::<_, Option<f64>>(6)?.unwrap_or(0.0),
        created_at,
    })
}

fn join_tags(tags: &ThemeSet) -> String {
    tags.iter().map(Theme::as_str).collect::<Vec<_>>().join(",")
}

fn split_tags(raw: &str) -> Result<ThemeSet> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse::<Theme>)
        .collect()
}
