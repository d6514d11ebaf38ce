mod embedded;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::Utc;
use embedded::migrations;
use tokio_postgres::{Client, NoTls, Row};

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("storage backend unavailable")]
    Unavailable,
}

/// Persistence boundary for notes. Absence of a row is a normal outcome
/// reported as `None`, never as an error.
#[async_trait]
pub trait NoteStore {
    async fn create_note(&mut self, title: String, content: String) -> Result<Note, StoreError>;

    async fn update_note(
        &mut self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Note>, StoreError>;

    /// Returns the deleted note's id as confirmation.
    async fn delete_note(&mut self, id: i64) -> Result<Option<i64>, StoreError>;

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, StoreError>;

    /// All notes, newest first. Same-millisecond inserts fall back to
    /// reverse insertion order.
    async fn get_all_notes(&mut self) -> Result<Vec<Note>, StoreError>;
}

pub struct Repository {
    client: Client,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl NoteStore for Repository {
    // Timestamps are assigned here rather than by a column default so every
    // write path is guaranteed to set them.
    async fn create_note(&mut self, title: String, content: String) -> Result<Note, StoreError> {
        let now = Utc::now().timestamp_millis();

        let row = self.client.query_one(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES ($1, $2, $3, $3) \
             RETURNING id, title, content, created_at, updated_at",
            &[&title, &content, &now],
        ).await?;

        Ok(note_from_row(&row))
    }

    async fn update_note(
        &mut self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Note>, StoreError> {
        let now = Utc::now().timestamp_millis();

        let row = self.client.query_opt(
            "UPDATE notes SET title = $1, content = $2, updated_at = $3 WHERE id = $4 \
             RETURNING id, title, content, created_at, updated_at",
            &[&title, &content, &now, &id],
        ).await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_note(&mut self, id: i64) -> Result<Option<i64>, StoreError> {
        let row = self
            .client
            .query_opt("DELETE FROM notes WHERE id = $1 RETURNING id", &[&id])
            .await?;

        Ok(row.map(|row| row.get("id")))
    }

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn get_all_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY created_at DESC, id DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }
}
