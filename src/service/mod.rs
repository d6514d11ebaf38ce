use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    /// Rejected input, surfaced as 400 with the message verbatim.
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<dyn NoteStore + Send>>,
}

// Title and content must be non-empty before anything reaches the store.
// Absence of the target row is reported as Ok(None), not as an error.
fn validate(title: &str, content: &str) -> Result<(), NoteServiceError> {
    if title.is_empty() || content.is_empty() {
        return Err(NoteServiceError::Validation(
            "Title and content are required",
        ));
    }

    Ok(())
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<dyn NoteStore + Send>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        validate(&request.title, &request.content)?;

        self.repo
            .lock()
            .await
            .create_note(request.title, request.content)
            .await
            .map(NoteResponse::from)
            .map_err(Into::into)
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, NoteServiceError> {
        validate(&request.title, &request.content)?;

        self.repo
            .lock()
            .await
            .update_note(id, request.title, request.content)
            .await
            .map(|note| note.map(NoteResponse::from))
            .map_err(Into::into)
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, NoteServiceError> {
        self.repo
            .lock()
            .await
            .delete_note(id)
            .await
            .map(|deleted| deleted.is_some())
            .map_err(Into::into)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, NoteServiceError> {
        self.repo
            .lock()
            .await
            .get_one_note(id)
            .await
            .map(|note| note.map(NoteResponse::from))
            .map_err(Into::into)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, NoteServiceError> {
        self.repo
            .lock()
            .await
            .get_all_notes()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
            .map_err(Into::into)
    }
}
