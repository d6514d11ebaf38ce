//! In-memory store used by the tests.

use async_trait::async_trait;

use super::{NoteStore, StoreError};
use crate::models::Note;

/// Backing the tests only, so timestamps come from a millisecond tick that
/// advances on every mutation. That keeps `created_at` ordering and the
/// `updated_at > created_at` relation deterministic regardless of how fast
/// the test runs.
pub struct MemRepository {
    notes: Vec<Note>,
    next_id: i64,
    clock_ms: i64,
    fail: bool,
}

impl MemRepository {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            clock_ms: 1_700_000_000_000,
            fail: false,
        }
    }

    /// Make every subsequent operation fail, simulating a lost backend.
    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    fn tick(&mut self) -> i64 {
        self.clock_ms += 1;
        self.clock_ms
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NoteStore for MemRepository {
    async fn create_note(&mut self, title: String, content: String) -> Result<Note, StoreError> {
        self.check()?;

        let now = self.tick();
        let note = Note {
            id: self.next_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.notes.push(note.clone());

        Ok(note)
    }

    async fn update_note(
        &mut self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Note>, StoreError> {
        self.check()?;

        let now = self.tick();
        Ok(self.notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = title;
            note.content = content;
            note.updated_at = now;
            note.clone()
        }))
    }

    async fn delete_note(&mut self, id: i64) -> Result<Option<i64>, StoreError> {
        self.check()?;

        let found = self.notes.iter().any(|note| note.id == id);
        self.notes.retain(|note| note.id != id);

        Ok(found.then_some(id))
    }

    async fn get_one_note(&mut self, id: i64) -> Result<Option<Note>, StoreError> {
        self.check()?;

        Ok(self.notes.iter().find(|note| note.id == id).cloned())
    }

    async fn get_all_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        self.check()?;

        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(notes)
    }
}
