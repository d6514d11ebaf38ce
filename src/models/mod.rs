#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Epoch milliseconds, assigned once on insert.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}
